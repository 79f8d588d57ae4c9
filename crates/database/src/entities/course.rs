use models::Sex;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub cost: i32,
    pub number_hours: i32,
    pub date_birth: Date,
    pub nationality: String,
    pub salary: f64,
    pub sex: Sex,
    pub is_qualified: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::edition::Entity")]
    Editions,
}

impl Related<super::edition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Editions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
