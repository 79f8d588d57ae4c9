use models::Sex;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub last_names: String,
    pub address: String,
    pub phone: String, // 8 characters
    pub nif: String,   // 10 characters
    pub date_birth: Date,
    pub nationality: String,
    pub salary: f64,
    pub sex: Sex,
    /// Only qualified employees may teach an edition
    pub is_qualified: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Editions this employee teaches
    #[sea_orm(has_many = "super::edition::Entity")]
    Editions,
    #[sea_orm(has_many = "super::employee_edition::Entity")]
    EmployeeEditions,
}

impl Related<super::edition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Editions.def()
    }
}

impl Related<super::employee_edition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeEditions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
