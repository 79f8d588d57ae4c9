use models::SessionPeriod;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "editions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Unique per course
    pub code_id: i64,
    pub course_id: i32,
    /// The instructor
    pub employee_id: i32,
    pub place: String,
    pub session_period: SessionPeriod,
    /// Unique per course
    pub date: Date,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id",
        on_delete = "Restrict"
    )]
    Professor,
    #[sea_orm(has_many = "super::employee_edition::Entity")]
    EmployeeEditions,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

// The instructor; enrolled students go through `employee_edition`
impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl Related<super::employee_edition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeEditions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
