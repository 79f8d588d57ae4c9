use crate::entities::{courses, employees};
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QuerySelect};

/// What edition validation needs to know about an employee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeSummary {
    pub id: i32,
    pub is_qualified: bool,
}

/// Read-only access to employees, by id
#[async_trait]
pub trait EmployeeLookup: Send + Sync {
    async fn find_employee(&self, id: i32) -> Result<Option<EmployeeSummary>, DbErr>;
}

/// Read-only access to courses, by id
#[async_trait]
pub trait CourseLookup: Send + Sync {
    async fn course_exists(&self, id: i32) -> Result<bool, DbErr>;
}

#[async_trait]
impl EmployeeLookup for DatabaseConnection {
    async fn find_employee(&self, id: i32) -> Result<Option<EmployeeSummary>, DbErr> {
        let row = employees::Entity::find_by_id(id)
            .select_only()
            .column(employees::Column::Id)
            .column(employees::Column::IsQualified)
            .into_tuple::<(i32, bool)>()
            .one(self)
            .await?;

        Ok(row.map(|(id, is_qualified)| EmployeeSummary { id, is_qualified }))
    }
}

#[async_trait]
impl CourseLookup for DatabaseConnection {
    async fn course_exists(&self, id: i32) -> Result<bool, DbErr> {
        let count = courses::Entity::find_by_id(id).count(self).await?;
        Ok(count > 0)
    }
}
