use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // A course cannot repeat an edition code
        manager
            .create_index(
                Index::create()
                    .name("idx-editions-code_id-course_id")
                    .table(Editions::Table)
                    .col(Editions::CodeId)
                    .col(Editions::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ...nor hold two editions on the same day
        manager
            .create_index(
                Index::create()
                    .name("idx-editions-date-course_id")
                    .table(Editions::Table)
                    .col(Editions::Date)
                    .col(Editions::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index on the instructor for reverse lookups
        manager
            .create_index(
                Index::create()
                    .name("idx-editions-employee_id")
                    .table(Editions::Table)
                    .col(Editions::EmployeeId)
                    .to_owned(),
            )
            .await?;

        // The roster primary key leads with employee_id, so edition lookups need their own index
        manager
            .create_index(
                Index::create()
                    .name("idx-employee_editions-edition_id")
                    .table(EmployeeEditions::Table)
                    .col(EmployeeEditions::EditionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table) in [
            ("idx-editions-code_id-course_id", Editions::Table),
            ("idx-editions-date-course_id", Editions::Table),
            ("idx-editions-employee_id", Editions::Table),
        ] {
            manager
                .drop_index(Index::drop().name(name).table(table).to_owned())
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name("idx-employee_editions-edition_id")
                    .table(EmployeeEditions::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Editions {
    Table,
    CodeId,
    CourseId,
    EmployeeId,
    Date,
}

#[derive(Iden)]
enum EmployeeEditions {
    Table,
    EditionId,
}
