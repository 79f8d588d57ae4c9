use sea_orm_migration::prelude::*;

const SEXES: [&str; 2] = ["Masculino", "Femenino"];
const SESSION_PERIODS: [&str; 3] = ["Tiempo Completo", "Mañana", "Tarde"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Description).string().not_null())
                    .col(ColumnDef::new(Courses::Cost).integer().not_null())
                    .col(ColumnDef::new(Courses::NumberHours).integer().not_null())
                    .col(ColumnDef::new(Courses::DateBirth).date().not_null())
                    .col(ColumnDef::new(Courses::Nationality).string().not_null())
                    .col(ColumnDef::new(Courses::Salary).double().not_null())
                    .col(
                        ColumnDef::new(Courses::Sex)
                            .string()
                            .not_null()
                            .check(Expr::col(Courses::Sex).is_in(SEXES)),
                    )
                    .col(
                        ColumnDef::new(Courses::IsQualified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp(Courses::CreatedAt))
                    .col(timestamp(Courses::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create employees table
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::Name).string_len(55).not_null())
                    .col(ColumnDef::new(Employees::LastNames).string_len(55).not_null())
                    .col(ColumnDef::new(Employees::Address).string().not_null())
                    .col(ColumnDef::new(Employees::Phone).char_len(8).not_null())
                    .col(ColumnDef::new(Employees::Nif).char_len(10).not_null())
                    .col(ColumnDef::new(Employees::DateBirth).date().not_null())
                    .col(ColumnDef::new(Employees::Nationality).string().not_null())
                    .col(ColumnDef::new(Employees::Salary).double().not_null())
                    .col(
                        ColumnDef::new(Employees::Sex)
                            .string()
                            .not_null()
                            .check(Expr::col(Employees::Sex).is_in(SEXES)),
                    )
                    .col(
                        ColumnDef::new(Employees::IsQualified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp(Employees::CreatedAt))
                    .col(timestamp(Employees::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create editions table
        manager
            .create_table(
                Table::create()
                    .table(Editions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Editions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Editions::CodeId).big_integer().not_null())
                    .col(ColumnDef::new(Editions::CourseId).integer().not_null())
                    .col(ColumnDef::new(Editions::EmployeeId).integer().not_null())
                    .col(ColumnDef::new(Editions::Place).string().not_null())
                    .col(
                        ColumnDef::new(Editions::SessionPeriod)
                            .string()
                            .not_null()
                            .check(Expr::col(Editions::SessionPeriod).is_in(SESSION_PERIODS)),
                    )
                    .col(ColumnDef::new(Editions::Date).date().not_null())
                    .col(timestamp(Editions::CreatedAt))
                    .col(timestamp(Editions::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-editions-course_id")
                            .from(Editions::Table, Editions::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    // Instructors cannot be deleted while they teach an edition
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-editions-employee_id")
                            .from(Editions::Table, Editions::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create employee_editions junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(EmployeeEditions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployeeEditions::EmployeeId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeeEditions::EditionId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(EmployeeEditions::EmployeeId)
                            .col(EmployeeEditions::EditionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-employee_editions-employee_id")
                            .from(EmployeeEditions::Table, EmployeeEditions::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-employee_editions-edition_id")
                            .from(EmployeeEditions::Table, EmployeeEditions::EditionId)
                            .to(Editions::Table, Editions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmployeeEditions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Editions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        Ok(())
    }
}

fn timestamp<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .date_time()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Name,
    Description,
    Cost,
    NumberHours,
    DateBirth,
    Nationality,
    Salary,
    Sex,
    IsQualified,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
    Name,
    LastNames,
    Address,
    Phone,
    Nif,
    DateBirth,
    Nationality,
    Salary,
    Sex,
    IsQualified,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Editions {
    Table,
    Id,
    CodeId,
    CourseId,
    EmployeeId,
    Place,
    SessionPeriod,
    Date,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum EmployeeEditions {
    Table,
    EmployeeId,
    EditionId,
}
