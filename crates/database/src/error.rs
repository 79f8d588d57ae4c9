use models::StructuralError;
use sea_orm::{DbErr, SqlErr};
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

/// Why a submitted edition was rejected before reaching storage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error("El empleado seleccionado no existe")]
    EmployeeNotFound(i32),
    #[error("El empleado seleccionado no está calificado para dar clases")]
    InstructorNotQualified(i32),
    #[error("El curso seleccionado no existe")]
    CourseNotFound(i32),
    #[error("Hay estudiantes seleccionados que no existen")]
    StudentNotFound(i32),
    #[error("El profesor seleccionado no puede pertenecer al grupo de estudiantes")]
    InstructorCannotBeStudent(i32),
    /// A referenced row disappeared between the checks and the write
    #[error("El curso, el empleado o algún estudiante seleccionado ya no existe")]
    ReferenceGone,
}

/// Which unique key of `editions` a write collided with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKey {
    /// (code_id, course_id)
    Code,
    /// (date, course_id)
    Date,
    /// Storage did not say which one
    Unknown,
}

impl DuplicateKey {
    /// Reads the violated key out of the driver message.
    ///
    /// Postgres names the index (`idx-editions-date-course_id`), SQLite lists
    /// the columns (`editions.date, editions.course_id`).
    pub fn from_message(message: &str) -> Self {
        if message.contains("code_id") {
            Self::Code
        } else if message.contains("date") {
            Self::Date
        } else {
            Self::Unknown
        }
    }
}

impl Display for DuplicateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Code => "El curso seleccionado ya tiene otra edición con el mismo código",
            Self::Date => "El curso seleccionado ya tiene otra edición en la misma fecha",
            Self::Unknown => {
                "El curso seleccionado ya tiene otra edición con el mismo código o fecha o ambos"
            }
        })
    }
}

#[derive(Debug, Error)]
pub enum EditionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Duplicate(DuplicateKey),
    #[error("La edición {0} no existe")]
    NotFound(i32),
    #[error("database error: {0}")]
    Database(DbErr),
}

impl From<StructuralError> for EditionError {
    fn from(err: StructuralError) -> Self {
        Self::Validation(err.into())
    }
}

impl From<DbErr> for EditionError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => {
                Self::Duplicate(DuplicateKey::from_message(&message))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                Self::Validation(ValidationError::ReferenceGone)
            }
            _ => Self::Database(err),
        }
    }
}
