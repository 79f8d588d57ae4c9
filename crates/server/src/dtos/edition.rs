use database::{
    entities::{courses, employees},
    services::EditionDetails,
};
use models::dates::format_date;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct EditionResponse {
    pub id: i32,
    pub code_id: i64,
    pub course: CourseResponse,
    /// The instructor
    pub employee: EmployeeResponse,
    pub place: String,
    #[schema(example = "Mañana")]
    pub session_period: String,
    /// Day/month/year
    #[schema(example = "01/03/2024")]
    pub date: String,
    pub students: Vec<EmployeeResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub cost: i32,
    pub number_hours: i32,
    pub date_birth: String,
    pub nationality: String,
    pub salary: f64,
    pub sex: String,
    pub is_qualified: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeResponse {
    pub id: i32,
    pub name: String,
    pub last_names: String,
    pub address: String,
    pub phone: String,
    pub nif: String,
    pub date_birth: String,
    pub nationality: String,
    pub salary: f64,
    pub sex: String,
    pub is_qualified: bool,
}

/// Body of a successful create or update
#[derive(Debug, Serialize, ToSchema)]
pub struct EditionEnvelope {
    pub message: String,
    pub edition: EditionResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub errors: String,
}

/// Shape of a create/update body, for the API documentation. Handlers read
/// the raw [`models::EditionRequest`] so that type errors get their own messages.
#[allow(dead_code)]
#[derive(Debug, Deserialize, ToSchema)]
pub struct EditionBody {
    pub code_id: i64,
    pub course_id: i32,
    pub employee_id: i32,
    pub place: String,
    #[schema(example = "Tiempo Completo")]
    pub session_period: String,
    #[schema(example = "2024-03-01")]
    pub date: String,
    pub students: Vec<i32>,
}

impl From<EditionDetails> for EditionResponse {
    fn from(details: EditionDetails) -> Self {
        let EditionDetails {
            edition,
            course,
            professor,
            students,
        } = details;

        Self {
            id: edition.id,
            code_id: edition.code_id,
            course: course.into(),
            employee: professor.into(),
            place: edition.place,
            session_period: edition.session_period.to_string(),
            date: format_date(edition.date),
            students: students.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<courses::Model> for CourseResponse {
    fn from(course: courses::Model) -> Self {
        Self {
            id: course.id,
            name: course.name,
            description: course.description,
            cost: course.cost,
            number_hours: course.number_hours,
            date_birth: format_date(course.date_birth),
            nationality: course.nationality,
            salary: course.salary,
            sex: course.sex.to_string(),
            is_qualified: course.is_qualified,
        }
    }
}

impl From<employees::Model> for EmployeeResponse {
    fn from(employee: employees::Model) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            last_names: employee.last_names,
            address: employee.address,
            phone: employee.phone,
            nif: employee.nif,
            date_birth: format_date(employee.date_birth),
            nationality: employee.nationality,
            salary: employee.salary,
            sex: employee.sex.to_string(),
            is_qualified: employee.is_qualified,
        }
    }
}
