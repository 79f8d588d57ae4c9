use crate::{
    error::{EditionError, ValidationError},
    services::lookup::{CourseLookup, EmployeeLookup},
};
use models::{EditionPayload, EditionRequest};

/// Validates a submitted edition: structure first, then the referenced
/// instructor, course and students. The first failing rule is reported.
pub async fn validate_edition<E, C>(
    request: &EditionRequest,
    employees: &E,
    courses: &C,
) -> Result<EditionPayload, EditionError>
where
    E: EmployeeLookup + ?Sized,
    C: CourseLookup + ?Sized,
{
    let payload = request.validate()?;
    check_references(&payload, employees, courses).await?;
    Ok(payload)
}

/// Checks the records a structurally valid payload points at
pub async fn check_references<E, C>(
    payload: &EditionPayload,
    employees: &E,
    courses: &C,
) -> Result<(), EditionError>
where
    E: EmployeeLookup + ?Sized,
    C: CourseLookup + ?Sized,
{
    let instructor = employees
        .find_employee(payload.employee_id)
        .await?
        .ok_or(ValidationError::EmployeeNotFound(payload.employee_id))?;

    if !instructor.is_qualified {
        return Err(ValidationError::InstructorNotQualified(instructor.id).into());
    }

    if !courses.course_exists(payload.course_id).await? {
        return Err(ValidationError::CourseNotFound(payload.course_id).into());
    }

    for &student in &payload.students {
        if employees.find_employee(student).await?.is_none() {
            return Err(ValidationError::StudentNotFound(student).into());
        }
        if student == instructor.id {
            return Err(ValidationError::InstructorCannotBeStudent(student).into());
        }
    }

    Ok(())
}
