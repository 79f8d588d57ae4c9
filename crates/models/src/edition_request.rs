use crate::{dates::parse_date, session_period::SessionPeriod};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

/// An edition as submitted by a client, before any validation.
///
/// Every field is kept as raw JSON so that a missing value and a value of the
/// wrong type can be told apart and reported with the right message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditionRequest {
    #[serde(default)]
    pub code_id: Option<Value>,
    #[serde(default)]
    pub course_id: Option<Value>,
    #[serde(default)]
    pub employee_id: Option<Value>,
    #[serde(default)]
    pub place: Option<Value>,
    #[serde(default)]
    pub session_period: Option<Value>,
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub students: Option<Value>,
}

/// A structurally valid edition with its values coerced to their types
#[derive(Debug, Clone, PartialEq)]
pub struct EditionPayload {
    pub code_id: i64,
    pub course_id: i32,
    pub employee_id: i32,
    pub place: String,
    pub session_period: SessionPeriod,
    pub date: NaiveDate,
    /// Enrolled employees, in submission order, without repeats
    pub students: Vec<i32>,
}

/// The first structural rule an [`EditionRequest`] breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("El código de la edición es requerido")]
    CodeIdRequired,
    #[error("El código de la edición solo puede tener números")]
    CodeIdNotNumeric,
    #[error("El identificador del curso es requerido")]
    CourseIdRequired,
    #[error("El identificador del curso solo puede tener números")]
    CourseIdNotNumeric,
    #[error("El identificador del empleado es requerido")]
    EmployeeIdRequired,
    #[error("El identificador del empleado solo puede tener números")]
    EmployeeIdNotNumeric,
    #[error("El lugar es un campo requerido")]
    PlaceRequired,
    #[error("El lugar debe ser una cadena de texto")]
    PlaceNotText,
    #[error("La sesión es un campo requerido")]
    SessionPeriodRequired,
    #[error("La sesión solo puede tomar los valores de tiempo completo, mañana o tarde")]
    SessionPeriodInvalid,
    #[error("La fecha es un campo requerido")]
    DateRequired,
    #[error("La fecha debe ser un formato de fecha válido")]
    DateInvalid,
    #[error("Los estudiantes deben ser una lista de identificadores numéricos")]
    StudentsInvalid,
}

impl EditionRequest {
    /// Checks the structural rules field by field and stops at the first one
    /// that fails.
    pub fn validate(&self) -> Result<EditionPayload, StructuralError> {
        use StructuralError::*;

        let code_id = integer(required(&self.code_id, CodeIdRequired)?).ok_or(CodeIdNotNumeric)?;
        let course_id = identifier(required(&self.course_id, CourseIdRequired)?)
            .ok_or(CourseIdNotNumeric)?;
        let employee_id = identifier(required(&self.employee_id, EmployeeIdRequired)?)
            .ok_or(EmployeeIdNotNumeric)?;

        let place = match required(&self.place, PlaceRequired)? {
            Value::String(place) => place.trim().to_string(),
            _ => return Err(PlaceNotText),
        };

        let session_period = required(&self.session_period, SessionPeriodRequired)?
            .as_str()
            .and_then(|period| period.parse::<SessionPeriod>().ok())
            .ok_or(SessionPeriodInvalid)?;

        let date = required(&self.date, DateRequired)?
            .as_str()
            .and_then(parse_date)
            .ok_or(DateInvalid)?;

        let students = match &self.students {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(ids)) => {
                let mut seen = HashSet::new();
                let mut students = Vec::with_capacity(ids.len());
                for id in ids {
                    let id = identifier(id).ok_or(StudentsInvalid)?;
                    if seen.insert(id) {
                        students.push(id);
                    }
                }
                students
            }
            Some(_) => return Err(StudentsInvalid),
        };

        Ok(EditionPayload {
            code_id,
            course_id,
            employee_id,
            place,
            session_period,
            date,
            students,
        })
    }
}

/// Absent, `null`, blank strings and empty lists all count as missing
fn required(value: &Option<Value>, missing: StructuralError) -> Result<&Value, StructuralError> {
    match value {
        None | Some(Value::Null) => Err(missing),
        Some(Value::String(s)) if s.trim().is_empty() => Err(missing),
        Some(Value::Array(items)) if items.is_empty() => Err(missing),
        Some(value) => Ok(value),
    }
}

/// A whole number given either as a JSON number or as a numeric string
fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
                .map(|n| n as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn identifier(value: &Value) -> Option<i32> {
    integer(value).and_then(|n| i32::try_from(n).ok())
}
