use crate::entities::{courses, editions, employee_editions, employees};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::collections::{HashMap, HashSet};

/// An edition with every related record it is presented with
#[derive(Debug, Clone, PartialEq)]
pub struct EditionDetails {
    pub edition: editions::Model,
    pub course: courses::Model,
    pub professor: employees::Model,
    /// Enrolled students, ordered by id
    pub students: Vec<employees::Model>,
}

/// Load the relations of a single edition
pub async fn load_details<C: ConnectionTrait>(
    conn: &C,
    edition: editions::Model,
) -> Result<EditionDetails, DbErr> {
    let edition_id = edition.id;
    load_details_batch(conn, vec![edition])
        .await?
        .pop()
        .ok_or_else(|| DbErr::RecordNotFound(format!("edition {edition_id}")))
}

/// Load the relations of many editions at once, keeping their order
pub async fn load_details_batch<C: ConnectionTrait>(
    conn: &C,
    editions: Vec<editions::Model>,
) -> Result<Vec<EditionDetails>, DbErr> {
    if editions.is_empty() {
        return Ok(vec![]);
    }

    let edition_ids: Vec<i32> = editions.iter().map(|e| e.id).collect();
    let course_ids: HashSet<i32> = editions.iter().map(|e| e.course_id).collect();
    let professor_ids: HashSet<i32> = editions.iter().map(|e| e.employee_id).collect();

    // Batch fetch courses and instructors
    let courses: HashMap<i32, courses::Model> = courses::Entity::find()
        .filter(courses::Column::Id.is_in(course_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|course| (course.id, course))
        .collect();

    let professors: HashMap<i32, employees::Model> = employees::Entity::find()
        .filter(employees::Column::Id.is_in(professor_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|employee| (employee.id, employee))
        .collect();

    // Batch fetch all roster rows together with their students
    let roster: Vec<(employee_editions::Model, employees::Model)> =
        employee_editions::Entity::find()
            .filter(employee_editions::Column::EditionId.is_in(edition_ids))
            .order_by_asc(employee_editions::Column::EmployeeId)
            .find_also_related(employees::Entity)
            .all(conn)
            .await?
            .into_iter()
            .filter_map(|(member, student)| student.map(|s| (member, s)))
            .collect();

    let mut students_by_edition: HashMap<i32, Vec<employees::Model>> = HashMap::new();
    for (member, student) in roster {
        students_by_edition
            .entry(member.edition_id)
            .or_default()
            .push(student);
    }

    // Build the final result structure
    let mut results = Vec::with_capacity(editions.len());
    for edition in editions {
        let course = courses.get(&edition.course_id).cloned().ok_or_else(|| {
            DbErr::RecordNotFound(format!(
                "course {} of edition {}",
                edition.course_id, edition.id
            ))
        })?;
        let professor = professors
            .get(&edition.employee_id)
            .cloned()
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!(
                    "instructor {} of edition {}",
                    edition.employee_id, edition.id
                ))
            })?;
        let students = students_by_edition.remove(&edition.id).unwrap_or_default();

        results.push(EditionDetails {
            edition,
            course,
            professor,
            students,
        });
    }

    Ok(results)
}
