use crate::entities::employee_editions;
use log::debug;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
};
use std::collections::HashSet;

/// Students added to and removed from a roster by one operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterChanges {
    pub attached: Vec<i32>,
    pub detached: Vec<i32>,
}

/// Adds the given students to an edition's roster, keeping everyone already enrolled
pub async fn attach<C: ConnectionTrait>(
    conn: &C,
    edition_id: i32,
    students: &[i32],
) -> Result<RosterChanges, DbErr> {
    let enrolled = enrolled_students(conn, edition_id).await?;
    let attached = missing_from(&enrolled, students);

    insert_members(conn, edition_id, &attached).await?;

    debug!("Attached {} students to edition {edition_id}", attached.len());
    Ok(RosterChanges {
        attached,
        detached: Vec::new(),
    })
}

/// Makes an edition's roster exactly the given students: missing ones are
/// added, absent ones removed, the rest left untouched
pub async fn sync<C: ConnectionTrait>(
    conn: &C,
    edition_id: i32,
    students: &[i32],
) -> Result<RosterChanges, DbErr> {
    let enrolled = enrolled_students(conn, edition_id).await?;
    let wanted: HashSet<i32> = students.iter().copied().collect();

    let mut detached: Vec<i32> = enrolled.difference(&wanted).copied().collect();
    detached.sort_unstable();
    let attached = missing_from(&enrolled, students);

    if !detached.is_empty() {
        employee_editions::Entity::delete_many()
            .filter(employee_editions::Column::EditionId.eq(edition_id))
            .filter(employee_editions::Column::EmployeeId.is_in(detached.clone()))
            .exec(conn)
            .await?;
    }
    insert_members(conn, edition_id, &attached).await?;

    debug!(
        "Synced roster of edition {edition_id}: {} attached, {} detached",
        attached.len(),
        detached.len()
    );
    Ok(RosterChanges { attached, detached })
}

/// Current members of an edition's roster
pub async fn enrolled_students<C: ConnectionTrait>(
    conn: &C,
    edition_id: i32,
) -> Result<HashSet<i32>, DbErr> {
    let ids = employee_editions::Entity::find()
        .select_only()
        .column(employee_editions::Column::EmployeeId)
        .filter(employee_editions::Column::EditionId.eq(edition_id))
        .into_tuple::<i32>()
        .all(conn)
        .await?;

    Ok(ids.into_iter().collect())
}

/// Students not yet enrolled, in the order given
fn missing_from(enrolled: &HashSet<i32>, students: &[i32]) -> Vec<i32> {
    let mut seen = HashSet::new();
    students
        .iter()
        .copied()
        .filter(|id| !enrolled.contains(id) && seen.insert(*id))
        .collect()
}

async fn insert_members<C: ConnectionTrait>(
    conn: &C,
    edition_id: i32,
    students: &[i32],
) -> Result<(), DbErr> {
    if students.is_empty() {
        return Ok(());
    }

    let members = students
        .iter()
        .map(|&employee_id| employee_editions::ActiveModel {
            employee_id: Set(employee_id),
            edition_id: Set(edition_id),
        });

    employee_editions::Entity::insert_many(members)
        .exec_without_returning(conn)
        .await?;

    Ok(())
}
