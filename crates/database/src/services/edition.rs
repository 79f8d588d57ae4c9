use crate::{
    entities::editions,
    error::EditionError,
    services::{
        lookup::{CourseLookup, EmployeeLookup},
        query_edition::{self, EditionDetails},
        roster,
        validation::validate_edition,
    },
};
use chrono::Utc;
use log::{info, warn};
use models::{EditionPayload, EditionRequest};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
    TransactionTrait,
};

/// Creates, updates, deletes and reads editions.
///
/// Payloads are checked against the employee and course lookups it was built
/// with; every write runs in its own transaction on `db`.
pub struct EditionService<'a, E: ?Sized, C: ?Sized> {
    db: &'a DatabaseConnection,
    employees: &'a E,
    courses: &'a C,
}

impl<'a> EditionService<'a, DatabaseConnection, DatabaseConnection> {
    /// A service that also looks employees and courses up in `db`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self::with_lookups(db, db, db)
    }
}

impl<'a, E, C> EditionService<'a, E, C>
where
    E: EmployeeLookup + ?Sized,
    C: CourseLookup + ?Sized,
{
    pub fn with_lookups(db: &'a DatabaseConnection, employees: &'a E, courses: &'a C) -> Self {
        Self {
            db,
            employees,
            courses,
        }
    }

    /// All editions ordered by id
    pub async fn list(&self) -> Result<Vec<EditionDetails>, EditionError> {
        let editions = editions::Entity::find()
            .order_by_asc(editions::Column::Id)
            .all(self.db)
            .await?;

        Ok(query_edition::load_details_batch(self.db, editions).await?)
    }

    pub async fn get(&self, id: i32) -> Result<EditionDetails, EditionError> {
        let edition = editions::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(EditionError::NotFound(id))?;

        Ok(query_edition::load_details(self.db, edition).await?)
    }

    /// Validates and stores a new edition together with its students
    pub async fn create(&self, request: &EditionRequest) -> Result<EditionDetails, EditionError> {
        let payload = self.validate(request).await?;

        let txn = self.db.begin().await?;
        let now = Utc::now().naive_utc();
        let edition = editions::ActiveModel {
            code_id: Set(payload.code_id),
            course_id: Set(payload.course_id),
            employee_id: Set(payload.employee_id),
            place: Set(payload.place.clone()),
            session_period: Set(payload.session_period),
            date: Set(payload.date),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|err| Self::conflict(err, &payload))?;

        roster::attach(&txn, edition.id, &payload.students).await?;
        txn.commit().await?;

        info!(
            "Created edition {} (code {}) of course {}",
            edition.id, edition.code_id, edition.course_id
        );
        // Re-read so the response reflects what storage holds
        self.get(edition.id).await
    }

    /// Replaces an edition's fields and makes its roster exactly the submitted students
    pub async fn update(
        &self,
        id: i32,
        request: &EditionRequest,
    ) -> Result<EditionDetails, EditionError> {
        // An unknown edition is reported before anything about the payload
        if editions::Entity::find_by_id(id).one(self.db).await?.is_none() {
            return Err(EditionError::NotFound(id));
        }
        let payload = self.validate(request).await?;

        let txn = self.db.begin().await?;
        let existing = editions::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(EditionError::NotFound(id))?;

        let mut edition: editions::ActiveModel = existing.into();
        edition.code_id = Set(payload.code_id);
        edition.course_id = Set(payload.course_id);
        edition.employee_id = Set(payload.employee_id);
        edition.place = Set(payload.place.clone());
        edition.session_period = Set(payload.session_period);
        edition.date = Set(payload.date);
        edition.updated_at = Set(Utc::now().naive_utc());
        edition
            .update(&txn)
            .await
            .map_err(|err| Self::conflict(err, &payload))?;

        roster::sync(&txn, id, &payload.students).await?;
        txn.commit().await?;

        info!("Updated edition {id}");
        self.get(id).await
    }

    /// Deletes an edition; its roster goes with it
    pub async fn delete(&self, id: i32) -> Result<(), EditionError> {
        let result = editions::Entity::delete_by_id(id).exec(self.db).await?;
        if result.rows_affected == 0 {
            return Err(EditionError::NotFound(id));
        }

        info!("Deleted edition {id}");
        Ok(())
    }

    async fn validate(&self, request: &EditionRequest) -> Result<EditionPayload, EditionError> {
        validate_edition(request, self.employees, self.courses)
            .await
            .inspect_err(|err| {
                if let EditionError::Validation(reason) = err {
                    warn!("Rejected edition: {reason}");
                }
            })
    }

    fn conflict(err: DbErr, payload: &EditionPayload) -> EditionError {
        let err = EditionError::from(err);
        if let EditionError::Duplicate(key) = &err {
            warn!(
                "Edition {} on {} conflicts with course {}: {key:?}",
                payload.code_id, payload.date, payload.course_id
            );
        }
        err
    }
}
