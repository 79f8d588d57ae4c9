use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use database::{
    DuplicateKey, EditionError, ValidationError,
    entities::{courses, editions, employee_editions, employees},
    services::{EditionService, EmployeeLookup, EmployeeSummary, roster},
};
use migration::{Migrator, MigratorTrait};
use models::{EditionRequest, SessionPeriod, Sex, StructuralError, dates::format_date};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait,
};
use serde_json::{Value, json};
use std::collections::HashSet;

async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to create database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn insert_course(db: &DatabaseConnection, id: i32) -> courses::Model {
    let now = Utc::now().naive_utc();
    courses::ActiveModel {
        id: Set(id),
        name: Set(format!("Course {id}")),
        description: Set("Workplace safety".to_string()),
        cost: Set(250),
        number_hours: Set(20),
        date_birth: Set(date(2020, 1, 1)),
        nationality: Set("Española".to_string()),
        salary: Set(0.0),
        sex: Set(Sex::Femenino),
        is_qualified: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert course")
}

async fn insert_employee(db: &DatabaseConnection, id: i32, is_qualified: bool) -> employees::Model {
    let now = Utc::now().naive_utc();
    employees::ActiveModel {
        id: Set(id),
        name: Set(format!("Employee {id}")),
        last_names: Set("García López".to_string()),
        address: Set("Calle Mayor 1".to_string()),
        phone: Set(format!("{:08}", 60000000 + id)),
        nif: Set(format!("{:09}X", id)),
        date_birth: Set(date(1990, 5, 17)),
        nationality: Set("Española".to_string()),
        salary: Set(1800.0),
        sex: Set(Sex::Masculino),
        is_qualified: Set(is_qualified),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert employee")
}

/// Course 5; qualified instructors 9 and 10; students 2, 3 and 4; unqualified 11
async fn seeded() -> DatabaseConnection {
    let db = setup().await;
    insert_course(&db, 5).await;
    insert_course(&db, 6).await;
    for (id, is_qualified) in [(2, false), (3, false), (4, false), (9, true), (10, true), (11, false)]
    {
        insert_employee(&db, id, is_qualified).await;
    }
    db
}

fn request(overrides: Value) -> EditionRequest {
    let mut body = json!({
        "code_id": 1,
        "course_id": 5,
        "employee_id": 9,
        "place": "Room A",
        "session_period": "Mañana",
        "date": "2024-03-01",
        "students": [2, 3]
    });
    for (key, value) in overrides.as_object().unwrap() {
        body[key] = value.clone();
    }
    serde_json::from_value(body).unwrap()
}

fn student_ids(students: &[employees::Model]) -> Vec<i32> {
    students.iter().map(|s| s.id).collect()
}

async fn edition_count(db: &DatabaseConnection) -> u64 {
    editions::Entity::find().count(db).await.unwrap()
}

async fn roster_count(db: &DatabaseConnection) -> u64 {
    employee_editions::Entity::find().count(db).await.unwrap()
}

#[tokio::test]
async fn test_create_edition() {
    let db = seeded().await;
    let service = EditionService::new(&db);

    let details = service.create(&request(json!({}))).await.unwrap();

    assert_eq!(details.edition.code_id, 1);
    assert_eq!(details.edition.place, "Room A");
    assert_eq!(details.edition.session_period, SessionPeriod::Morning);
    assert_eq!(format_date(details.edition.date), "01/03/2024");
    assert_eq!(details.course.id, 5);
    assert_eq!(details.professor.id, 9);
    assert_eq!(student_ids(&details.students), vec![2, 3]);
}

#[tokio::test]
async fn test_create_roster_matches_submission_in_any_order() {
    let db = seeded().await;
    let service = EditionService::new(&db);

    let details = service
        .create(&request(json!({ "students": [4, 2, 3] })))
        .await
        .unwrap();

    let roster = roster::enrolled_students(&db, details.edition.id)
        .await
        .unwrap();
    assert_eq!(roster, HashSet::from([2, 3, 4]));
    assert_eq!(student_ids(&details.students), vec![2, 3, 4]);
}

#[tokio::test]
async fn test_create_without_students() {
    let db = seeded().await;
    let service = EditionService::new(&db);

    let details = service
        .create(&request(json!({ "students": null })))
        .await
        .unwrap();
    assert!(details.students.is_empty());
    assert_eq!(roster_count(&db).await, 0);
}

#[tokio::test]
async fn test_create_rejects_unknown_session_period() {
    let db = seeded().await;
    let service = EditionService::new(&db);

    let err = service
        .create(&request(json!({ "session_period": "Noche" })))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EditionError::Validation(ValidationError::Structural(
            StructuralError::SessionPeriodInvalid
        ))
    ));
    assert_eq!(edition_count(&db).await, 0);
}

#[tokio::test]
async fn test_create_rejects_unqualified_instructor() {
    let db = seeded().await;
    let service = EditionService::new(&db);

    let err = service
        .create(&request(json!({ "employee_id": 11 })))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EditionError::Validation(ValidationError::InstructorNotQualified(11))
    ));
    assert_eq!(edition_count(&db).await, 0);
}

#[tokio::test]
async fn test_create_rejects_instructor_as_student() {
    let db = seeded().await;
    let service = EditionService::new(&db);

    let err = service
        .create(&request(json!({ "students": [2, 9] })))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EditionError::Validation(ValidationError::InstructorCannotBeStudent(9))
    ));
    assert_eq!(edition_count(&db).await, 0);
}

#[tokio::test]
async fn test_create_rejects_missing_course_and_students() {
    let db = seeded().await;
    let service = EditionService::new(&db);

    let err = service
        .create(&request(json!({ "course_id": 404 })))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EditionError::Validation(ValidationError::CourseNotFound(404))
    ));

    let err = service
        .create(&request(json!({ "students": [2, 404] })))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EditionError::Validation(ValidationError::StudentNotFound(404))
    ));
}

#[tokio::test]
async fn test_duplicate_code_in_course() {
    let db = seeded().await;
    let service = EditionService::new(&db);
    service.create(&request(json!({}))).await.unwrap();

    let err = service
        .create(&request(json!({ "date": "2024-04-01", "students": [4] })))
        .await
        .unwrap_err();
    assert!(matches!(err, EditionError::Duplicate(DuplicateKey::Code)));

    // The rejected edition left nothing behind
    assert_eq!(edition_count(&db).await, 1);
    assert_eq!(roster_count(&db).await, 2);
}

#[tokio::test]
async fn test_duplicate_date_in_course() {
    let db = seeded().await;
    let service = EditionService::new(&db);
    service.create(&request(json!({}))).await.unwrap();

    let err = service
        .create(&request(json!({ "code_id": 2 })))
        .await
        .unwrap_err();
    assert!(matches!(err, EditionError::Duplicate(DuplicateKey::Date)));
    assert_eq!(edition_count(&db).await, 1);
}

#[tokio::test]
async fn test_same_code_and_date_in_another_course() {
    let db = seeded().await;
    let service = EditionService::new(&db);
    service.create(&request(json!({}))).await.unwrap();

    service
        .create(&request(json!({ "course_id": 6 })))
        .await
        .unwrap();
    assert_eq!(edition_count(&db).await, 2);
}

/// Claims every employee exists and is qualified
struct EveryoneExists;

#[async_trait]
impl EmployeeLookup for EveryoneExists {
    async fn find_employee(&self, id: i32) -> Result<Option<EmployeeSummary>, DbErr> {
        Ok(Some(EmployeeSummary {
            id,
            is_qualified: true,
        }))
    }
}

#[tokio::test]
async fn test_failed_roster_rolls_back_edition() {
    let db = seeded().await;
    let service = EditionService::with_lookups(&db, &EveryoneExists, &db);

    // Student 404 passes validation but breaks the roster foreign key
    let err = service
        .create(&request(json!({ "students": [2, 404] })))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EditionError::Validation(ValidationError::ReferenceGone)
    ));
    assert_eq!(
        err.to_string(),
        "El curso, el empleado o algún estudiante seleccionado ya no existe"
    );

    assert_eq!(edition_count(&db).await, 0);
    assert_eq!(roster_count(&db).await, 0);
}

#[tokio::test]
async fn test_update_syncs_roster() {
    let db = seeded().await;
    let service = EditionService::new(&db);
    let created = service
        .create(&request(json!({ "students": [2, 4] })))
        .await
        .unwrap();
    let id = created.edition.id;

    let updated = service
        .update(
            id,
            &request(json!({
                "place": "Room B",
                "session_period": "Tarde",
                "date": "15/05/2024",
                "employee_id": 10,
                "students": [2, 3]
            })),
        )
        .await
        .unwrap();

    assert_eq!(updated.edition.id, id);
    assert_eq!(updated.edition.place, "Room B");
    assert_eq!(updated.edition.session_period, SessionPeriod::Afternoon);
    assert_eq!(updated.edition.date, date(2024, 5, 15));
    assert_eq!(updated.professor.id, 10);
    assert_eq!(student_ids(&updated.students), vec![2, 3]);
    assert_eq!(
        roster::enrolled_students(&db, id).await.unwrap(),
        HashSet::from([2, 3])
    );
}

#[tokio::test]
async fn test_roster_reports_changes() {
    let db = seeded().await;
    let created = EditionService::new(&db)
        .create(&request(json!({ "students": [2] })))
        .await
        .unwrap();
    let id = created.edition.id;

    let changes = roster::attach(&db, id, &[4, 2, 4]).await.unwrap();
    assert_eq!(changes.attached, vec![4]);
    assert!(changes.detached.is_empty());

    let changes = roster::sync(&db, id, &[2, 3]).await.unwrap();
    assert_eq!(changes.attached, vec![3]);
    assert_eq!(changes.detached, vec![4]);

    let changes = roster::sync(&db, id, &[3, 2]).await.unwrap();
    assert_eq!(changes, roster::RosterChanges::default());
}

#[tokio::test]
async fn test_update_to_empty_roster() {
    let db = seeded().await;
    let service = EditionService::new(&db);
    let created = service.create(&request(json!({}))).await.unwrap();

    let updated = service
        .update(created.edition.id, &request(json!({ "students": [] })))
        .await
        .unwrap();
    assert!(updated.students.is_empty());
    assert_eq!(roster_count(&db).await, 0);
}

#[tokio::test]
async fn test_update_unknown_edition() {
    let db = seeded().await;
    let service = EditionService::new(&db);

    // Not found wins over an invalid payload
    let err = service
        .update(77, &request(json!({ "session_period": "Noche" })))
        .await
        .unwrap_err();
    assert!(matches!(err, EditionError::NotFound(77)));
}

#[tokio::test]
async fn test_update_rejects_unknown_session_period() {
    let db = seeded().await;
    let service = EditionService::new(&db);
    let created = service.create(&request(json!({}))).await.unwrap();

    let err = service
        .update(
            created.edition.id,
            &request(json!({ "session_period": "Madrugada" })),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EditionError::Validation(ValidationError::Structural(
            StructuralError::SessionPeriodInvalid
        ))
    ));
}

#[tokio::test]
async fn test_update_into_duplicate_keeps_original() {
    let db = seeded().await;
    let service = EditionService::new(&db);
    service.create(&request(json!({}))).await.unwrap();
    let second = service
        .create(&request(json!({ "code_id": 2, "date": "2024-06-01", "students": [4] })))
        .await
        .unwrap();

    let err = service
        .update(
            second.edition.id,
            &request(json!({ "code_id": 1, "date": "2024-06-01", "students": [2] })),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EditionError::Duplicate(DuplicateKey::Code)));

    let unchanged = service.get(second.edition.id).await.unwrap();
    assert_eq!(unchanged.edition.code_id, 2);
    assert_eq!(student_ids(&unchanged.students), vec![4]);
}

#[tokio::test]
async fn test_delete_edition_keeps_people_and_course() {
    let db = seeded().await;
    let service = EditionService::new(&db);
    let created = service.create(&request(json!({}))).await.unwrap();

    service.delete(created.edition.id).await.unwrap();

    assert_eq!(edition_count(&db).await, 0);
    assert_eq!(roster_count(&db).await, 0);
    assert_eq!(courses::Entity::find().count(&db).await.unwrap(), 2);
    assert_eq!(employees::Entity::find().count(&db).await.unwrap(), 6);

    let err = service.delete(created.edition.id).await.unwrap_err();
    assert!(matches!(err, EditionError::NotFound(_)));
}

#[tokio::test]
async fn test_deleting_course_cascades() {
    let db = seeded().await;
    let service = EditionService::new(&db);
    service.create(&request(json!({}))).await.unwrap();
    service
        .create(&request(json!({ "course_id": 6, "students": [4] })))
        .await
        .unwrap();

    courses::Entity::delete_by_id(5).exec(&db).await.unwrap();

    let remaining = service.list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].course.id, 6);
    assert_eq!(roster_count(&db).await, 1);
}

#[tokio::test]
async fn test_instructor_cannot_be_deleted_while_teaching() {
    let db = seeded().await;
    let service = EditionService::new(&db);
    service.create(&request(json!({}))).await.unwrap();

    assert!(employees::Entity::delete_by_id(9).exec(&db).await.is_err());

    // Students can be removed; they simply leave the roster
    employees::Entity::delete_by_id(2).exec(&db).await.unwrap();
    assert_eq!(roster_count(&db).await, 1);
}

#[tokio::test]
async fn test_list_is_ordered_by_id() {
    let db = seeded().await;
    let service = EditionService::new(&db);
    assert!(service.list().await.unwrap().is_empty());

    for (code_id, day) in [(3, 3), (1, 1), (2, 2)] {
        service
            .create(&request(json!({
                "code_id": code_id,
                "date": format!("2024-03-0{day}"),
                "students": [2]
            })))
            .await
            .unwrap();
    }

    let editions = service.list().await.unwrap();
    let ids: Vec<i32> = editions.iter().map(|d| d.edition.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);

    let codes: Vec<i64> = editions.iter().map(|d| d.edition.code_id).collect();
    assert_eq!(codes, vec![3, 1, 2]);
    assert!(editions.iter().all(|d| student_ids(&d.students) == vec![2]));
}

#[tokio::test]
async fn test_get_unknown_edition() {
    let db = seeded().await;
    let service = EditionService::new(&db);

    let err = service.get(1).await.unwrap_err();
    assert!(matches!(err, EditionError::NotFound(1)));
}
