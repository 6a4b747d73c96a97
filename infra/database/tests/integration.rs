use pokedex_database::*;

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    db.health().await.expect("health check");
    assert_eq!(db.namespace(), "test_ns");
    assert_eq!(db.database(), "test_db");

    let shared = db.clone();
    shared.health().await.expect("clones share the session");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));

    let err = Database::builder().url("mem://").init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[test]
fn context_is_rendered_in_message() {
    let result: Result<(), DatabaseError> = Err(DatabaseError::Connection {
        message: "engine refused".into(),
        context: None,
    });
    let err = result.context("Initializing engine").unwrap_err();
    assert_eq!(err.to_string(), "Database connection failed (Initializing engine): engine refused");
}
