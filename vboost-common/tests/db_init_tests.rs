//! Database initialization tests

use tempfile::TempDir;
use vboost_common::db::init::init_database;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("levels.db");

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("levels.db");

    let pool1 = init_database(&db_path).await.unwrap();
    sqlx::query("INSERT INTO domain_levels (domain, level) VALUES ('example.com', 250)")
        .execute(&pool1)
        .await
        .unwrap();
    pool1.close().await;

    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());

    let level: i64 = sqlx::query_scalar("SELECT level FROM domain_levels WHERE domain = 'example.com'")
        .fetch_one(&pool2.unwrap())
        .await
        .unwrap();
    assert_eq!(level, 250);
}
