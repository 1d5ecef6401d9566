use crate::helpers::{response_json, spawn_app, spawn_app_with_database};

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn create_schema_is_idempotent() {
    // spawn_app_with_database already created the schema once
    let app = spawn_app_with_database().await;

    let response = app.get("createSchema").await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        response_json(response).await["message"],
        "Database schema created successfully."
    );
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn create_schema_keeps_existing_rows() {
    let app = spawn_app_with_database().await;
    app.add_user("Ada", "ada@example.com").await;

    app.get("createSchema").await;

    let user_id = app.add_user("Grace", "grace@example.com").await;
    assert_eq!(user_id, 2);
}

#[tokio::test]
async fn create_schema_returns_a_500_when_the_database_is_unreachable() {
    let app = spawn_app().await;

    let response = app.get("createSchema").await;

    assert_eq!(500, response.status().as_u16());
    assert!(response_json(response).await["error"].is_string());
}
