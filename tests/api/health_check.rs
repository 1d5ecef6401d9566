use crate::helpers::{response_json, spawn_app, spawn_app_with_database};

#[tokio::test]
async fn health_check_works() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.get("health_check").await;

    // assert
    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn index_reports_that_the_service_is_running() {
    let app = spawn_app().await;

    let response = app.get("").await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        response_json(response).await["message"],
        "MeetEZ event service is running!"
    );
}

#[tokio::test]
async fn db_conn_test_returns_a_500_when_the_database_is_unreachable() {
    let app = spawn_app().await;

    let response = app.get("db-conn-test").await;

    assert_eq!(500, response.status().as_u16());
    let body = response_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to connect to the database"));
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn db_conn_test_returns_a_200_when_the_database_is_reachable() {
    let app = spawn_app_with_database().await;

    let response = app.get("db-conn-test").await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        response_json(response).await["message"],
        "Database Connection Successful!"
    );
}

#[tokio::test]
async fn unknown_routes_return_a_json_404() {
    let app = spawn_app().await;

    let response = app.get("no-such-route").await;

    assert_eq!(404, response.status().as_u16());
    assert_eq!(
        response_json(response).await["error"],
        "No route for GET /no-such-route"
    );
}
