use crate::helpers::{response_json, spawn_app, spawn_app_with_database};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::json;

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn add_user_returns_the_new_user_id() {
    // arrange
    let app = spawn_app_with_database().await;
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();

    // act
    let response = app
        .post_json("addUser", &json!({ "name": name, "email": email }))
        .await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let body = response_json(response).await;
    assert_eq!(body["message"], "User added successfully");
    assert_eq!(body["user_id"], 1);
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn add_user_returns_a_500_for_a_duplicate_email() {
    let app = spawn_app_with_database().await;
    app.add_user("Ada", "ada@example.com").await;

    let response = app
        .post_json(
            "addUser",
            &json!({ "name": "Ada Again", "email": "ada@example.com" }),
        )
        .await;

    assert_eq!(500, response.status().as_u16());
    assert!(response_json(response).await["error"].is_string());
}

#[tokio::test]
async fn add_user_returns_a_400_when_data_is_missing() {
    // arrange
    let app = spawn_app().await;
    let test_cases = vec![
        (json!({ "name": "Ada" }), "email"),
        (json!({ "email": "ada@example.com" }), "name"),
        (json!({ "name": "  ", "email": "ada@example.com" }), "name"),
        (json!({}), "name, email"),
    ];

    for (invalid_body, missing) in test_cases {
        // act
        let response = app.post_json("addUser", &invalid_body).await;

        // assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            invalid_body
        );
        assert_eq!(
            response_json(response).await["error"],
            format!("Missing required field(s): {}", missing)
        );
    }
}

#[tokio::test]
async fn add_user_returns_a_400_when_fields_are_invalid() {
    let app = spawn_app().await;
    let test_cases = vec![
        (json!({ "name": "Ada", "email": "not-an-email" }), "invalid email"),
        (json!({ "name": "Ada{}", "email": "ada@example.com" }), "invalid name"),
        (
            json!({ "name": "e\u{301}".repeat(100), "email": "ada@example.com" }),
            "overlong name",
        ),
    ];

    for (invalid_body, description) in test_cases {
        let response = app.post_json("addUser", &invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request when the payload had an {}.",
            description
        );
    }
}

#[tokio::test]
async fn malformed_json_is_a_json_400() {
    let app = spawn_app().await;

    let response = app.post_raw("addUser", r#"{"name": 42}"#).await;

    assert_eq!(400, response.status().as_u16());
    assert!(response_json(response).await["error"].is_string());
}

#[tokio::test]
async fn add_user_returns_a_500_when_the_database_is_unreachable() {
    let app = spawn_app().await;

    let response = app
        .post_json("addUser", &json!({ "name": "Ada", "email": "ada@example.com" }))
        .await;

    assert_eq!(500, response.status().as_u16());
}
