use crate::helpers::{response_json, spawn_app, spawn_app_with_database};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn added_events_are_listed_with_their_details() {
    // arrange
    let app = spawn_app_with_database().await;
    let user_id = app.add_user("Ada", "ada@example.com").await;

    // act
    let event_id = app.add_event(user_id, "Rust meetup", "2025-04-01").await;
    let response = app.get("getEvents").await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let events = response_json(response).await;
    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event_id"], event_id);
    assert_eq!(events[0]["user_id"], user_id);
    assert_eq!(events[0]["title"], "Rust meetup");
    assert_eq!(events[0]["description"], "Bring a laptop");
    assert_eq!(events[0]["event_date"], "2025-04-01");
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn get_events_returns_an_empty_array_without_events() {
    let app = spawn_app_with_database().await;

    let response = app.get("getEvents").await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(response_json(response).await, json!([]));
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn add_event_for_an_unknown_user_is_a_500() {
    let app = spawn_app_with_database().await;

    let response = app
        .post_json(
            "addEvent",
            &json!({ "user_id": 999, "title": "Orphan", "event_date": "2025-04-01" }),
        )
        .await;

    assert_eq!(500, response.status().as_u16());
}

#[tokio::test]
async fn add_event_returns_a_400_when_data_is_missing() {
    let app = spawn_app().await;
    let test_cases = vec![
        (json!({ "title": "A", "event_date": "2025-04-01" }), "user_id"),
        (json!({ "user_id": 1, "event_date": "2025-04-01" }), "title"),
        (json!({ "user_id": 1, "title": "A" }), "event_date"),
        (json!({}), "user_id, title, event_date"),
    ];

    for (invalid_body, missing) in test_cases {
        let response = app.post_json("addEvent", &invalid_body).await;

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
async fn add_event_rejects_a_malformed_date() {
    let app = spawn_app().await;

    let response = app
        .post_json(
            "addEvent",
            &json!({ "user_id": 1, "title": "A", "event_date": "01/04/2025" }),
        )
        .await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn titles_wider_than_the_column_are_client_errors() {
    let app = spawn_app().await;
    // 200 graphemes but 400 characters
    let title = "e\u{301}".repeat(200);

    let response = app
        .post_json(
            "addEvent",
            &json!({ "user_id": 1, "title": title, "event_date": "2025-04-01" }),
        )
        .await;

    assert_eq!(400, response.status().as_u16());
    assert_eq!(
        response_json(response).await["error"],
        "The event title is longer than 255 characters."
    );
}

#[tokio::test]
async fn update_and_delete_report_missing_fields() {
    let app = spawn_app().await;

    let response = app
        .post_json("updateEvent", &json!({ "title": "A", "event_date": "2025-04-01" }))
        .await;
    assert_eq!(400, response.status().as_u16());
    assert_eq!(
        response_json(response).await["error"],
        "Missing required field(s): event_id"
    );

    let response = app.post_json("deleteEvent", &json!({})).await;
    assert_eq!(400, response.status().as_u16());
    assert_eq!(
        response_json(response).await["error"],
        "Missing required field(s): event_id"
    );
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn updating_an_event_emails_every_subscriber_once() {
    // arrange
    let app = spawn_app_with_database().await;
    let owner = app.add_user("Ada", "ada@example.com").await;
    let grace = app.add_user("Grace", "grace@example.com").await;
    let event_id = app.add_event(owner, "Rust meetup", "2025-04-01").await;
    app.subscribe(owner, event_id).await;
    app.subscribe(grace, event_id).await;
    app.subscribe(grace, event_id).await;

    // act
    let response = app
        .post_json(
            "updateEvent",
            &json!({
                "event_id": event_id.to_string(),
                "title": "Rust meetup (moved)",
                "event_date": "2025-04-08",
            }),
        )
        .await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let body = response_json(response).await;
    assert_eq!(body["message"], "Event updated successfully");
    assert_eq!(body["event"]["title"], "Rust meetup (moved)");
    assert_eq!(body["event"]["event_date"], "2025-04-08");
    assert!(body["event"]["description"].is_null());
    assert_eq!(
        body["notifications"],
        json!([
            { "recipient": "ada@example.com", "status": "sent" },
            { "recipient": "grace@example.com", "status": "sent" },
        ])
    );

    let requests = app.email_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let email: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(email["subject"], "Event Updated: Rust meetup (moved)");
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn a_failed_delivery_does_not_fail_the_update() {
    let app = spawn_app_with_database().await;
    let owner = app.add_user("Ada", "ada@example.com").await;
    let grace = app.add_user("Grace", "grace@example.com").await;
    let event_id = app.add_event(owner, "Rust meetup", "2025-04-01").await;
    app.subscribe(owner, event_id).await;
    app.subscribe(grace, event_id).await;
    Mock::given(path("/v3/mail/send"))
        .and(method("POST"))
        .and(body_string_contains("ada@example.com"))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_json(
            "updateEvent",
            &json!({ "event_id": event_id, "title": "Moved", "event_date": "2025-04-08" }),
        )
        .await;

    assert_eq!(200, response.status().as_u16());
    let body = response_json(response).await;
    assert_eq!(body["notifications"][0]["status"], "failed");
    assert!(body["notifications"][0]["error"].is_string());
    assert_eq!(body["notifications"][1]["status"], "sent");
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn updating_or_deleting_an_unknown_event_is_a_404() {
    let app = spawn_app_with_database().await;

    let response = app
        .post_json(
            "updateEvent",
            &json!({ "event_id": 42, "title": "Ghost", "event_date": "2025-04-01" }),
        )
        .await;
    assert_eq!(404, response.status().as_u16());
    assert_eq!(response_json(response).await["error"], "Event 42 not found");

    let response = app.post_json("deleteEvent", &json!({ "event_id": 42 })).await;
    assert_eq!(404, response.status().as_u16());

    assert!(app.email_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn deleting_an_event_removes_it_and_its_subscriptions() {
    let app = spawn_app_with_database().await;
    let owner = app.add_user("Ada", "ada@example.com").await;
    let event_id = app.add_event(owner, "Rust meetup", "2025-04-01").await;
    app.subscribe(owner, event_id).await;

    let response = app
        .post_json("deleteEvent", &json!({ "event_id": event_id }))
        .await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        response_json(response).await["message"],
        format!("Event {} deleted successfully", event_id)
    );
    assert_eq!(response_json(app.get("getEvents").await).await, json!([]));
    let subscribers = app
        .get(&format!("getSubscribers?event_id={}", event_id))
        .await;
    assert_eq!(response_json(subscribers).await, json!([]));
    let user_events = app.get(&format!("getUserEvents?user_id={}", owner)).await;
    assert_eq!(200, user_events.status().as_u16());
    assert_eq!(response_json(user_events).await, json!([]));
}
