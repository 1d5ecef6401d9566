use crate::helpers::{spawn_app, spawn_app_with_database};

#[tokio::test]
async fn every_dashboard_page_renders() {
    // arrange
    let app = spawn_app().await;
    let pages = vec![
        "dashboard",
        "dashboard/add-user",
        "dashboard/add-event",
        "dashboard/view-events",
        "dashboard/manage-event",
        "dashboard/view-subscribers",
        "dashboard/view-user-events",
        "dashboard/db-time",
        "dashboard/send-email",
    ];

    for page in pages {
        // act
        let response = app.get(page).await;

        // assert
        assert_eq!(200, response.status().as_u16(), "{} did not render", page);
        let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        let html = response.text().await.unwrap();
        assert!(html.contains("MeetEZ"));
    }
}

#[tokio::test]
async fn incomplete_forms_ask_for_every_field() {
    let app = spawn_app().await;
    let submissions: Vec<(&str, Vec<(&str, &str)>)> = vec![
        ("dashboard/add-user", vec![("name", "Ada"), ("email", "")]),
        ("dashboard/add-event", vec![("user_id", "1"), ("title", "A")]),
        ("dashboard/subscribe", vec![("user_id", "1")]),
        ("dashboard/update-event", vec![("event_id", "1")]),
        ("dashboard/delete-event", vec![]),
        ("dashboard/view-subscribers", vec![("event_id", "  ")]),
        ("dashboard/view-user-events", vec![]),
        (
            "dashboard/send-email",
            vec![("recipient", "ada@example.com"), ("subject", "Hi"), ("body", " ")],
        ),
    ];

    for (route, form) in submissions {
        let response = app.post_form(route, &form).await;

        assert_eq!(200, response.status().as_u16(), "{} failed", route);
        let html = response.text().await.unwrap();
        assert!(
            html.contains("Please fill out all fields."),
            "{} did not ask for the missing fields",
            route
        );
    }
}

#[tokio::test]
async fn ids_must_be_whole_numbers() {
    let app = spawn_app().await;

    let response = app
        .post_form("dashboard/view-subscribers", &[("event_id", "abc")])
        .await;

    let html = response.text().await.unwrap();
    assert!(html.contains("Event ID must be a whole number."));
}

#[tokio::test]
async fn api_errors_are_shown_on_the_page() {
    let app = spawn_app().await;

    let response = app.post_form("dashboard/view-events", &[]).await;

    assert_eq!(200, response.status().as_u16());
    let html = response.text().await.unwrap();
    assert!(html.contains("Failed to connect to the database"));
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn a_user_added_through_the_dashboard_can_be_listed() {
    let app = spawn_app_with_database().await;

    let response = app
        .post_form(
            "dashboard/add-user",
            &[("name", "Ada"), ("email", "ada@example.com")],
        )
        .await;
    let html = response.text().await.unwrap();
    assert!(html.contains("User added with ID 1."));

    app.post_form(
        "dashboard/add-event",
        &[
            ("user_id", "1"),
            ("title", "Rust meetup"),
            ("description", ""),
            ("event_date", "2025-04-01"),
        ],
    )
    .await;
    app.post_form("dashboard/subscribe", &[("user_id", "1"), ("event_id", "1")])
        .await;

    let response = app
        .post_form("dashboard/view-subscribers", &[("event_id", "1")])
        .await;
    let html = response.text().await.unwrap();
    assert!(html.contains("Event 1 has 1 subscriber(s)."));
    assert!(html.contains("ada@example.com"));
}

#[tokio::test]
async fn emails_are_sent_from_the_dashboard() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app
        .post_form(
            "dashboard/send-email",
            &[
                ("recipient", "ada@example.com"),
                ("subject", "Welcome"),
                ("body", "See you at the meetup"),
            ],
        )
        .await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let html = response.text().await.unwrap();
    assert!(html.contains("Email sent successfully to ada@example.com!"));
    let requests = app.email_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let email: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(email["subject"], "Welcome");
    assert_eq!(email["personalizations"][0]["to"][0]["email"], "ada@example.com");
}

#[tokio::test]
async fn an_invalid_recipient_is_reported_without_sending() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "dashboard/send-email",
            &[("recipient", "not-an-email"), ("subject", "Hi"), ("body", "Hello")],
        )
        .await;

    let html = response.text().await.unwrap();
    assert!(html.contains("Error sending email:"));
    assert!(app.email_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn reading_the_database_clock_reports_connection_errors() {
    let app = spawn_app().await;

    let response = app.post_form("dashboard/db-time", &[]).await;

    assert_eq!(200, response.status().as_u16());
    let html = response.text().await.unwrap();
    assert!(html.contains("Failed to connect to the database"));
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn reading_the_database_clock_shows_the_current_time() {
    let app = spawn_app_with_database().await;

    let response = app.post_form("dashboard/db-time", &[]).await;

    let html = response.text().await.unwrap();
    assert!(html.contains("Database current time: "));
}
