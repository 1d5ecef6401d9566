use crate::adapter::Adapter;
use crate::routes::ApiError;
use diesel::prelude::*;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use uuid::Uuid;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        email VARCHAR(100) UNIQUE NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )"#;

const CREATE_EVENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS events (
        event_id SERIAL PRIMARY KEY,
        user_id INT NOT NULL,
        title VARCHAR(255) NOT NULL,
        description TEXT,
        event_date DATE NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (user_id) REFERENCES users(user_id) ON DELETE CASCADE
    )"#;

const CREATE_NOTIFICATIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS notifications (
        notification_id SERIAL PRIMARY KEY,
        user_id INT NOT NULL,
        event_id INT NOT NULL,
        subscribed_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (user_id) REFERENCES users(user_id) ON DELETE CASCADE,
        FOREIGN KEY (event_id) REFERENCES events(event_id) ON DELETE CASCADE
    )"#;

#[tracing::instrument(name = "Creating the database schema", skip(adapter), fields(request_id = %Uuid::new_v4()))]
#[get("/createSchema")]
pub async fn create_schema_route(adapter: &State<Adapter>) -> Result<Json<Value>, ApiError> {
    adapter.run(create_schema).await?;
    Ok(Json(json!({
        "message": "Database schema created successfully."
    })))
}

/// Creates the three tables if they are absent. All statements share one
/// transaction, so either every table exists afterwards or none was added.
#[tracing::instrument(name = "Create tables", skip(conn))]
pub fn create_schema(conn: &mut PgConnection) -> Result<(), ApiError> {
    conn.transaction::<_, ApiError, _>(|conn| {
        for statement in [CREATE_USERS, CREATE_EVENTS, CREATE_NOTIFICATIONS] {
            diesel::sql_query(statement).execute(conn)?;
        }
        Ok(())
    })?;
    tracing::info!("Database schema created successfully");
    Ok(())
}
