use crate::adapter::Adapter;
use crate::routes::ApiError;
use rocket::serde::json::{json, Json, Value};
use rocket::State;

#[get("/")]
pub fn index() -> Json<Value> {
    Json(json!({ "message": "MeetEZ event service is running!" }))
}

#[get("/health_check")]
pub fn health_check() {}

#[tracing::instrument(name = "Testing the database connection", skip(adapter))]
#[get("/db-conn-test")]
pub async fn db_conn_test(adapter: &State<Adapter>) -> Result<Json<Value>, ApiError> {
    adapter.run(|_conn| Ok(())).await?;
    Ok(Json(json!({ "message": "Database Connection Successful!" })))
}
