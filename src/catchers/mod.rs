use rocket::http::Status;
use rocket::serde::json::{json, Json, Value};
use rocket::Request;

/// Malformed or mistyped JSON bodies are client errors like any other.
#[catch(422)]
pub fn unprocessable_entity_to_bad_request(req: &Request) -> (Status, Json<Value>) {
    tracing::warn!(uri = %req.uri(), "Rejected a request body that could not be parsed");
    (
        Status::BadRequest,
        Json(json!({ "error": "The request body is malformed or has fields of the wrong type." })),
    )
}

#[catch(400)]
pub fn bad_request(req: &Request) -> Json<Value> {
    tracing::warn!(uri = %req.uri(), "Rejected a malformed request");
    Json(json!({ "error": "The request body is malformed or has fields of the wrong type." }))
}

#[catch(404)]
pub fn not_found(req: &Request) -> Json<Value> {
    Json(json!({ "error": format!("No route for {} {}", req.method(), req.uri()) }))
}

#[catch(default)]
pub fn default_catcher(status: Status, _req: &Request) -> Json<Value> {
    Json(json!({ "error": status.reason_lossy() }))
}
