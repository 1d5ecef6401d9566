mod events;
mod health;
mod schema;
mod subscriptions;
mod users;

pub use events::*;
pub use health::*;
pub use schema::*;
pub use subscriptions::*;
pub use users::*;

use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::{json, Json};
use rocket::Request;

/// Error surfaced by every API operation. The display text becomes the
/// `error` field of the JSON response.
#[derive(thiserror::Error)]
pub enum ApiError {
    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("{0}")]
    InvalidField(String),
    #[error("Event {0} not found")]
    EventNotFound(i32),
    #[error("Failed to connect to the database: {0}")]
    Connection(#[source] diesel::result::ConnectionError),
    #[error(transparent)]
    Query(#[from] diesel::result::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::MissingFields(_) | ApiError::InvalidField(_) => Status::BadRequest,
            ApiError::EventNotFound(_) => Status::NotFound,
            ApiError::Connection(_) | ApiError::Query(_) | ApiError::UnexpectedError(_) => {
                Status::InternalServerError
            }
        }
    }
}

impl std::fmt::Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        let status = self.status();
        if status.code >= 500 {
            tracing::error!(error.cause_chain = ?self, "Request failed");
        } else {
            tracing::warn!(error.cause_chain = ?self, "Request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).respond_to(request)
    }
}

/// Collects the names of absent required fields so a single response can
/// report all of them.
#[derive(Default)]
pub(crate) struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub(crate) fn take<T>(&mut self, name: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.missing.push(name);
        }
        value
    }

    pub(crate) fn take_text(&mut self, name: &'static str, value: Option<String>) -> Option<String> {
        self.take(name, value.filter(|v| !v.trim().is_empty()))
    }

    pub(crate) fn into_error(self) -> ApiError {
        ApiError::MissingFields(self.missing)
    }
}

/// Reads an id given as query text. Blank counts as absent; anything else
/// must be a whole number.
pub(crate) fn parse_id(name: &str, value: Option<String>) -> Result<Option<i32>, ApiError> {
    match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse::<i32>()
            .map(Some)
            .map_err(|_| ApiError::InvalidField(format!("{} must be a whole number.", name))),
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
