//! Server-rendered dashboard. Every form submission performs exactly one
//! API or adapter operation in-process and renders its result or error text.

mod events;
mod maintenance;
mod users;

use askama::Template;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::Route;

pub fn routes() -> Vec<Route> {
    routes![
        users::home,
        users::add_user_page,
        users::add_user_submit,
        users::view_subscribers_page,
        users::view_subscribers_submit,
        users::view_user_events_page,
        users::view_user_events_submit,
        events::add_event_page,
        events::add_event_submit,
        events::view_events_page,
        events::view_events_submit,
        events::subscribe_submit,
        events::manage_event_page,
        events::update_event_submit,
        events::delete_event_submit,
        maintenance::db_time_page,
        maintenance::db_time_submit,
        maintenance::send_email_page,
        maintenance::send_email_submit,
    ]
}

const MISSING_FIELDS: &str = "Please fill out all fields.";

/// The message line shown under a form.
#[derive(Default, Debug)]
pub struct Feedback {
    pub notice: String,
    pub error: String,
}

impl Feedback {
    fn notice(notice: impl Into<String>) -> Self {
        Self {
            notice: notice.into(),
            error: String::new(),
        }
    }

    fn error(error: impl Into<String>) -> Self {
        Self {
            notice: String::new(),
            error: error.into(),
        }
    }
}

fn render(page: &impl Template) -> Result<RawHtml<String>, Status> {
    page.render().map(RawHtml).map_err(|e| {
        tracing::error!(error.cause_chain = ?e, "Failed to render a dashboard page");
        Status::InternalServerError
    })
}

/// The trimmed value of a form field, if it was filled in.
fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn whole_number(label: &str, value: &str) -> Result<i32, Feedback> {
    value
        .parse::<i32>()
        .map_err(|_| Feedback::error(format!("{} must be a whole number.", label)))
}
