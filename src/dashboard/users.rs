use crate::adapter::Adapter;
use crate::dashboard::{filled, render, whole_number, Feedback, MISSING_FIELDS};
use crate::models::{EventSummary, Subscriber};
use crate::routes::{list_subscribers, list_user_events, register_user, AddUserBody};
use askama::Template;
use rocket::form::Form;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::State;

#[derive(Template)]
#[template(path = "dashboard/home.html")]
struct HomePage {
    feedback: Feedback,
}

#[derive(Template)]
#[template(path = "dashboard/add_user.html")]
struct AddUserPage {
    feedback: Feedback,
}

#[derive(Template)]
#[template(path = "dashboard/view_subscribers.html")]
struct ViewSubscribersPage {
    feedback: Feedback,
    subscribers: Vec<Subscriber>,
}

#[derive(Template)]
#[template(path = "dashboard/view_user_events.html")]
struct ViewUserEventsPage {
    feedback: Feedback,
    events: Vec<EventRow>,
}

pub(crate) struct EventRow {
    pub event_id: i32,
    pub title: String,
    pub description: String,
    pub event_date: String,
}

impl From<EventSummary> for EventRow {
    fn from(summary: EventSummary) -> Self {
        Self {
            event_id: summary.event_id,
            title: summary.title,
            description: summary.description.unwrap_or_default(),
            event_date: summary.event_date.to_string(),
        }
    }
}

#[derive(FromForm)]
pub struct UserForm {
    name: Option<String>,
    email: Option<String>,
}

#[derive(FromForm)]
pub struct EventIdForm {
    event_id: Option<String>,
}

#[derive(FromForm)]
pub struct UserIdForm {
    user_id: Option<String>,
}

#[get("/")]
pub fn home() -> Result<RawHtml<String>, Status> {
    render(&HomePage {
        feedback: Feedback::default(),
    })
}

#[get("/add-user")]
pub fn add_user_page() -> Result<RawHtml<String>, Status> {
    render(&AddUserPage {
        feedback: Feedback::notice("Enter a name and an email address, then click 'Add user'."),
    })
}

#[tracing::instrument(name = "Dashboard: add a user", skip(form, adapter))]
#[post("/add-user", data = "<form>")]
pub async fn add_user_submit(
    form: Form<UserForm>,
    adapter: &State<Adapter>,
) -> Result<RawHtml<String>, Status> {
    let feedback = match (filled(&form.name), filled(&form.email)) {
        (Some(name), Some(email)) => {
            let body = AddUserBody {
                name: Some(name.to_string()),
                email: Some(email.to_string()),
            };
            match register_user(adapter, body).await {
                Ok(user_id) => Feedback::notice(format!("User added with ID {}.", user_id)),
                Err(e) => Feedback::error(e.to_string()),
            }
        }
        _ => Feedback::error(MISSING_FIELDS),
    };
    render(&AddUserPage { feedback })
}

#[get("/view-subscribers")]
pub fn view_subscribers_page() -> Result<RawHtml<String>, Status> {
    render(&ViewSubscribersPage {
        feedback: Feedback::notice("Enter an event ID to see who is subscribed."),
        subscribers: vec![],
    })
}

#[tracing::instrument(name = "Dashboard: list subscribers", skip(form, adapter))]
#[post("/view-subscribers", data = "<form>")]
pub async fn view_subscribers_submit(
    form: Form<EventIdForm>,
    adapter: &State<Adapter>,
) -> Result<RawHtml<String>, Status> {
    let Some(event_id) = filled(&form.event_id) else {
        return render(&ViewSubscribersPage {
            feedback: Feedback::error(MISSING_FIELDS),
            subscribers: vec![],
        });
    };
    let page = match whole_number("Event ID", event_id) {
        Err(feedback) => ViewSubscribersPage {
            feedback,
            subscribers: vec![],
        },
        Ok(event_id) => match list_subscribers(adapter, Some(event_id)).await {
            Ok(subscribers) => ViewSubscribersPage {
                feedback: Feedback::notice(format!(
                    "Event {} has {} subscriber(s).",
                    event_id,
                    subscribers.len()
                )),
                subscribers,
            },
            Err(e) => ViewSubscribersPage {
                feedback: Feedback::error(e.to_string()),
                subscribers: vec![],
            },
        },
    };
    render(&page)
}

#[get("/view-user-events")]
pub fn view_user_events_page() -> Result<RawHtml<String>, Status> {
    render(&ViewUserEventsPage {
        feedback: Feedback::notice("Enter a user ID to see the events they follow."),
        events: vec![],
    })
}

#[tracing::instrument(name = "Dashboard: list user events", skip(form, adapter))]
#[post("/view-user-events", data = "<form>")]
pub async fn view_user_events_submit(
    form: Form<UserIdForm>,
    adapter: &State<Adapter>,
) -> Result<RawHtml<String>, Status> {
    let Some(user_id) = filled(&form.user_id) else {
        return render(&ViewUserEventsPage {
            feedback: Feedback::error(MISSING_FIELDS),
            events: vec![],
        });
    };
    let page = match whole_number("User ID", user_id) {
        Err(feedback) => ViewUserEventsPage {
            feedback,
            events: vec![],
        },
        Ok(user_id) => match list_user_events(adapter, Some(user_id)).await {
            Ok(events) => ViewUserEventsPage {
                feedback: Feedback::notice(format!(
                    "User {} follows {} event(s).",
                    user_id,
                    events.len()
                )),
                events: events.into_iter().map(EventRow::from).collect(),
            },
            Err(e) => ViewUserEventsPage {
                feedback: Feedback::error(e.to_string()),
                events: vec![],
            },
        },
    };
    render(&page)
}
