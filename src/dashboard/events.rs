use crate::adapter::{Adapter, DeliveryReport};
use crate::dashboard::{filled, render, whole_number, Feedback, MISSING_FIELDS};
use crate::models::Event;
use crate::routes::{
    create_event, list_events, modify_event, remove_event, subscribe, AddEventBody,
    DeleteEventBody, SubscribeBody, UpdateEventBody,
};
use askama::Template;
use rocket::form::Form;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::State;

#[derive(Template)]
#[template(path = "dashboard/add_event.html")]
struct AddEventPage {
    feedback: Feedback,
}

#[derive(Template)]
#[template(path = "dashboard/view_events.html")]
struct ViewEventsPage {
    feedback: Feedback,
    events: Vec<EventListing>,
}

#[derive(Template)]
#[template(path = "dashboard/manage_event.html")]
struct ManageEventPage {
    feedback: Feedback,
    deliveries: Vec<DeliveryRow>,
}

struct EventListing {
    event_id: i32,
    user_id: i32,
    title: String,
    description: String,
    event_date: String,
}

impl From<Event> for EventListing {
    fn from(event: Event) -> Self {
        Self {
            event_id: event.event_id,
            user_id: event.user_id,
            title: event.title,
            description: event.description.unwrap_or_default(),
            event_date: event.event_date.to_string(),
        }
    }
}

struct DeliveryRow {
    recipient: String,
    status: String,
    error: String,
}

impl From<DeliveryReport> for DeliveryRow {
    fn from(report: DeliveryReport) -> Self {
        Self {
            recipient: report.recipient,
            status: report.status,
            error: report.error.unwrap_or_default(),
        }
    }
}

fn update_summary(event_id: i32, notifications: &[DeliveryReport]) -> String {
    let sent = notifications.iter().filter(|r| r.status == "sent").count();
    let failed = notifications.len() - sent;
    match failed {
        0 => format!("Event {} updated. {} subscriber(s) notified.", event_id, sent),
        _ => format!(
            "Event {} updated. {} subscriber(s) notified, {} delivery failure(s).",
            event_id, sent, failed
        ),
    }
}

#[derive(FromForm)]
pub struct EventForm {
    user_id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    event_date: Option<String>,
}

#[derive(FromForm)]
pub struct EventUpdateForm {
    event_id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    event_date: Option<String>,
}

#[derive(FromForm)]
pub struct EventDeleteForm {
    event_id: Option<String>,
}

#[derive(FromForm)]
pub struct SubscribeForm {
    user_id: Option<String>,
    event_id: Option<String>,
}

#[get("/add-event")]
pub fn add_event_page() -> Result<RawHtml<String>, Status> {
    render(&AddEventPage {
        feedback: Feedback::notice("Fill in the event details, then click 'Add event'."),
    })
}

#[tracing::instrument(name = "Dashboard: add an event", skip(form, adapter))]
#[post("/add-event", data = "<form>")]
pub async fn add_event_submit(
    form: Form<EventForm>,
    adapter: &State<Adapter>,
) -> Result<RawHtml<String>, Status> {
    let (Some(user_id), Some(title), Some(event_date)) = (
        filled(&form.user_id),
        filled(&form.title),
        filled(&form.event_date),
    ) else {
        return render(&AddEventPage {
            feedback: Feedback::error(MISSING_FIELDS),
        });
    };
    let feedback = match whole_number("User ID", user_id) {
        Err(feedback) => feedback,
        Ok(user_id) => {
            let body = AddEventBody {
                user_id: Some(user_id),
                title: Some(title.to_string()),
                description: form.description.clone(),
                event_date: Some(event_date.to_string()),
            };
            match create_event(adapter, body).await {
                Ok(event_id) => Feedback::notice(format!("Event added with ID {}.", event_id)),
                Err(e) => Feedback::error(e.to_string()),
            }
        }
    };
    render(&AddEventPage { feedback })
}

#[get("/view-events")]
pub fn view_events_page() -> Result<RawHtml<String>, Status> {
    render(&ViewEventsPage {
        feedback: Feedback::notice("Click 'Load events' to read events from the database."),
        events: vec![],
    })
}

#[tracing::instrument(name = "Dashboard: list events", skip(adapter))]
#[post("/view-events")]
pub async fn view_events_submit(adapter: &State<Adapter>) -> Result<RawHtml<String>, Status> {
    let page = match list_events(adapter).await {
        Ok(events) => ViewEventsPage {
            feedback: Feedback::notice(format!("Found {} event(s).", events.len())),
            events: events.into_iter().map(EventListing::from).collect(),
        },
        Err(e) => ViewEventsPage {
            feedback: Feedback::error(e.to_string()),
            events: vec![],
        },
    };
    render(&page)
}

#[tracing::instrument(name = "Dashboard: subscribe to an event", skip(form, adapter))]
#[post("/subscribe", data = "<form>")]
pub async fn subscribe_submit(
    form: Form<SubscribeForm>,
    adapter: &State<Adapter>,
) -> Result<RawHtml<String>, Status> {
    let feedback = match (filled(&form.user_id), filled(&form.event_id)) {
        (Some(user_id), Some(event_id)) => {
            match (
                whole_number("User ID", user_id),
                whole_number("Event ID", event_id),
            ) {
                (Err(feedback), _) | (_, Err(feedback)) => feedback,
                (Ok(user_id), Ok(event_id)) => {
                    let body = SubscribeBody {
                        user_id: Some(user_id),
                        event_id: Some(event_id),
                    };
                    match subscribe(adapter, body).await {
                        Ok(_) => Feedback::notice(format!(
                            "User {} subscribed to event {}.",
                            user_id, event_id
                        )),
                        Err(e) => Feedback::error(e.to_string()),
                    }
                }
            }
        }
        _ => Feedback::error(MISSING_FIELDS),
    };
    render(&ViewEventsPage {
        feedback,
        events: vec![],
    })
}

#[get("/manage-event")]
pub fn manage_event_page() -> Result<RawHtml<String>, Status> {
    render(&ManageEventPage {
        feedback: Feedback::notice("Update an event's details, or delete it."),
        deliveries: vec![],
    })
}

#[tracing::instrument(name = "Dashboard: update an event", skip(form, adapter))]
#[post("/update-event", data = "<form>")]
pub async fn update_event_submit(
    form: Form<EventUpdateForm>,
    adapter: &State<Adapter>,
) -> Result<RawHtml<String>, Status> {
    let (Some(event_id), Some(title), Some(event_date)) = (
        filled(&form.event_id),
        filled(&form.title),
        filled(&form.event_date),
    ) else {
        return render(&ManageEventPage {
            feedback: Feedback::error(MISSING_FIELDS),
            deliveries: vec![],
        });
    };
    let page = match whole_number("Event ID", event_id) {
        Err(feedback) => ManageEventPage {
            feedback,
            deliveries: vec![],
        },
        Ok(event_id) => {
            let body = UpdateEventBody {
                event_id: Some(event_id),
                title: Some(title.to_string()),
                description: form.description.clone(),
                event_date: Some(event_date.to_string()),
            };
            match modify_event(adapter, body).await {
                Ok(update) => ManageEventPage {
                    feedback: Feedback::notice(update_summary(event_id, &update.notifications)),
                    deliveries: update
                        .notifications
                        .into_iter()
                        .map(DeliveryRow::from)
                        .collect(),
                },
                Err(e) => ManageEventPage {
                    feedback: Feedback::error(e.to_string()),
                    deliveries: vec![],
                },
            }
        }
    };
    render(&page)
}

#[tracing::instrument(name = "Dashboard: delete an event", skip(form, adapter))]
#[post("/delete-event", data = "<form>")]
pub async fn delete_event_submit(
    form: Form<EventDeleteForm>,
    adapter: &State<Adapter>,
) -> Result<RawHtml<String>, Status> {
    let feedback = match filled(&form.event_id) {
        None => Feedback::error(MISSING_FIELDS),
        Some(event_id) => match whole_number("Event ID", event_id) {
            Err(feedback) => feedback,
            Ok(event_id) => {
                let body = DeleteEventBody {
                    event_id: Some(event_id),
                };
                match remove_event(adapter, body).await {
                    Ok(event_id) => Feedback::notice(format!("Event {} deleted.", event_id)),
                    Err(e) => Feedback::error(e.to_string()),
                }
            }
        },
    };
    render(&ManageEventPage {
        feedback,
        deliveries: vec![],
    })
}
