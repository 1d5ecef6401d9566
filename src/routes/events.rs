use crate::adapter::{Adapter, DeliveryReport, EmailMessage};
use crate::domain::{EventDate, EventDetails, EventTitle};
use crate::models::{Event, EventChangeset, NewEventRow};
use crate::routes::{ApiError, RequiredFields};
use anyhow::Context;
use askama::Template;
use diesel::prelude::*;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use serde_aux::field_attributes::deserialize_option_number_from_string;
use uuid::Uuid;

#[derive(serde::Deserialize, Default, Debug)]
pub struct AddEventBody {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub user_id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<String>,
}

#[derive(serde::Deserialize, Default, Debug)]
pub struct UpdateEventBody {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub event_id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<String>,
}

#[derive(serde::Deserialize, Default, Debug)]
pub struct DeleteEventBody {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub event_id: Option<i32>,
}

#[derive(serde::Serialize, Debug)]
pub struct EventUpdate {
    pub event: Event,
    pub notifications: Vec<DeliveryReport>,
}

#[derive(Template)]
#[template(path = "emails/event_updated.html")]
struct EventUpdatedHtml<'a> {
    title: &'a str,
    event_date: String,
    description: &'a str,
}

#[derive(Template)]
#[template(path = "emails/event_updated.txt")]
struct EventUpdatedText<'a> {
    title: &'a str,
    event_date: String,
    description: &'a str,
}

#[tracing::instrument(
    name = "Adding a new event",
    skip(body, adapter),
    fields(request_id = %Uuid::new_v4())
)]
#[post("/addEvent", data = "<body>")]
pub async fn add_event(
    body: Json<AddEventBody>,
    adapter: &State<Adapter>,
) -> Result<Json<Value>, ApiError> {
    let event_id = create_event(adapter, body.into_inner()).await?;
    Ok(Json(json!({
        "message": "Event added successfully",
        "event_id": event_id,
    })))
}

#[tracing::instrument(name = "Listing events", skip(adapter), fields(request_id = %Uuid::new_v4()))]
#[get("/getEvents")]
pub async fn get_events(adapter: &State<Adapter>) -> Result<Json<Vec<Event>>, ApiError> {
    list_events(adapter).await.map(Json)
}

#[tracing::instrument(
    name = "Updating an event",
    skip(body, adapter),
    fields(request_id = %Uuid::new_v4())
)]
#[post("/updateEvent", data = "<body>")]
pub async fn update_event(
    body: Json<UpdateEventBody>,
    adapter: &State<Adapter>,
) -> Result<Json<Value>, ApiError> {
    let update = modify_event(adapter, body.into_inner()).await?;
    Ok(Json(json!({
        "message": "Event updated successfully",
        "event": update.event,
        "notifications": update.notifications,
    })))
}

#[tracing::instrument(
    name = "Deleting an event",
    skip(body, adapter),
    fields(request_id = %Uuid::new_v4())
)]
#[post("/deleteEvent", data = "<body>")]
pub async fn delete_event(
    body: Json<DeleteEventBody>,
    adapter: &State<Adapter>,
) -> Result<Json<Value>, ApiError> {
    let event_id = remove_event(adapter, body.into_inner()).await?;
    Ok(Json(json!({
        "message": format!("Event {} deleted successfully", event_id),
    })))
}

fn event_details(
    title: String,
    description: Option<String>,
    event_date: String,
) -> Result<EventDetails, ApiError> {
    Ok(EventDetails {
        title: EventTitle::parse(title).map_err(ApiError::InvalidField)?,
        description: description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        event_date: EventDate::parse(&event_date).map_err(ApiError::InvalidField)?,
    })
}

pub async fn create_event(adapter: &Adapter, body: AddEventBody) -> Result<i32, ApiError> {
    let mut required = RequiredFields::default();
    let user_id = required.take("user_id", body.user_id);
    let title = required.take_text("title", body.title);
    let event_date = required.take_text("event_date", body.event_date);
    let (Some(user_id), Some(title), Some(event_date)) = (user_id, title, event_date) else {
        return Err(required.into_error());
    };
    let details = event_details(title, body.description, event_date)?;
    adapter
        .run(move |conn| insert_event(conn, user_id, &details))
        .await
}

pub async fn list_events(adapter: &Adapter) -> Result<Vec<Event>, ApiError> {
    adapter.run(select_events).await
}

/// Applies the update, then notifies every distinct subscriber. Delivery
/// failures are reported per recipient and never fail the update.
pub async fn modify_event(adapter: &Adapter, body: UpdateEventBody) -> Result<EventUpdate, ApiError> {
    let mut required = RequiredFields::default();
    let event_id = required.take("event_id", body.event_id);
    let title = required.take_text("title", body.title);
    let event_date = required.take_text("event_date", body.event_date);
    let (Some(event_id), Some(title), Some(event_date)) = (event_id, title, event_date) else {
        return Err(required.into_error());
    };
    let details = event_details(title, body.description, event_date)?;
    let (event, recipients) = adapter
        .run(move |conn| {
            conn.transaction::<_, ApiError, _>(|conn| {
                let event = update_event_row(conn, event_id, &details)?;
                let recipients = subscriber_emails(conn, event_id)?;
                Ok((event, recipients))
            })
        })
        .await?;

    let message = event_updated_email(&event)?;
    let notifications = adapter.send_email_batch(&recipients, &message).await;
    Ok(EventUpdate {
        event,
        notifications,
    })
}

pub async fn remove_event(adapter: &Adapter, body: DeleteEventBody) -> Result<i32, ApiError> {
    let mut required = RequiredFields::default();
    let Some(event_id) = required.take("event_id", body.event_id) else {
        return Err(required.into_error());
    };
    let deleted = adapter
        .run(move |conn| delete_event_row(conn, event_id))
        .await?;
    if deleted == 0 {
        return Err(ApiError::EventNotFound(event_id));
    }
    Ok(event_id)
}

fn event_updated_email(event: &Event) -> Result<EmailMessage, ApiError> {
    let description = event.description.as_deref().unwrap_or_default();
    let html_content = EventUpdatedHtml {
        title: &event.title,
        event_date: event.event_date.to_string(),
        description,
    }
    .render()
    .context("Failed to render the event update email.")?;
    let text_content = EventUpdatedText {
        title: &event.title,
        event_date: event.event_date.to_string(),
        description,
    }
    .render()
    .context("Failed to render the event update email.")?;
    Ok(EmailMessage {
        subject: format!("Event Updated: {}", event.title),
        html_content,
        text_content,
    })
}

#[tracing::instrument(name = "Saving new event details in the database", skip(conn, details))]
fn insert_event(
    conn: &mut PgConnection,
    user_id: i32,
    details: &EventDetails,
) -> Result<i32, ApiError> {
    use crate::schema::events;
    let event_id = diesel::insert_into(events::table)
        .values(NewEventRow {
            user_id,
            title: details.title.as_ref(),
            description: details.description.as_deref(),
            event_date: details.event_date.into_inner(),
        })
        .returning(events::event_id)
        .get_result::<i32>(conn)?;
    Ok(event_id)
}

#[tracing::instrument(name = "Get all events", skip(conn))]
fn select_events(conn: &mut PgConnection) -> Result<Vec<Event>, ApiError> {
    use crate::schema::events;
    let rows = events::table
        .select(Event::as_select())
        .order(events::event_id.asc())
        .load(conn)?;
    Ok(rows)
}

#[tracing::instrument(name = "Update event details in the database", skip(conn, details))]
fn update_event_row(
    conn: &mut PgConnection,
    event_id: i32,
    details: &EventDetails,
) -> Result<Event, ApiError> {
    use crate::schema::events;
    diesel::update(events::table.find(event_id))
        .set(EventChangeset {
            title: details.title.as_ref(),
            description: details.description.as_deref(),
            event_date: details.event_date.into_inner(),
        })
        .returning(Event::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or(ApiError::EventNotFound(event_id))
}

#[tracing::instrument(name = "Get subscriber emails of an event", skip(conn))]
fn subscriber_emails(conn: &mut PgConnection, event_id: i32) -> Result<Vec<String>, ApiError> {
    use crate::schema::{notifications, users};
    let emails = notifications::table
        .inner_join(users::table)
        .filter(notifications::event_id.eq(event_id))
        .select(users::email)
        .distinct()
        .order(users::email.asc())
        .load::<String>(conn)?;
    Ok(emails)
}

#[tracing::instrument(name = "Delete an event from the database", skip(conn))]
fn delete_event_row(conn: &mut PgConnection, event_id: i32) -> Result<usize, ApiError> {
    use crate::schema::events;
    let deleted = diesel::delete(events::table.find(event_id)).execute(conn)?;
    Ok(deleted)
}
