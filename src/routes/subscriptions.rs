use crate::adapter::Adapter;
use crate::models::{EventSummary, NewNotification, Subscriber};
use crate::routes::{parse_id, ApiError, RequiredFields};
use diesel::prelude::*;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use serde_aux::field_attributes::deserialize_option_number_from_string;
use uuid::Uuid;

#[derive(serde::Deserialize, Default, Debug)]
pub struct SubscribeBody {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub user_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub event_id: Option<i32>,
}

#[tracing::instrument(
    name = "Subscribing a user to an event",
    skip(body, adapter),
    fields(request_id = %Uuid::new_v4())
)]
#[post("/subscribeEvent", data = "<body>")]
pub async fn subscribe_event(
    body: Json<SubscribeBody>,
    adapter: &State<Adapter>,
) -> Result<Json<Value>, ApiError> {
    let notification_id = subscribe(adapter, body.into_inner()).await?;
    Ok(Json(json!({
        "message": "Subscribed to event successfully",
        "notification_id": notification_id,
    })))
}

#[tracing::instrument(
    name = "Listing the subscribers of an event",
    skip(adapter),
    fields(request_id = %Uuid::new_v4())
)]
#[get("/getSubscribers?<event_id>")]
pub async fn get_subscribers(
    event_id: Option<String>,
    adapter: &State<Adapter>,
) -> Result<Json<Vec<Subscriber>>, ApiError> {
    let event_id = parse_id("event_id", event_id)?;
    list_subscribers(adapter, event_id).await.map(Json)
}

#[tracing::instrument(
    name = "Listing the events a user follows",
    skip(adapter),
    fields(request_id = %Uuid::new_v4())
)]
#[get("/getUserEvents?<user_id>")]
pub async fn get_user_events(
    user_id: Option<String>,
    adapter: &State<Adapter>,
) -> Result<Json<Vec<EventSummary>>, ApiError> {
    let user_id = parse_id("user_id", user_id)?;
    list_user_events(adapter, user_id).await.map(Json)
}

pub async fn subscribe(adapter: &Adapter, body: SubscribeBody) -> Result<i32, ApiError> {
    let mut required = RequiredFields::default();
    let user_id = required.take("user_id", body.user_id);
    let event_id = required.take("event_id", body.event_id);
    let (Some(user_id), Some(event_id)) = (user_id, event_id) else {
        return Err(required.into_error());
    };
    adapter
        .run(move |conn| insert_notification(conn, user_id, event_id))
        .await
}

pub async fn list_subscribers(
    adapter: &Adapter,
    event_id: Option<i32>,
) -> Result<Vec<Subscriber>, ApiError> {
    let mut required = RequiredFields::default();
    let Some(event_id) = required.take("event_id", event_id) else {
        return Err(required.into_error());
    };
    adapter
        .run(move |conn| select_subscribers(conn, event_id))
        .await
}

pub async fn list_user_events(
    adapter: &Adapter,
    user_id: Option<i32>,
) -> Result<Vec<EventSummary>, ApiError> {
    let mut required = RequiredFields::default();
    let Some(user_id) = required.take("user_id", user_id) else {
        return Err(required.into_error());
    };
    adapter
        .run(move |conn| select_user_events(conn, user_id))
        .await
}

#[tracing::instrument(name = "Saving a new subscription in the database", skip(conn))]
fn insert_notification(
    conn: &mut PgConnection,
    user_id: i32,
    event_id: i32,
) -> Result<i32, ApiError> {
    use crate::schema::notifications;
    let notification_id = diesel::insert_into(notifications::table)
        .values(NewNotification { user_id, event_id })
        .returning(notifications::notification_id)
        .get_result::<i32>(conn)?;
    Ok(notification_id)
}

#[tracing::instrument(name = "Get subscribers of an event", skip(conn))]
fn select_subscribers(conn: &mut PgConnection, event_id: i32) -> Result<Vec<Subscriber>, ApiError> {
    use crate::schema::{notifications, users};
    let subscribers = notifications::table
        .inner_join(users::table)
        .filter(notifications::event_id.eq(event_id))
        .select((users::user_id, users::name, users::email))
        .distinct()
        .order(users::user_id.asc())
        .load::<Subscriber>(conn)?;
    Ok(subscribers)
}

#[tracing::instrument(name = "Get events followed by a user", skip(conn))]
fn select_user_events(
    conn: &mut PgConnection,
    user_id: i32,
) -> Result<Vec<EventSummary>, ApiError> {
    use crate::schema::{events, notifications};
    let summaries = notifications::table
        .inner_join(events::table)
        .filter(notifications::user_id.eq(user_id))
        .select((
            events::event_id,
            events::title,
            events::description,
            events::event_date,
        ))
        .distinct()
        .order((events::event_date.asc(), events::event_id.asc()))
        .load::<EventSummary>(conn)?;
    Ok(summaries)
}
