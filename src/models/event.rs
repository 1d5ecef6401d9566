use crate::schema::events;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

#[derive(Queryable, Selectable, serde::Serialize, serde::Deserialize, Debug, Clone)]
#[diesel(table_name = events)]
pub struct Event {
    pub event_id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = events)]
pub struct NewEventRow<'a> {
    pub user_id: i32,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub event_date: NaiveDate,
}

#[derive(AsChangeset)]
#[diesel(table_name = events, treat_none_as_null = true)]
pub struct EventChangeset<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub event_date: NaiveDate,
}

/// An event as listed among the subscriptions of a user.
#[derive(Queryable, serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
pub struct EventSummary {
    pub event_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
}
