use crate::schema::users;
use diesel::prelude::*;

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// A user as listed among the subscribers of an event.
#[derive(Queryable, serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
pub struct Subscriber {
    pub user_id: i32,
    pub name: String,
    pub email: String,
}
