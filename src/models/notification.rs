use crate::schema::notifications;
use diesel::prelude::*;

#[derive(Insertable)]
#[diesel(table_name = notifications)]
pub struct NewNotification {
    pub user_id: i32,
    pub event_id: i32,
}
