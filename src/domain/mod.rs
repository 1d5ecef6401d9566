mod email_address;
mod event_date;
mod event_title;
mod user_name;

pub use email_address::EmailAddress;
pub use event_date::EventDate;
pub use event_title::EventTitle;
pub use user_name::UserName;

#[derive(Debug)]
pub struct NewUser {
    pub name: UserName,
    pub email: EmailAddress,
}

/// The mutable part of an event, shared by creation and update.
#[derive(Debug)]
pub struct EventDetails {
    pub title: EventTitle,
    pub description: Option<String>,
    pub event_date: EventDate,
}
