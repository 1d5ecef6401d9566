mod event;
mod notification;
mod user;

pub use event::*;
pub use notification::*;
pub use user::*;
