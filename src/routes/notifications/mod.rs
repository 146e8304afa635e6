mod events_handler;
mod notifications_handler;
mod types;

pub use events_handler::content_published;
pub use notifications_handler::send_notification;
