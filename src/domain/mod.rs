mod devotional;
mod notification;
mod subscriber;
mod subscriber_email;

pub use devotional::Devotional;
pub use notification::{NotificationKind, NotificationRequest};
pub use subscriber::Subscriber;
pub use subscriber_email::SubscriberEmail;
