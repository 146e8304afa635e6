mod devotionals;
mod errors;
mod health_check;
mod helpers;
mod newsletters;
mod notifications;

pub use devotionals::send_daily_devotional;
pub use errors::ApiError;
pub use health_check::health_check;
pub use helpers::{error_chain_fmt, preflight};
pub use newsletters::send_newsletter;
pub use notifications::{content_published, send_notification};
