mod newsletters_handler;
mod types;

pub use newsletters_handler::send_newsletter;
