pub mod client;
pub mod error;
pub mod message;

pub use client::MailerClient;
pub use error::MailerError;
pub use message::ContactMessage;
