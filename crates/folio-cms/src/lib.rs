pub mod aggregate;
pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use aggregate::ContentAggregator;
pub use client::CmsClient;
pub use error::CmsError;
