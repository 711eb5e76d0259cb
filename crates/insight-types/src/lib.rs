pub mod brand;
pub mod analysis;
pub mod entry;
pub mod event;
pub mod config;
pub mod error;
pub mod session;


pub use error::InsightError;
pub type Result<T> = std::result::Result<T, InsightError>;
