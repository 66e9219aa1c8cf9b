pub mod errors;
pub mod questions;
pub mod reports;
pub mod submissions;
pub mod workflow;

pub use errors::{ServiceError, ServiceResult};
