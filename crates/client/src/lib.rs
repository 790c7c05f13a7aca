//! HTTP client for the accounting backend.
//!
//! Every endpoint answers with an [`ActionResult`] envelope; [`ApiClient`]
//! unwraps it the same way for all calls (see `handle_response`).
//!
//! [`ActionResult`]: api_types::ActionResult
pub use client::ApiClient;
pub use error::ApiError;

mod assets;
mod client;
mod defi;
mod error;
mod locations;
mod tasks;

pub use tasks::TaskStatus;

pub type Result<T> = std::result::Result<T, ApiError>;
