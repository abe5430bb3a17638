//! Hooks run around every API call.
//!
//! Request hooks see the outgoing headers. Response hooks see every answer;
//! error hooks only see non-2xx answers and decide what the user is told.

pub mod auth_interceptor;
pub mod base;
pub mod error_interceptor;

pub use auth_interceptor::AuthInterceptor;
pub use base::{ErrorOutcome, Interceptor, ResponseBody, ResponseParts, AUTH_TOKEN_HEADER};
pub use error_interceptor::ErrorInterceptor;
