//! Declarative clients for the photoshare REST resources.

pub mod auth;
pub mod client;
pub mod endpoint;
pub mod form;
pub mod photos;
pub mod tags;
pub mod users;

pub use auth::{AuthClient, AuthResponse};
pub use client::{ApiClient, ApiResponse};
pub use endpoint::Endpoint;
pub use form::{FieldValue, FileData, FormData};
pub use photos::{PhotoQuery, PhotosClient};
pub use tags::TagsClient;
pub use users::{NewUser, UsersClient};
