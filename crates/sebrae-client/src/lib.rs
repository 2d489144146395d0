//! HTTP client and local credential store for the Sebrae assistant API.
//!
//! [`api::ApiClient`] wraps every endpoint of the assistant backend with
//! bearer-token injection and uniform status mapping. [`credentials`]
//! persists the token (and a cached profile) under the user's home
//! directory so sessions survive across invocations.

pub mod api;
pub mod credentials;
pub mod error;

pub use api::ApiClient;
pub use error::ApiError;
