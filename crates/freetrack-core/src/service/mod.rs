//! Service domain models and repository traits.
//!
//! A service is one free-tier online service tracked by the user.

mod model;
mod repository;

pub use model::{Category, Service, ServiceFormData, ServicePatch};
pub use repository::{DEFAULT_STORAGE_KEY, ServiceRepository};
