pub mod schema;

pub use schema::{Config, API_TOKEN_ENV, HOST_ENV, REGISTRY_ENV};
