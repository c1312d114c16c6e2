pub mod api;
pub mod config;
pub mod directory;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use directory::{create_http_client, Directory, DirectoryClient, DirectoryError};
pub use service::{resolve_client, retry_lookup, LookupService};
