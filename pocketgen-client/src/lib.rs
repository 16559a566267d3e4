//! # pocketgen Client
//!
//! Retrieval of PocketBase collection schemas.
//!
//! This crate provides:
//! - Superuser authentication and paginated collection listing over HTTP
//! - Retry with exponential backoff for transport failures
//! - Offline schema sources reading exported collection files
//! - Credential storage in dotenv format, optionally encrypted with a
//!   passphrase

pub mod builder;
pub mod credentials;
pub mod encrypted;
pub mod error;
pub mod retry;
pub mod source;

pub use builder::{SchemaClient, SchemaClientBuilder};
pub use credentials::{Credentials, DEFAULT_CREDENTIALS_FILE};
pub use encrypted::DEFAULT_ENCRYPTED_CREDENTIALS_FILE;
pub use error::ClientError;
pub use retry::RetryPolicy;
pub use source::{FileSource, SchemaSource};
