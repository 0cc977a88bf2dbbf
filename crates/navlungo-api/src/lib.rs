pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod schemas;
pub mod validation;

pub use client::Client;
pub use config::{ClientConfig, Environment};
pub use credentials::NavlungoCredentials;
pub use error::{ClientError, TransportError};
pub use validation::{FieldViolation, RequestValidationError, Schema, ViolationKind};
