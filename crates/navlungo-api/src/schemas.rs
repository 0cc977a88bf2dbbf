//! Request schemas for the Navlungo API
//!
//! Each request type is read out of an untyped JSON object through
//! [`Schema`](crate::validation::Schema) and serialized with the field names
//! the API expects.
//!
//! # Organization
//!
//! - [`post`] - Creating, updating and cancelling posts
//! - [`address`] - Address-book entries and listing
//! - [`carrier`] - Carrier listing
//! - [`barcode`] - Shipping label retrieval
//! - [`auth`] - Token issuance
//! - [`types`] - Closed enumerations shared by the schemas
//!
//! Common types are re-exported at the module level for convenience.

pub mod address;
pub mod auth;
pub mod barcode;
pub mod carrier;
pub mod post;
pub mod types;

pub use address::*;
pub use auth::*;
pub use barcode::*;
pub use carrier::*;
pub use post::*;
pub use types::*;
