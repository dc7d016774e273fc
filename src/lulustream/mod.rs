//! LuluStream integration: remote URL upload and file info lookup

pub mod client;
pub mod error;
pub mod fields;

pub use client::{FileInfo, LuluClient};
pub use error::{Endpoint, LuluError, TransportFailure};
