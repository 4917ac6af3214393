//! Implementations of the domain collaborators

pub mod configuration;
pub mod http;
pub mod recipient_files;
