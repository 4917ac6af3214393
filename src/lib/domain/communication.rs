//! Addresses, recipient files and the sending backend

pub mod email_addresses;
pub mod recipient_files;
pub mod sender;
