//! Domain rules and collaborator traits

pub mod campaigns;
pub mod communication;
pub mod compose;
pub mod configuration;
