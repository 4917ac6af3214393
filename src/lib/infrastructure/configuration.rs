//! Configuration persistence

mod file;

pub use file::{ConfigurationFileConfig, FileConfiguration};
