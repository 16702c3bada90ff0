//! External data
//!
//! Loading maps from text files and demo settings from RON.

pub mod config;
pub mod loader;

pub use config::{Args, ConfigError, Settings};
pub use loader::{first_open_cell, load_map, load_map_with_start, parse_map, MapLoadError};
