//! Core library for the `weatherornot` CLI.
//!
//! This crate defines:
//! - Location-string classification (ZIP vs. city vs. coordinates)
//! - Configuration handling (API key, defaults, favorites)
//! - The OpenWeatherMap client and shared domain models
//!
//! It is used by `weatherornot-cli`, but can also be reused by other binaries or services.

pub mod api;
pub mod config;
pub mod location;
pub mod model;

pub use api::Client;
pub use config::Config;
pub use location::{LocationError, LocationQuery, classify};
pub use model::{DisplayMode, Units, WeatherData};
