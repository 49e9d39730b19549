//! Weather lookups for Hava
//!
//! Fetches current conditions for a city from OpenWeatherMap and exposes
//! them as a display-ready `WeatherReport`.

pub mod provider;
pub mod types;

pub use provider::WeatherProvider;
pub use types::{condition_glyph, ProviderStatus, WeatherReport, FALLBACK_GLYPH};
