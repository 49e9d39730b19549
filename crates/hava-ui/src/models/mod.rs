pub mod weather_model;

pub use weather_model::{Key, RequestStatus, WeatherLookupView};
