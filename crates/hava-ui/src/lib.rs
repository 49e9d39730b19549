//! View state for Hava: the theme store, its storage port and the weather
//! lookup view model.

pub mod models;
pub mod services;
pub mod storage;
pub mod strings;
pub mod subscription;
pub mod theme;
pub mod theme_store;

pub use models::{Key, RequestStatus, WeatherLookupView};
pub use services::build_runtime;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use subscription::SubscriptionId;
pub use theme::{Palette, Rgb, Theme};
pub use theme_store::{ThemeStore, THEME_KEY};
