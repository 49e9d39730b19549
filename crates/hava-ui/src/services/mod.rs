pub mod weather_service;

pub use weather_service::WeatherServiceMessage;

/// Build the runtime that network work is spawned onto.
///
/// The UI thread never blocks on it; results come back over channels.
pub fn build_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("hava-tokio")
        .build()
}
