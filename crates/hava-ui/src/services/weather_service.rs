//! Weather backend: async weather fetching.
//! Network work runs on the tokio runtime; results are sent back to the
//! owning view over an mpsc channel.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use hava_core::WeatherError;
use hava_weather::{WeatherProvider, WeatherReport};
use tokio::runtime::Handle;

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of a city lookup
    FetchDone(Result<WeatherReport, WeatherError>),
}

/// Request a lookup for `city` on `runtime`.
/// Sends `FetchDone` on the channel when complete, whatever the outcome.
pub fn request_fetch(
    tx: &Sender<WeatherServiceMessage>,
    runtime: &Handle,
    provider: Arc<WeatherProvider>,
    city: String,
) {
    let tx = tx.clone();

    runtime.spawn(async move {
        let result = provider.fetch_city(&city).await;
        if tx.send(WeatherServiceMessage::FetchDone(result)).is_err() {
            tracing::debug!("Weather view dropped before lookup for {} finished", city);
        }
    });
}
