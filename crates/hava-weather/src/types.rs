use serde::{Deserialize, Serialize};

/// Glyph shown when the provider returns a condition code we don't know
pub const FALLBACK_GLYPH: &str = "🌤️";

/// Map a provider condition code (e.g. `"01d"`) to a display glyph.
///
/// See: https://openweathermap.org/weather-conditions#Icon-list
pub fn condition_glyph(code: &str) -> &'static str {
    match code {
        "01d" => "☀️",
        "01n" => "🌙",
        "02d" => "⛅",
        "02n" | "03d" | "03n" | "04d" | "04n" => "☁️",
        "09d" | "09n" | "10n" => "🌧️",
        "10d" => "🌦️",
        "11d" | "11n" => "⛈️",
        "13d" | "13n" => "❄️",
        "50d" | "50n" => "🌫️",
        _ => FALLBACK_GLYPH,
    }
}

/// Status code reported in the provider's `cod` field.
///
/// The provider sends it as a string on some responses (`"404"`) and as a
/// number on others (`401`); both normalise to the same value here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawStatus")]
pub struct ProviderStatus(pub u16);

impl ProviderStatus {
    pub const OK: Self = Self(200);
    pub const UNAUTHORIZED: Self = Self(401);
    pub const NOT_FOUND: Self = Self(404);

    pub fn is_success(self) -> bool {
        (200..300).contains(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatus {
    Number(u16),
    Text(String),
}

impl TryFrom<RawStatus> for ProviderStatus {
    type Error = String;

    fn try_from(raw: RawStatus) -> Result<Self, Self::Error> {
        match raw {
            RawStatus::Number(code) => Ok(Self(code)),
            RawStatus::Text(text) => text
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| format!("status code is not numeric: {:?}", text)),
        }
    }
}

/// Current conditions for one city, as returned by a successful lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location_name: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub condition_code: String,
    pub condition_description: String,
    /// Meters per second under metric units
    pub wind_speed: f64,
    /// Percent
    pub humidity: f64,
    /// Hectopascals
    pub pressure: f64,
    /// Meters
    pub visibility: Option<f64>,
}

impl WeatherReport {
    pub fn glyph(&self) -> &'static str {
        condition_glyph(&self.condition_code)
    }

    pub fn temperature_display(&self) -> String {
        format!("{}°C", round_half_up(self.temperature))
    }

    pub fn feels_like_display(&self) -> String {
        format!("{}°C", round_half_up(self.feels_like))
    }

    pub fn wind_display(&self) -> String {
        format!("{} m/s", self.wind_speed)
    }

    pub fn humidity_display(&self) -> String {
        format!("{}%", self.humidity)
    }

    pub fn pressure_display(&self) -> String {
        format!("{} hPa", self.pressure)
    }

    /// Visibility in kilometers with one decimal, or `N/A` when the provider
    /// left it out
    pub fn visibility_display(&self) -> String {
        match self.visibility {
            Some(meters) if meters > 0.0 => format!("{:.1} km", meters / 1000.0),
            _ => "N/A".to_string(),
        }
    }
}

/// Round halves towards positive infinity, so `21.5` shows as 22 and
/// `-0.5` as 0 rather than -1.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

// Raw provider payload. Only the fields we render are declared.

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCurrentWeather {
    name: String,
    #[serde(default)]
    sys: ApiSys,
    main: ApiMain,
    #[serde(default)]
    weather: Vec<ApiCondition>,
    wind: ApiWind,
    visibility: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    icon: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ApiWind {
    speed: f64,
}

impl From<ApiCurrentWeather> for WeatherReport {
    fn from(api: ApiCurrentWeather) -> Self {
        let (condition_code, condition_description) = api
            .weather
            .into_iter()
            .next()
            .map(|c| (c.icon, c.description))
            .unwrap_or_default();

        Self {
            location_name: api.name,
            country: api.sys.country.unwrap_or_default(),
            temperature: api.main.temp,
            feels_like: api.main.feels_like,
            condition_code,
            condition_description,
            wind_speed: api.wind.speed,
            humidity: api.main.humidity,
            pressure: api.main.pressure,
            visibility: api.visibility,
        }
    }
}
