//! Centralized error types for Hava.
//!
//! Every failure the UI can show carries a `user_message()` with the fixed,
//! human-readable text displayed on screen. `Display` keeps the technical
//! detail for logs.

use thiserror::Error;

/// Outcome of a failed weather lookup.
///
/// Each variant is terminal for the request that produced it; nothing is
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// Transport failure: connect error, timeout or a body that is not the
    /// expected JSON.
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// Provider answered with status 404.
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// Provider answered with status 401.
    #[error("Invalid API credential")]
    InvalidCredential,

    /// Any other non-success status reported by the provider.
    #[error("Provider error {code}: {message}")]
    Provider { code: u16, message: String },
}

impl WeatherError {
    pub const NETWORK_FAILURE_MESSAGE: &'static str =
        "Bağlantı hatası. Lütfen internet bağlantınızı kontrol edin.";
    pub const CITY_NOT_FOUND_MESSAGE: &'static str =
        "Şehir bulunamadı. Lütfen geçerli bir şehir adı girin.";
    pub const INVALID_CREDENTIAL_MESSAGE: &'static str =
        "API anahtarı geçersiz. Lütfen geçerli bir API anahtarı kullanın.";
    pub const PROVIDER_MESSAGE: &'static str =
        "Hava durumu servisi bir hata döndürdü. Lütfen daha sonra tekrar deneyin.";

    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::NetworkFailure(_) => Self::NETWORK_FAILURE_MESSAGE,
            WeatherError::CityNotFound(_) => Self::CITY_NOT_FOUND_MESSAGE,
            WeatherError::InvalidCredential => Self::INVALID_CREDENTIAL_MESSAGE,
            WeatherError::Provider { .. } => Self::PROVIDER_MESSAGE,
        }
    }
}

/// Configuration errors. Raised by `Config` loading and validation and
/// surfaced to the user through `user_message()`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Geçersiz yapılandırma. Ayarlarınızı kontrol edin.",
            ConfigError::ParseError(_) => "Yapılandırma dosyası bozuk. Ayarlarınızı kontrol edin.",
            ConfigError::MissingSetting(_) => "Gerekli bir ayar eksik. Ayarlarınızı kontrol edin.",
        }
    }
}

/// Errors raised by the key-value preference storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored preferences are malformed: {0}")]
    Malformed(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Io(_) | StorageError::Unavailable(_) => "Tercihler kaydedilemedi.",
            StorageError::Malformed(_) => "Kayıtlı tercihler okunamadı. Varsayılanlar kullanılıyor.",
        }
    }
}

/// Extension trait for classifying reqwest failures.
pub trait ReqwestErrorExt {
    fn into_weather_error(self) -> WeatherError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_weather_error(self) -> WeatherError {
        if self.is_timeout() {
            WeatherError::NetworkFailure(format!("request timed out: {}", self))
        } else if self.is_decode() {
            WeatherError::NetworkFailure(format!("malformed response: {}", self))
        } else {
            WeatherError::NetworkFailure(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_user_messages_are_fixed() {
        assert_eq!(
            WeatherError::NetworkFailure("refused".into()).user_message(),
            "Bağlantı hatası. Lütfen internet bağlantınızı kontrol edin."
        );
        assert_eq!(
            WeatherError::CityNotFound("Atlantis".into()).user_message(),
            "Şehir bulunamadı. Lütfen geçerli bir şehir adı girin."
        );
        assert_eq!(
            WeatherError::InvalidCredential.user_message(),
            "API anahtarı geçersiz. Lütfen geçerli bir API anahtarı kullanın."
        );
    }

    #[test]
    fn test_detail_stays_out_of_user_message() {
        let err = WeatherError::NetworkFailure("dns error: no such host".into());
        assert!(err.to_string().contains("dns error"));
        assert!(!err.user_message().contains("dns"));
    }

    #[test]
    fn test_provider_error_display() {
        let err = WeatherError::Provider {
            code: 429,
            message: "too many requests".into(),
        };
        assert_eq!(err.to_string(), "Provider error 429: too many requests");
        assert_eq!(err.user_message(), WeatherError::PROVIDER_MESSAGE);
    }

    #[test]
    fn test_config_error_user_message_hides_detail() {
        let err = ConfigError::ParseError("expected `=`, found newline at line 3".into());
        assert!(err.to_string().contains("line 3"));
        assert_eq!(
            err.user_message(),
            "Yapılandırma dosyası bozuk. Ayarlarınızı kontrol edin."
        );
    }

    #[test]
    fn test_storage_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: StorageError = io.into();
        assert!(matches!(err, StorageError::Io(_)));
        assert!(!err.user_message().is_empty());
    }
}
