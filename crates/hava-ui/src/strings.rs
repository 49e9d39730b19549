//! Fixed on-screen text. The app ships in Turkish only.

use chrono::Datelike;

use crate::theme::Theme;

pub const TITLE: &str = "Hava Durumu";
pub const SUBTITLE: &str = "Anlık hava durumu bilgisi";
pub const QUERY_PLACEHOLDER: &str = "Şehir adı girin (örn. İstanbul, Ankara)";
pub const SEARCH_LABEL: &str = "Ara";
pub const LOADING_LABEL: &str = "Yükleniyor...";
pub const FEELS_LIKE_LABEL: &str = "Hissedilen";
pub const WIND_LABEL: &str = "Rüzgar";
pub const HUMIDITY_LABEL: &str = "Nem";
pub const PRESSURE_LABEL: &str = "Basınç";
pub const VISIBILITY_LABEL: &str = "Görüş";
pub const ERROR_GLYPH: &str = "⚠️";
pub const INPUT_HINT: &str = "Şehir adı yazıp Enter'a basın · :theme tema · :quit çıkış";

pub fn search_button_label(loading: bool) -> &'static str {
    if loading {
        LOADING_LABEL
    } else {
        SEARCH_LABEL
    }
}

/// The toggle names the theme it switches to
pub fn theme_toggle_label(current: Theme) -> &'static str {
    match current {
        Theme::Dark => "🌞 Aydınlık",
        Theme::Light => "🌙 Karanlık",
    }
}

pub fn footer(year: i32) -> String {
    format!("Hava Durumu Uygulaması © {}", year)
}

pub fn current_footer() -> String {
    footer(chrono::Local::now().year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_button_label() {
        assert_eq!(search_button_label(false), "Ara");
        assert_eq!(search_button_label(true), "Yükleniyor...");
    }

    #[test]
    fn test_theme_toggle_label_names_other_theme() {
        assert_eq!(theme_toggle_label(Theme::Light), "🌙 Karanlık");
        assert_eq!(theme_toggle_label(Theme::Dark), "🌞 Aydınlık");
    }

    #[test]
    fn test_footer() {
        assert_eq!(footer(2025), "Hava Durumu Uygulaması © 2025");
        assert!(current_footer().starts_with("Hava Durumu Uygulaması © "));
    }
}
