mod input;

use std::io::{self, BufReader, Write};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{Clear, ClearType};
use hava_core::{Config, ConfigError};
use hava_ui::{strings, FileStore, Rgb, ThemeStore, WeatherLookupView};
use hava_weather::WeatherProvider;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    hava_core::init()?;

    let (config, _validation) = match Config::load_validated() {
        Ok(loaded) => loaded,
        Err(e) => {
            if let Some(config_err) = e.downcast_ref::<ConfigError>() {
                eprintln!("{}", config_err.user_message());
            }
            return Err(e);
        }
    };

    let runtime = hava_ui::build_runtime().context("Failed to create tokio runtime")?;

    let storage = Arc::new(FileStore::new(config.preferences_path()));
    let theme = Arc::new(ThemeStore::load_with_key(storage, config.ui.theme_key.clone()));
    let provider =
        Arc::new(WeatherProvider::new(&config.weather).context("Failed to create weather client")?);

    let mut view = WeatherLookupView::new(theme, provider, runtime.handle().clone());
    view.subscribe(|v| {
        if let Err(e) = render(v) {
            tracing::warn!("Failed to render: {}", e);
        }
    });
    render(&view).context("Failed to render")?;

    tracing::info!("Hava started");

    let lines = input::spawn_reader(BufReader::new(io::stdin()))
        .context("Failed to start input reader")?;

    loop {
        view.poll_channel();
        match lines.recv_timeout(POLL_INTERVAL) {
            Ok(line) => {
                if input::dispatch(&mut view, input::Command::parse(&line)).is_break() {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // End of input: let a lookup already in flight land first
                while view.is_loading() {
                    view.wait_for_update(POLL_INTERVAL);
                }
                break;
            }
        }
    }

    tracing::info!("Hava exiting");
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Redraw the whole screen from the view state
fn render(view: &WeatherLookupView) -> io::Result<()> {
    let palette = view.palette();
    let text = color(palette.text);
    let muted = color(palette.text_muted);

    let mut out = io::stdout().lock();
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    writeln!(out, "{}", strings::TITLE.with(text).bold())?;
    writeln!(out, "{}", strings::SUBTITLE.with(color(palette.text_secondary)))?;
    writeln!(out)?;

    writeln!(
        out,
        "{}",
        format!(" {} ", strings::theme_toggle_label(view.theme()))
            .with(color(palette.button_text))
            .on(color(palette.button_background))
    )?;
    writeln!(out)?;

    let query = if view.query().is_empty() {
        strings::QUERY_PLACEHOLDER.with(muted)
    } else {
        view.query().with(text)
    };
    writeln!(out, "> {}", query.on(color(palette.input_background)))?;

    let button = format!(" {} ", strings::search_button_label(view.is_loading()));
    if view.can_search() {
        writeln!(
            out,
            "{}",
            button
                .with(color(palette.button_text))
                .on(color(palette.button_background))
        )?;
    } else {
        writeln!(out, "{}", button.with(muted))?;
    }
    writeln!(out)?;

    if let Some(message) = view.error_message() {
        writeln!(
            out,
            "{}",
            format!(" {} {} ", strings::ERROR_GLYPH, message)
                .with(color(palette.error_text))
                .on(color(palette.error_background))
        )?;
        writeln!(out)?;
    }

    if let Some(report) = view.result() {
        writeln!(out, "{}", report.location_name.as_str().with(text).bold())?;
        writeln!(out, "{}", report.country.as_str().with(muted))?;
        writeln!(out, "{}", report.temperature_display().with(text).bold())?;
        writeln!(
            out,
            "{}",
            format!("{} {}", report.glyph(), report.condition_description).with(muted)
        )?;
        writeln!(
            out,
            "{}",
            format!("{}: {}", strings::FEELS_LIKE_LABEL, report.feels_like_display()).with(muted)
        )?;
        writeln!(out)?;

        let details = [
            ("💨", strings::WIND_LABEL, report.wind_display()),
            ("💧", strings::HUMIDITY_LABEL, report.humidity_display()),
            ("🌡️", strings::PRESSURE_LABEL, report.pressure_display()),
            ("👁️", strings::VISIBILITY_LABEL, report.visibility_display()),
        ];
        for pair in details.chunks(2) {
            let row = pair
                .iter()
                .map(|(glyph, label, value)| format!(" {} {:<8} {:>10} ", glyph, label, value))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(
                out,
                "{}",
                row.with(color(palette.detail_card_text))
                    .on(color(palette.detail_card_background))
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", strings::current_footer().with(muted))?;
    writeln!(out, "{}", strings::INPUT_HINT.with(muted))?;
    out.flush()
}
