//! Line-based input for the terminal front end.
//!
//! Stdin is read on its own thread so the main loop keeps applying lookup
//! results and handling commands while a request is in flight.

use std::io::{self, BufRead};
use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use hava_ui::{Key, WeatherLookupView};

/// One submitted input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleTheme,
    /// Anything else is a city query
    Submit(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            ":quit" | ":q" => Command::Quit,
            ":theme" => Command::ToggleTheme,
            _ => Command::Submit(line.to_string()),
        }
    }
}

/// Forward lines from `reader` over a channel. The channel disconnects at
/// end of input or on the first read error.
pub fn spawn_reader<R>(reader: R) -> io::Result<Receiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    thread::Builder::new()
        .name("hava-stdin".to_string())
        .spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read input: {}", e);
                        break;
                    }
                }
            }
            tracing::debug!("Input reader finished");
        })?;

    Ok(rx)
}

/// Apply a command to the view. Breaks when the user asked to quit.
pub fn dispatch(view: &mut WeatherLookupView, command: Command) -> ControlFlow<()> {
    match command {
        Command::Quit => return ControlFlow::Break(()),
        Command::ToggleTheme => {
            view.toggle_theme();
        }
        Command::Submit(text) => {
            view.set_query(text);
            view.handle_key(Key::Enter);
        }
    }
    ControlFlow::Continue(())
}
