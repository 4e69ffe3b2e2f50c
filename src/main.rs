//! Full-screen countdown timer.
//!
//! Type a duration as `HH:MM:SS`, press enter, and wait for the bell.
//! `ctrl+c` quits at any time.

use anyhow::{anyhow, Context, Result};
use bubbletea_countdown::config::DEFAULT_DONE_TEXT;
use bubbletea_countdown::prelude::*;
use bubbletea_rs::{quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg, Program};
use clap::Parser;
use crossterm::event::{KeyCode, KeyModifiers};
use once_cell::sync::OnceCell;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Type a duration, press enter, wait for the bell")]
struct Args {
    /// Prefill the entry, e.g. "00:05:00" (digits or `_` in HH:MM:SS form).
    #[arg(short, long, value_parser = Entry::parse)]
    duration: Option<Entry>,

    /// Start counting down right away from --duration.
    #[arg(short, long, requires = "duration")]
    start: bool,

    /// Redraw interval in milliseconds while counting down (1-1000).
    #[arg(long, default_value_t = 100)]
    interval_ms: u64,

    /// Let esc cancel a running countdown.
    #[arg(long)]
    allow_cancel: bool,

    /// Do not ring the terminal bell when the countdown finishes.
    #[arg(long)]
    no_bell: bool,

    /// Text shown when the countdown finishes.
    #[arg(long, default_value = DEFAULT_DONE_TEXT)]
    done_text: String,

    /// Write logs to this file. Filtered by RUST_LOG, "info" by default.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Config {
        Config::default()
            .with_tick_interval(Duration::from_millis(self.interval_ms))
            .with_allow_cancel(self.allow_cancel)
            .with_bell(!self.no_bell)
            .with_done_text(self.done_text.clone())
    }
}

// bubbletea-rs builds the root model through `Model::init()`, which takes no
// arguments, so the parsed flags are handed over here.
static ARGS: OnceCell<Args> = OnceCell::new();

struct App {
    countdown: Countdown,
    quit: Binding,
    bell: bool,
}

impl App {
    fn from_args(args: &Args) -> (Self, Option<Cmd>) {
        let config = args.config();
        let bell = config.bell;
        let mut countdown = Countdown::with_config(config);
        if let Some(entry) = &args.duration {
            countdown = countdown.with_entry(entry.clone());
        }
        let cmd = if args.start { countdown.start() } else { None };
        let app = Self {
            countdown,
            quit: Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)])
                .with_help("ctrl+c", "quit"),
            bell,
        };
        (app, cmd)
    }
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        match ARGS.get() {
            Some(args) => Self::from_args(args),
            None => Self::from_args(&Args::parse()),
        }
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            if self.quit.matches(key) {
                info!(state = %self.countdown.state(), "quit requested");
                return Some(quit());
            }
        }

        if let Some(done) = msg.downcast_ref::<CompletionMsg>() {
            if done.id == self.countdown.id() && self.bell {
                ring_bell();
            }
        }

        self.countdown.update(msg)
    }

    fn view(&self) -> String {
        self.countdown.view()
    }
}

fn ring_bell() {
    let mut out = std::io::stdout();
    if let Err(err) = out.write_all(b"\x07").and_then(|()| out.flush()) {
        warn!(%err, "could not ring the terminal bell");
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    args.config()
        .validate()
        .map_err(|e| anyhow!(e))
        .context("invalid settings")?;

    // The terminal belongs to the UI, so logs only go to a file.
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    info!(
        duration = ?args.duration.as_ref().map(ToString::to_string),
        start = args.start,
        interval_ms = args.interval_ms,
        allow_cancel = args.allow_cancel,
        "starting countdown"
    );

    ARGS.set(args)
        .map_err(|_| anyhow!("settings were already initialised"))?;

    let program = Program::<App>::builder()
        .alt_screen(true)
        .build()
        .context("failed to set up the terminal")?;
    program.run().await.context("countdown program failed")?;

    info!("countdown exited");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("countdown").chain(argv.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults_map_to_default_config() {
        let args = parse(&[]).unwrap();
        let config = args.config();
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert_eq!(config.done_text, "Time's up!");
        assert!(config.bell);
        assert!(!config.allow_cancel);
        assert!(args.duration.is_none());
    }

    #[test]
    fn test_flags_map_to_config() {
        let args = parse(&[
            "--interval-ms",
            "250",
            "--allow-cancel",
            "--no-bell",
            "--done-text",
            "Tea is ready",
        ])
        .unwrap();
        let config = args.config();
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert!(config.allow_cancel);
        assert!(!config.bell);
        assert_eq!(config.done_text, "Tea is ready");
    }

    #[test]
    fn test_duration_prefill() {
        let args = parse(&["--duration", "00:03:__"]).unwrap();
        assert_eq!(
            args.duration.map(|e| e.to_string()),
            Some("00:03:__".to_string())
        );
        assert!(parse(&["--duration", "3m"]).is_err());
    }

    #[test]
    fn test_start_requires_duration() {
        assert!(parse(&["--start"]).is_err());
        assert!(parse(&["-d", "00:00:10", "--start"]).is_ok());
    }

    #[test]
    fn test_out_of_range_interval_fails_validation() {
        let args = parse(&["--interval-ms", "0"]).unwrap();
        assert!(args.config().validate().is_err());
    }

    #[test]
    fn test_app_from_args_starts_countdown() {
        let args = parse(&["-d", "00:00:10", "-s", "--no-bell"]).unwrap();
        let (app, cmd) = App::from_args(&args);
        assert!(cmd.is_some());
        assert!(!app.bell);
        assert_eq!(app.countdown.state(), State::Timing);
    }

    #[test]
    fn test_app_quits_on_ctrl_c() {
        let args = parse(&[]).unwrap();
        let (mut app, _) = App::from_args(&args);
        let cmd = app.update(Box::new(KeyMsg {
            key: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        }));
        assert!(cmd.is_some());
    }
}
