use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use carousel_core::{CarouselController, CarouselSettings};
use clap::Parser;
use shared::{domain::IndexChange, error::CarouselError};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::{Command, HELP};

#[derive(Parser, Debug)]
#[command(name = "carousel", about = "Drive a slide carousel from the terminal")]
struct Args {
    /// Optional TOML settings file.
    #[arg(long, default_value = "carousel.toml")]
    config: PathBuf,
    /// Number of slides; overrides the configured titles' count.
    #[arg(long)]
    slides: Option<usize>,
    #[arg(long)]
    interval_ms: Option<u64>,
    #[arg(long)]
    no_auto_advance: bool,
    /// Print each index change as a JSON line instead of a frame.
    #[arg(long)]
    json: bool,
    /// Print the effective settings as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn apply_overrides(&self, settings: &mut CarouselSettings) {
        if let Some(interval_ms) = self.interval_ms {
            settings.interval_ms = interval_ms;
        }
        if self.no_auto_advance {
            settings.auto_advance = false;
        }
    }
}

struct Host {
    carousel: CarouselController,
    titles: Vec<String>,
    settings: CarouselSettings,
    json: bool,
}

impl Host {
    fn show_frame(&self) {
        println!(
            "{}",
            render::frame(
                &self.titles,
                self.carousel.current_index(),
                self.carousel.auto_advance_interval()
            )
        );
    }

    fn show_change(&self, change: &IndexChange) -> Result<()> {
        if self.json {
            println!("{}", render::json_line(change)?);
        } else {
            self.show_frame();
        }
        std::io::stdout().flush().context("failed to flush stdout")
    }

    fn run_command(&self, command: Command) {
        match command {
            Command::Next => {
                self.carousel.next();
            }
            Command::Previous => {
                self.carousel.previous();
            }
            Command::GoTo { position } => {
                if let Some(index) = commands::index_for_position(position) {
                    self.carousel.go_to(index);
                }
            }
            Command::Start { interval } => self
                .carousel
                .start_auto_advance(interval.unwrap_or_else(|| self.settings.interval())),
            Command::Stop => self.carousel.stop_auto_advance(),
            Command::Status => self.show_frame(),
            Command::Help => println!("{HELP}"),
            Command::Quit => {}
        }
    }
}

/// Under `--json`, configuration errors are also written to stdout as a report line.
fn startup_error(json: bool, err: CarouselError) -> anyhow::Error {
    if json {
        match render::error_line(&err) {
            Ok(line) => println!("{line}"),
            Err(encode_err) => warn!(%encode_err, "failed to encode error report"),
        }
    }
    err.into()
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = CarouselSettings::load(&args.config).with_context(|| {
        format!("failed to load settings from '{}'", args.config.display())
    })?;
    args.apply_overrides(&mut settings);
    settings
        .validate()
        .map_err(|err| startup_error(args.json, err))?;

    if args.print_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let titles = render::slide_titles(&settings.slide_titles, args.slides);
    let carousel = CarouselController::with_options(titles.len(), settings.options())
        .map_err(|err| startup_error(args.json, err))?;
    let mut events = carousel.subscribe_events();
    let host = Host {
        carousel,
        titles,
        settings,
        json: args.json,
    };

    info!(slides = host.titles.len(), "carousel mounted");
    host.show_frame();
    if host.settings.auto_advance {
        host.carousel.start_auto_advance(host.settings.interval());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read command from stdin")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => host.run_command(command),
                    Err(err) => eprintln!("{err:#}"),
                }
            }
            event = events.recv() => match event {
                Ok(change) => host.show_change(&change)?,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "renderer fell behind carousel events");
                    host.show_frame();
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    host.carousel.stop_auto_advance();
    info!("carousel unmounted");
    Ok(())
}
