mod alerts;
mod config;
mod game;
mod hex;
mod util;
mod viewer;

use std::cell::Cell;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use eframe::egui;
use thiserror::Error;

use config::{Args, Config, ConfigError};
use game::Outcome;
use viewer::{CaptchaViewer, TITLE};

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("eframe failed: {0}")]
    Eframe(#[from] eframe::Error),
    #[error("{}", Outcome::RanAway)]
    RanAway,
}

fn run() -> Result<(), AppError> {
    let config = Config::try_from(Args::parse())?;
    log::info!(
        "starting with seed {} and {} pick(s)",
        config.seed,
        config.picks
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_fullscreen(config.fullscreen),
        ..Default::default()
    };
    let outcome = Rc::new(Cell::new(None));
    let slot = Rc::clone(&outcome);
    eframe::run_native(
        TITLE,
        native_options,
        Box::new(move |cc| Box::new(CaptchaViewer::new(cc, &config, slot))),
    )?;

    match outcome.get() {
        Some(Outcome::Passed) => {
            println!("{}", Outcome::Passed);
            Ok(())
        }
        Some(Outcome::RanAway) => Err(AppError::RanAway),
        None => {
            log::info!("window closed before the round ended");
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
