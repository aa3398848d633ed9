use std::{fmt::Display, panic::AssertUnwindSafe};

use clap::Parser;
use tracing::{error, info};

use catalog::load_items;
use session::Session;
use terminal::Screen;
use ui::{practice, PracticeOptions, Status};

pub mod catalog;
mod cli;
mod color;
mod event;
pub mod export;
pub mod item;
mod logging;
pub mod progress;
pub mod random;
pub mod session;
mod terminal;
mod ui;

pub use ui::PracticeSummary;

pub fn run() -> Result<PracticeSummary, RevisrError> {
    let cli = cli::RevisrCli::parse();

    match logging::init(cli.log.clone()) {
        Ok(path) => info!(path = %path.display(), "logging initialised"),
        Err(err) => eprintln!("Logging disabled: {err}"),
    }

    let load_failed;
    let (mut session, status) = match load_items(&cli.catalog) {
        Ok(items) => {
            info!(path = %cli.catalog.display(), items = items.len(), "catalog loaded");
            let status = Status::Info(format!(
                "Loaded {} items from {}",
                items.len(),
                cli.catalog.display()
            ));
            load_failed = false;
            (Session::new(items), status)
        }
        Err(err) => {
            //A broken catalog still opens an empty session
            error!(%err, "unable to load catalog");
            eprintln!("Unable to load catalog: {err}");
            load_failed = true;
            (Session::empty(), Status::Error(err.to_string()))
        }
    };

    let options = PracticeOptions {
        count: cli.count,
        chart: cli.chart,
        out: cli.out,
        load_failed,
    };

    std::panic::catch_unwind(AssertUnwindSafe(
        || -> Result<PracticeSummary, RevisrError> {
            //NOTE: From this point, stdout/stderr will not be usable, hence we
            //need to catch any panics, since they are not loggable. Mapping to
            //RevisrError allows us to gracefully exit and log the panic.
            let screen = &mut Screen::new()?;

            practice(screen, &mut session, &options, status)
        },
    ))
    .map_err(|err| {
        let message = if let Some(msg) = err.downcast_ref::<String>() {
            msg.clone()
        } else if let Some(msg) = err.downcast_ref::<&str>() {
            (*msg).to_owned()
        } else {
            "Unknown panic occurred".to_owned()
        };

        error!(%message, "practice session panicked");
        RevisrError::Panic(message)
    })?
    .map(|summary| {
        info!(
            practiced = summary.practiced,
            exports = summary.exports,
            unsaved = summary.unsaved,
            "session finished"
        );
        summary
    })
}

#[derive(Debug)]
pub enum RevisrError {
    Ui(UiError),
    Panic(String),
}

impl Display for RevisrError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ui(err) => f.write_fmt(format_args!("Ui: {err}")),
            Self::Panic(err) => f.write_fmt(format_args!("Panicked: {err}")),
        }
    }
}

impl From<UiError> for RevisrError {
    fn from(err: UiError) -> Self {
        Self::Ui(err)
    }
}

#[derive(Debug)]
pub enum UiError {
    Io(std::io::Error),
    InUse,
    Poisoned,
}

impl Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => f.write_fmt(format_args!("IoError: {err}")),
            Self::InUse => f.write_str("Terminal is already being used"),
            Self::Poisoned => f.write_str("Terminal lock is poisoned"),
        }
    }
}

impl From<std::io::Error> for UiError {
    fn from(err: std::io::Error) -> Self {
        UiError::Io(err)
    }
}
