use std::{fmt::Display, fs::OpenOptions, path::PathBuf, sync::Mutex};

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV_VAR: &str = "REVISR_LOG";

const DEFAULT_LOG_PATH: &str = "revisr/revisr.log";
const DEFAULT_DIRECTIVE: &str = "info";

pub fn default_log_path() -> Result<PathBuf, LogError> {
    dirs::data_local_dir()
        .map(|mut path| {
            path.push(DEFAULT_LOG_PATH);
            path
        })
        .ok_or(LogError::NoDataDir)
}

///Logs go to a file since the terminal is taken over by the UI.
pub fn init(path: Option<PathBuf>) -> Result<PathBuf, LogError> {
    let path = match path {
        Some(path) => path,
        None => default_log_path()?,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|err| LogError::Io(path.clone(), err))?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|err| LogError::Io(path.clone(), err))?;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| LogError::Init(err.to_string()))?;

    Ok(path)
}

#[derive(Debug)]
pub enum LogError {
    NoDataDir,
    Io(PathBuf, std::io::Error),
    Init(String),
}

impl Display for LogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDataDir => f.write_str("Unable to find user data directory"),
            Self::Io(path, err) => f.write_fmt(format_args!(
                "IoError: {err}, path: {}",
                path.to_str().unwrap_or("unknown")
            )),
            Self::Init(err) => f.write_fmt(format_args!("Unable to install logger: {err}")),
        }
    }
}
