use std::path::PathBuf;
use std::sync::OnceLock;

use crate::err::{Error, Result};
use crate::logging::init_log;

pub struct Config {
    pub log_config: LogConfig,
    /// Directory receiving `debug.log` / `trace.log` at high verbosity
    pub log_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogConfig {
    Trace,
    Verbose(u8),
    NoLog,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_config: LogConfig::Verbose(0),
            log_dir: PathBuf::from("."),
        }
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn init_config(config: Config) -> Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| Error::ConfigInitialized)?;
    let config = get_config();
    init_log(&config.log_config, &config.log_dir)
}

pub fn get_config() -> &'static Config {
    CONFIG.get().expect("cannot get config before init")
}
