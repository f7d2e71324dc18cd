use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use crate::config::LogConfig;
use crate::err::{Error, Result};

fn now() -> DateTime<Local> {
    Local::now()
}

fn map_level_to_str(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

fn open_log_file(dir: &Path, file_name: &str) -> Result<Mutex<LineWriter<File>>> {
    let path = dir.join(file_name);
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
        .map_err(|source| Error::LogFile { path, source })?;
    Ok(Mutex::new(LineWriter::new(file)))
}

/// Where a logger sends its lines.
enum Sink {
    Console,
    ConsoleAndFile(Mutex<LineWriter<File>>),
    File(Mutex<LineWriter<File>>),
}

pub struct SnapshotLogger {
    level: LevelFilter,
    sink: Sink,
}

impl SnapshotLogger {
    fn console(level: LevelFilter) -> Self {
        Self {
            level,
            sink: Sink::Console,
        }
    }

    fn with_debug_file(dir: &Path) -> Result<Self> {
        Ok(Self {
            level: LevelFilter::Debug,
            sink: Sink::ConsoleAndFile(open_log_file(dir, "debug.log")?),
        })
    }

    fn with_trace_file(dir: &Path) -> Result<Self> {
        Ok(Self {
            level: LevelFilter::Trace,
            sink: Sink::File(open_log_file(dir, "trace.log")?),
        })
    }

    fn write_console(record: &Record) {
        eprintln!(
            "[{:<5} {}] {}",
            map_level_to_str(record.level()),
            now().format("%H:%M:%S%.3f"),
            record.args()
        )
    }

    fn write_file(writer: &Mutex<LineWriter<File>>, record: &Record, with_module: bool) {
        let Ok(mut writer) = writer.lock() else {
            return;
        };
        let ts = now().format("%H:%M:%S%.6f");
        let level = map_level_to_str(record.level());
        // a failed log write has nowhere better to go
        let _ = if with_module {
            writeln!(
                writer,
                "[{:<5} {} {}] {}",
                level,
                ts,
                record.module_path().unwrap_or("???"),
                record.args()
            )
        } else {
            writeln!(writer, "[{:<5} {}] {}", level, ts, record.args())
        };
    }
}

impl Log for SnapshotLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match &self.sink {
            Sink::Console => Self::write_console(record),
            Sink::ConsoleAndFile(writer) => {
                Self::write_file(writer, record, false);
                Self::write_console(record);
            }
            Sink::File(writer) => Self::write_file(writer, record, true),
        }
    }

    fn flush(&self) {
        if let Sink::ConsoleAndFile(writer) | Sink::File(writer) = &self.sink {
            if let Ok(mut writer) = writer.lock() {
                let _ = writer.flush();
            }
        }
    }
}

impl Drop for SnapshotLogger {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Level a `-v` count maps to. Counts of 3 and above also open a log file.
pub fn verbosity_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 | 3 => LevelFilter::Debug,
        4..=u8::MAX => LevelFilter::Trace,
    }
}

pub fn init_log(config: &LogConfig, log_dir: &Path) -> Result<()> {
    let logger = match config {
        LogConfig::NoLog => return Ok(()),
        LogConfig::Trace | LogConfig::Verbose(4..=u8::MAX) => {
            SnapshotLogger::with_trace_file(log_dir)?
        }
        LogConfig::Verbose(3) => SnapshotLogger::with_debug_file(log_dir)?,
        LogConfig::Verbose(verbose) => SnapshotLogger::console(verbosity_level(*verbose)),
    };
    let level = logger.level;
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}
