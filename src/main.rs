use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand};

use collection_diff::{
    CompareMode, Error, KeySpec, Result,
    config::{Config, LogConfig, init_config},
    copy_with_timestamp, diff_snapshots, files_identical, path_exists,
};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use verbose output (-vvv also writes debug.log, -vvvv trace.log only)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory for log files
    #[arg(long, default_value = ".", global = true)]
    log_dir: PathBuf,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two snapshots of a keyed collection (JSON arrays of records)
    Diff(DiffArgs),
    /// Tell whether a path exists
    Exists(ExistsArgs),
    /// Copy a file under a name carrying its modification time
    Copy(CopyArgs),
    /// Tell whether two files have the same content
    Identical(IdenticalArgs),
}

#[derive(Debug, Args)]
struct DiffArgs {
    /// Path to older snapshot
    older: PathBuf,
    /// Path to newer snapshot
    newer: PathBuf,
    /// Key field, or comma separated fields for a composite key
    #[arg(short, long, default_value_t = KeySpec::default())]
    key: KeySpec,
    /// Path to save the result instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Pretty-print the result
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Args)]
struct ExistsArgs {
    path: PathBuf,
}

#[derive(Debug, Args)]
struct CopyArgs {
    /// Path to file to copy
    path: PathBuf,
    /// Folder receiving the copy, relative to the file's directory
    #[arg(short, long)]
    target_folder: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct IdenticalArgs {
    path1: PathBuf,
    path2: PathBuf,
    /// Comparison mode
    #[arg(short, long, value_enum, default_value_t = CompareMode::Bytes)]
    mode: CompareMode,
}

fn print_flag(flag: bool) -> ExitCode {
    println!("{}", flag);
    if flag {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Diff(args) => {
            let diff = diff_snapshots(&args.older, &args.newer, &args.key)?;
            let (mut writer, target): (Box<dyn Write>, PathBuf) = match &args.output {
                Some(path) => {
                    let file = File::create(path).map_err(|source| Error::Write {
                        path: path.clone(),
                        source,
                    })?;
                    (Box::new(BufWriter::new(file)) as Box<dyn Write>, path.clone())
                }
                None => (
                    Box::new(BufWriter::new(io::stdout().lock())) as Box<dyn Write>,
                    PathBuf::from("<stdout>"),
                ),
            };
            log::info!("writing diff...");
            let written = if args.pretty {
                serde_json::to_writer_pretty(&mut writer, &diff)
            } else {
                serde_json::to_writer(&mut writer, &diff)
            };
            written
                .map_err(io::Error::from)
                .and_then(|_| writeln!(writer))
                .and_then(|_| writer.flush())
                .map_err(|source| Error::Write {
                    path: target,
                    source,
                })?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Exists(args) => Ok(print_flag(path_exists(&args.path))),
        Commands::Copy(args) => {
            let target_folder = args.target_folder.unwrap_or_default();
            if let Some(name) = copy_with_timestamp(&args.path, target_folder)? {
                println!("{}", name);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Identical(args) => Ok(print_flag(files_identical(
            &args.path1,
            &args.path2,
            args.mode,
        )?)),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_config(Config {
        log_config: LogConfig::Verbose(cli.verbose),
        log_dir: cli.log_dir.clone(),
    }) {
        eprintln!("{}", err);
        return ExitCode::from(2);
    }
    log::debug!("cli args: {:#?}", cli);
    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::from(2)
        }
    }
}
