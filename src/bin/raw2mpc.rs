use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use raw2mpc::{raw2mpc, ConvertOptions, Delimiter, PathSource, RawSource, Status};
use std::path::PathBuf;

/// Power flow raw data to MATPOWER case converter.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Power flow raw data file.
    #[arg(required = true)]
    input: PathBuf,

    /// Optimal power flow raw data file.
    opf_input: Option<PathBuf>,

    /// Write the case to FILE (.m or .json). Defaults to the input file
    /// with a .m extension.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print more information.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Print debug information.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Raw file format revision (29, 30, 31 or 32). Determined from the
    /// file header if not given.
    #[arg(short, long, value_name = "REV")]
    revision: Option<i64>,

    /// How data items are separated: 'comma' or 'space'. Determined from
    /// the file header if not given.
    #[arg(short = 's', long = "separator", value_name = "SEP")]
    separator: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        LevelFilter::Debug
    } else if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp(None)
        .init();

    match execute(&cli) {
        Ok(status) => {
            std::process::exit(status.code());
        }
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}

fn execute(cli: &Cli) -> Result<Status> {
    let mut options = ConvertOptions {
        revision: cli.revision,
        ..Default::default()
    };

    if let Some(sep) = &cli.separator {
        match sep.parse::<Delimiter>() {
            Ok(delimiter) => options.delimiter = Some(delimiter),
            Err(msg) => log::warn!("{}", msg),
        }
    }

    let output = match &cli.output {
        Some(path) => path.clone(),
        None => cli.input.with_extension("m"),
    };

    let mut pf = PathSource::new(&cli.input);
    let mut opf = cli.opf_input.as_ref().map(PathSource::new);

    let conv = raw2mpc(
        &mut pf,
        opf.as_mut().map(|s| s as &mut dyn RawSource),
        Some(&output),
        &options,
    )?;

    let diag = &conv.diagnostics;
    log::info!(
        "{} buses, {} generators, {} branches ({} warnings, {} errors).",
        diag.stats.buses,
        diag.stats.generators,
        diag.stats.branches,
        diag.warning_count(),
        diag.error_count()
    );

    Ok(conv.status)
}
