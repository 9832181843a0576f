use std::{io::{self, IsTerminal, Write}, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use ::log::{error, info};

mod cli {
    use std::{io::{self, IsTerminal}, path::PathBuf};

    use byte_entropy::{histogram::{DEFAULT_BINS, DEFAULT_MAX_BAR_LENGTH}, HistogramError, HistogramOptions, Report, ReportOptions, ScanError};
    use derive_more::Display;

    #[derive(Debug, thiserror::Error, PartialEq, Eq)]
    pub enum ValidationError {
        #[error("Nothing is piped to stdin.")]
        StdinIsTerminal,
    }

    /// Computes the Shannon entropy of a file's byte values.
    #[derive(clap::Parser, Debug)]
    #[command(version, about)]
    pub struct Cli {
        /// File to analyze, `-` reads from stdin
        #[clap(value_parser = Input::parse_value)]
        input: Input,

        /// Show a histogram of the byte values
        #[clap(short, long)]
        pub graph: bool,

        /// Number of bins on the histogram
        #[clap(short, long, default_value_t = DEFAULT_BINS as u16, value_parser = clap::value_parser!(u16).range(1..=256))]
        pub bins: u16,

        /// Max histogram bar length
        #[clap(short, long, default_value_t = DEFAULT_MAX_BAR_LENGTH as u32, value_parser = clap::value_parser!(u32).range(1..))]
        pub length: u32,

        /// Number-only output
        #[clap(short, long)]
        pub quiet: bool,

        /// Log the analysis steps
        #[clap(short, long)]
        pub verbose: bool,
    }

    impl Cli {
        pub fn validate_input(&self) -> Result<&Input, ValidationError> {
            if matches!(self.input, Input::Stdin) && io::stdin().is_terminal() {
                return Err(ValidationError::StdinIsTerminal)
            }

            Ok(&self.input)
        }

        pub fn report_options(&self) -> Result<ReportOptions, HistogramError> {
            let histogram = self.graph
                .then(|| HistogramOptions::new(self.bins.into(), self.length as usize))
                .transpose()?;

            Ok(ReportOptions {
                quiet: self.quiet,
                histogram,
            })
        }
    }

    #[derive(Clone, Debug, Display, PartialEq, Eq)]
    pub enum Input {
        #[display("<stdin>")]
        Stdin,

        #[display("{}", _0.display())]
        File(PathBuf),
    }

    impl Input {
        fn parse_value(str: &str) -> Result<Self, String> {
            if str.trim() == "-" {
                return Ok(Self::Stdin)
            }

            let path = PathBuf::from(str);

            if !path.exists() {
                return Err("Expected the input file to exist.".to_string())
            }
            if !path.is_file() {
                return Err("Expected the input path to be a file.".to_string())
            }

            Ok(Self::File(path))
        }

        /// Scans the input, keeping "can't open" and "failed to read" apart in the error.
        pub fn analyze(&self) -> Result<Report, ScanError> {
            match self {
                Self::Stdin => byte_entropy::analyze(self.to_string(), io::stdin().lock())
                    .map_err(ScanError::Read),
                Self::File(path) => byte_entropy::analyze_file(path),
            }
        }
    }
}

mod log {
    use colog::format::CologStyle;
    use env_logger::fmt::Formatter;
    use log::{Level, LevelFilter, Record};
    use once_cell::race::OnceBool;

    struct ColorFormatter;

    impl CologStyle for ColorFormatter {
        fn level_token(&self, level: &Level) -> &str {
            match level {
                Level::Error => "Error",
                Level::Warn => "Warning",
                Level::Info => "Info",
                Level::Debug => "Debug",
                Level::Trace => "Trace",
            }
        }
        fn prefix_token(&self, level: &Level) -> String {
            self.level_color(level, &format!("{: >7}", self.level_token(level)))
        }
        fn line_separator(&self) -> String {
            "\n".to_string() + &" ".repeat(7)
        }
    }

    static ACTIVE: OnceBool = OnceBool::new();

    pub fn is_active() -> bool {
        ACTIVE.get().unwrap_or(false)
    }

    fn custom_format(buf: &mut Formatter, record: &Record<'_>) -> Result<(), std::io::Error> {
        if is_active() {
            ColorFormatter.format(buf, record)
        } else {
            Ok(())
        }
    }

    pub fn init(active: bool, verbose: bool) {
        let _ = ACTIVE.set(active);

        let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

        colog::basic_builder()
            .format(custom_format)
            .filter_level(level)
            .init();
    }
}

fn run<W: Write>(cli: &Cli, writer: &mut W) -> anyhow::Result<()> {
    let input = cli.validate_input()?;
    let options = cli.report_options()?;

    info!("Analyzing `{}`...", input);
    let report = input.analyze().with_context(|| format!("Failed to analyze `{}`", input))?;

    report.write_to(writer, &options)?;
    writer.flush()?;

    Ok(())
}

fn try_main(cli: Cli) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    run(&cli, &mut stdout)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    log::init(io::stdout().is_terminal() && !cli.quiet, cli.verbose);

    if let Err(err) = try_main(cli) {
        error!("{:#}", err);

        if !log::is_active() {
            eprintln!("Error : {:#}", err);
        }
        return ExitCode::FAILURE
    }

    ExitCode::SUCCESS
}
