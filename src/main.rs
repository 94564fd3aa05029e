use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser as ClapParser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use loxscan::config::{Config, OutputFormat};
use loxscan::{CliError, Lexer, LexingError, Token, TokenSink};

#[derive(ClapParser)]
#[command(author, version, about = "Lox lexical scanner")]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a source file
    Tokenize {
        /// Source file to scan
        file: PathBuf,
        /// Output format, overriding the config file
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

/// Writes tokens to stdout and diagnostics to stderr as they are produced.
struct PrintSink<O: Write, E: Write> {
    out: O,
    err: E,
    format: OutputFormat,
    failure: Option<CliError>,
}

impl<O: Write, E: Write> PrintSink<O, E> {
    fn new(out: O, err: E, format: OutputFormat) -> Self {
        Self {
            out,
            err,
            format,
            failure: None,
        }
    }

    fn write_token(&mut self, token: &Token<'_>) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", token)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, token)?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<(), CliError> {
        if let Some(failure) = self.failure.take() {
            return Err(failure);
        }
        self.out.flush()?;
        self.err.flush()?;
        Ok(())
    }
}

impl<'a, O: Write, E: Write> TokenSink<'a> for PrintSink<O, E> {
    fn token(&mut self, token: Token<'a>) {
        if self.failure.is_some() {
            return;
        }
        if let Err(failure) = self.write_token(&token) {
            self.failure = Some(failure);
        }
    }

    fn error(&mut self, error: LexingError) {
        if let Err(failure) = writeln!(self.err, "{}", error) {
            self.failure.get_or_insert(CliError::Output(failure));
        }
    }
}

/// Picks the log filter: `RUST_LOG` when set, otherwise the config's
/// `log_filter`. `None` leaves logging off.
fn log_filter(rust_log: Option<&str>, config: &Config) -> Result<Option<EnvFilter>, CliError> {
    if let Some(directives) = rust_log {
        return Ok(Some(EnvFilter::new(directives)));
    }
    match config.log_filter.as_deref() {
        Some(directive) => EnvFilter::try_new(directive)
            .map(Some)
            .map_err(|source| CliError::LogFilter {
                directive: directive.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

fn init_tracing(config: &Config) -> Result<(), CliError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let Some(filter) = log_filter(rust_log.as_deref(), config)? else {
        return Ok(());
    };

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .try_init();
    Ok(())
}

fn tokenize(path: &Path, format: OutputFormat, config: &Config) -> Result<u8, CliError> {
    let source = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut sink = PrintSink::new(BufWriter::new(stdout.lock()), stderr.lock(), format);
    let had_error = Lexer::new(&source).scan_into(&mut sink);
    sink.finish()?;

    Ok(if had_error { config.error_exit_code } else { 0 })
}

fn run(cli: Cli) -> Result<u8, CliError> {
    let config = Config::load(cli.config.as_deref())?;
    init_tracing(&config)?;

    match cli.command {
        Commands::Tokenize { file, format } => {
            tokenize(&file, format.unwrap_or(config.format), &config)
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
