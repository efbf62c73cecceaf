//! rowassert - Equality assertions for tabular data

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use termcolor::ColorChoice;

use rowassert::compare::{assert_column_equality, assert_dataset_equality};
use rowassert::config::{AssertOptions, ComparisonPolicy, Config, OutputFormat};
use rowassert::output::render_to_stdout;
use rowassert::parser::ParserFactory;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliColor {
    Auto,
    Always,
    Never,
}

impl From<CliColor> for ColorChoice {
    fn from(c: CliColor) -> Self {
        match c {
            CliColor::Auto => ColorChoice::Auto,
            CliColor::Always => ColorChoice::Always,
            CliColor::Never => ColorChoice::Never,
        }
    }
}

/// Assert that two tabular files (CSV, JSON) hold equal data
#[derive(Parser, Debug)]
#[command(name = "rowassert")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Left (actual) file
    left_file: PathBuf,

    /// Right (expected) file
    #[arg(required_unless_present = "columns")]
    right_file: Option<PathBuf>,

    /// Compare two columns of the left file instead (e.g. name,expected_name)
    #[arg(long, value_delimiter = ',', conflicts_with = "right_file")]
    columns: Option<Vec<String>>,

    /// Absolute tolerance for floating point columns (e.g. 0.001)
    #[arg(long)]
    precision: Option<f64>,

    /// Treat two NaN values as equal
    #[arg(long)]
    allow_nan_equality: bool,

    /// Ignore nullability when comparing schemas
    #[arg(long)]
    ignore_nullable: bool,

    /// Sort rows of both files before comparing
    #[arg(long)]
    ignore_row_order: bool,

    /// Sort columns of both files by name before comparing
    #[arg(long)]
    ignore_column_order: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// When to color terminal output
    #[arg(long, value_enum, default_value = "auto")]
    color: CliColor,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let mut policy = ComparisonPolicy::new().with_allow_nan_equality(self.allow_nan_equality);
        if let Some(precision) = self.precision {
            policy = policy.with_precision(precision);
        }

        let options = AssertOptions::new()
            .with_policy(policy)
            .with_ignore_nullable(self.ignore_nullable)
            .with_ignore_row_order(self.ignore_row_order)
            .with_ignore_column_order(self.ignore_column_order);

        let mut config = Config {
            left_file: self.left_file,
            right_file: self.right_file,
            ..Default::default()
        }
        .with_output_format(self.format.into())
        .with_color_choice(self.color.into())
        .with_options(options);

        if let Some(columns) = self.columns {
            let [left, right] = <[String; 2]>::try_from(columns)
                .map_err(|c| anyhow::anyhow!("--columns takes exactly two names, got {}", c.len()))?;
            config = config.with_column_pair(left, right);
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    match run() {
        Ok(equal) => {
            if equal {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1) // Differences found
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let config = Cli::parse().into_config()?;
    let factory = ParserFactory::new();

    tracing::info!(path = %config.left_file.display(), "loading left file");
    let left = factory
        .parse(&config.left_file)
        .with_context(|| format!("Failed to parse left file: {}", config.left_file.display()))?;

    let outcome = match (&config.column_pair, &config.right_file) {
        (Some((col1, col2)), _) => {
            assert_column_equality(&left, col1, col2, &config.options.policy)
        }
        (None, Some(right_file)) => {
            tracing::info!(path = %right_file.display(), "loading right file");
            let right = factory
                .parse(right_file)
                .with_context(|| format!("Failed to parse right file: {}", right_file.display()))?;
            assert_dataset_equality(&left, &right, &config.options)
        }
        (None, None) => anyhow::bail!("a right file or --columns is required"),
    };

    let terminal = config.output_format == OutputFormat::Terminal;
    match outcome {
        Ok(()) => {
            if terminal {
                println!("No differences found.");
            }
            Ok(true)
        }
        Err(err) => {
            if let Some(report) = err.report() {
                if terminal {
                    println!("{}", first_line(&err.to_string()));
                }
                render_to_stdout(report, config.output_format, config.color_choice)?;
                return Ok(false);
            }
            Err(err.into())
        }
    }
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or_default()
}
