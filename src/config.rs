//! Configuration handling for rowassert

use std::path::PathBuf;

use termcolor::ColorChoice;

/// Output format for comparison reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Equality rules applied to individual values
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComparisonPolicy {
    /// Absolute tolerance for floating point columns; `None` means exact
    pub precision: Option<f64>,
    /// Treat two NaN values as equal
    pub allow_nan_equality: bool,
}

impl ComparisonPolicy {
    /// Exact comparison, NaN never equal
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the absolute tolerance
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Treat two NaN values as equal
    pub fn with_allow_nan_equality(mut self, allow: bool) -> Self {
        self.allow_nan_equality = allow;
        self
    }
}

/// Options for whole-dataset assertions
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AssertOptions {
    /// Value equality rules
    pub policy: ComparisonPolicy,
    /// Skip nullability when comparing schemas
    pub ignore_nullable: bool,
    /// Sort rows of both datasets before comparing
    pub ignore_row_order: bool,
    /// Sort columns of both datasets by name before comparing
    pub ignore_column_order: bool,
}

impl AssertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: ComparisonPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_ignore_nullable(mut self, ignore: bool) -> Self {
        self.ignore_nullable = ignore;
        self
    }

    pub fn with_ignore_row_order(mut self, ignore: bool) -> Self {
        self.ignore_row_order = ignore;
        self
    }

    pub fn with_ignore_column_order(mut self, ignore: bool) -> Self {
        self.ignore_column_order = ignore;
        self
    }
}

/// Configuration for a command line run
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the left (actual) file
    pub left_file: PathBuf,
    /// Path to the right (expected) file; unused in column mode
    pub right_file: Option<PathBuf>,
    /// Compare these two columns of the left file instead of two files
    pub column_pair: Option<(String, String)>,
    /// Output format
    pub output_format: OutputFormat,
    /// Colour for terminal output
    pub color_choice: ColorChoice,
    /// Assertion options
    pub options: AssertOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            left_file: PathBuf::new(),
            right_file: None,
            column_pair: None,
            output_format: OutputFormat::default(),
            color_choice: ColorChoice::Auto,
            options: AssertOptions::default(),
        }
    }
}

impl Config {
    /// Create a new Config comparing two files
    pub fn new(left_file: PathBuf, right_file: PathBuf) -> Self {
        Self {
            left_file,
            right_file: Some(right_file),
            ..Default::default()
        }
    }

    /// Compare two columns of one file
    pub fn with_column_pair(mut self, left: String, right: String) -> Self {
        self.column_pair = Some((left, right));
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set colour choice
    pub fn with_color_choice(mut self, choice: ColorChoice) -> Self {
        self.color_choice = choice;
        self
    }

    /// Set assertion options
    pub fn with_options(mut self, options: AssertOptions) -> Self {
        self.options = options;
        self
    }
}
