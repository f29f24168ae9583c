//! CLI argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::config::ConfigLayer;
use crate::format::FormatterKind;

/// Custom HTML data generator for Angular libraries
#[derive(Parser, Debug)]
#[command(name = "ng-html-data")]
#[command(about = "Generates VS Code custom HTML data from Angular components and directives")]
#[command(version)]
pub struct Cli {
    /// Glob selecting the source files (default: **/*.ts)
    #[arg(short, long, alias = "f", value_name = "GLOB")]
    pub files: Option<String>,

    /// Output file (default: custom.html-data.json)
    #[arg(short, long, alias = "d", value_name = "PATH")]
    pub destination: Option<String>,

    /// Glob to leave out; repeat for several. Replaces the configured list
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Formatter for component and directive descriptions
    #[arg(long, value_enum, value_name = "FORMATTER")]
    pub tag_formatter: Option<FormatterKind>,

    /// Formatter for input and output descriptions
    #[arg(long, value_enum, value_name = "FORMATTER")]
    pub attribute_formatter: Option<FormatterKind>,

    /// Config file to use instead of .ng-html-data.json
    #[arg(long, env = "NG_HTML_DATA_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the document instead of writing the destination file
    #[arg(long)]
    pub stdout: bool,

    /// Log each file and declaration
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Settings given on the command line, as the top config layer
    pub fn overrides(&self) -> ConfigLayer {
        ConfigLayer {
            destination: self.destination.clone(),
            files: self.files.clone(),
            exclude: (!self.exclude.is_empty()).then(|| self.exclude.clone()),
            tag_formatter: self.tag_formatter,
            attribute_formatter: self.attribute_formatter,
        }
    }

    /// Default log level when `NG_HTML_DATA_LOG` is not set
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}
