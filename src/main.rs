//! ng-html-data CLI entry point

use std::env;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ng_html_data::indexing::{collect_files, extract_files_parallel, write_html_data};
use ng_html_data::{Cli, Config};

fn main() -> ExitCode {
    match run() {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> ng_html_data::Result<String> {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    // 1. Resolve configuration
    let cwd = env::current_dir()?;
    let config = Config::load(&cwd, cli.config.as_deref(), &cli.overrides())?;

    // 2. Collect source files
    let files = collect_files(&cwd, &config.files, &config.exclude)?;
    info!(count = files.len(), pattern = %config.files, "collected source files");

    // 3. Extract in parallel
    let extractor = config.extractor();
    let report = extract_files_parallel(&files, &extractor);

    // 4. Print or write the document
    if cli.stdout {
        return report.data.to_json_pretty();
    }

    let destination = config.destination_path(&cwd);
    write_html_data(&destination, &report.data)?;

    Ok(format!(
        "Wrote {} tags and {} global attributes from {} files to {}",
        report.data.tags.len(),
        report.data.global_attributes.len(),
        report.files_processed,
        destination.display()
    ))
}

fn init_tracing(level: &str) {
    let filter =
        EnvFilter::try_from_env("NG_HTML_DATA_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so --stdout output stays valid JSON
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
