//! Subcommands.

pub mod batch;
pub mod config;
pub mod process;
pub mod serve;

use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use docproc_core::{BatchProcessor, DocprocConfig, GroupedOutput};

/// Load configuration from `--config`, else the default path if present, else defaults.
/// Environment overrides are applied last.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DocprocConfig> {
    let config = match config_path {
        Some(path) => DocprocConfig::from_file(Path::new(path))?,
        None => {
            let default_path = config::default_config_path();
            if default_path.exists() {
                DocprocConfig::from_file(&default_path)?
            } else {
                DocprocConfig::default()
            }
        }
    };

    let config = config.apply_env();
    config.validate()?;
    Ok(config)
}

/// Build a processor, optionally forcing offline drug lookups.
pub fn build_processor(mut config: DocprocConfig, offline: bool) -> anyhow::Result<BatchProcessor> {
    if offline {
        config.drug_info.enabled = false;
    }
    Ok(BatchProcessor::from_config(&config)?)
}

/// Write the grouped output as pretty JSON to a file or stdout.
pub fn write_output(output: &GroupedOutput, path: Option<&PathBuf>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(output)?;

    match path {
        Some(path) => {
            fs::write(path, json)?;
            eprintln!(
                "{} Output written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
