//! Minimal CLI: scan → (C++ | C#)
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::config::{
    DEFAULT_EXTENSION, DEFAULT_OUTPUT_DIR, DEFAULT_PREFIX, DEFAULT_SCAN_DIR, GeneratorConfig,
};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// scan a directory for `<prefix>*.json` type manifests and generate C++ and C# sources for each
#[derive(Parser, Debug)]
#[command(name = "pkggen", version)]
pub struct CommandLineInterface {
    /// directory scanned for manifests
    #[arg(long, env = "PKGGEN_SCAN_DIR", default_value = DEFAULT_SCAN_DIR)]
    scan_dir: PathBuf,

    /// directory the generated sources are written into (created if missing)
    #[arg(long, short, env = "PKGGEN_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// filename prefix selecting manifests; stripped to form the target name
    #[arg(long, env = "PKGGEN_PREFIX", default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// manifest file extension
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// appended to the target name of generated files (e.g. `_class` → `DB_class.h`)
    #[arg(long, default_value_t = String::new())]
    file_suffix: String,

    /// process modules in parallel
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            scan_dir: self.scan_dir.clone(),
            output_dir: self.output_dir.clone(),
            prefix: self.prefix.clone(),
            extension: self.extension.trim_start_matches('.').to_string(),
            file_suffix: self.file_suffix.clone(),
            parallel: self.parallel,
        }
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let config = self.config();

        // debug path
        if self.no_op {
            eprintln!("{config:#?}");
            return Ok(());
        }

        tracing::info!(
            scan_dir = %config.scan_dir.display(),
            output_dir = %config.output_dir.display(),
            "starting generation"
        );
        let report = crate::driver::run(&config).with_context(|| {
            format!("generation from {} failed", config.scan_dir.display())
        })?;
        report.summary();
        Ok(())
    }
}
