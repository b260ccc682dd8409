//! Generator driver: scan → load → lower → render → write.
use std::path::{Path, PathBuf};

use colored::Colorize;
use rayon::prelude::*;
use tracing::{debug, info, info_span};

use crate::codegen::{self, Emitter};
use crate::config::GeneratorConfig;
use crate::error::GenError;
use crate::ir::TypeMetadata;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// One matched input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    pub path: PathBuf,
    /// filename without its final extension
    pub short_name: String,
    /// `short_name` with the prefix removed; never empty
    pub target_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub modules: usize,
    pub files: Vec<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl ModuleDescriptor {
    pub fn from_path(path: &Path, prefix: &str) -> Result<Self, GenError> {
        let invalid = |message: String| GenError::InvalidModule {
            path: path.to_path_buf(),
            message,
        };
        let short_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| invalid("file name is not valid UTF-8".to_string()))?
            .to_string();
        let target_name = short_name
            .strip_prefix(prefix)
            .ok_or_else(|| invalid(format!("file name does not start with `{prefix}`")))?
            .to_string();
        if target_name.is_empty() {
            return Err(invalid("target name is empty after removing the prefix".to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
            short_name,
            target_name,
        })
    }

    /// Read, parse and lower this module's manifest.
    pub fn load_metadata(&self) -> Result<TypeMetadata, GenError> {
        let manifest = crate::manifest::load_manifest(&self.path)?;
        crate::lower::lower_manifest(manifest, &self.target_name)
    }
}

impl RunReport {
    pub fn summary(&self) {
        println!(
            "{} {} module(s), {} file(s) written",
            "generated".green().bold(),
            self.modules,
            self.files.len(),
        );
        for file in &self.files {
            println!("  {}", file.display().to_string().dimmed());
        }
    }
}

/// List the manifests selected by `config`, sorted by path.
pub fn scan(config: &GeneratorConfig) -> Result<Vec<ModuleDescriptor>, GenError> {
    if !config.scan_dir.is_dir() {
        return Err(GenError::Scan {
            dir: config.scan_dir.clone(),
            message: "not a directory".to_string(),
        });
    }

    let pattern = config.scan_pattern();
    let options = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    let entries = glob::glob_with(&pattern, options).map_err(|source| GenError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut paths = Vec::<PathBuf>::new();
    for entry in entries {
        let path = entry.map_err(|e| GenError::Scan {
            dir: config.scan_dir.clone(),
            message: e.to_string(),
        })?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    debug!(pattern = %pattern, matched = paths.len(), "scanned");

    paths
        .iter()
        .map(|p| ModuleDescriptor::from_path(p, &config.prefix))
        .collect()
}

/// Run a whole generation pass. Stops at the first error; files already
/// written for earlier modules stay on disk.
pub fn run(config: &GeneratorConfig) -> Result<RunReport, GenError> {
    let modules = scan(config)?;
    if modules.is_empty() {
        info!(dir = %config.scan_dir.display(), "no modules matched");
        return Ok(RunReport::default());
    }

    std::fs::create_dir_all(&config.output_dir).map_err(|source| GenError::Write {
        path: config.output_dir.clone(),
        source,
    })?;

    let emitters = codegen::emitters();
    let per_module: Vec<Vec<PathBuf>> = if config.parallel {
        modules
            .par_iter()
            .map(|m| process_module(m, config, &emitters))
            .collect::<Result<_, _>>()?
    } else {
        modules
            .iter()
            .map(|m| process_module(m, config, &emitters))
            .collect::<Result<_, _>>()?
    };

    Ok(RunReport {
        modules: modules.len(),
        files: per_module.into_iter().flatten().collect(),
    })
}

fn process_module(
    module: &ModuleDescriptor,
    config: &GeneratorConfig,
    emitters: &[&dyn Emitter],
) -> Result<Vec<PathBuf>, GenError> {
    let span = info_span!("module", target = %module.target_name);
    let _guard = span.enter();

    let metadata = module.load_metadata()?;
    if metadata.is_empty() {
        info!(path = %module.path.display(), "module exports no types");
        return Ok(Vec::new());
    }

    // render everything first so a mapping error leaves no file behind
    let artifacts = emitters
        .iter()
        .filter_map(|emitter| {
            emitter
                .artifact(&metadata, &config.output_dir, &module.target_name, &config.file_suffix)
                .transpose()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let language = artifact.language;
        let path = artifact.write()?;
        info!(language, path = %path.display(), types = metadata.types.len(), "wrote");
        written.push(path);
    }
    Ok(written)
}
