use std::path::{Path, PathBuf};

pub const DEFAULT_SCAN_DIR: &str = "templates";
pub const DEFAULT_OUTPUT_DIR: &str = "pkg";
pub const DEFAULT_PREFIX: &str = "pkggen_template_";
pub const DEFAULT_EXTENSION: &str = "json";

/// Everything a generation run needs to know, passed explicitly to the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// directory scanned for `<prefix>*.<extension>` manifests
    pub scan_dir: PathBuf,
    /// directory the generated sources are written into
    pub output_dir: PathBuf,
    pub prefix: String,
    /// manifest file extension, without the leading dot
    pub extension: String,
    /// appended to the target name of every generated file (e.g. `_class`)
    pub file_suffix: String,
    /// process modules on the rayon pool instead of one after another
    pub parallel: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            scan_dir: PathBuf::from(DEFAULT_SCAN_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            prefix: DEFAULT_PREFIX.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            file_suffix: String::new(),
            parallel: false,
        }
    }
}

impl GeneratorConfig {
    pub fn new(scan_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            scan_dir: scan_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_file_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.file_suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Glob pattern selecting the manifests. Every user-supplied piece is
    /// escaped so only the single `*` acts as a wildcard.
    pub fn scan_pattern(&self) -> String {
        let dir = glob::Pattern::escape(&self.scan_dir.to_string_lossy());
        let prefix = glob::Pattern::escape(&self.prefix);
        let extension = glob::Pattern::escape(&self.extension);
        format!("{dir}/{prefix}*.{extension}")
    }
}

/// `<output_dir>/<target_name><suffix>.<extension>`
pub fn output_path(output_dir: &Path, target_name: &str, suffix: &str, extension: &str) -> PathBuf {
    output_dir.join(format!("{target_name}{suffix}.{extension}"))
}
