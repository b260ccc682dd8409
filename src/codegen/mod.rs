//! Emitters: render [`TypeMetadata`] into target-language source text.
pub mod cpp;
pub mod csharp;

use std::path::{Path, PathBuf};

use crate::error::GenError;
use crate::ir::TypeMetadata;

pub use cpp::CppEmitter;
pub use csharp::CSharpEmitter;

const INDENT: &str = "    ";

pub trait Emitter: Sync {
    /// human-readable target language, used in logs and error messages
    fn language(&self) -> &'static str;

    /// conventional file extension, without the dot
    fn extension(&self) -> &'static str;

    /// Render every type of `metadata` into one source file. Pure: no I/O.
    fn render(&self, metadata: &TypeMetadata) -> Result<String, GenError>;

    /// Render into an [`Artifact`] at `<output_dir>/<target_name><suffix>.<ext>`
    /// without touching the filesystem. `None` when there are no types.
    fn artifact(
        &self,
        metadata: &TypeMetadata,
        output_dir: &Path,
        target_name: &str,
        suffix: &str,
    ) -> Result<Option<Artifact>, GenError> {
        if metadata.is_empty() {
            return Ok(None);
        }
        Ok(Some(Artifact {
            path: crate::config::output_path(output_dir, target_name, suffix, self.extension()),
            source: self.render(metadata)?,
            language: self.language(),
        }))
    }

    /// Render and write `<output_dir>/<target_name><suffix>.<ext>`.
    /// Returns `None` (and writes nothing) when there are no types.
    fn emit(
        &self,
        metadata: &TypeMetadata,
        output_dir: &Path,
        target_name: &str,
        suffix: &str,
    ) -> Result<Option<PathBuf>, GenError> {
        match self.artifact(metadata, output_dir, target_name, suffix)? {
            Some(artifact) => artifact.write().map(Some),
            None => Ok(None),
        }
    }
}

/// One rendered source file, not yet on disk.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub source: String,
    pub language: &'static str,
}

impl Artifact {
    /// Create or overwrite the file; returns its path.
    pub fn write(self) -> Result<PathBuf, GenError> {
        match std::fs::write(&self.path, &self.source) {
            Ok(()) => Ok(self.path),
            Err(source) => Err(GenError::Write {
                path: self.path,
                source,
            }),
        }
    }
}

/// Both emitters, in the order their files are written.
pub fn emitters() -> [&'static dyn Emitter; 2] {
    [&CppEmitter, &CSharpEmitter]
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Line-oriented source buffer with brace-style indentation. Always `\n`.
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    out: String,
    depth: usize,
}

impl SourceWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.out.push('\n');
    }

    /// `{` on its own line, then indent.
    pub(crate) fn open(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    /// dedent, then `closer` (usually `}` or `};`).
    pub(crate) fn close(&mut self, closer: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(closer);
    }

    /// One `{marker}{line}` per doc line, trailing whitespace trimmed.
    pub(crate) fn doc_lines(&mut self, marker: &str, doc: &str) {
        for l in doc.lines() {
            let l = l.trim_end();
            if l.is_empty() {
                self.line(marker.trim_end());
            } else {
                self.line(format!("{marker}{l}"));
            }
        }
    }

    pub(crate) fn into_string(self) -> String {
        self.out
    }
}
