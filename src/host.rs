//! The boundary between the generator and its environment.
//!
//! [`FileLoader`] supplies file text and [`ArtifactSink`] receives the
//! results. Both are traits so runs can be driven from memory in tests and
//! from the file system in the CLI.

use std::collections::HashMap;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use lexicon_common::Diagnostic;
use log::{debug, warn};

/// One generated source unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// Dotted identifier, `{namespace}.{class_name}`.
    pub id: String,
    /// File name the artifact is written under.
    pub file_name: String,
    /// Rendered source text.
    pub text: String,
}

/// Supplies the text of input files.
pub trait FileLoader {
    /// Reads `path` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be read.
    fn load(&self, path: &Utf8Path) -> io::Result<String>;
}

/// Reads files from disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsLoader;

impl FileLoader for FsLoader {
    fn load(&self, path: &Utf8Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Serves file text from memory, keyed by path.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    files: HashMap<Utf8PathBuf, String>,
}

impl MemoryLoader {
    /// Creates an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file, returning the loader for chaining.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<Utf8PathBuf>, text: impl Into<String>) -> Self {
        self.files.insert(path.into(), text.into());
        self
    }

    /// Paths of every stored file, sorted.
    #[must_use]
    pub fn paths(&self) -> Vec<Utf8PathBuf> {
        let mut paths: Vec<_> = self.files.keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl FileLoader for MemoryLoader {
    fn load(&self, path: &Utf8Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such file: {path}"))
        })
    }
}

/// Receives diagnostics and artifacts.
pub trait ArtifactSink {
    /// Accepts one diagnostic.
    fn report(&mut self, diagnostic: &Diagnostic);

    /// Accepts one artifact.
    fn emit(&mut self, artifact: Artifact);
}

/// Keeps everything in memory.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    /// Diagnostics in report order.
    pub diagnostics: Vec<Diagnostic>,
    /// Artifacts in emission order.
    pub artifacts: Vec<Artifact>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactSink for CollectingSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }

    fn emit(&mut self, artifact: Artifact) {
        self.artifacts.push(artifact);
    }
}

/// Writes artifacts into a directory and keeps diagnostics in memory.
///
/// Write failures are logged and counted rather than returned, so one bad
/// artifact does not stop the others.
#[derive(Debug)]
pub struct DirectorySink {
    out_dir: Utf8PathBuf,
    diagnostics: Vec<Diagnostic>,
    written: Vec<Utf8PathBuf>,
    failures: usize,
}

impl DirectorySink {
    /// Creates a sink writing into `out_dir`, which must already exist.
    #[must_use]
    pub fn new(out_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            diagnostics: Vec::new(),
            written: Vec::new(),
            failures: 0,
        }
    }

    /// Diagnostics in report order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Paths written so far.
    #[must_use]
    pub fn written(&self) -> &[Utf8PathBuf] {
        &self.written
    }

    /// Number of artifacts that could not be written.
    #[must_use]
    pub const fn failures(&self) -> usize {
        self.failures
    }
}

impl ArtifactSink for DirectorySink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }

    fn emit(&mut self, artifact: Artifact) {
        let path = self.out_dir.join(&artifact.file_name);
        match std::fs::write(&path, artifact.text) {
            Ok(()) => {
                debug!(target: "lexicon::host", "wrote {} to {path}", artifact.id);
                self.written.push(path);
            }
            Err(error) => {
                warn!(target: "lexicon::host", "failed to write {path}: {error}");
                self.failures += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn artifact(file_name: &str) -> Artifact {
        Artifact {
            id: "app.Texts".to_owned(),
            file_name: file_name.to_owned(),
            text: "// generated\n".to_owned(),
        }
    }

    #[rstest]
    fn memory_loader_serves_known_files() {
        let loader = MemoryLoader::new().with_file("b.resx", "b").with_file("a.resx", "a");

        assert_eq!(
            loader.paths(),
            vec![Utf8PathBuf::from("a.resx"), Utf8PathBuf::from("b.resx")]
        );
        assert_eq!(loader.load(Utf8Path::new("a.resx")).ok().as_deref(), Some("a"));
        let missing = loader.load(Utf8Path::new("c.resx"));
        assert!(matches!(missing, Err(error) if error.kind() == io::ErrorKind::NotFound));
    }

    #[rstest]
    fn directory_sink_writes_named_files() {
        let dir = tempfile::tempdir().unwrap_or_else(|error| panic!("tempdir: {error}"));
        let out_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .unwrap_or_else(|path| panic!("non UTF-8 temp dir {}", path.display()));
        let mut sink = DirectorySink::new(out_dir.clone());

        sink.emit(artifact("app.Texts.rs"));

        let written = out_dir.join("app.Texts.rs");
        assert_eq!(sink.written(), [written.clone()]);
        assert_eq!(
            std::fs::read_to_string(&written).ok().as_deref(),
            Some("// generated\n")
        );
        assert_eq!(sink.failures(), 0);
    }

    #[rstest]
    fn directory_sink_counts_write_failures() {
        let dir = tempfile::tempdir().unwrap_or_else(|error| panic!("tempdir: {error}"));
        let out_dir = Utf8PathBuf::from_path_buf(dir.path().join("missing"))
            .unwrap_or_else(|path| panic!("non UTF-8 temp dir {}", path.display()));
        let mut sink = DirectorySink::new(out_dir);

        sink.emit(artifact("app.Texts.rs"));

        assert_eq!(sink.failures(), 1);
        assert!(sink.written().is_empty());
    }
}
