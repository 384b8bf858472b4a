//! Lexicon turns families of localisation files (`.resx`, `.csv`, `.json`)
//! into generated Rust source.
//!
//! A family is every file sharing a base name, such as `Texts.resx`,
//! `Texts.fr.resx` and `Texts.de-DE.resx`. The default file defines the
//! keys; locale files supply translations, completed against the default
//! so every realisation exposes the same accessors.
//!
//! ```
//! use lexicon::{CollectingSink, GeneratorConfig, MemoryLoader, generate};
//!
//! let loader = MemoryLoader::new()
//!     .with_file("Texts.json", r#"{ "hello": "Hello" }"#)
//!     .with_file("Texts.fr.json", r#"{ "hello": "Bonjour" }"#);
//! let mut sink = CollectingSink::new();
//!
//! let summary = generate(&loader.paths(), &loader, &GeneratorConfig::default(), &mut sink);
//!
//! assert_eq!(summary.artifacts, 1);
//! assert!(sink.artifacts[0].text.contains("pub struct FrTexts;"));
//! ```

pub mod config;
pub mod error;
pub mod family;
pub mod format;
pub mod host;
pub mod merge;
pub mod pipeline;
pub mod render;

pub use config::GeneratorConfig;
pub use error::{ConfigError, ReadError, ReadErrors};
pub use family::{FileFamily, LocaleFile, ResolvedFamily, SourceFile, group_families};
pub use format::{FileFormat, ReadOrigin, is_supported};
pub use host::{Artifact, ArtifactSink, CollectingSink, DirectorySink, FileLoader, FsLoader, MemoryLoader};
pub use merge::{LocalizationModel, classify, merge, merge_locales};
pub use pipeline::{GenerationSummary, generate, generate_family};
pub use render::{RenderRequest, render};
