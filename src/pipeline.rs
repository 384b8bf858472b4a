//! Per-family generation pipeline.
//!
//! Each family runs through four stages threaded by [`Staged`]: resolve the
//! default file, read it, merge the locale files, render the artifact. A
//! failed stage drops the payload for that family only; the diagnostics of
//! every family reach the sink.

use camino::Utf8PathBuf;
use lexicon_common::{Diagnostic, KeyValueTable, Severity, Staged};
use log::debug;

use crate::config::GeneratorConfig;
use crate::error::{ReadError, ReadErrors};
use crate::family::{FileFamily, SourceFile, group_families};
use crate::format::ReadOrigin;
use crate::host::{Artifact, ArtifactSink, FileLoader};
use crate::merge::{LocalizationModel, merge_locales};
use crate::render::{RenderRequest, artifact_id, render};

/// Specifier label used when reporting problems in a default file.
pub const DEFAULT_SPECIFIER: &str = "(default)";

/// Counts describing one [`generate`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Families found in the input.
    pub families: usize,
    /// Artifacts handed to the sink.
    pub artifacts: usize,
    /// Error diagnostics reported.
    pub errors: usize,
    /// Warning diagnostics reported.
    pub warnings: usize,
}

impl GenerationSummary {
    fn record(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.severity() {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
    }

    /// Whether any error was reported.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Groups `files` into families and runs each one, feeding `sink`.
///
/// Families are processed in the order their first file appears.
pub fn generate(
    files: &[Utf8PathBuf],
    loader: &dyn FileLoader,
    config: &GeneratorConfig,
    sink: &mut dyn ArtifactSink,
) -> GenerationSummary {
    let families = group_families(files);
    let mut summary = GenerationSummary {
        families: families.len(),
        ..GenerationSummary::default()
    };

    for family in families {
        let mut emitted = None;
        generate_family(family, loader, config).sink(
            |diagnostic| {
                summary.record(diagnostic);
                sink.report(diagnostic);
            },
            |artifact| emitted = Some(artifact),
        );
        if let Some(artifact) = emitted {
            summary.artifacts += 1;
            sink.emit(artifact);
        }
    }

    debug!(
        target: "lexicon::pipeline",
        "generated {} artifact(s) from {} family(ies): {} error(s), {} warning(s)",
        summary.artifacts,
        summary.families,
        summary.errors,
        summary.warnings
    );
    summary
}

/// Runs one family through every stage.
#[must_use]
pub fn generate_family(
    family: FileFamily,
    loader: &dyn FileLoader,
    config: &GeneratorConfig,
) -> Staged<Artifact> {
    debug!(
        target: "lexicon::pipeline",
        "processing family `{}`",
        family.class_name()
    );

    Staged::new(family)
        .bind(FileFamily::resolve)
        .bind(|resolved, sink| {
            let default = read_file(
                loader,
                &resolved.default_file,
                DEFAULT_SPECIFIER,
                &resolved.class_name,
            )
            .map_err(|errors| errors.fail(sink))?;
            Ok((resolved, LocalizationModel::new(default)))
        })
        .bind(|(resolved, model), sink| {
            let class_name = resolved.class_name;
            let model = merge_locales(
                &class_name,
                model,
                &resolved.locale_files,
                |file| read_file(loader, &file.file, &file.specifier, &class_name),
                sink,
            )?;
            Ok((class_name, model))
        })
        .bind(|(class_name, model), _sink| {
            let namespace = config.namespace();
            let text = render(&RenderRequest {
                namespace,
                class_name: &class_name,
                invariant_tag: config.invariant_tag(),
                plural_variant: config.plural_variant(),
                model: &model,
            });
            let id = artifact_id(namespace, &class_name);
            Ok(Artifact {
                file_name: format!("{id}.rs"),
                id,
                text,
            })
        })
}

fn read_file(
    loader: &dyn FileLoader,
    file: &SourceFile,
    specifier: &str,
    family: &str,
) -> Result<KeyValueTable, ReadErrors> {
    let text = loader.load(file.path()).map_err(|source| ReadError::Io {
        path: file.path().to_owned(),
        family: family.to_owned(),
        source,
    })?;
    file.format().read(
        &text,
        &ReadOrigin {
            file: file.name(),
            specifier,
            family,
        },
    )
}
