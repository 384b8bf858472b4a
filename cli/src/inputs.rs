//! Expanding command-line inputs into candidate files.

use camino::{Utf8Path, Utf8PathBuf};
use glob::Pattern;
use lexicon::is_supported;
use log::debug;

use crate::error::{CliError, Result};

/// Expands `inputs` into a file list.
///
/// Files are kept as given, in order. Directories are searched recursively
/// for supported files, which are appended in sorted order. Unsupported
/// files named directly are passed through; the generator skips them.
///
/// # Errors
///
/// Fails when an input does not exist or a directory cannot be searched.
pub fn collect_inputs(inputs: &[Utf8PathBuf]) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(search_directory(input)?);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(CliError::MissingInput {
                path: input.clone(),
            });
        }
    }
    Ok(files)
}

fn search_directory(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let pattern = format!("{}/**/*", Pattern::escape(dir.as_str()));
    let entries = glob::glob(&pattern).map_err(|source| CliError::Pattern {
        path: dir.to_owned(),
        source,
    })?;

    let mut found = Vec::new();
    for entry in entries {
        let path = entry.map_err(|source| CliError::Walk {
            path: dir.to_owned(),
            source,
        })?;
        let path = Utf8PathBuf::from_path_buf(path).map_err(|path| CliError::NonUtf8Path { path })?;
        if path.is_file() && is_supported(&path) {
            found.push(path);
        }
    }
    found.sort();
    debug!(
        target: "lexicon::cli",
        "found {} localisation file(s) under {dir}",
        found.len()
    );
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap_or_else(|error| panic!("tempdir: {error}"));
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .unwrap_or_else(|path| panic!("non UTF-8 temp dir {}", path.display()));
        (dir, root)
    }

    fn touch(path: &Utf8Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|error| panic!("mkdir: {error}"));
        }
        fs::write(path, "").unwrap_or_else(|error| panic!("write: {error}"));
    }

    #[rstest]
    fn searches_directories_recursively_and_sorts() {
        let (_guard, root) = temp_root();
        touch(&root.join("b/Texts.fr.resx"));
        touch(&root.join("a/Texts.resx"));
        touch(&root.join("a/readme.md"));

        let files = collect_inputs(&[root.clone()])
            .unwrap_or_else(|error| panic!("collect failed: {error}"));

        assert_eq!(
            files,
            vec![root.join("a/Texts.resx"), root.join("b/Texts.fr.resx")]
        );
    }

    #[rstest]
    fn keeps_explicit_files_in_order() {
        let (_guard, root) = temp_root();
        let second = root.join("Texts.resx");
        let first = root.join("Texts.de.resx");
        touch(&second);
        touch(&first);

        let files = collect_inputs(&[first.clone(), second.clone()])
            .unwrap_or_else(|error| panic!("collect failed: {error}"));

        assert_eq!(files, vec![first, second]);
    }

    #[rstest]
    fn missing_inputs_are_errors() {
        let (_guard, root) = temp_root();

        let outcome = collect_inputs(&[root.join("absent")]);

        assert!(matches!(outcome, Err(CliError::MissingInput { .. })));
    }
}
