//! Argument definitions.

use camino::Utf8PathBuf;
use clap::Parser;

/// Generate Rust view contracts from localisation file families.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "lexicon")]
#[command(version, about)]
#[command(long_about = concat!(
    "Generate Rust view contracts from localisation file families.\n\n",
    "Files sharing a base name form a family: Texts.resx is the default file and ",
    "Texts.fr.resx, Texts.de-DE.resx supply translations. Each family with a default ",
    "file becomes one generated source file in the output directory.",
))]
#[command(after_help = concat!(
    "EXIT STATUS:\n",
    "  0  every family generated\n",
    "  1  an error diagnostic was reported or an artifact could not be written\n",
    "  2  invalid arguments, configuration or inputs\n\n",
    "EXAMPLES:\n",
    "  $ lexicon --out-dir src/generated i18n/\n",
    "  $ lexicon --config lexicon.toml --namespace app.i18n -o out Texts.resx Texts.fr.resx",
))]
pub struct Cli {
    /// TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Dotted namespace for generated items; overrides the configuration.
    #[arg(short, long, value_name = "NS")]
    pub namespace: Option<String>,

    /// Directory receiving generated files; created when missing.
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Utf8PathBuf,

    /// Localisation files, or directories searched recursively.
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<Utf8PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parses_every_option() {
        let cli = Cli::try_parse_from([
            "lexicon",
            "--config",
            "lexicon.toml",
            "-n",
            "app.i18n",
            "-o",
            "out",
            "i18n",
            "Extra.resx",
        ])
        .unwrap_or_else(|error| panic!("parse failed: {error}"));

        assert_eq!(cli.config.as_deref(), Some(camino::Utf8Path::new("lexicon.toml")));
        assert_eq!(cli.namespace.as_deref(), Some("app.i18n"));
        assert_eq!(cli.out_dir, Utf8PathBuf::from("out"));
        assert_eq!(cli.inputs.len(), 2);
    }

    #[rstest]
    #[case::no_inputs(&["lexicon", "--out-dir", "out"])]
    #[case::no_out_dir(&["lexicon", "Texts.resx"])]
    fn rejects_incomplete_invocations(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }
}
