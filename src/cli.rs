//! CLI argument parsing via `clap`.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gmlfmt",
    about = "Format GML source files and gate commits on canonical formatting",
    long_about = "gmlfmt — reformat GameMaker Language (.gml) sources to the canonical style.\n\nWith no mode flag, all staged .gml files are formatted in place.",
    after_help = "Examples:\n  gmlfmt                 # format staged .gml files in place\n  gmlfmt --validate      # pre-commit gate, writes nothing\n  gmlfmt --all           # format every .gml file under the current directory\n  gmlfmt --file scripts/player/player.gml",
    disable_version_flag = true,
    group(clap::ArgGroup::new("mode").multiple(false))
)]
pub struct Cli {
    #[arg(
        long,
        group = "mode",
        help = "Exit 0 when every staged .gml file is canonically formatted, 1 otherwise"
    )]
    pub validate: bool,
    #[arg(long, group = "mode", help = "Format all staged .gml files (default)")]
    pub staged: bool,
    #[arg(
        long,
        group = "mode",
        help = "Format every .gml file under the current directory"
    )]
    pub all: bool,
    #[arg(long, group = "mode", value_name = "FILE", help = "Format only the given file")]
    pub file: Option<PathBuf>,
    #[arg(short = 'v', long = "version", group = "mode", help = "Print version and exit")]
    pub version: bool,
}

/// Invocation mode, decided once at startup. Each run performs exactly one
/// mode and exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Version,
    Validate,
    Staged,
    All,
    File(PathBuf),
}

impl Cli {
    pub fn mode(self) -> Mode {
        if self.version {
            Mode::Version
        } else if self.validate {
            Mode::Validate
        } else if self.all {
            Mode::All
        } else if let Some(path) = self.file {
            Mode::File(path)
        } else {
            // --staged and the bare invocation both land here
            Mode::Staged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_staged() {
        let cli = Cli::try_parse_from(["gmlfmt"]).unwrap();
        assert_eq!(cli.mode(), Mode::Staged);
        let cli = Cli::try_parse_from(["gmlfmt", "--staged"]).unwrap();
        assert_eq!(cli.mode(), Mode::Staged);
    }

    #[test]
    fn test_each_flag_selects_its_mode() {
        assert_eq!(
            Cli::try_parse_from(["gmlfmt", "--validate"]).unwrap().mode(),
            Mode::Validate
        );
        assert_eq!(
            Cli::try_parse_from(["gmlfmt", "--all"]).unwrap().mode(),
            Mode::All
        );
        assert_eq!(
            Cli::try_parse_from(["gmlfmt", "-v"]).unwrap().mode(),
            Mode::Version
        );
        assert_eq!(
            Cli::try_parse_from(["gmlfmt", "--file", "a.gml"]).unwrap().mode(),
            Mode::File(PathBuf::from("a.gml"))
        );
    }

    #[test]
    fn test_file_flag_requires_a_value() {
        assert!(Cli::try_parse_from(["gmlfmt", "--file"]).is_err());
    }

    #[test]
    fn test_modes_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["gmlfmt", "--validate", "--all"]).is_err());
    }

    #[test]
    fn test_unknown_flag_is_a_usage_error() {
        assert!(Cli::try_parse_from(["gmlfmt", "--frobnicate"]).is_err());
    }
}
