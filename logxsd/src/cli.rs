//! Command line interface.

use clap::Parser;
use std::path::PathBuf;

/// Generates an XSD for logging configuration files from a plugin type registry
#[derive(Parser, Debug, Clone)]
#[command(name = "logxsd", version)]
pub struct Cli {
    /// output .xsd file
    pub output: PathBuf,

    /// registry description file (built-in logging target catalog if omitted)
    #[arg(long, value_name = "FILE")]
    pub registry: Option<PathBuf>,

    /// template schema containing a <types-go-here/> marker (embedded template if omitted)
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// skip registry validation before generation
    #[arg(long, default_value_t = false)]
    pub no_validate: bool,
}

impl Cli {
    /// Creates arguments writing to `output` with every default.
    #[must_use]
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            registry: None,
            template: None,
            no_validate: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_single_positional() {
        let cli = Cli::try_parse_from(["logxsd", "NLog.xsd"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("NLog.xsd"));
        assert!(cli.registry.is_none());
        assert!(cli.template.is_none());
        assert!(!cli.no_validate);
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "logxsd",
            "out.xsd",
            "--registry",
            "plugins.xml",
            "--template",
            "base.xsd",
            "--no-validate",
        ])
        .unwrap();
        assert_eq!(cli.registry, Some(PathBuf::from("plugins.xml")));
        assert_eq!(cli.template, Some(PathBuf::from("base.xsd")));
        assert!(cli.no_validate);
    }

    #[test]
    fn test_missing_output() {
        let err = Cli::try_parse_from(["logxsd"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_extra_argument() {
        let err = Cli::try_parse_from(["logxsd", "a.xsd", "b.xsd"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
