//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Config file looked up under the root when `-C` is not given.
pub const DEFAULT_CONFIG: &str = "siterev.toml";

/// siterev: content-hashed asset resolution for static sites
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: siterev.toml)
    #[arg(short = 'C', long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// URL path prefix for subdirectory deployment
    #[arg(long = "path-prefix")]
    pub path_prefix: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the public URL of a logical asset name
    Resolve {
        /// Asset category (e.g. `css`, `js`)
        category: String,

        /// Logical file name (e.g. `main.css`)
        name: String,
    },

    /// List every entry of a category's manifest with its public URL
    List {
        /// Asset category (e.g. `css`, `js`)
        category: String,
    },

    /// Verify that every configured reference resolves and every deployed file exists
    Check,

    /// Revision a category: write content-hashed copies and its manifest
    Rev {
        /// Asset category (e.g. `css`, `js`)
        category: String,

        /// Directory of compiled files (overrides `[assets.<category>].source`)
        #[arg(short, long)]
        source: Option<PathBuf>,
    },

    /// Write the template context (site settings + resolved asset URLs) as JSON
    Context {
        /// Print to stdout instead of writing `<output>/<data>/site.json`
        #[arg(long)]
        stdout: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from(["siterev", "resolve", "css", "main.css"]).unwrap();
        match cli.command {
            Commands::Resolve { category, name } => {
                assert_eq!(category, "css");
                assert_eq!(name, "main.css");
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.config, PathBuf::from("siterev.toml"));
    }

    #[test]
    fn test_parse_rev_with_source() {
        let cli = Cli::try_parse_from(["siterev", "rev", "js", "-s", "build/js"]).unwrap();
        match cli.command {
            Commands::Rev { category, source } => {
                assert_eq!(category, "js");
                assert_eq!(source, Some(PathBuf::from("build/js")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "siterev",
            "-r",
            "site",
            "-C",
            "other.toml",
            "--path-prefix",
            "blog",
            "check",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Check));
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert_eq!(cli.path_prefix, Some(PathBuf::from("blog")));
    }

    #[test]
    fn test_resolve_requires_name() {
        assert!(Cli::try_parse_from(["siterev", "resolve", "css"]).is_err());
    }

    #[test]
    fn test_parse_context_stdout() {
        let cli = Cli::try_parse_from(["siterev", "context", "--stdout"]).unwrap();
        assert!(matches!(cli.command, Commands::Context { stdout: true }));
    }
}
