use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::source::Source;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./pubpage.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the publication list as HTML cards
    Publications {
        /// Bibliography file or URL (BibTeX or CSL-JSON)
        #[arg(value_name = "SRC")]
        from: Option<Source>,
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Render the configured video gallery rows
    Gallery {
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Render a standalone page with publications, gallery and image modal
    Page {
        #[arg(value_name = "SRC")]
        from: Option<Source>,
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Print the formatted author summary of every entry
    Authors {
        #[arg(value_name = "SRC")]
        from: Option<Source>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pubpage",
            "publications",
            "refs.bib",
            "--no-color",
            "-vv",
            "-o",
            "out.html",
        ])
        .expect("parse");
        assert!(cli.no_color);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Publications { from, output } => {
                assert_eq!(from, Some(Source::File(PathBuf::from("refs.bib"))));
                assert_eq!(output, Some(PathBuf::from("out.html")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn source_is_optional() {
        let cli = Cli::try_parse_from(["pubpage", "page"]).expect("parse");
        assert!(matches!(cli.command, Command::Page { from: None, output: None }));
    }

    #[test]
    fn url_source_is_remote() {
        let cli = Cli::try_parse_from(["pubpage", "authors", "https://example.org/pub.bib"])
            .expect("parse");
        match cli.command {
            Command::Authors { from: Some(Source::Remote(url)) } => {
                assert_eq!(url.host_str(), Some("example.org"))
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
