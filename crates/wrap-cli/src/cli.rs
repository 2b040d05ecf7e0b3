//! Command-line argument parsing
//!
//! Supports:
//! - Listing the commands derived from the configured wrappers
//! - Running a configured toggle, or an explicit tag pair, on a range of a file
//! - Editing the configured wrappers

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use wrap_core::{DocumentAccess, Position};

/// Toggle wrapper tags around a range of a file
#[derive(Parser, Debug)]
#[command(name = "wrap-toggle", version, about = "Toggle wrapper tags around a selection")]
pub struct CliArgs {
    /// Settings file (defaults to ~/.config/wrap-toggle/data.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// List the toggle commands derived from the configured wrappers
    List,

    /// Run a configured toggle command on a range of a file
    Toggle {
        /// File to edit
        file: PathBuf,

        /// Command id (`wrap-with-shortcut-bold`) or wrapper id (`bold`)
        #[arg(short, long)]
        command: String,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Toggle an explicit tag pair on a range of a file
    Wrap {
        /// File to edit
        file: PathBuf,

        /// Marker inserted before the range
        #[arg(long, allow_hyphen_values = true, default_value = "")]
        start_tag: String,

        /// Marker inserted after the range
        #[arg(long, allow_hyphen_values = true, default_value = "")]
        end_tag: String,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Edit the configured wrappers
    #[command(subcommand)]
    Tags(TagsCommand),
}

#[derive(Subcommand, Debug)]
pub enum TagsCommand {
    /// Add a wrapper; its id is derived from the name
    Add {
        /// Display name
        name: String,
        /// Start marker
        #[arg(allow_hyphen_values = true)]
        start: String,
        /// End marker
        #[arg(allow_hyphen_values = true)]
        end: String,
    },
    /// Rename a wrapper (its id and command id stay the same)
    Rename {
        /// Wrapper id
        id: String,
        /// New display name
        name: String,
    },
    /// Change a wrapper's markers
    Set {
        /// Wrapper id
        id: String,
        /// Start marker
        #[arg(allow_hyphen_values = true)]
        start: String,
        /// End marker
        #[arg(allow_hyphen_values = true)]
        end: String,
    },
    /// Move a wrapper to another position (zero-based)
    Move {
        /// Current position
        from: usize,
        /// New position
        to: usize,
    },
    /// Remove a wrapper
    Remove {
        /// Wrapper id
        id: String,
    },
}

/// The range a toggle applies to.
#[derive(Args, Debug, Clone)]
pub struct RangeArgs {
    /// Range start: a char offset (`12`) or a 1-based `LINE:COL` (`3:5`)
    #[arg(long, value_name = "OFFSET|LINE:COL")]
    pub from: Location,

    /// Range end (defaults to `--from`, i.e. a caret)
    #[arg(long, value_name = "OFFSET|LINE:COL")]
    pub to: Option<Location>,

    /// Print the edited document instead of writing the file
    #[arg(long)]
    pub dry_run: bool,
}

/// A location in a document as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Zero-based char offset.
    Offset(usize),
    /// Zero-based line/column (parsed from the 1-based user form).
    LineColumn(Position),
}

impl Location {
    /// Char offset of this location in `doc`.
    pub fn resolve<D: DocumentAccess + ?Sized>(&self, doc: &D) -> usize {
        match *self {
            Location::Offset(offset) => offset.min(doc.char_count()),
            Location::LineColumn(position) => doc.position_to_offset(position),
        }
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid number '{}': {}", part, e))
        };

        match s.split_once(':') {
            None => parse(s).map(Location::Offset),
            Some((line, column)) => {
                let line = parse(line)?;
                let column = parse(column)?;
                if line == 0 || column == 0 {
                    return Err("LINE:COL is 1-based".to_string());
                }
                Ok(Location::LineColumn(Position::new(line - 1, column - 1)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_location_parsing() {
        assert_eq!("12".parse::<Location>(), Ok(Location::Offset(12)));
        assert_eq!(
            "3:5".parse::<Location>(),
            Ok(Location::LineColumn(Position::new(2, 4)))
        );
        assert!("0:1".parse::<Location>().is_err());
        assert!("x".parse::<Location>().is_err());
    }

    #[test]
    fn test_parse_toggle_with_caret() {
        let args = CliArgs::try_parse_from([
            "wrap-toggle",
            "toggle",
            "notes.md",
            "--command",
            "bold",
            "--from",
            "2:1",
        ])
        .unwrap();

        match args.command {
            CliCommand::Toggle { command, range, .. } => {
                assert_eq!(command, "bold");
                assert_eq!(range.from, Location::LineColumn(Position::new(1, 0)));
                assert_eq!(range.to, None);
                assert!(!range.dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_wrap_with_markers() {
        let args = CliArgs::try_parse_from([
            "wrap-toggle",
            "--settings",
            "/tmp/s.json",
            "wrap",
            "a.txt",
            "--start-tag",
            "~~",
            "--end-tag",
            "~~",
            "--from",
            "0",
            "--to",
            "4",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(args.settings, Some(PathBuf::from("/tmp/s.json")));
        match args.command {
            CliCommand::Wrap {
                start_tag,
                end_tag,
                range,
                ..
            } => {
                assert_eq!(start_tag, "~~");
                assert_eq!(end_tag, "~~");
                assert!(range.dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
