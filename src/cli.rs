use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_SEPARATOR;

#[derive(Parser, Debug)]
#[command(name = "pokedex-sqlite")]
#[command(version, about = "Load a Pokedex CSV into SQLite and query it")]
pub struct Cli {
    /// SQLite database path (default: per-user data directory)
    #[arg(long, global = true, env = "POKEDEX_DB")]
    pub db: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Do not show a progress bar while loading
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// (Re)create the table from a CSV file
    Load {
        /// CSV file with a header row
        csv: PathBuf,

        /// Field separator
        #[arg(short, long, default_value = DEFAULT_SEPARATOR, value_parser = NonEmptyStringValueParser::new())]
        separator: String,

        /// Skip the load if the table already holds data
        #[arg(long)]
        if_missing: bool,
    },

    /// Show whether a dataset is loaded
    Status,

    /// List all names in alphabetical order
    Names,

    /// List all species ids in increasing order
    Ids,

    /// Show the record with the given name
    Get {
        /// Name (matched case-insensitively)
        name: String,
    },

    /// Show the record with the given species id
    Id {
        /// Species id
        species_id: i64,
    },

    /// List all distinct types
    Types,

    /// List names having the given type as primary or secondary type
    ByType {
        /// Type (matched case-insensitively)
        kind: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_load_with_separator() {
        let cli = Cli::try_parse_from([
            "pokedex-sqlite",
            "--db",
            "/tmp/p.db",
            "load",
            "pokemon.csv",
            "--separator",
            ";",
            "--if-missing",
        ])
        .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/p.db")));
        match cli.command {
            Commands::Load {
                csv,
                separator,
                if_missing,
            } => {
                assert_eq!(csv, PathBuf::from("pokemon.csv"));
                assert_eq!(separator, ";");
                assert!(if_missing);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_load_defaults_to_comma() {
        let cli = Cli::try_parse_from(["pokedex-sqlite", "load", "x.csv"]).unwrap();
        assert!(matches!(cli.command, Commands::Load { ref separator, .. } if separator == ","));
    }

    #[test]
    fn test_empty_separator_is_rejected() {
        assert!(Cli::try_parse_from(["pokedex-sqlite", "load", "x.csv", "-s", ""]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pokedex-sqlite", "by-type", "Fire", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::ByType { ref kind } if kind == "Fire"));
    }
}
