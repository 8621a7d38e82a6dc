use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dex", bin_name = "dex", version)]
#[command(about = "Search and browse the creature catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Data directory holding dex.toml and the search history
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Search by name and/or type and print one page
    #[command(alias = "s")]
    Search {
        /// Substring of the creature name (case-insensitive)
        name: Option<String>,

        /// Type tag to filter by ("all" for no type filter)
        #[arg(short = 't', long = "type", value_name = "TYPE", default_value = "all")]
        type_tag: String,

        /// Page to print (1-based, clamped to the last page)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Interactive session: search, page and replay history from a prompt
    #[command(alias = "b")]
    Browse,

    /// Show, replay or clear past searches
    #[command(alias = "h")]
    History {
        /// Forget all past searches
        #[arg(long, conflicts_with = "replay")]
        clear: bool,

        /// Re-run the search at this position (1 = most recent)
        #[arg(short, long, value_name = "N")]
        replay: Option<usize>,
    },

    /// Show details for one creature
    Show {
        /// Creature id (as listed by search)
        id: u32,
    },

    /// List the selectable type tags
    Types,

    /// Show effective configuration
    Config {
        /// Print a commented sample dex.toml instead
        #[arg(long)]
        template: bool,
    },
}

impl Commands {
    /// What naked `dex` runs: everything, first page.
    pub fn default_search() -> Self {
        Commands::Search {
            name: None,
            type_tag: "all".to_string(),
            page: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_naked_has_no_command() {
        let cli = parse(&["dex"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(cli.data.is_none());
    }

    #[test]
    fn test_search_defaults() {
        let cli = parse(&["dex", "search"]);
        assert_eq!(cli.command, Some(Commands::default_search()));
    }

    #[test]
    fn test_search_with_all_args() {
        let cli = parse(&["dex", "search", "char", "--type", "fire", "--page", "2"]);
        assert_eq!(
            cli.command,
            Some(Commands::Search {
                name: Some("char".to_string()),
                type_tag: "fire".to_string(),
                page: 2,
            })
        );
    }

    #[test]
    fn test_search_alias_and_short_flags() {
        let cli = parse(&["dex", "s", "-t", "water", "-p", "3"]);
        assert_eq!(
            cli.command,
            Some(Commands::Search {
                name: None,
                type_tag: "water".to_string(),
                page: 3,
            })
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["dex", "types", "-v", "--data", "/tmp/dex"]);
        assert!(cli.verbose);
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/dex")));
        assert_eq!(cli.command, Some(Commands::Types));
    }

    #[test]
    fn test_history_flags() {
        let cli = parse(&["dex", "history", "--replay", "2"]);
        assert_eq!(
            cli.command,
            Some(Commands::History {
                clear: false,
                replay: Some(2),
            })
        );

        assert!(Cli::try_parse_from(["dex", "history", "--clear", "--replay", "1"]).is_err());
    }

    #[test]
    fn test_show_requires_numeric_id() {
        assert_eq!(
            parse(&["dex", "show", "25"]).command,
            Some(Commands::Show { id: 25 })
        );
        assert!(Cli::try_parse_from(["dex", "show", "pikachu"]).is_err());
    }
}
