//! # Interactive Browsing
//!
//! `dex browse` keeps one session alive across many transitions, so the
//! catalog is fetched once and paging is instant. Each input line is parsed
//! into a [`BrowseCommand`] and dispatched to the same API calls the one-shot
//! subcommands use.
//!
//! | Input | Action |
//! |-------|--------|
//! | `n`, `next` | next page |
//! | `p`, `prev` | previous page |
//! | `g <page>`, `goto <page>` | jump to page |
//! | `s [name] [type]`, `search ...` | new search (recorded in history) |
//! | `t <type>`, `type <type>` | search by type only |
//! | `h`, `history` | list past searches |
//! | `r <n>`, `replay <n>` | re-run past search `n` |
//! | `c`, `clear` | clear history |
//! | `show <id>` | creature details |
//! | `reload` | re-run the current query |
//! | `reset` | refetch the catalog |
//! | `?`, `help` | this table |
//! | `q`, `quit` | leave |

use super::commands::print_result;
use super::render::{render_detail, render_history, render_messages};
use chrono::Utc;
use colored::*;
use dexapp::error::{DexError, Result};
use dexapp::init::DexContext;
use dexapp::model::{ALL_TYPES, CatalogEntry};
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "dex> ";

pub const HELP: &str = "\
n next | p prev | g <page> | s [name] [type] | t <type>
h history | r <n> replay | c clear | show <id> | reload | reset | q quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Prev,
    GoTo(usize),
    Search { name: String, type_tag: String },
    History,
    Replay(usize),
    Clear,
    Show(u32),
    Reload,
    Reset,
    Help,
    Quit,
    Nothing,
}

pub fn parse_command(line: &str) -> Result<BrowseCommand> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(BrowseCommand::Nothing);
    };
    let rest: Vec<&str> = words.collect();

    let command = match head.to_lowercase().as_str() {
        "n" | "next" => BrowseCommand::Next,
        "p" | "prev" => BrowseCommand::Prev,
        "g" | "goto" => BrowseCommand::GoTo(number_arg(head, &rest)?),
        "s" | "search" => BrowseCommand::Search {
            name: rest.first().copied().unwrap_or_default().to_string(),
            type_tag: rest.get(1).copied().unwrap_or(ALL_TYPES).to_string(),
        },
        "t" | "type" => {
            let type_tag = rest.first().copied().ok_or_else(|| {
                DexError::Api(format!("Usage: {} <type>", head))
            })?;
            BrowseCommand::Search {
                name: String::new(),
                type_tag: type_tag.to_string(),
            }
        }
        "h" | "history" => BrowseCommand::History,
        "r" | "replay" => BrowseCommand::Replay(number_arg(head, &rest)?),
        "c" | "clear" => BrowseCommand::Clear,
        "show" => BrowseCommand::Show(number_arg(head, &rest)?),
        "reload" => BrowseCommand::Reload,
        "reset" => BrowseCommand::Reset,
        "?" | "help" => BrowseCommand::Help,
        "q" | "quit" | "exit" => BrowseCommand::Quit,
        other => {
            return Err(DexError::Api(format!(
                "Unknown command '{}' (type ? for help)",
                other
            )));
        }
    };
    Ok(command)
}

fn number_arg<T: std::str::FromStr>(head: &str, rest: &[&str]) -> Result<T> {
    rest.first()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| DexError::Api(format!("Usage: {} <number>", head)))
}

/// Runs the prompt loop until `quit` or end of input.
pub async fn run(ctx: &mut DexContext) -> Result<()> {
    let first = ctx.api.search("", ALL_TYPES).await?;
    print_in_session(&first);
    println!("{}", HELP.dimmed());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line?;

        match parse_command(&line) {
            Ok(BrowseCommand::Quit) => return Ok(()),
            Ok(command) => {
                if let Err(e) = execute(ctx, command).await {
                    eprintln!("{}", format!("Error: {}", e).red());
                }
            }
            Err(e) => eprintln!("{}", e.to_string().red()),
        }
    }
}

async fn execute(ctx: &mut DexContext, command: BrowseCommand) -> Result<()> {
    match command {
        BrowseCommand::Next => print_in_session(&ctx.api.next_page().await?),
        BrowseCommand::Prev => print_in_session(&ctx.api.prev_page().await?),
        BrowseCommand::GoTo(page) => print_in_session(&ctx.api.go_to_page(page).await?),
        BrowseCommand::Search { name, type_tag } => {
            print_in_session(&ctx.api.search(&name, &type_tag).await?)
        }
        BrowseCommand::History => {
            let result = ctx.api.history()?;
            print!("{}", render_history(&result.history, Utc::now()));
            print!("{}", render_messages(&result.messages));
        }
        BrowseCommand::Replay(position) => print_in_session(&ctx.api.replay(position).await?),
        BrowseCommand::Clear => print!("{}", render_messages(&ctx.api.clear_history()?.messages)),
        BrowseCommand::Show(id) => {
            let result = ctx.api.detail(id).await?;
            if let Some(detail) = &result.detail {
                let fallback = ctx
                    .api
                    .sprite_url(&CatalogEntry::new(detail.name.clone(), Some(detail.id)));
                print!("{}", render_detail(detail, fallback.as_deref()));
            }
        }
        BrowseCommand::Reload => print_in_session(&ctx.api.reload().await?),
        BrowseCommand::Reset => print_in_session(&ctx.api.reset_session().await?),
        BrowseCommand::Help => println!("{}", HELP),
        BrowseCommand::Quit | BrowseCommand::Nothing => {}
    }
    Ok(())
}

/// Like the one-shot printer, but a failed recomputation is reported and the
/// session goes on.
fn print_in_session(result: &dexapp::commands::CmdResult) {
    if let Err(e) = print_result(result) {
        eprintln!("{}", format!("Error: {}", e).red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_is_nothing() {
        assert_eq!(parse_command("   ").unwrap(), BrowseCommand::Nothing);
    }

    #[test]
    fn test_paging_commands() {
        assert_eq!(parse_command("n").unwrap(), BrowseCommand::Next);
        assert_eq!(parse_command("NEXT").unwrap(), BrowseCommand::Next);
        assert_eq!(parse_command("p").unwrap(), BrowseCommand::Prev);
        assert_eq!(parse_command("g 4").unwrap(), BrowseCommand::GoTo(4));
        assert!(parse_command("g").is_err());
        assert!(parse_command("g four").is_err());
    }

    #[test]
    fn test_search_commands() {
        assert_eq!(
            parse_command("s").unwrap(),
            BrowseCommand::Search {
                name: String::new(),
                type_tag: "all".to_string()
            }
        );
        assert_eq!(
            parse_command("search char fire").unwrap(),
            BrowseCommand::Search {
                name: "char".to_string(),
                type_tag: "fire".to_string()
            }
        );
        assert_eq!(
            parse_command("t water").unwrap(),
            BrowseCommand::Search {
                name: String::new(),
                type_tag: "water".to_string()
            }
        );
        assert!(parse_command("t").is_err());
    }

    #[test]
    fn test_history_commands() {
        assert_eq!(parse_command("h").unwrap(), BrowseCommand::History);
        assert_eq!(parse_command("r 2").unwrap(), BrowseCommand::Replay(2));
        assert_eq!(parse_command("c").unwrap(), BrowseCommand::Clear);
    }

    #[test]
    fn test_misc_commands() {
        assert_eq!(parse_command("show 25").unwrap(), BrowseCommand::Show(25));
        assert_eq!(parse_command("reload").unwrap(), BrowseCommand::Reload);
        assert_eq!(parse_command("reset").unwrap(), BrowseCommand::Reset);
        assert_eq!(parse_command("?").unwrap(), BrowseCommand::Help);
        assert_eq!(parse_command("q").unwrap(), BrowseCommand::Quit);
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_command("jump").unwrap_err();
        assert!(err.to_string().contains("Unknown command 'jump'"));
    }
}
