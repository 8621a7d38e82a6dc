use super::browse;
use super::render::{
    render_config, render_detail, render_history, render_messages, render_page, render_types,
};
use super::setup::{Cli, Commands};
use chrono::Utc;
use clap::Parser;
use dexapp::commands::{CmdResult, MessageLevel};
use dexapp::config::{config_path, DexConfig};
use dexapp::error::{DexError, Result};
use dexapp::init::{initialize, DexContext};
use dexapp::model::CatalogEntry;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data = cli.data;
    let command = cli.command.unwrap_or_else(Commands::default_search);

    // Needs no data dir or config
    if command == (Commands::Config { template: true }) {
        print!("{}", DexConfig::template());
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let mut ctx = init_context(data)?;

        match command {
            Commands::Search {
                name,
                type_tag,
                page,
            } => handle_search(&mut ctx, name, type_tag, page).await,
            Commands::Browse => browse::run(&mut ctx).await,
            Commands::History { clear, replay } => handle_history(&mut ctx, clear, replay).await,
            Commands::Show { id } => handle_show(&ctx, id).await,
            Commands::Types => handle_types(&ctx),
            Commands::Config { .. } => handle_config(&ctx),
        }
    })
}

/// Logs go to stderr. `-v` lowers the default level from warn to debug;
/// `RUST_LOG` takes precedence over both.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init();
}

fn init_context(data: Option<PathBuf>) -> Result<DexContext> {
    let ctx = initialize(data)?;
    debug!(data_dir = %ctx.data_dir.display(), base_url = %ctx.config.base_url, "context ready");
    Ok(ctx)
}

async fn handle_search(
    ctx: &mut DexContext,
    name: Option<String>,
    type_tag: String,
    page: usize,
) -> Result<()> {
    let mut result = ctx
        .api
        .search(name.as_deref().unwrap_or_default(), &type_tag)
        .await?;

    let has_more_pages = result
        .view
        .as_ref()
        .is_some_and(|v| v.error.is_none() && v.total_pages > 1);
    if page > 1 && has_more_pages {
        result.view = ctx.api.go_to_page(page).await?.view;
    }

    print_result(&result)
}

async fn handle_history(ctx: &mut DexContext, clear: bool, replay: Option<usize>) -> Result<()> {
    if clear {
        let result = ctx.api.clear_history()?;
        print!("{}", render_messages(&result.messages));
        return Ok(());
    }

    if let Some(position) = replay {
        let result = ctx.api.replay(position).await?;
        return print_result(&result);
    }

    let result = ctx.api.history()?;
    print!("{}", render_history(&result.history, Utc::now()));
    print!("{}", render_messages(&result.messages));
    Ok(())
}

async fn handle_show(ctx: &DexContext, id: u32) -> Result<()> {
    let result = ctx.api.detail(id).await?;
    if let Some(detail) = &result.detail {
        let fallback = ctx
            .api
            .sprite_url(&CatalogEntry::new(detail.name.clone(), Some(detail.id)));
        print!("{}", render_detail(detail, fallback.as_deref()));
    }
    Ok(())
}

fn handle_types(ctx: &DexContext) -> Result<()> {
    let result = ctx.api.types()?;
    print!("{}", render_types(&result.types));
    Ok(())
}

fn handle_config(ctx: &DexContext) -> Result<()> {
    print!(
        "{}",
        render_config(&ctx.config, &ctx.data_dir, &config_path(&ctx.data_dir))
    );
    Ok(())
}

/// Prints the page and any non-error messages. A failed recomputation
/// becomes an `Err` carrying the source failure.
pub fn print_result(result: &CmdResult) -> Result<()> {
    let (errors, others): (Vec<_>, Vec<_>) = result
        .messages
        .iter()
        .cloned()
        .partition(|m| m.level == MessageLevel::Error);

    if let Some(view) = &result.view {
        if let Some(error) = &view.error {
            print!("{}", render_messages(&others));
            return Err(DexError::SourceUnavailable(error.clone()));
        }
        print!("{}", render_page(view));
    }

    print!("{}", render_messages(&others));

    match errors.into_iter().next() {
        Some(error) => Err(DexError::Api(error.content)),
        None => Ok(()),
    }
}
