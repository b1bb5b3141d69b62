//! Command-line front end for the codex core.
//!
//! # Responsibility
//! - Exercise the loader, renderer and world service from a terminal.
//! - Keep output plain and deterministic for quick local checks.

use codex_core::db::open_db;
use codex_core::display::time_ago;
use codex_core::{
    load_entries, render_markup_html, BrowserState, CodexConfig, DirectorySource, LoadRequest,
    NormalizeOptions, SqliteKvStore, WorldService,
};
use log::error;
use std::error::Error;
use std::path::Path;
use std::process::ExitCode;

const USAGE: &str = "usage:
  codex ping
  codex render <file>
  codex browse <root> [config.toml]
  codex world <root> <store.sqlite> [query]";

type CliResult = Result<(), Box<dyn Error>>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let args = args.iter().map(String::as_str).collect::<Vec<_>>();

    let outcome = match args.as_slice() {
        ["ping"] => {
            println!("codex_core ping={}", codex_core::ping());
            println!("codex_core version={}", codex_core::core_version());
            Ok(())
        }
        ["render", file] => render(file),
        ["browse", root] => browse(root, None).await,
        ["browse", root, config] => browse(root, Some(config)).await,
        ["world", root, store] => world(root, store, None).await,
        ["world", root, store, query] => world(root, store, Some(query)).await,
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&str>) -> Result<CodexConfig, Box<dyn Error>> {
    let config = match path {
        Some(path) => CodexConfig::load(path)?,
        None => CodexConfig::default(),
    };
    codex_core::init_from_config(&config)?;
    Ok(config)
}

fn render(file: &str) -> CliResult {
    let text = std::fs::read_to_string(file)?;
    println!("{}", render_markup_html(&text, &codex_core::markup::NoLinks));
    Ok(())
}

async fn browse(root: &str, config: Option<&str>) -> CliResult {
    let config = load_config(config)?;
    let source = DirectorySource::new(root);
    let request = LoadRequest::new(&config.index_path, &config.entry_dir, &config.collection);
    let options = NormalizeOptions {
        tag_limit: config.tag_limit,
    };

    let mut browser = BrowserState::new();
    browser.apply_load(load_entries(&source, &request, options).await);
    let view = browser.view();
    if let Some(notice) = &view.notice {
        println!("! {notice}");
    }
    println!("{} entries", view.total);
    for card in &view.cards {
        let marker = if card.active { '*' } else { ' ' };
        println!("{marker} {:<24} {}", card.name, card.tags.join(", "));
    }
    Ok(())
}

async fn world(root: &str, store: &str, query: Option<&str>) -> CliResult {
    let config = load_config(None)?;
    let conn = open_db(Path::new(store))?;
    let mut service = WorldService::new(SqliteKvStore::try_new(&conn)?, config);
    service
        .load_initial(&DirectorySource::new(root))
        .await?;
    if let Some(notice) = service.notice() {
        println!("! {notice}");
    }

    let state = service.state();
    println!("{} — {}", state.world.title, state.world.tagline);
    println!(
        "lore={} races={} characters={}",
        state.lore.len(),
        state.races.len(),
        state.characters.len()
    );

    match query {
        Some(query) => {
            for hit in service.search(query) {
                println!("[{}] {}: {}", hit.kind.label(), hit.title, hit.snippet);
            }
        }
        None => {
            let now = codex_core::display::now_epoch_ms();
            for entry in service.recent() {
                println!("{} {} ({})", entry.kind.label(), entry.title, time_ago(entry.t, now));
            }
        }
    }
    Ok(())
}
