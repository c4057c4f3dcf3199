use std::str::FromStr;

use anyhow::Context;
use clap::Parser;

use crate::{
    cli::{Cli, Command},
    config::Config,
    item::Loaded,
    output::ColorMode,
    source::Source,
};

mod cli;
mod config;
mod doi;
mod format;
mod item;
mod output;
mod reader;
mod render;
mod source;

fn load(source: &Source) -> anyhow::Result<Loaded> {
    let text = source.fetch()?;
    reader::read(&text).with_context(|| format!("failed to read bibliography {source}"))
}

/// Render the publication list, collapsing fetch and parse failures into the "unavailable"
/// notice.
fn publications_html(source: &Source, config: &Config, color: ColorMode) -> anyhow::Result<String> {
    let mut stderr = std::io::stderr().lock();
    match load(source) {
        Ok(loaded) => {
            tracing::info!("rendering {} entries from {source}", loaded.records.len());
            output::print_summary(&mut stderr, loaded.records.len(), loaded.skipped, color)?;
            Ok(render::publications(&loaded.records, config))
        }
        Err(e) => {
            output::print_error(&mut stderr, &e, color)?;
            Ok(render::UNAVAILABLE.to_string())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    output::setup_logging(args.verbose);
    let color = ColorMode::detect(args.no_color);
    let config = Config::load(args.config.as_deref())?;

    let source_or_default = |from: Option<Source>| match from {
        Some(src) => Ok(src),
        None => Source::from_str(&config.source).map_err(anyhow::Error::msg),
    };

    match args.command {
        Command::Publications { from, output } => {
            let source = source_or_default(from)?;
            let html = publications_html(&source, &config, color)?;
            output::emit(output.as_deref(), &html)?;
        }
        Command::Gallery { output } => {
            output::emit(output.as_deref(), &render::gallery(&config))?;
        }
        Command::Page { from, output } => {
            let source = source_or_default(from)?;
            let html = publications_html(&source, &config, color)?;
            output::emit(output.as_deref(), &render::page(&html, &config))?;
        }
        Command::Authors { from } => {
            let source = source_or_default(from)?;
            let loaded = load(&source)?;
            for record in &loaded.records {
                println!(
                    "{}: {}",
                    record.id,
                    format::format_authors(
                        record.authors.as_deref(),
                        &config.owner,
                        config.max_authors
                    )
                );
            }
            output::print_summary(
                &mut std::io::stderr().lock(),
                loaded.records.len(),
                loaded.skipped,
                color,
            )?;
        }
    }
    Ok(())
}
