mod cli;
mod errors;

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use faqfold_core::{
    append_graph_entry, build_filter, collect_faq_items, collect_review_items, has_filters,
    load_document, render_block, render_no_rows, resolve_source, seo_faq_entry,
    seo_review_entries, BlockKind, ContentDocument, FaqFields, RenderOptions, ReviewFields,
    TermRef,
};
use serde_json::{Map, Value};
use std::path::Path;
use std::process;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let document = load_document(&cli.file).unwrap_or_else(|err| {
        let (title, message, details) = errors::map_load_error(err.as_ref(), Path::new(&cli.file));
        eprintln!("{} {}", format!("{}:", title).red().bold(), message);
        if !details.is_empty() {
            eprintln!("{}", details);
        }
        process::exit(1);
    });

    if let Err(err) = run(&cli, &document) {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        process::exit(1);
    }
}

fn run(cli: &cli::Cli, document: &ContentDocument) -> anyhow::Result<()> {
    let filter = {
        let include: Vec<TermRef> = if cli.include.is_empty() {
            document.include_categories.clone()
        } else {
            cli.include.iter().cloned().map(TermRef::Text).collect()
        };
        let exclude: Vec<TermRef> = if cli.exclude.is_empty() {
            document.exclude_categories.clone()
        } else {
            cli.exclude.iter().cloned().map(TermRef::Text).collect()
        };
        build_filter(&include, &exclude, &document.page_categories, document)
    };

    let mut opts = RenderOptions::new(document.kind, &block_id(cli));
    opts.anchor = cli.anchor.clone();
    opts.extra_classes = cli.classes.clone();
    opts.preview = cli.preview;
    opts.schema_ctx = document.schema_context();
    // The mutual-exclusion decision, made once per render: an active SEO
    // integration owns the page's structured data
    let seo_active = document.seo_plugin_active || cli.seo_graph;
    opts.emit_schema = !cli.no_schema && !seo_active;

    let repeater = document.repeater_name();
    let html = match resolve_source(document, &repeater, document.entity_id()) {
        None => {
            if cli.preview {
                eprintln!(
                    "{}",
                    "No rows found on this entry or in shared settings.".yellow()
                );
            }
            render_no_rows(&opts)
        }
        Some(resolved) => {
            if cli.preview {
                eprintln!("Rendering rows from {}.", resolved.label().bold());
            }
            opts.source_label = Some(resolved.label().to_string());

            let items = match document.kind {
                BlockKind::Faq => {
                    collect_faq_items(&resolved.rows, &FaqFields::default(), &filter, document)
                }
                BlockKind::Review => {
                    collect_review_items(&resolved.rows, &ReviewFields::default(), &filter, document)
                }
            };
            if cli.preview && has_filters(&filter) {
                eprintln!(
                    "{} {} of {} rows shown after category filtering.",
                    "Filtered:".bold(),
                    items.len(),
                    resolved.rows.len()
                );
            }
            render_block(&items, &opts)
        }
    };

    if let Some(out) = &cli.out {
        std::fs::write(out, &html)
            .with_context(|| format!("writing fragment to {}", out.display()))?;
        if cli.preview {
            eprintln!("Fragment written to {}.", out.display().to_string().bold());
        }
    } else if !cli.seo_graph {
        print!("{}", html);
    }

    if cli.seo_graph {
        let graph = seo_graph(document)?;
        println!("{}", serde_json::to_string_pretty(&Value::Object(graph))?);
    }

    Ok(())
}

/// Aggregate-graph entries for a host SEO plugin, keyed for append-only
/// insertion into its structured-data graph
fn seo_graph(document: &ContentDocument) -> anyhow::Result<Map<String, Value>> {
    let mut graph = Map::new();
    match document.kind {
        BlockKind::Faq => {
            if let Some(node) = seo_faq_entry(
                document,
                &FaqFields::default(),
                document,
                document.entity_id(),
            ) {
                append_graph_entry(&mut graph, "faqfold_faq", node);
            }
        }
        BlockKind::Review => {
            let Some(ctx) = document.schema_context() else {
                bail!("review structured data requires the document's page url and title");
            };
            for (key, node) in seo_review_entries(
                document,
                &ReviewFields::default(),
                document,
                document.entity_id(),
                &ctx,
                "faqfold_reviews",
            ) {
                append_graph_entry(&mut graph, &key, node);
            }
        }
    }
    Ok(graph)
}

fn block_id(cli: &cli::Cli) -> String {
    if let Some(id) = &cli.block_id {
        return id.clone();
    }
    Path::new(&cli.file)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "block".to_string())
}
