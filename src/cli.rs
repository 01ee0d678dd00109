use clap::Parser;
use std::path::PathBuf;

/// faqfold - render FAQ and review content documents into HTML blocks
///
/// Examples:
///   # Render a document to stdout
///   faqfold content.json
///
///   # Restrict to categories (repeatable; overrides the document's lists)
///   faqfold content.json --include pricing --include shipping
///
///   # Exclude a category
///   faqfold content.json --exclude wholesale
///
///   # Editor-style preview with source notices
///   faqfold content.json --preview
///
///   # Emit the SEO aggregate-graph entries instead of an inline script
///   faqfold content.json --seo-graph
#[derive(Parser, Debug)]
#[command(name = "faqfold")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Filtering Logic:\n  \
    - Include lists match any: an item passes with at least one included category\n  \
    - Exclude lists reject any match, and win over include when both match\n  \
    - Items without categories pass only when no include list is set\n  \
    - With no block-level lists, the document's page_categories act as the include list\n\n\
Data Sources:\n  \
    - Rows attached to the entity win; shared settings rows are the fallback\n  \
    - Neither having rows renders a human-readable empty state\n\n\
Structured Data:\n  \
    - A JSON-LD script is embedded unless --no-schema, --seo-graph, or the\n      document's seo_plugin_active flag disables it")]
pub struct Cli {
    /// Path to the content document JSON file
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Only show items in this category slug (can be specified multiple times)
    #[arg(short, long = "include", value_name = "SLUG")]
    pub include: Vec<String>,

    /// Hide items in this category slug (can be specified multiple times)
    #[arg(short = 'x', long = "exclude", value_name = "SLUG")]
    pub exclude: Vec<String>,

    /// Explicit anchor identifier for the wrapper element
    #[arg(long, value_name = "ID")]
    pub anchor: Option<String>,

    /// Extra CSS class for the wrapper element (can be specified multiple times)
    #[arg(long = "class", value_name = "CLASS")]
    pub classes: Vec<String>,

    /// Block instance identifier; defaults to the document file stem
    #[arg(long = "block-id", value_name = "ID")]
    pub block_id: Option<String>,

    /// Editor preview mode: print source notices, render preview hints
    #[arg(short, long)]
    pub preview: bool,

    /// Skip the inline JSON-LD script
    #[arg(long = "no-schema")]
    pub no_schema: bool,

    /// Print SEO aggregate-graph entries (keyed JSON) instead of embedding
    /// an inline script
    #[arg(long = "seo-graph")]
    pub seo_graph: bool,

    /// Write the fragment to a file instead of stdout
    #[arg(short, long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,
}
