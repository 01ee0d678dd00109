use crate::collect;
use crate::models::{DisplayItem, FaqFields, FilterSpec, ReviewFields, SchemaContext};
use crate::source::{resolve_source, RowSource};
use crate::terms::TermResolver;
use crate::text;
use serde_json::{json, Map, Value};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// FAQPage document for inline emission
/// `None` when no item yields a complete Question node
pub fn faq_page(items: &[DisplayItem]) -> Option<Value> {
    let main = faq_main_entity(items);
    if main.is_empty() {
        return None;
    }
    Some(json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "FAQPage",
        "mainEntity": main,
    }))
}

/// Question/Answer nodes from plain-text fields only
/// An item needs both question and plain answer text to become a node
fn faq_main_entity(items: &[DisplayItem]) -> Vec<Value> {
    items
        .iter()
        .filter(|item| !item.title.is_empty() && !item.body_plain.is_empty())
        .map(|item| {
            json!({
                "@type": "Question",
                "name": item.title,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": item.body_plain,
                },
            })
        })
        .collect()
}

/// Review graph document for inline emission
pub fn review_graph(items: &[DisplayItem], ctx: &SchemaContext) -> Option<Value> {
    let reviewed = item_reviewed(ctx);
    let reviews: Vec<Value> = items
        .iter()
        .map(|item| review_node(item, ctx, &reviewed, item.external_id.as_deref()))
        .collect();
    if reviews.is_empty() {
        return None;
    }
    Some(json!({
        "@context": SCHEMA_CONTEXT,
        "@graph": reviews,
    }))
}

fn item_reviewed(ctx: &SchemaContext) -> Value {
    json!({
        "@type": ctx.reviewed.schema_type(),
        "@id": format!("{}#item", ctx.url),
        "name": ctx.name,
        "url": ctx.url,
    })
}

/// One Review node; optional properties are omitted when absent, never null
fn review_node(
    item: &DisplayItem,
    ctx: &SchemaContext,
    reviewed: &Value,
    anchor: Option<&str>,
) -> Value {
    let mut node = Map::new();
    node.insert("@type".to_string(), json!("Review"));
    node.insert("reviewBody".to_string(), json!(item.body_plain));
    node.insert(
        "author".to_string(),
        json!({
            "@type": "Person",
            "name": item.reviewer.as_deref().unwrap_or(""),
        }),
    );
    node.insert("itemReviewed".to_string(), reviewed.clone());

    if !item.title.is_empty() {
        node.insert("name".to_string(), json!(item.title));
    }
    if let Some(rating) = item.rating {
        node.insert(
            "reviewRating".to_string(),
            json!({
                "@type": "Rating",
                "ratingValue": rating,
                "bestRating": 5,
                "worstRating": 0,
            }),
        );
    }
    if let Some(url) = &item.reviewer_url {
        node.insert("sameAs".to_string(), json!(url));
    }
    if let Some(anchor) = anchor {
        let slug = text::slugify(anchor);
        let slug = if slug.is_empty() { anchor.to_string() } else { slug };
        node.insert(
            "@id".to_string(),
            json!(format!("{}#review-{}", ctx.url, slug)),
        );
    }

    Value::Object(node)
}

/// Embed a JSON-LD document as a script block
/// `</` is escaped inside the payload so the script element cannot be closed
/// early by content
pub fn script_tag(doc: &Value) -> String {
    let payload = doc.to_string().replace("</", "<\\/");
    format!(
        "<script type=\"application/ld+json\">{}</script>\n",
        payload
    )
}

/// Append a node into an SEO aggregate graph without overwriting
/// An occupied key falls through to the first free `<key>_<n>`
pub fn append_graph_entry(graph: &mut Map<String, Value>, key: &str, node: Value) {
    if !graph.contains_key(key) {
        graph.insert(key.to_string(), node);
        return;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", key, n);
        if !graph.contains_key(&candidate) {
            graph.insert(candidate, node);
            return;
        }
        n += 1;
    }
}

/// FAQPage node for the SEO-plugin aggregate graph
/// Runs a second, independent enumeration directly against the data source;
/// the host graph owns `@context`, so the node carries none. Block-level
/// category filters do not apply on this path.
pub fn seo_faq_entry(
    source: &dyn RowSource,
    fields: &FaqFields,
    resolver: &dyn TermResolver,
    entity: u64,
) -> Option<Value> {
    let resolved = resolve_source(source, &fields.repeater, entity)?;
    let items = collect::collect_faq_items(&resolved.rows, fields, &FilterSpec::default(), resolver);
    let main = faq_main_entity(&items);
    if main.is_empty() {
        return None;
    }
    Some(json!({
        "@type": "FAQPage",
        "mainEntity": main,
    }))
}

/// Keyed Review nodes for the SEO-plugin aggregate graph
/// Entries are keyed `<key>_<n>` (1-based); each node's anchor uses the
/// per-row external ID, falling back to the positional index
pub fn seo_review_entries(
    source: &dyn RowSource,
    fields: &ReviewFields,
    resolver: &dyn TermResolver,
    entity: u64,
    ctx: &SchemaContext,
    key: &str,
) -> Vec<(String, Value)> {
    let Some(resolved) = resolve_source(source, &fields.repeater, entity) else {
        return Vec::new();
    };
    let items =
        collect::collect_review_items(&resolved.rows, fields, &FilterSpec::default(), resolver);
    let reviewed = item_reviewed(ctx);

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let position = (index + 1).to_string();
            let anchor = item.external_id.as_deref().unwrap_or(&position);
            let node = review_node(item, ctx, &reviewed, Some(anchor));
            (format!("{}_{}", key, index + 1), node)
        })
        .collect()
}
