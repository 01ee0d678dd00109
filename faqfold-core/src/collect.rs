use crate::filtering;
use crate::models::{DisplayItem, FaqFields, FilterSpec, ReviewFields, Row, Term};
use crate::terms::{self, TermResolver};
use crate::text;
use serde_json::Value;
use tracing::debug;

/// Collect FAQ repeater rows into ordered display items
/// Rows without question text are skipped entirely; malformed fields degrade
/// to their empty value rather than failing the row
pub fn collect_faq_items(
    rows: &[Row],
    fields: &FaqFields,
    filter: &FilterSpec,
    resolver: &dyn TermResolver,
) -> Vec<DisplayItem> {
    let mut items = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let question = text::clean_text(str_field(row, &fields.question));
        if question.is_empty() {
            debug!(index, "skipping FAQ row without question text");
            continue;
        }

        let answer = str_field(row, &fields.answer);
        let item_terms = row_terms(row, &fields.categories, resolver);
        let slugs: Vec<String> = item_terms.iter().map(|t| t.slug.clone()).collect();
        if !filtering::matches_filter(&slugs, filter) {
            continue;
        }

        items.push(DisplayItem {
            title: question,
            // Answer markup is editor-authored rich text and is emitted as
            // written; sanitization policy belongs to the host
            body_html: text::autop(answer),
            body_plain: text::strip_tags(answer),
            terms: item_terms,
            reviewer: None,
            reviewer_url: None,
            rating: None,
            external_id: None,
        });
    }

    items
}

/// Collect review repeater rows into ordered display items
/// Rows missing body text or a reviewer name are skipped entirely
pub fn collect_review_items(
    rows: &[Row],
    fields: &ReviewFields,
    filter: &FilterSpec,
    resolver: &dyn TermResolver,
) -> Vec<DisplayItem> {
    let mut items = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let body = str_field(row, &fields.body).trim();
        let reviewer = text::clean_text(str_field(row, &fields.reviewer));
        if body.is_empty() || reviewer.is_empty() {
            debug!(index, "skipping review row without body or reviewer");
            continue;
        }

        let item_terms = row_terms(row, &fields.categories, resolver);
        let slugs: Vec<String> = item_terms.iter().map(|t| t.slug.clone()).collect();
        if !filtering::matches_filter(&slugs, filter) {
            continue;
        }

        items.push(DisplayItem {
            title: text::clean_text(str_field(row, &fields.title)),
            // Review bodies are plain text from the editor; escape first,
            // then paragraph-format
            body_html: text::autop(&text::escape_html(body)),
            body_plain: text::strip_tags(body),
            terms: item_terms,
            reviewer: Some(reviewer),
            reviewer_url: non_empty(str_field(row, &fields.reviewer_url)),
            rating: rating_field(row, &fields.rating),
            external_id: non_empty(str_field(row, &fields.external_id)),
        });
    }

    items
}

/// String value of a row field; non-string values degrade to empty
fn str_field<'a>(row: &'a Row, name: &str) -> &'a str {
    row.get(name).and_then(Value::as_str).unwrap_or("")
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Numeric rating clamped to [0, 5]
/// Accepts a JSON number or a numeric string; anything else is absent
fn rating_field(row: &Row, name: &str) -> Option<f64> {
    let value = row.get(name)?;
    let rating = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !rating.is_finite() {
        return None;
    }
    Some(rating.clamp(0.0, 5.0))
}

fn row_terms(row: &Row, field: &str, resolver: &dyn TermResolver) -> Vec<Term> {
    let refs = row
        .get(field)
        .map(|v| terms::term_refs_from_value(v))
        .unwrap_or_default();
    terms::normalize_terms(&refs, resolver)
}
