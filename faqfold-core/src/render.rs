use crate::models::{BlockKind, DisplayItem, RenderOptions, Term};
use crate::schema_org;
use crate::sorting;
use crate::text::escape_html;
use std::collections::HashSet;

/// The client-side filter script, embedded verbatim in each fragment
const FILTER_SCRIPT: &str = include_str!("assets/filter.js");

/// Render the display items into a self-contained HTML fragment
/// Pure function of its inputs: wrapper section, toolbar, items, optional
/// JSON-LD script, client filter script
pub fn render_block(items: &[DisplayItem], opts: &RenderOptions) -> String {
    let base = opts.kind.base_class();
    let anchor = opts.anchor_id();

    let mut html = String::new();
    push_section_open(&mut html, opts, &anchor);
    push_preview_notice(&mut html, opts);

    if items.is_empty() {
        html.push_str(&format!(
            "<div class=\"{}__empty\"><em>No entries match this filter.</em></div>\n",
            base
        ));
        html.push_str("</section>\n");
        return html;
    }

    push_toolbar(&mut html, items, base, &anchor);

    html.push_str(&format!("<div class=\"{}__items\" role=\"list\">\n", base));
    for (index, item) in items.iter().enumerate() {
        match opts.kind {
            BlockKind::Faq => push_faq_item(&mut html, item, base, &anchor, index + 1),
            BlockKind::Review => push_review_item(&mut html, item, base, &anchor, index + 1),
        }
    }
    html.push_str("</div>\n");

    if opts.emit_schema {
        let doc = match opts.kind {
            BlockKind::Faq => schema_org::faq_page(items),
            BlockKind::Review => opts
                .schema_ctx
                .as_ref()
                .and_then(|ctx| schema_org::review_graph(items, ctx)),
        };
        if let Some(doc) = doc {
            html.push_str(&schema_org::script_tag(&doc));
        }
    }

    html.push_str("<script>\n");
    html.push_str(FILTER_SCRIPT);
    html.push_str("</script>\n");
    html.push_str("</section>\n");
    html
}

/// Empty state when neither data source has rows
/// Public output is the bare message; preview adds a hint about where to add
/// rows
pub fn render_no_rows(opts: &RenderOptions) -> String {
    let base = opts.kind.base_class();
    if opts.preview {
        format!(
            "<div class=\"{}__empty\"><em>No entries found. Add rows on this entry or in shared settings.</em></div>\n",
            base
        )
    } else {
        format!(
            "<div class=\"{}__empty\"><em>No entries found.</em></div>\n",
            base
        )
    }
}

/// Missing field-storage collaborator: a notice in preview, nothing on the
/// public path
pub fn render_unavailable(opts: &RenderOptions) -> String {
    if !opts.preview {
        return String::new();
    }
    format!(
        "<div class=\"{}__empty\"><em>Field storage is unavailable. Entries cannot be displayed.</em></div>\n",
        opts.kind.base_class()
    )
}

/// Union of categories across the already-filtered item set, display-sorted
/// A category eliminated by server-side filtering can never appear here
pub fn category_union(items: &[DisplayItem]) -> Vec<Term> {
    let mut seen = HashSet::new();
    let mut union = Vec::new();
    for item in items {
        for term in &item.terms {
            if seen.insert(term.slug.clone()) {
                union.push(term.clone());
            }
        }
    }
    sorting::sort_terms(&mut union);
    union
}

fn push_section_open(html: &mut String, opts: &RenderOptions, anchor: &str) {
    let mut classes = opts.kind.base_class().to_string();
    for class in &opts.extra_classes {
        let class = class.trim();
        if !class.is_empty() {
            classes.push(' ');
            classes.push_str(class);
        }
    }

    html.push_str(&format!(
        "<section id=\"{}\" class=\"{}\"",
        escape_html(anchor),
        escape_html(&classes)
    ));
    if opts.kind == BlockKind::Faq {
        html.push_str(" itemscope itemtype=\"https://schema.org/FAQPage\"");
    }
    html.push_str(">\n");
}

fn push_preview_notice(html: &mut String, opts: &RenderOptions) {
    if !opts.preview {
        return;
    }
    if let Some(label) = &opts.source_label {
        html.push_str(&format!(
            "<div class=\"{}__notice\">Rendering rows from <strong>{}</strong>.</div>\n",
            opts.kind.base_class(),
            escape_html(label)
        ));
    }
}

fn push_toolbar(html: &mut String, items: &[DisplayItem], base: &str, anchor: &str) {
    let union = category_union(items);

    html.push_str(&format!(
        "<div class=\"{}__toolbar\" aria-label=\"Filters\">\n",
        base
    ));

    if !union.is_empty() {
        html.push_str(&format!(
            "<label class=\"{base}__control\"><span class=\"{base}__control-label\">Category</span>\
             <select class=\"{base}__filter\" aria-controls=\"{anchor}\">\n",
            base = base,
            anchor = escape_html(anchor)
        ));
        html.push_str("<option value=\"\">All</option>\n");
        for term in &union {
            html.push_str(&format!(
                "<option value=\"{}\">{}</option>\n",
                escape_html(&term.slug),
                escape_html(&term.label)
            ));
        }
        html.push_str("</select></label>\n");
    }

    html.push_str(&format!(
        "<label class=\"{base}__control\"><span class=\"{base}__control-label\">Search</span>\
         <input type=\"search\" class=\"{base}__search\" placeholder=\"Type to filter\u{2026}\" aria-controls=\"{anchor}\" /></label>\n",
        base = base,
        anchor = escape_html(anchor)
    ));
    html.push_str(&format!(
        "<span class=\"{}__count\" aria-live=\"polite\"></span>\n",
        base
    ));
    html.push_str("</div>\n");
}

fn categories_attr(item: &DisplayItem) -> String {
    item.terms
        .iter()
        .map(|t| t.slug.as_str())
        .collect::<Vec<_>>()
        .join("|")
}

fn push_chips(html: &mut String, item: &DisplayItem, base: &str) {
    if item.terms.is_empty() {
        return;
    }
    html.push_str(&format!(
        "<div class=\"{base}__meta\"><span class=\"{base}__label\">Category:</span>",
        base = base
    ));
    for term in &item.terms {
        html.push_str(&format!(
            "<span class=\"{}__chip\">{}</span>",
            base,
            escape_html(&term.label)
        ));
    }
    html.push_str("</div>\n");
}

fn push_faq_item(html: &mut String, item: &DisplayItem, base: &str, anchor: &str, index: usize) {
    let panel_id = format!("{}-item-{}", anchor, index);
    let question = if item.title.is_empty() {
        "Untitled question"
    } else {
        &item.title
    };

    html.push_str(&format!(
        "<details class=\"{}__item\" id=\"{}\" role=\"listitem\" data-categories=\"{}\" \
         itemscope itemprop=\"mainEntity\" itemtype=\"https://schema.org/Question\">\n",
        base,
        escape_html(&panel_id),
        escape_html(&categories_attr(item))
    ));
    html.push_str(&format!(
        "<summary id=\"{}-summary\" class=\"{}__question\" itemprop=\"name\">{}</summary>\n",
        escape_html(&panel_id),
        base,
        escape_html(question)
    ));
    html.push_str(&format!(
        "<div class=\"{}__answer\" itemscope itemprop=\"acceptedAnswer\" itemtype=\"https://schema.org/Answer\">\n",
        base
    ));
    html.push_str(&format!("<div class=\"{}__answer-inner\" itemprop=\"text\">", base));
    if item.body_html.is_empty() {
        html.push_str("<p>(No answer yet.)</p>");
    } else {
        html.push_str(&item.body_html);
    }
    html.push_str("</div>\n");
    push_chips(html, item, base);
    html.push_str("</div>\n</details>\n");
}

fn push_review_item(html: &mut String, item: &DisplayItem, base: &str, anchor: &str, index: usize) {
    let item_id = format!("{}-item-{}", anchor, index);
    let title = if item.title.is_empty() {
        format!("Review {}", index)
    } else {
        item.title.clone()
    };

    html.push_str(&format!(
        "<article class=\"{}__item\" id=\"{}\" role=\"listitem\" data-categories=\"{}\">\n",
        base,
        escape_html(&item_id),
        escape_html(&categories_attr(item))
    ));
    html.push_str(&format!("<header class=\"{}__header\">\n", base));
    html.push_str(&format!(
        "<h3 class=\"{}__title\">{}</h3>\n",
        base,
        escape_html(&title)
    ));
    if let Some(reviewer) = &item.reviewer {
        html.push_str(&format!(
            "<p class=\"{base}__byline\">Review by <span class=\"{base}__reviewer\">{}</span></p>\n",
            escape_html(reviewer),
            base = base
        ));
    }
    html.push_str("</header>\n");
    html.push_str(&format!("<div class=\"{}__body\">{}</div>\n", base, item.body_html));
    if let Some(rating) = item.rating {
        html.push_str(&format!(
            "<p class=\"{}__rating\">Rated {} out of 5</p>\n",
            base,
            format_rating(rating)
        ));
    }
    push_chips(html, item, base);
    html.push_str("</article>\n");
}

/// Rating text matching the number's JSON representation, so markup and
/// structured data never diverge by rounding
fn format_rating(rating: f64) -> String {
    serde_json::Number::from_f64(rating)
        .map(|n| n.to_string())
        .unwrap_or_else(|| rating.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Term;

    fn faq_item(question: &str, cats: &[&str]) -> DisplayItem {
        DisplayItem {
            title: question.to_string(),
            body_html: "<p>Yes.</p>\n".to_string(),
            body_plain: "Yes.".to_string(),
            terms: cats.iter().map(|c| Term::from_label(c)).collect(),
            reviewer: None,
            reviewer_url: None,
            rating: None,
            external_id: None,
        }
    }

    fn opts(kind: BlockKind) -> RenderOptions {
        RenderOptions::new(kind, "test01")
    }

    #[test]
    fn test_wrapper_and_items() {
        let items = vec![faq_item("Do you ship?", &["Shipping"])];
        let html = render_block(&items, &opts(BlockKind::Faq));
        assert!(html.contains("<section id=\"faq-list-test01\" class=\"faqfold-list\""));
        assert!(html.contains("class=\"faqfold-list__question\""));
        assert!(html.contains("Do you ship?"));
        assert!(html.contains("data-categories=\"shipping\""));
        assert!(html.contains("class=\"faqfold-list__chip\">Shipping</span>"));
        assert!(html.contains("application/ld+json"));
        assert!(html.ends_with("</section>\n"));
    }

    #[test]
    fn test_anchor_override_and_classes() {
        let mut o = opts(BlockKind::Faq);
        o.anchor = Some("Bakery FAQs".to_string());
        o.extra_classes = vec!["is-wide".to_string()];
        let html = render_block(&[faq_item("Q", &[])], &o);
        assert!(html.contains("<section id=\"bakery-faqs\" class=\"faqfold-list is-wide\""));
    }

    #[test]
    fn test_select_union_is_subset_of_filtered_items() {
        let items = vec![
            faq_item("Q1", &["Shipping", "Pricing"]),
            faq_item("Q2", &["Shipping"]),
        ];
        let html = render_block(&items, &opts(BlockKind::Faq));
        let options: Vec<&str> = html
            .lines()
            .filter(|l| l.starts_with("<option value=\"") && !l.contains("value=\"\""))
            .collect();
        assert_eq!(options.len(), 2);
        // Sorted case-insensitively by label
        assert!(options[0].contains("value=\"pricing\""));
        assert!(options[1].contains("value=\"shipping\""));
        // Nothing outside the filtered items' categories
        for line in &options {
            assert!(line.contains("pricing") || line.contains("shipping"));
        }
    }

    #[test]
    fn test_no_select_without_categories() {
        let html = render_block(&[faq_item("Q", &[])], &opts(BlockKind::Faq));
        assert!(!html.contains("<select"));
        assert!(html.contains("<input type=\"search\" class=\"faqfold-list__search\""));
        assert!(html.contains("<span class=\"faqfold-list__count\""));
    }

    #[test]
    fn test_empty_items_render_no_matches_message() {
        let html = render_block(&[], &opts(BlockKind::Faq));
        assert!(html.contains("No entries match this filter."));
        assert!(!html.contains("__items"));
        assert!(!html.contains("application/ld+json"));
    }

    #[test]
    fn test_preview_notice() {
        let mut o = opts(BlockKind::Faq);
        o.preview = true;
        o.source_label = Some("shared settings".to_string());
        let html = render_block(&[faq_item("Q", &[])], &o);
        assert!(html.contains("Rendering rows from <strong>shared settings</strong>."));

        o.preview = false;
        let html = render_block(&[faq_item("Q", &[])], &o);
        assert!(!html.contains("Rendering rows from"));
    }

    #[test]
    fn test_schema_respects_emit_flag() {
        let mut o = opts(BlockKind::Faq);
        o.emit_schema = false;
        let html = render_block(&[faq_item("Q", &[])], &o);
        assert!(!html.contains("application/ld+json"));
        // The client filter script is independent of the schema decision
        assert!(html.contains("<script>"));
    }

    #[test]
    fn test_review_rendering_and_rating_text() {
        let item = DisplayItem {
            title: String::new(),
            body_html: "<p>Lovely.</p>\n".to_string(),
            body_plain: "Lovely.".to_string(),
            terms: Vec::new(),
            reviewer: Some("Ann".to_string()),
            reviewer_url: None,
            rating: Some(3.7),
            external_id: None,
        };
        let mut o = opts(BlockKind::Review);
        o.emit_schema = false;
        let html = render_block(&[item], &o);
        assert!(html.contains("<section id=\"review-list-test01\" class=\"faqfold-reviews\""));
        assert!(html.contains("faqfold-reviews__title\">Review 1</h3>"));
        assert!(html.contains("Review by <span class=\"faqfold-reviews__reviewer\">Ann</span>"));
        assert!(html.contains("Rated 3.7 out of 5"));
    }

    #[test]
    fn test_question_text_is_escaped() {
        let html = render_block(
            &[faq_item("Is 5 < 6 & 7 > 6?", &[])],
            &opts(BlockKind::Faq),
        );
        assert!(html.contains("Is 5 &lt; 6 &amp; 7 &gt; 6?"));
    }

    #[test]
    fn test_no_rows_and_unavailable_states() {
        let mut o = opts(BlockKind::Faq);
        assert!(render_no_rows(&o).contains("No entries found."));
        assert_eq!(render_unavailable(&o), "");

        o.preview = true;
        assert!(render_no_rows(&o).contains("Add rows on this entry"));
        assert!(render_unavailable(&o).contains("Field storage is unavailable"));
    }
}
