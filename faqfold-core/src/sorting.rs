use crate::models::Term;
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;

/// Sort category terms for display in the filter select
/// Case-insensitive natural order on labels, slug as tie-break
pub fn sort_terms(terms: &mut [Term]) {
    terms.sort_by(|a, b| {
        match natural_cmp(&normalize_for_sorting(&a.label), &normalize_for_sorting(&b.label)) {
            Ordering::Equal => a.slug.cmp(&b.slug),
            other => other,
        }
    });
}

/// Normalize a label for sorting: unicode NFD decomposition, lowercase,
/// whitespace collapsed
pub fn normalize_for_sorting(s: &str) -> String {
    let normalized: String = s.nfd().collect::<String>().to_lowercase();
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compare strings treating digit runs as numbers, so "Step 2" sorts
/// before "Step 10"
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ac = a.chars().peekable();
    let mut bc = b.chars().peekable();

    loop {
        match (ac.peek().copied(), bc.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let an = take_number(&mut ac);
                    let bn = take_number(&mut bc);
                    match an.cmp(&bn) {
                        Ordering::Equal => {}
                        other => return other,
                    }
                } else {
                    match x.cmp(&y) {
                        Ordering::Equal => {
                            ac.next();
                            bc.next();
                        }
                        other => return other,
                    }
                }
            }
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars>) -> u64 {
    let mut n: u64 = 0;
    while let Some(c) = chars.peek().copied() {
        if let Some(d) = c.to_digit(10) {
            n = n.saturating_mul(10).saturating_add(d as u64);
            chars.next();
        } else {
            break;
        }
    }
    n
}
