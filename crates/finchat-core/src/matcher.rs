//! Keyword-overlap service matcher.
//!
//! Ranks catalog entries against a free-text query with a linear score:
//! configured keywords found as substrings of the query, plus record tokens
//! (from name and summary) that equal a query token. No embeddings.

use std::collections::HashSet;

use finchat_types::service::ServiceRecord;

/// Return up to `top_k` services relevant to `query`, best first.
///
/// Ties keep catalog order. When nothing scores above zero the first
/// `top_k` catalog entries are returned instead, so a non-empty catalog
/// always yields a non-empty shortlist (unless `top_k` is zero).
pub fn match_services(query: &str, catalog: &[ServiceRecord], top_k: usize) -> Vec<ServiceRecord> {
    if top_k == 0 || catalog.is_empty() {
        return Vec::new();
    }

    let text = query.to_lowercase();
    let query_tokens: HashSet<&str> = text.split_whitespace().collect();

    let mut scored: Vec<(usize, &ServiceRecord)> = catalog
        .iter()
        .map(|record| (score(record, &text, &query_tokens), record))
        .collect();

    // `sort_by` is stable, so equal scores keep catalog order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let ranked: Vec<ServiceRecord> = scored
        .into_iter()
        .filter(|(score, _)| *score > 0)
        .take(top_k)
        .map(|(_, record)| record.clone())
        .collect();

    if ranked.is_empty() {
        catalog.iter().take(top_k).cloned().collect()
    } else {
        ranked
    }
}

/// Relevance score of one record against a lowercased query.
pub fn score(record: &ServiceRecord, text: &str, query_tokens: &HashSet<&str>) -> usize {
    let keyword_hits = record
        .keywords
        .iter()
        .map(|kw| kw.to_lowercase())
        .filter(|kw| text.contains(kw.as_str()))
        .count();

    let haystack = format!("{} {}", record.name, record.summary).to_lowercase();
    let token_hits = haystack
        .split_whitespace()
        .filter(|token| query_tokens.contains(token))
        .count();

    keyword_hits + token_hits
}
