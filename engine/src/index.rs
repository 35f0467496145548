use std::collections::HashMap;

use crate::article::{Article, DocId};
use crate::tokenizer::tokenize;

/// Inverted index over the article collection: one map for text tokens,
/// one for tags. Postings keep insertion order and are not deduplicated;
/// a token occurring three times in one article pushes its id three times.
///
/// The index is never persisted. It is rebuilt from the article collection
/// on every reload, which keeps it consistent with the store by
/// construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchIndex {
    /// Lowercased title+body token -> ids of articles containing it.
    pub terms: HashMap<String, Vec<DocId>>,
    /// Lowercased tag -> ids of articles carrying it.
    pub labels: HashMap<String, Vec<DocId>>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one article into both maps. Infallible; entries are created on
    /// first sight and appended to thereafter.
    pub fn update(&mut self, article: &Article) {
        let text = format!("{} {}", article.title, article.body);
        for token in tokenize(&text) {
            self.terms.entry(token).or_default().push(article.id);
        }
        for tag in &article.tags {
            self.labels
                .entry(tag.to_lowercase())
                .or_default()
                .push(article.id);
        }
    }

    /// All ids recorded for `term` in either map: term hits first, then
    /// label hits. Duplicates are possible; callers deduplicate.
    pub fn lookup(&self, term: &str) -> Vec<DocId> {
        let mut ids = Vec::new();
        if let Some(hits) = self.terms.get(term) {
            ids.extend_from_slice(hits);
        }
        if let Some(hits) = self.labels.get(term) {
            ids.extend_from_slice(hits);
        }
        ids
    }

    /// Discard both maps and replay `update` over `articles` in order.
    pub fn rebuild(&mut self, articles: &[Article]) {
        self.terms.clear();
        self.labels.clear();
        for article in articles {
            self.update(article);
        }
    }
}
