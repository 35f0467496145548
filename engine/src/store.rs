use std::collections::HashSet;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::article::{now_timestamp, Article, DocId, NewArticle};
use crate::error::{Result, StoreError};
use crate::index::SearchIndex;
use crate::persist::{self, SnapshotWriter};
use crate::tokenizer::tokenize;

/// Result ordering for `search`. Unknown selector strings are accepted and
/// mapped to `Unsorted`, which leaves results in store order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Relevance,
    Date,
    Unsorted,
}

impl SortOrder {
    pub fn parse(s: &str) -> Self {
        match s {
            "relevance" => SortOrder::Relevance,
            "date" => SortOrder::Date,
            _ => SortOrder::Unsorted,
        }
    }
}

/// One search result. Flattened on the wire so the JSON is the article
/// object with a single extra `relevance` field; retrieval by id returns a
/// bare `Article` and therefore never carries a score.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub article: Article,
    pub relevance: usize,
}

/// The authoritative article collection plus everything derived from it:
/// the inverted index, the auto-id counter, and the handle to the snapshot
/// writer. Built once at startup and shared behind a single lock; `create`
/// is a check-then-act sequence and must not interleave with other
/// mutators.
pub struct ArticleStore {
    articles: Vec<Article>,
    index: SearchIndex,
    next_id: DocId,
    writer: Option<SnapshotWriter>,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self {
            articles: Vec::new(),
            index: SearchIndex::new(),
            next_id: 1,
            writer: None,
        }
    }

    /// Attach the background snapshot writer. Stores without one (unit
    /// tests, mostly) simply never persist.
    pub fn with_writer(mut self, writer: SnapshotWriter) -> Self {
        self.writer = Some(writer);
        self
    }

    /// Add an article. A requested id that is already taken is rejected
    /// before anything is touched: no append, no index entry, no counter
    /// advance. Auto-assigned ids skip over ids claimed by earlier
    /// explicit creates, so they stay unique and strictly increasing;
    /// only when `u64::MAX` itself is taken does allocation fall back to
    /// the lowest free id.
    pub fn create(&mut self, new: NewArticle) -> Result<Article> {
        let id = match new.id {
            Some(requested) => {
                if self.contains(requested) {
                    return Err(StoreError::DuplicateId(requested));
                }
                requested
            }
            None => self.allocate_id(),
        };

        let article = Article {
            id,
            title: new.title,
            body: new.body,
            tags: new.tags,
            timestamp: now_timestamp(),
        };

        self.articles.push(article.clone());
        self.index.update(&article);
        if let Some(writer) = &self.writer {
            writer.queue(self.articles.clone());
        }
        tracing::debug!(id = article.id, "article stored");
        Ok(article)
    }

    /// Free-text search. Query tokens go through the same tokenization as
    /// indexing; every id any token maps to (term or label) joins a
    /// deduplicated candidate set, and candidates are scored and sorted.
    /// A query with no tokens has no candidates and returns an empty vec.
    pub fn search(&self, query: &str, order: SortOrder) -> Vec<SearchHit> {
        let tokens = tokenize(query);

        let mut candidates: HashSet<DocId> = HashSet::new();
        for token in &tokens {
            candidates.extend(self.index.lookup(token));
        }

        // A pathologically large token can exceed the regex compile
        // limit; it then scores nothing instead of failing the search.
        let patterns: Vec<Regex> = tokens
            .iter()
            .filter_map(|token| {
                RegexBuilder::new(&regex::escape(token))
                    .case_insensitive(true)
                    .build()
                    .ok()
            })
            .collect();

        let mut hits: Vec<SearchHit> = self
            .articles
            .iter()
            .filter(|article| candidates.contains(&article.id))
            .map(|article| SearchHit {
                relevance: occurrence_score(article, &patterns),
                article: article.clone(),
            })
            .collect();

        // Both sorts are stable, so equal keys keep store order.
        match order {
            SortOrder::Relevance => hits.sort_by(|a, b| b.relevance.cmp(&a.relevance)),
            SortOrder::Date => hits.sort_by(|a, b| b.article.timestamp.cmp(&a.article.timestamp)),
            SortOrder::Unsorted => {}
        }
        hits
    }

    pub fn get(&self, id: DocId) -> Option<&Article> {
        self.articles.iter().find(|article| article.id == id)
    }

    /// Swap in the last saved snapshot. A missing or unreadable snapshot
    /// is not fatal: the store starts empty and the counter resets.
    pub fn reload(&mut self, path: &Path) {
        match persist::load_articles(path) {
            Ok(articles) => {
                tracing::info!(count = articles.len(), "loaded article snapshot");
                self.restore(articles);
            }
            Err(err) => {
                tracing::info!(error = %err, "no saved articles found, starting empty");
                self.restore(Vec::new());
            }
        }
    }

    /// Replace the collection wholesale: recompute the id counter as one
    /// past the highest id (1 when empty, saturating at the top of the id
    /// space) and rebuild the index from scratch. `reload` funnels through
    /// here; tests use it to seed stores with handcrafted timestamps.
    pub fn restore(&mut self, articles: Vec<Article>) {
        self.next_id = articles
            .iter()
            .map(|a| a.id)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        self.index.rebuild(&articles);
        self.articles = articles;
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    fn contains(&self, id: DocId) -> bool {
        self.articles.iter().any(|article| article.id == id)
    }

    fn allocate_id(&mut self) -> DocId {
        loop {
            if !self.contains(self.next_id) {
                let id = self.next_id;
                self.next_id = self.next_id.saturating_add(1);
                return id;
            }
            match self.next_id.checked_add(1) {
                Some(next) => self.next_id = next,
                // u64::MAX itself is taken; restart at 1. The store is
                // finite, so a free id below always exists.
                None => self.next_id = 1,
            }
        }
    }
}

impl Default for ArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Sum over the patterns of non-overlapping occurrences in the article's
/// combined title and body. Patterns are escaped query tokens, so matching
/// is literal substring and case-insensitive: a short token also counts
/// inside longer words ("art" matches twice in "artful article").
fn occurrence_score(article: &Article, patterns: &[Regex]) -> usize {
    let text = format!("{} {}", article.title, article.body);
    patterns
        .iter()
        .map(|pattern| pattern.find_iter(&text).count())
        .sum()
}
