//! In-memory article store with keyword search.
//!
//! Articles (title, body, tags) live in a single owned collection; an
//! inverted index over lowercased tokens and tags answers free-text
//! queries, scored by substring occurrence counts. A JSON snapshot on
//! disk, written by a background queue, survives restarts.

pub mod article;
pub mod error;
pub mod index;
pub mod persist;
pub mod store;
pub mod tokenizer;

pub use article::{Article, DocId, NewArticle};
pub use error::{Result, StoreError};
pub use index::SearchIndex;
pub use store::{ArticleStore, SearchHit, SortOrder};
