use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::OffsetDateTime;

pub type DocId = u64;

/// A stored article. Articles are immutable once created; there is no
/// update or delete path, so every index entry stays valid for the life
/// of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: DocId,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub timestamp: String,
}

/// Validated input for a create. The transport layer checks that title and
/// body are present before building one of these; the store only enforces
/// id uniqueness.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub id: Option<DocId>,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

/// Current UTC time with fixed three-digit milliseconds, e.g.
/// `2024-01-02T03:04:05.678Z`. The width never varies, so lexicographic
/// comparison of two timestamps matches chronological order.
pub fn now_timestamp() -> String {
    let format =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
    OffsetDateTime::now_utc()
        .format(format)
        .unwrap_or_else(|_| String::new())
}
