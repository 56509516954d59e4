use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::authors::Author;
use crate::domain::ids::{AuthorId, BookId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author_id: Option<AuthorId>,
    pub publish_date: NaiveDate,
    pub page_count: i32,
    pub cover_image_name: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A book with its author reference resolved, for the detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookWithAuthor {
    #[serde(flatten)]
    pub book: Book,
    pub author: Option<Author>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author_id: Option<AuthorId>,
    pub publish_date: NaiveDate,
    pub page_count: i32,
    pub cover_image_name: Option<String>,
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewBook {
    pub fn normalize(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.description = normalize_optional_field(self.description);
        self
    }
}

/// Field set for an update. Every field except the cover is overwritten
/// unconditionally; `cover_image_name: None` preserves the stored cover
/// reference, `Some(name)` replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBook {
    pub title: String,
    pub author_id: Option<AuthorId>,
    pub publish_date: NaiveDate,
    pub page_count: i32,
    pub cover_image_name: Option<String>,
    pub description: Option<String>,
}

impl UpdateBook {
    pub fn normalize(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.description = normalize_optional_field(self.description);
        self
    }
}

/// Result of a successful update: the stored book, plus the cover file
/// name displaced by a replacement upload. The caller owns deleting the
/// displaced file; the store only swaps the reference.
#[derive(Debug, Clone)]
pub struct UpdatedBook {
    pub book: Book,
    pub replaced_cover: Option<String>,
}

/// Composable listing filter. Starts unconstrained; each `with_*` call
/// attaches a clause only when the parameter is actually present, and the
/// finished value is handed to the store in one piece.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    title: Option<String>,
    published_before: Option<NaiveDate>,
    published_after: Option<NaiveDate>,
}

impl BookFilter {
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match on the title. Empty input counts
    /// as absent.
    pub fn with_title(mut self, title: Option<&str>) -> Self {
        self.title = title.filter(|t| !t.is_empty()).map(str::to_string);
        self
    }

    /// Inclusive upper bound on the publish date.
    pub fn with_published_before(mut self, date: Option<NaiveDate>) -> Self {
        self.published_before = date;
        self
    }

    /// Inclusive lower bound on the publish date.
    pub fn with_published_after(mut self, date: Option<NaiveDate>) -> Self {
        self.published_after = date;
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn published_before(&self) -> Option<NaiveDate> {
        self.published_before
    }

    pub fn published_after(&self) -> Option<NaiveDate> {
        self.published_after
    }

    pub fn is_unconstrained(&self) -> bool {
        self.title.is_none() && self.published_before.is_none() && self.published_after.is_none()
    }
}

fn normalize_optional_field(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
