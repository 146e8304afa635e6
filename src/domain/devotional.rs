use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// A dated reading. At most one published devotional is expected per date.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Devotional {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub scripture_reference: Option<String>,
    pub date: NaiveDate,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

impl Devotional {
    /// Date as shown to readers, e.g. "Monday, January 1, 2024".
    pub fn display_date(&self) -> String {
        self.date.format("%A, %B %-d, %Y").to_string()
    }

    /// Non-blank content lines, trimmed. Each one becomes a paragraph.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    pub fn scripture(&self) -> Option<&str> {
        self.scripture_reference
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
