use chrono::{DateTime, Utc};

pub mod configuration;

/// One article card scraped from the blog listing page.
///
/// `url`, `title` and `image` are mandatory signals: a candidate anchor
/// missing any of them is not an article card and is dropped. Everything
/// else is best-effort text sniffed from the card's paragraphs and may be
/// absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub image: String,
    pub category: Option<String>,
    pub date_text: Option<String>,
    pub reading_time: Option<String>,
    pub short_description: Option<String>,
    pub published_at: DateTime<Utc>,
}
