use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::model::configuration::{ArticleSelection, FeedConfiguration};
use crate::model::Article;
use crate::services::dates;

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Best-effort fields of one card, classified from its paragraph texts.
#[derive(Debug, Default, PartialEq)]
struct CardFields {
    category: Option<String>,
    date_text: Option<String>,
    reading_time: Option<String>,
    short_description: Option<String>,
}

/// Extract the article cards of a listing page, in document order.
///
/// Anchors missing an href, failing the selection predicate, resolving to
/// an already seen URL, or lacking a title or image are skipped; nothing
/// about a single card ever aborts the whole extraction.
#[tracing::instrument(skip_all)]
pub fn extract_articles(html: &str, configuration: &FeedConfiguration) -> Vec<Article> {
    let document = Html::parse_document(html);
    let heading = heading_selector(&configuration.selection);

    let mut articles = Vec::new();
    let mut seen = HashSet::new();

    for anchor in document.select(&ANCHOR) {
        let href = match anchor.value().attr("href") {
            Some(href) => href,
            None => continue,
        };
        if !is_article_link(&anchor, href, &configuration.selection) {
            continue;
        }

        let url = resolve_href(href, &configuration.site_origin, &configuration.article_base);
        if seen.contains(&url) {
            continue;
        }

        let title = first_text(&anchor, &heading);
        let image = anchor
            .select(&IMAGE)
            .next()
            .and_then(|img| img.value().attr("src"))
            .unwrap_or_default()
            .to_string();
        if title.is_empty() || image.is_empty() {
            continue;
        }

        let fields = classify_card_texts(&paragraph_texts(&anchor));

        let published_at = fields
            .date_text
            .as_deref()
            .and_then(|text| dates::parse_french_date(text).ok())
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
            .unwrap_or_else(Utc::now);

        seen.insert(url.clone());
        articles.push(Article {
            url,
            title,
            image,
            category: fields.category,
            date_text: fields.date_text,
            reading_time: fields.reading_time,
            short_description: fields.short_description,
            published_at,
        });
    }

    articles
}

/// Anchor predicate: every configured criterion must hold.
fn is_article_link(anchor: &ElementRef, href: &str, selection: &ArticleSelection) -> bool {
    if let Some(fragment) = &selection.href_fragment {
        if !href.contains(fragment.as_str()) {
            return false;
        }
    }
    if let Some(class) = &selection.link_class {
        let classes = anchor.value().attr("class").unwrap_or_default();
        if !classes.split_whitespace().any(|candidate| candidate == class) {
            return false;
        }
    }
    true
}

/// Resolve a card href to an absolute URL.
pub fn resolve_href(href: &str, origin: &str, article_base: &str) -> String {
    if let Some(rest) = href.strip_prefix("./") {
        format!("{}/{}", article_base.trim_end_matches('/'), rest)
    } else if href.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), href)
    } else if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}/{}", origin.trim_end_matches('/'), href)
    }
}

fn heading_selector(selection: &ArticleSelection) -> Selector {
    Selector::parse(&selection.heading).unwrap_or_else(|_| {
        tracing::warn!(
            "Invalid heading selector '{}', falling back to h5",
            selection.heading
        );
        Selector::parse("h5").unwrap()
    })
}

fn first_text(anchor: &ElementRef, selector: &Selector) -> String {
    anchor
        .select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn paragraph_texts(anchor: &ElementRef) -> Vec<String> {
    anchor
        .select(&PARAGRAPH)
        .map(|paragraph| paragraph.text().collect::<String>().trim().to_string())
        .collect()
}

/// The card separator glyph between category, date and reading time.
fn is_separator(text: &str) -> bool {
    text == "|"
}

/// Reading-time paragraphs carry a minute unit, e.g. "6 min".
fn is_reading_time(text: &str) -> bool {
    text.contains("min")
}

/// Date paragraphs are the ones carrying a 4-digit year.
fn contains_year(text: &str) -> bool {
    text.as_bytes()
        .windows(4)
        .any(|window| window.iter().all(u8::is_ascii_digit))
}

/// Classify the paragraph texts of a card, first match wins per field.
///
/// A second pass picks the short description: the first text claimed by
/// none of the other rules.
fn classify_card_texts(texts: &[String]) -> CardFields {
    let mut fields = CardFields::default();

    for text in texts {
        if text.is_empty() || is_separator(text) {
            continue;
        }
        if is_reading_time(text) {
            if fields.reading_time.is_none() {
                fields.reading_time = Some(text.clone());
            }
        } else if contains_year(text) {
            if fields.date_text.is_none() {
                fields.date_text = Some(text.clone());
            }
        } else if fields.category.is_none() {
            fields.category = Some(text.clone());
        }
    }

    let claimed = [&fields.category, &fields.date_text, &fields.reading_time];
    fields.short_description = texts
        .iter()
        .find(|text| {
            !text.is_empty()
                && !is_separator(text)
                && !is_reading_time(text)
                && !contains_year(text)
                && !claimed
                    .iter()
                    .any(|field| field.as_deref() == Some(text.as_str()))
        })
        .cloned();

    fields
}
