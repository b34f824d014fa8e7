use chrono::{DateTime, Utc};
use rss::{Channel, ChannelBuilder, EnclosureBuilder, Item, ItemBuilder};

use crate::model::configuration::{FeedConfiguration, ImageDelivery};
use crate::model::Article;
use crate::services::fetching;

/// Build the complete channel for a fetch, probing image byte lengths when
/// enclosures are on.
pub async fn build_channel(configuration: &FeedConfiguration, articles: &[Article]) -> Channel {
    let mut items = Vec::with_capacity(articles.len());
    for article in articles {
        let length = match configuration.image_delivery {
            ImageDelivery::Enclosure => fetching::image_length(&article.image).await,
            ImageDelivery::Inline => 0,
        };
        items.push(build_item(article, length, configuration.image_delivery));
    }

    assemble_channel(configuration, items, Utc::now())
}

/// Channel assembly, deterministic given `now`.
pub fn assemble_channel(
    configuration: &FeedConfiguration,
    items: Vec<Item>,
    now: DateTime<Utc>,
) -> Channel {
    ChannelBuilder::default()
        .title(configuration.feed_title.as_str())
        .link(configuration.blog_url.trim_end_matches('/'))
        .description(configuration.feed_description.as_str())
        .pub_date(now.to_rfc2822())
        .items(items)
        .build()
}

pub fn build_item(article: &Article, length: u64, delivery: ImageDelivery) -> Item {
    let mut builder = ItemBuilder::default();
    builder
        .title(article.title.clone())
        .link(article.url.clone())
        .pub_date(article.published_at.to_rfc2822())
        .description(compose_description(article, delivery));

    if delivery == ImageDelivery::Enclosure {
        let enclosure = EnclosureBuilder::default()
            .url(article.image.as_str())
            .mime_type(enclosure_mime_type(&article.image))
            .length(length.to_string())
            .build();
        builder.enclosure(enclosure);
    }

    builder.build()
}

/// Item description: the short description when the card has one, with the
/// info line italicized underneath; the info line alone otherwise. Inline
/// delivery puts the image tag on top.
pub fn compose_description(article: &Article, delivery: ImageDelivery) -> String {
    let info = compose_info_line(
        article.category.as_deref(),
        article.date_text.as_deref(),
        article.reading_time.as_deref(),
    );

    let body = match &article.short_description {
        Some(description) if !info.is_empty() => format!("{description}<br><i>{info}</i>"),
        Some(description) => description.clone(),
        None => info,
    };

    match delivery {
        ImageDelivery::Inline => format!("<img src=\"{}\"><br>{}", article.image, body),
        ImageDelivery::Enclosure => body,
    }
}

/// "Garde d'animaux — 19 mai 2025 (6 min)", degrading through the
/// category+date, category-only and date-only shapes.
pub fn compose_info_line(
    category: Option<&str>,
    date_text: Option<&str>,
    reading_time: Option<&str>,
) -> String {
    match (category, date_text, reading_time) {
        (Some(category), Some(date), Some(time)) => format!("{category} — {date} ({time})"),
        (Some(category), Some(date), None) => format!("{category} — {date}"),
        (Some(category), None, _) => category.to_string(),
        (None, date, _) => date.unwrap_or_default().to_string(),
    }
}

pub fn enclosure_mime_type(url: &str) -> &'static str {
    let url = url.to_lowercase();
    if url.ends_with(".jpg") || url.ends_with(".jpeg") {
        "image/jpeg"
    } else {
        "image/png"
    }
}

/// Serialize the channel, with the XML declaration feed readers expect.
pub fn to_xml(channel: &Channel) -> Result<String, rss::Error> {
    let bytes = channel.write_to(Vec::new())?;
    let document = String::from_utf8_lossy(&bytes);
    Ok(format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>{document}"
    ))
}
