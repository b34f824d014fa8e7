use std::env;

use serde::{Deserialize, Serialize};

/// Where article images end up in the generated feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDelivery {
    /// One `<enclosure>` per item, with a HEAD-probed byte length.
    Enclosure,
    /// An `<img>` tag inlined at the top of the item description.
    Inline,
}

/// How article cards are recognized on the listing page.
///
/// The blog markup changes over time, so the anchor predicate and the
/// heading level are configuration rather than constants. Configured
/// criteria are conjunctive; a `None` criterion is not applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSelection {
    /// Substring the `href` must contain.
    pub href_fragment: Option<String>,
    /// Class the anchor element must carry.
    pub link_class: Option<String>,
    /// CSS selector for the title element inside the anchor.
    pub heading: String,
}

/// # Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfiguration {
    /// Listing page to scrape. Doubles as the channel link.
    pub blog_url: String,
    /// Base for `/`-rooted and bare relative hrefs.
    pub site_origin: String,
    /// Base for `./`-relative hrefs.
    pub article_base: String,
    pub feed_title: String,
    pub feed_description: String,
    pub selection: ArticleSelection,
    pub image_delivery: ImageDelivery,
}

impl Default for FeedConfiguration {
    fn default() -> Self {
        Self {
            blog_url: String::from("https://ruben.care/blog"),
            site_origin: String::from("https://ruben.care"),
            article_base: String::from("https://ruben.care/blogs-articles/"),
            feed_title: String::from("Le blog Ruben"),
            feed_description: String::from("Actualités et conseils pour les pets parents."),
            selection: ArticleSelection {
                href_fragment: Some(String::from("blogs-articles")),
                link_class: None,
                heading: String::from("h5"),
            },
            image_delivery: ImageDelivery::Enclosure,
        }
    }
}

impl FeedConfiguration {
    /// Build the configuration from `RUBEN_RSS_*` environment variables,
    /// keeping the defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            blog_url: env_or("RUBEN_RSS_BLOG_URL", defaults.blog_url),
            site_origin: env_or("RUBEN_RSS_SITE_ORIGIN", defaults.site_origin),
            article_base: env_or("RUBEN_RSS_ARTICLE_BASE", defaults.article_base),
            feed_title: env_or("RUBEN_RSS_FEED_TITLE", defaults.feed_title),
            feed_description: env_or("RUBEN_RSS_FEED_DESCRIPTION", defaults.feed_description),
            selection: ArticleSelection {
                href_fragment: env_opt("RUBEN_RSS_HREF_FRAGMENT")
                    .or(defaults.selection.href_fragment),
                link_class: env_opt("RUBEN_RSS_LINK_CLASS"),
                heading: env_or("RUBEN_RSS_HEADING", defaults.selection.heading),
            },
            image_delivery: image_delivery_from_env(defaults.image_delivery),
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn image_delivery_from_env(default: ImageDelivery) -> ImageDelivery {
    match env::var("RUBEN_RSS_IMAGE_DELIVERY") {
        Ok(value) => match value.to_lowercase().as_str() {
            "enclosure" => ImageDelivery::Enclosure,
            "inline" => ImageDelivery::Inline,
            other => {
                tracing::warn!("Unknown image delivery mode '{other}', keeping enclosures");
                ImageDelivery::Enclosure
            }
        },
        Err(_) => default,
    }
}
