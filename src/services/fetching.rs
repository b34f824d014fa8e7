use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::Client;

static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent("ruben-rss (+https://ruben.care/blog)")
        .build()
        .expect("Could not build CLIENT")
});

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("could not fetch the page: {0}")]
    GetError(#[from] reqwest::Error),
    #[error("upstream returned HTTP status code {0}")]
    StatusCodeError(u16),
}

/// Download the listing page of the blog.
#[tracing::instrument]
pub async fn download_page(url: &str) -> Result<String, FetchError> {
    let response = CLIENT.get(url).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::StatusCodeError(response.status().as_u16()));
    }

    let body = response.bytes().await?;
    Ok(String::from_utf8_lossy(&body).to_string())
}

/// Byte length of an image, for the enclosure `length` attribute.
///
/// The length is cosmetic: transport errors, non-2xx statuses and missing
/// or unparseable `Content-Length` headers all degrade to `0` instead of
/// failing the feed.
#[tracing::instrument]
pub async fn image_length(url: &str) -> u64 {
    let response = match CLIENT.head(url).send().await {
        Ok(response) if response.status().is_success() => response,
        Ok(response) => {
            tracing::debug!("HEAD {} returned {}", url, response.status());
            return 0;
        }
        Err(error) => {
            tracing::debug!("HEAD {} failed: {}", url, error);
            return 0;
        }
    };

    response
        .headers()
        .get(reqwest::header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}
