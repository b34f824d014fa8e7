use actix_web::{web, HttpResponse};

use crate::errors::ApiError;
use crate::model::configuration::FeedConfiguration;
use crate::services::{feed, fetching, scraping};

/// Fetch, extract and republish the blog as RSS. Every request re-fetches
/// the source page; there is no cache.
#[tracing::instrument(skip_all)]
pub async fn serve_rss(
    configuration: web::Data<FeedConfiguration>,
) -> Result<HttpResponse, ApiError> {
    let page = fetching::download_page(&configuration.blog_url).await?;

    let articles = scraping::extract_articles(&page, &configuration);
    tracing::info!(
        count = articles.len(),
        source = %configuration.blog_url,
        "Extracted articles"
    );

    let channel = feed::build_channel(&configuration, &articles).await;
    let body = feed::to_xml(&channel)?;

    Ok(HttpResponse::Ok()
        .content_type("application/rss+xml; charset=utf-8")
        .body(body))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Both historical spellings of the endpoint serve the same feed.
    cfg.route("/rss.xml", web::get().to(serve_rss))
        .route("/rss", web::get().to(serve_rss));
}
