use wiremock::MockServer;

use ruben_rss::model::configuration::FeedConfiguration;

/// Configuration pointing every URL at the mock server.
pub fn configuration(mock: &MockServer) -> FeedConfiguration {
    let host = mock.uri();

    FeedConfiguration {
        blog_url: format!("{host}/blog"),
        site_origin: host.clone(),
        article_base: format!("{host}/blogs-articles/"),
        ..FeedConfiguration::default()
    }
}

/// The fixture listing page, with image URLs rewritten onto the mock.
pub fn listing_page(mock: &MockServer) -> String {
    include_str!("blog.html").replace("{base}", &mock.uri())
}
