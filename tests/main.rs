use actix_web::http::header;
use actix_web::web::Data;
use actix_web::{test, App};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ruben_rss::model::configuration::{FeedConfiguration, ImageDelivery};
use ruben_rss::routes;

mod helpers;

async fn request_feed(configuration: FeedConfiguration, uri: &str) -> (u16, String, String) {
    let app = test::init_service(
        App::new()
            .app_data(Data::new(configuration))
            .configure(routes::configure),
    )
    .await;

    let request = test::TestRequest::get().uri(uri).to_request();
    let response = test::call_service(&app, request).await;

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|value| value.to_str().unwrap_or_default().to_string())
        .unwrap_or_default();
    let body = test::read_body(response).await;

    (status, content_type, String::from_utf8_lossy(&body).to_string())
}

#[actix_web::test]
async fn happy_path() {
    let mock = MockServer::start().await;

    let page = ResponseTemplate::new(200).set_body_string(helpers::listing_page(&mock));
    Mock::given(method("GET"))
        .and(path("/blog"))
        .respond_with(page)
        .expect(1)
        .mount(&mock)
        .await;
    // Images only answer HEAD: the service must never GET them.
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0u8; 777], "image/jpeg"))
        .mount(&mock)
        .await;

    let (status, content_type, body) = request_feed(helpers::configuration(&mock), "/rss.xml").await;

    assert_eq!(status, 200, "body was: {body}");
    assert_eq!(content_type, "application/rss+xml; charset=utf-8");

    // The three genuine cards, in document order, the duplicate and the
    // imageless card dropped.
    let first = body.find("Faire garder son chat").unwrap();
    let second = body.find("Bien promener son chien").unwrap();
    let third = body.find("Préparer son budget vétérinaire").unwrap();
    assert!(first < second && second < third);
    assert_eq!(body.matches("<item>").count(), 3);
    assert!(!body.contains("Doublon du premier article"));
    assert!(!body.contains("Une carte sans visuel"));

    // Channel metadata and item composition.
    assert!(body.contains("<title>Le blog Ruben</title>"));
    assert!(body.contains(&format!("<link>{}/blog</link>", mock.uri())));
    assert!(body.contains("19 mai 2025 (6 min)"));
    assert!(body.contains("19 May 2025"));

    // Enclosures carry the HEAD-probed length and the sniffed mime type.
    assert!(body.contains(r#"length="777""#));
    assert!(body.contains(r#"type="image/jpeg""#));
    assert!(body.contains(r#"type="image/png""#));
}

#[actix_web::test]
async fn rss_alias_serves_the_same_feed() {
    let mock = MockServer::start().await;

    let page = ResponseTemplate::new(200).set_body_string(helpers::listing_page(&mock));
    Mock::given(method("GET"))
        .and(path("/blog"))
        .respond_with(page)
        .mount(&mock)
        .await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock)
        .await;

    let (status, _, body) = request_feed(helpers::configuration(&mock), "/rss").await;

    assert_eq!(status, 200);
    assert!(body.contains("<title>Le blog Ruben</title>"));
    assert_eq!(body.matches("<item>").count(), 3);
}

#[actix_web::test]
async fn inline_delivery_embeds_images_without_probing() {
    let mock = MockServer::start().await;

    let page = ResponseTemplate::new(200).set_body_string(helpers::listing_page(&mock));
    Mock::given(method("GET"))
        .and(path("/blog"))
        .respond_with(page)
        .mount(&mock)
        .await;
    // No HEAD mock mounted: inline mode must not probe at all, and the
    // default wiremock 404 would not hurt it anyway.

    let configuration = FeedConfiguration {
        image_delivery: ImageDelivery::Inline,
        ..helpers::configuration(&mock)
    };
    let (status, _, body) = request_feed(configuration, "/rss.xml").await;

    assert_eq!(status, 200);
    assert!(!body.contains("<enclosure"));
    assert!(body.contains("&lt;img src="));
}

#[actix_web::test]
async fn a_page_without_cards_yields_an_empty_channel() {
    let mock = MockServer::start().await;

    let page = ResponseTemplate::new(200)
        .set_body_string("<html><body><a href=\"/a-propos\">À propos</a></body></html>");
    Mock::given(method("GET"))
        .and(path("/blog"))
        .respond_with(page)
        .mount(&mock)
        .await;

    let (status, content_type, body) = request_feed(helpers::configuration(&mock), "/rss.xml").await;

    assert_eq!(status, 200);
    assert_eq!(content_type, "application/rss+xml; charset=utf-8");
    assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(body.contains("<title>Le blog Ruben</title>"));
    assert_eq!(body.matches("<item>").count(), 0);
}

#[actix_web::test]
async fn upstream_error_becomes_a_flat_500() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/blog"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock)
        .await;

    let (status, content_type, body) = request_feed(helpers::configuration(&mock), "/rss.xml").await;

    assert_eq!(status, 500);
    assert!(content_type.starts_with("text/plain"));
    assert!(
        body.starts_with("Unable to fetch articles:"),
        "body was: {body}"
    );
}

#[actix_web::test]
async fn unreachable_upstream_becomes_a_flat_500() {
    // Bind then drop a listener so the port is (very likely) closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let configuration = FeedConfiguration {
        blog_url: format!("http://127.0.0.1:{port}/blog"),
        site_origin: format!("http://127.0.0.1:{port}"),
        article_base: format!("http://127.0.0.1:{port}/blogs-articles/"),
        ..FeedConfiguration::default()
    };

    let (status, _, body) = request_feed(configuration, "/rss.xml").await;

    assert_eq!(status, 500);
    assert!(
        body.starts_with("Unable to fetch articles:"),
        "body was: {body}"
    );
}
