use std::env;
use std::net::TcpListener;

use tracing::info;

use ruben_rss::model::configuration::FeedConfiguration;
use ruben_rss::{observability, startup};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Init dotenv
    dotenvy::dotenv().ok();

    let subscriber = observability::get_subscriber("info");
    observability::init_subscriber(subscriber);

    let configuration = FeedConfiguration::from_env();

    let listener = TcpListener::bind(
        env::var("RUBEN_RSS_LISTEN_ON").unwrap_or_else(|_| String::from("0.0.0.0:8080")),
    )?;

    info!(
        "Serving {} as RSS on {}",
        configuration.blog_url,
        listener.local_addr()?
    );

    startup::startup(configuration, listener).await
}
