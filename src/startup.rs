use std::net::TcpListener;

use actix_web::web::Data;
use actix_web::{App, HttpServer};

use crate::model::configuration::FeedConfiguration;
use crate::routes;

pub async fn startup(
    configuration: FeedConfiguration,
    listener: TcpListener,
) -> std::io::Result<()> {
    let configuration = Data::new(configuration);

    HttpServer::new(move || {
        App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .app_data(configuration.clone())
            .configure(routes::configure)
    })
    .listen(listener)?
    .run()
    .await
}
