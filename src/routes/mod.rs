use actix_web::web;

pub mod feed;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(feed::configure);
}
