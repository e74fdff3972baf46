use std::net::TcpListener;
use actix_web::web;
use social::config::Config;
use social::server;
use social::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let listener = TcpListener::bind(&config.bind_addr)?;
    log::info!("Server listening on http://{}", config.bind_addr);

    let state = web::Data::new(AppState::new(config));
    server::listen(listener, state)?.await
}
