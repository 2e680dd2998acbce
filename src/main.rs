mod api;
mod blockchain;
mod config;
mod error;
mod transaction;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;
use std::io;

use api::AppState;
use blockchain::{Blockchain, ProofOfWork};
use config::Settings;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let settings = Settings::from_env();
    let blockchain = Blockchain::new(ProofOfWork::new(settings.difficulty), settings.seal_scope)
        .map_err(|e| io::Error::other(e.to_string()))?;
    info!(
        "genesis mined: hash={} (prefix={:?}, seal={:?})",
        blockchain.last_block().hash,
        blockchain.difficulty_prefix(),
        blockchain.seal_scope()
    );

    let state = web::Data::new(AppState::new(blockchain));

    info!(
        "⛓️ Starting ledger API at http://{}:{}",
        settings.host, settings.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
