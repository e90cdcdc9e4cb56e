use std::{sync::Arc, time::Duration};

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use order_watch_engine::{OrderWatchApi, SqliteSnapshotStore};
use sp_api_tools::SpApi;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::{amazon::AmazonOrderSource, discord::DiscordNotifier},
    poller::start_order_poller,
    routes::{health, CheckForOrdersRoute, TriggerCheckRoute},
};

pub type ProductionApi = OrderWatchApi<SqliteSnapshotStore, AmazonOrderSource, DiscordNotifier>;

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let store = SqliteSnapshotStore::new_with_url(&config.database_url, 5)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let sp_api = SpApi::new(config.sp_api.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let notifier =
        DiscordNotifier::new(&config.discord).map_err(|e| ServerError::ConfigurationError(e.to_string()))?;
    let api = Arc::new(OrderWatchApi::new(store, AmazonOrderSource::new(sp_api), notifier, config.watch.clone()));
    info!("🚀️ Watching marketplace {} with {:?}", config.watch.marketplace_id, config.watch.order_window);
    match config.poll_interval {
        Some(interval) => {
            let _poller = start_order_poller(Arc::clone(&api), interval, config.poll_on_startup);
        },
        None => info!("🚀️ Background polling is disabled. Orders are only checked when /check is called."),
    }
    let srv = create_server_instance(config, api)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, api: Arc<ProductionApi>) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("ow::access_log"))
            .app_data(web::Data::from(Arc::clone(&api)))
            .service(health)
            .service(CheckForOrdersRoute::<SqliteSnapshotStore, AmazonOrderSource, DiscordNotifier>::new())
            .service(TriggerCheckRoute::<SqliteSnapshotStore, AmazonOrderSource, DiscordNotifier>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
