mod api;
mod cart;
mod config;
mod domain;
mod normalize;
mod orders;
mod pricing;
mod status;
mod store;

use std::env;
use std::sync::Arc;

use tracing::{Level, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use api::{ApiClient, ApiClientConfig, AuthProvider, StaticAuth};
use cart::{CartSession, HttpCartBackend};
use config::Config;
use orders::{HttpOrderBackend, OrderBoard};
use pricing::{VatMode, display_price, resolve_totals_breakdown};
use status::{map_status, resolve_primary_action};
use store::{KeyValueStore, MemoryStore, SqliteKvStore, SqliteKvStoreConfig};

const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";

fn parse_config_path() -> String {
    for arg in env::args().skip(1) {
        if let Some(path) = arg.strip_prefix("--config=") {
            return path.to_string();
        }
    }
    DEFAULT_CONFIG_PATH.to_string()
}

fn init_tracing(log_level: Option<&str>) {
    let level = match log_level {
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("warn") | Some("warning") => Level::WARN,
        Some("error") => Level::ERROR,
        Some("trace") => Level::TRACE,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn build_api(config: &Config, auth: Arc<dyn AuthProvider>) -> Result<ApiClient, String> {
    let mut client_config = ApiClientConfig::new(config.api.base_url.clone());
    client_config.timeout = config.api.timeout_duration()?;
    Ok(ApiClient::new(client_config, auth))
}

async fn build_store(config: &Config) -> Result<Arc<dyn KeyValueStore>, store::StorageError> {
    match config.storage {
        Some(ref storage) if storage.enabled => {
            let kv_config = SqliteKvStoreConfig {
                path: storage
                    .path
                    .clone()
                    .unwrap_or_else(|| SqliteKvStoreConfig::default().path),
                ..SqliteKvStoreConfig::default()
            };
            Ok(Arc::new(SqliteKvStore::new(kv_config).await?))
        }
        _ => Ok(Arc::new(MemoryStore::new())),
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config_path = parse_config_path();

    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", config_path, e);
            return;
        }
    };

    init_tracing(config.app.log_level.as_deref());
    info!(app = %config.app.name, env = %config.app.env, "starting storefront client");

    let auth: Arc<dyn AuthProvider> = Arc::new(StaticAuth::new(config.api.token.clone()));

    let store = match build_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "failed to initialize client state store");
            return;
        }
    };

    let cart_api = match build_api(&config, Arc::clone(&auth)) {
        Ok(api) => api,
        Err(e) => {
            error!(error = %e, "invalid api configuration");
            return;
        }
    };

    let mut session = CartSession::new(Arc::new(HttpCartBackend::new(cart_api)), store);

    if let Err(e) = session.bootstrap().await {
        error!(error = %e, "cart bootstrap failed");
        return;
    }

    let vat_rate = config
        .pricing
        .as_ref()
        .map(|p| p.default_vat_rate)
        .unwrap_or_default();
    let display_mode = match config.pricing.as_ref().and_then(|p| p.display_mode.as_deref()) {
        Some("excl") => VatMode::ExclVat,
        _ => VatMode::InclVat,
    };

    if let Some(cart) = session.cart() {
        let breakdown = resolve_totals_breakdown(&cart.totals);
        info!(
            cart_id = %cart.cart_id,
            items = cart.items.len(),
            currency = %cart.totals.currency,
            net = %breakdown.net,
            vat = %breakdown.vat,
            gross = %breakdown.gross,
            "cart ready"
        );

        for item in &cart.items {
            let shown = display_price(item.resolved_unit_price(), vat_rate, display_mode);
            info!(
                item = %item.id,
                quantity = item.capped_quantity(),
                unit_price = %shown,
                "cart line"
            );
        }
    }

    let order_api = match build_api(&config, Arc::clone(&auth)) {
        Ok(api) => api,
        Err(e) => {
            error!(error = %e, "invalid api configuration");
            return;
        }
    };

    let mut board = OrderBoard::new(Arc::new(HttpOrderBackend::new(order_api)));
    match board.refresh().await {
        Ok(()) => {
            for order in board.orders() {
                let descriptor = map_status(&order.status);
                let action =
                    resolve_primary_action(&descriptor, order.tracking_reference.is_some());
                info!(
                    order = %order.order_number,
                    status = descriptor.label,
                    severity = ?descriptor.severity,
                    action = ?action,
                    total = %display_price(
                        resolve_totals_breakdown(&order.totals).net,
                        vat_rate,
                        display_mode,
                    ),
                    "order"
                );
            }
        }
        Err(e) => match e {
            orders::OrderError::Api(ref api_err) if api_err.is_unsupported() => {
                warn!("order listing is not available on this backend yet");
            }
            _ => error!(error = %e, "failed to list orders"),
        },
    }
}
