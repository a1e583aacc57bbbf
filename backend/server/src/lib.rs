//! # Hearth Server
//!
//! JSON backend for the meal-delivery site.
//!
//! ## Routes
//! - `GET /health`
//! - `GET /api/pages/{page}`: copy + SEO metadata for `home|about|chef|menu`
//! - `GET /api/nav?q=`: command palette destinations
//! - `GET /api/menus/week?date=`, `GET /api/menus/weeks`
//! - `GET /api/reviews`, `GET /api/suppliers`
//! - `POST /api/delivery-check`: service area check, answers after the simulated delay
//! - `POST /api/auth/signup|login|magic-link`
//! - `POST /api/testimonials`: public submission, lands as `pending`
//! - `GET /api/admin/testimonials`, `PATCH /api/admin/testimonials/{id}`, `GET /api/admin/orders`
//! - `GET /api/checkout/options`, `POST /api/checkout/quote`, `POST /api/checkout/confirm`
//!
//!
//!
//! # Environment
//!
//! | Key | Default |
//! |---|---|
//! | `RUST_PORT` | `1111` |
//! | `SITE_VARIANT` / `SITE_HOST` | `delivery` |
//! | `CHECK_DELAY_MS` | `800` |
//! | `STRICT_POSTAL` | `false` |
//! | `BAAS_URL` | `http://localhost:54321` |
//! | `MERCHANT_WALLET` | dead address |
//! | `ETH_USD_CENTS` | `300000` |
//!
//! Secrets `BAAS_ANON_KEY`, `BAAS_SERVICE_KEY` and `SIGNUP_PASSWORD` are read from
//! `/run/secrets/<NAME>`, falling back to the environment.
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, patch, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod baas;
pub mod checkout;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use config::Config;
use routes::{
    checkout_options_handler, confirm_handler, delivery_check_handler, health_handler,
    list_orders_handler, list_testimonials_handler, login_handler, magic_link_handler,
    nav_handler, page_handler, quote_handler, reviews_handler, review_testimonial_handler,
    signup_handler, submit_testimonial_handler, suppliers_handler, week_handler, weeks_handler,
};
use state::State;

pub fn build_router(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/pages/{page}", get(page_handler))
        .route("/api/nav", get(nav_handler))
        .route("/api/menus/week", get(week_handler))
        .route("/api/menus/weeks", get(weeks_handler))
        .route("/api/reviews", get(reviews_handler))
        .route("/api/suppliers", get(suppliers_handler))
        .route("/api/delivery-check", post(delivery_check_handler))
        .route("/api/auth/signup", post(signup_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/magic-link", post(magic_link_handler))
        .route("/api/testimonials", post(submit_testimonial_handler))
        .route("/api/admin/testimonials", get(list_testimonials_handler))
        .route("/api/admin/testimonials/{id}", patch(review_testimonial_handler))
        .route("/api/admin/orders", get(list_orders_handler))
        .route("/api/checkout/options", get(checkout_options_handler))
        .route("/api/checkout/quote", post(quote_handler))
        .route("/api/checkout/confirm", post(confirm_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::from_config(config)?;

    info!("Starting server...");
    let address = format!("0.0.0.0:{}", state.config.port);
    let app = build_router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
