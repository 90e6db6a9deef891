//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// HTTP binding for the Request Surface (C6): a reference implementation of the JSON-over-HTTP
// wire contract over one axum router.
//
// | Component | Description                                                | Key Methods  |
// |-----------|-------------------------------------------------------------|--------------|
// | AppState  | Shared application state (the Exchange)                     | new          |
// | Api       | Router assembly and serving                                  | serve        |
// | DTOs      | Request/response wire shapes matching the PascalCase contract| —            |
// | ApiError  | HTTP error mapping                                           | from         |
//--------------------------------------------------------------------------------------------------

mod dto;
mod error;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Extension, Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::exchange::Exchange;

pub use dto::*;
pub use error::{ApiError, ApiResult};

/// Shared application state accessible by all handlers.
pub struct AppState {
    pub exchange: Exchange,
}

impl AppState {
    pub fn new(exchange: Exchange) -> Self {
        Self { exchange }
    }
}

/// The HTTP server: a bound address plus the shared state behind it.
pub struct Api {
    addr: SocketAddr,
    state: Arc<AppState>,
}

impl Api {
    pub fn new(addr: SocketAddr, exchange: Exchange) -> Self {
        Self {
            addr,
            state: Arc::new(AppState::new(exchange)),
        }
    }

    pub fn routes(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin([
                "http://localhost:3000".parse::<HeaderValue>().unwrap(),
                "http://127.0.0.1:3000".parse::<HeaderValue>().unwrap(),
            ])
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]);

        Router::new()
            .route("/order", post(routes::place_order))
            .route(
                "/order/:id",
                get(routes::get_orders).delete(routes::cancel_order),
            )
            .route("/book/:market", get(routes::get_book))
            .route("/book/:market/bestbid", get(routes::best_bid))
            .route("/book/:market/bestask", get(routes::best_ask))
            .route("/trades/:market", get(routes::get_trades))
            .layer(Extension(self.state.clone()))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let app = self.routes();
        info!(addr = %self.addr, "exchange server listening");

        let listener = TcpListener::bind(self.addr).await?;
        axum::serve(listener, app).await?;
        Ok(())
    }
}
