//--------------------------------------------------------------------------------------------------
// FUNCTIONS
//--------------------------------------------------------------------------------------------------
// | Name         | Description                              | Return Type          |
// |--------------|------------------------------------------|----------------------|
// | place_order  | POST /order                               | ApiResult<Response>  |
// | cancel_order | DELETE /order/{id}                        | ApiResult<Response>  |
// | get_orders   | GET /order/{user_id}                      | ApiResult<Response>  |
// | get_book     | GET /book/{market}                        | ApiResult<Response>  |
// | best_bid     | GET /book/{market}/bestbid                | ApiResult<Response>  |
// | best_ask     | GET /book/{market}/bestask                | ApiResult<Response>  |
// | get_trades   | GET /trades/{market}                      | ApiResult<Response>  |
//--------------------------------------------------------------------------------------------------

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{
    ApiError, ApiResult, AppState, BestQuoteResponse, MessageResponse, OrderbookResponse,
    PlaceOrderRequest, PlaceOrderResponse, TradeResponse, UserOrdersResponse,
};

pub async fn place_order(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<PlaceOrderRequest>,
) -> ApiResult<Response> {
    if req.size <= 0.0 {
        return Err(ApiError::BadRequest("Size must be positive".to_string()));
    }

    let order_id = match req.order_type.as_str() {
        "LIMIT" => state
            .exchange
            .place_limit(&req.market, req.user_id, req.side(), req.size, req.price)?,
        "MARKET" => {
            let (id, _matches) =
                state
                    .exchange
                    .place_market(&req.market, req.user_id, req.side(), req.size)?;
            id
        }
        other => {
            return Err(ApiError::BadRequest(format!(
                "unknown order type {other}"
            )))
        }
    };

    Ok((StatusCode::OK, Json(PlaceOrderResponse { order_id })).into_response())
}

pub async fn cancel_order(
    Extension(state): Extension<Arc<AppState>>,
    Path(order_id): Path<u64>,
) -> ApiResult<Response> {
    state.exchange.cancel(order_id)?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            msg: "order deleted".to_string(),
        }),
    )
        .into_response())
}

pub async fn get_orders(
    Extension(state): Extension<Arc<AppState>>,
    Path(user_id): Path<u64>,
) -> ApiResult<Response> {
    // A user's orders may live on any market; since the wire contract is per-user rather than
    // per-market, results across every registered market are merged.
    let mut asks = Vec::new();
    let mut bids = Vec::new();
    for orders in state.exchange.get_orders(user_id).into_values() {
        let resp = UserOrdersResponse::from(orders);
        asks.extend(resp.asks);
        bids.extend(resp.bids);
    }

    Ok((StatusCode::OK, Json(UserOrdersResponse { asks, bids })).into_response())
}

pub async fn get_book(
    Extension(state): Extension<Arc<AppState>>,
    Path(market): Path<String>,
) -> ApiResult<Response> {
    let snapshot = state.exchange.book_snapshot(&market)?;
    Ok((StatusCode::OK, Json(OrderbookResponse::from(snapshot))).into_response())
}

pub async fn best_bid(
    Extension(state): Extension<Arc<AppState>>,
    Path(market): Path<String>,
) -> ApiResult<Response> {
    let quote = state.exchange.best_bid(&market)?;
    Ok((StatusCode::OK, Json(BestQuoteResponse::from_option(quote))).into_response())
}

pub async fn best_ask(
    Extension(state): Extension<Arc<AppState>>,
    Path(market): Path<String>,
) -> ApiResult<Response> {
    let quote = state.exchange.best_ask(&market)?;
    Ok((StatusCode::OK, Json(BestQuoteResponse::from_option(quote))).into_response())
}

pub async fn get_trades(
    Extension(state): Extension<Arc<AppState>>,
    Path(market): Path<String>,
) -> ApiResult<Response> {
    let trades = state.exchange.get_trades(&market)?;
    let response: Vec<TradeResponse> = trades.iter().map(TradeResponse::from).collect();
    Ok((StatusCode::OK, Json(response)).into_response())
}
