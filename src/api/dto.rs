//--------------------------------------------------------------------------------------------------
// STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name               | Description                               | Key Methods      |
// |--------------------|-------------------------------------------|------------------|
// | PlaceOrderRequest  | Body of POST /order                       | into_side        |
// | OrderResponse      | Wire shape for a single resting order     | from OrderView   |
// | OrderbookResponse  | Wire shape for GET /book/{market}         | from BookSnapshot|
// | BestQuoteResponse  | Wire shape for bestbid/bestask             | from BestQuote   |
// | TradeResponse      | Wire shape for a single trade              | from Trade       |
//--------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::matching_engine::{BestQuote, BookSnapshot, OrderView, UserOrders};
use crate::types::{Side, Trade};

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(rename = "UserID")]
    pub user_id: u64,
    #[serde(rename = "Type")]
    pub order_type: String,
    #[serde(rename = "Bid")]
    pub bid: bool,
    #[serde(rename = "Size")]
    pub size: f64,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Market")]
    pub market: String,
}

impl PlaceOrderRequest {
    pub fn side(&self) -> Side {
        if self.bid {
            Side::Bid
        } else {
            Side::Ask
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaceOrderResponse {
    #[serde(rename = "OrderID")]
    pub order_id: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    #[serde(rename = "UserID")]
    pub user_id: u64,
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Size")]
    pub size: f64,
    #[serde(rename = "Bid")]
    pub bid: bool,
    #[serde(rename = "Timestamp")]
    pub timestamp: i64,
}

impl From<&OrderView> for OrderResponse {
    fn from(order: &OrderView) -> Self {
        Self {
            user_id: order.user_id,
            id: order.id,
            price: order.price,
            size: order.size,
            bid: order.side == Side::Bid,
            timestamp: order.timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderbookResponse {
    #[serde(rename = "TotalBidVolume")]
    pub total_bid_volume: f64,
    #[serde(rename = "TotalAskVolume")]
    pub total_ask_volume: f64,
    #[serde(rename = "Asks")]
    pub asks: Vec<OrderResponse>,
    #[serde(rename = "Bids")]
    pub bids: Vec<OrderResponse>,
}

impl From<BookSnapshot> for OrderbookResponse {
    fn from(snapshot: BookSnapshot) -> Self {
        Self {
            total_bid_volume: snapshot.total_bid_volume,
            total_ask_volume: snapshot.total_ask_volume,
            asks: snapshot.asks.iter().map(OrderResponse::from).collect(),
            bids: snapshot.bids.iter().map(OrderResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserOrdersResponse {
    #[serde(rename = "Asks")]
    pub asks: Vec<OrderResponse>,
    #[serde(rename = "Bids")]
    pub bids: Vec<OrderResponse>,
}

impl From<UserOrders> for UserOrdersResponse {
    fn from(orders: UserOrders) -> Self {
        Self {
            asks: orders.asks.iter().map(OrderResponse::from).collect(),
            bids: orders.bids.iter().map(OrderResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BestQuoteResponse {
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "UserID")]
    pub user_id: u64,
}

impl From<BestQuote> for BestQuoteResponse {
    fn from(quote: BestQuote) -> Self {
        Self {
            price: quote.price,
            user_id: quote.user_id,
        }
    }
}

impl BestQuoteResponse {
    /// A zeroed `{Price:0, UserID:0}` when the side is empty, matching
    /// `original_source/server/exchange.go`'s zero-valued `Order` response rather than `null` —
    /// downstream drivers read both fields off this response unconditionally.
    pub fn from_option(quote: Option<BestQuote>) -> Self {
        quote.map(Self::from).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TradeResponse {
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Size")]
    pub size: f64,
    #[serde(rename = "BidUserID")]
    pub bid_user_id: u64,
    #[serde(rename = "AskUserID")]
    pub ask_user_id: u64,
    #[serde(rename = "Timestamp")]
    pub timestamp: i64,
}

impl From<&Trade> for TradeResponse {
    fn from(trade: &Trade) -> Self {
        Self {
            price: trade.price,
            size: trade.size,
            bid_user_id: trade.bid_user_id,
            ask_user_id: trade.ask_user_id,
            timestamp: trade.timestamp,
        }
    }
}
