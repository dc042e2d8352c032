//! Matches between a buy and a sell order.

use crate::{decode_resolved, fields, Packed, RecordError, Reference, ServerOrder};
use packlog_codec::resolve::Resolve;
use packlog_types::{FieldType, Price, Record, Schema, Value};
use serde::{Deserialize, Serialize};
use std::{sync::LazyLock, time::Duration};

static MATCH: LazyLock<Schema> = LazyLock::new(|| {
    let order = ServerOrder::schema();
    Schema::new()
        .with("buyOrder", FieldType::Hash(order.clone()))
        .with("sellOrder", FieldType::Hash(order.clone()))
        .with("matchBuyAmount", FieldType::Uint)
        .with("matchSellAmount", FieldType::Uint)
        .with("matchBuyFees", FieldType::Uint)
        .with("matchSellFees", FieldType::Uint)
        .with("matchOn", FieldType::Number)
        .with("matchPrice", FieldType::Price)
        .with("buyOrderFirstMatch", FieldType::Boolean)
        .with("buyOrderCompleted", FieldType::Boolean)
        .with("sellOrderFirstMatch", FieldType::Boolean)
        .with("sellOrderCompleted", FieldType::Boolean)
});

/// A trade between a buy and a sell order.
///
/// The orders are held by reference so the match stays the same size however
/// large the orders are.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// The buying order.
    pub buy_order: Reference<ServerOrder>,
    /// The selling order.
    pub sell_order: Reference<ServerOrder>,
    /// Amount the buyer receives.
    pub match_buy_amount: u64,
    /// Amount the seller receives.
    pub match_sell_amount: u64,
    /// Fees charged to the buyer.
    pub match_buy_fees: u64,
    /// Fees charged to the seller.
    pub match_sell_fees: u64,
    /// Unix time of the match.
    pub match_on: u64,
    /// Execution price.
    pub match_price: Price,
    /// Whether this is the buy order's first match.
    pub buy_order_first_match: bool,
    /// Whether this match fills the buy order.
    pub buy_order_completed: bool,
    /// Whether this is the sell order's first match.
    pub sell_order_first_match: bool,
    /// Whether this match fills the sell order.
    pub sell_order_completed: bool,
}

impl Packed for Match {
    fn schema() -> &'static Schema {
        &MATCH
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("buyOrder", self.buy_order.to_value())
            .with("sellOrder", self.sell_order.to_value())
            .with("matchBuyAmount", Value::Uint(self.match_buy_amount))
            .with("matchSellAmount", Value::Uint(self.match_sell_amount))
            .with("matchBuyFees", Value::Uint(self.match_buy_fees))
            .with("matchSellFees", Value::Uint(self.match_sell_fees))
            .with("matchOn", Value::Number(self.match_on))
            .with("matchPrice", self.match_price)
            .with("buyOrderFirstMatch", self.buy_order_first_match)
            .with("buyOrderCompleted", self.buy_order_completed)
            .with("sellOrderFirstMatch", self.sell_order_first_match)
            .with("sellOrderCompleted", self.sell_order_completed)
    }

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            buy_order: fields::reference(record, "buyOrder")?,
            sell_order: fields::reference(record, "sellOrder")?,
            match_buy_amount: fields::uint(record, "matchBuyAmount")?,
            match_sell_amount: fields::uint(record, "matchSellAmount")?,
            match_buy_fees: fields::uint(record, "matchBuyFees")?,
            match_sell_fees: fields::uint(record, "matchSellFees")?,
            match_on: fields::number(record, "matchOn")?,
            match_price: fields::price(record, "matchPrice")?,
            buy_order_first_match: fields::boolean(record, "buyOrderFirstMatch")?,
            buy_order_completed: fields::boolean(record, "buyOrderCompleted")?,
            sell_order_first_match: fields::boolean(record, "sellOrderFirstMatch")?,
            sell_order_completed: fields::boolean(record, "sellOrderCompleted")?,
        })
    }
}

/// Decode a match, resolving both orders through `resolver`.
///
/// Fails with [`RecordError::Unresolved`] if either order cannot be found.
pub async fn decode_match<R: Resolve>(
    bytes: &[u8],
    self_described: bool,
    resolver: &R,
    timeout: Option<Duration>,
) -> Result<Match, RecordError> {
    decode_resolved(bytes, self_described, resolver, timeout).await
}
