//! Orders as submitted by users and as accepted by the server.

use crate::{fields, Packed, RecordError, Signature};
use packlog_types::{Address, FieldType, Price, Record, Schema, Value, SIGNATURE_LENGTH};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;


static ORDER_DATA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .with("user", FieldType::Address)
        .with("have_id", FieldType::Number)
        .with("want_id", FieldType::Number)
        .with("have_amount", FieldType::Uint)
        .with("want_amount", FieldType::Uint)
        .with("expiresOn", FieldType::Number)
        .with("createdOn", FieldType::Number)
});

static SIGNED_ORDER: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .with("data", FieldType::Object(OrderData::schema().clone()))
        .with(
            "signature",
            FieldType::Base64 {
                size: SIGNATURE_LENGTH,
            },
        )
});

static SERVER_ORDER: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .with("userOrder", FieldType::Object(SignedOrder::schema().clone()))
        .with("isBuy", FieldType::Boolean)
        .with("baseId", FieldType::Number)
        .with("quoteId", FieldType::Number)
        .with("price", FieldType::Price)
        .with("amount", FieldType::Uint)
        .with("makerFees", FieldType::Price)
        .with("takerFees", FieldType::Price)
        .with("isMarket", FieldType::Boolean)
        .with("addedOn", FieldType::Number)
        .with("proxyAddress", FieldType::Address)
});

/// An order as created by a user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderData {
    /// The user placing the order.
    pub user: Address,
    /// Asset offered.
    pub have_id: u64,
    /// Asset wanted.
    pub want_id: u64,
    /// Amount offered.
    pub have_amount: u64,
    /// Amount wanted.
    pub want_amount: u64,
    /// Unix time after which the order is void.
    #[serde(rename = "expiresOn")]
    pub expires_on: u64,
    /// Unix time the user created the order, as reported by the user.
    #[serde(rename = "createdOn")]
    pub created_on: u64,
}

/// An order signed by its user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedOrder {
    /// The order.
    pub data: OrderData,
    /// Signature over the encoded order.
    pub signature: Signature,
}

/// An order accepted by the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerOrder {
    /// The order as signed by the user.
    pub user_order: SignedOrder,
    /// Whether the order buys the base asset.
    pub is_buy: bool,
    /// Base asset of the market.
    pub base_id: u64,
    /// Quote asset of the market.
    pub quote_id: u64,
    /// Limit price.
    pub price: Price,
    /// Amount of the base asset.
    pub amount: u64,
    /// Fee rate when the order adds liquidity.
    pub maker_fees: Price,
    /// Fee rate when the order takes liquidity.
    pub taker_fees: Price,
    /// Whether the order is a market order.
    pub is_market: bool,
    /// Unix time the server accepted the order.
    pub added_on: u64,
    /// Address of the proxy holding the user's funds.
    pub proxy_address: Address,
}

impl Packed for OrderData {
    fn schema() -> &'static Schema {
        &ORDER_DATA
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("user", self.user)
            .with("have_id", Value::Number(self.have_id))
            .with("want_id", Value::Number(self.want_id))
            .with("have_amount", Value::Uint(self.have_amount))
            .with("want_amount", Value::Uint(self.want_amount))
            .with("expiresOn", Value::Number(self.expires_on))
            .with("createdOn", Value::Number(self.created_on))
    }

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            user: fields::address(record, "user")?,
            have_id: fields::number(record, "have_id")?,
            want_id: fields::number(record, "want_id")?,
            have_amount: fields::uint(record, "have_amount")?,
            want_amount: fields::uint(record, "want_amount")?,
            expires_on: fields::number(record, "expiresOn")?,
            created_on: fields::number(record, "createdOn")?,
        })
    }
}

impl Packed for SignedOrder {
    fn schema() -> &'static Schema {
        &SIGNED_ORDER
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("data", self.data.to_record())
            .with("signature", Value::Base64(self.signature.to_string()))
    }

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            data: fields::object(record, "data")?,
            signature: fields::signature(record, "signature")?,
        })
    }
}

impl Packed for ServerOrder {
    fn schema() -> &'static Schema {
        &SERVER_ORDER
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("userOrder", self.user_order.to_record())
            .with("isBuy", self.is_buy)
            .with("baseId", Value::Number(self.base_id))
            .with("quoteId", Value::Number(self.quote_id))
            .with("price", self.price)
            .with("amount", Value::Uint(self.amount))
            .with("makerFees", self.maker_fees)
            .with("takerFees", self.taker_fees)
            .with("isMarket", self.is_market)
            .with("addedOn", Value::Number(self.added_on))
            .with("proxyAddress", self.proxy_address)
    }

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            user_order: fields::object(record, "userOrder")?,
            is_buy: fields::boolean(record, "isBuy")?,
            base_id: fields::number(record, "baseId")?,
            quote_id: fields::number(record, "quoteId")?,
            price: fields::price(record, "price")?,
            amount: fields::uint(record, "amount")?,
            maker_fees: fields::price(record, "makerFees")?,
            taker_fees: fields::price(record, "takerFees")?,
            is_market: fields::boolean(record, "isMarket")?,
            added_on: fields::number(record, "addedOn")?,
            proxy_address: fields::address(record, "proxyAddress")?,
        })
    }
}
