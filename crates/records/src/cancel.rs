//! Order cancellation tickets and cancelled orders.

use crate::{decode_resolved, fields, Packed, RecordError, Reference, ServerOrder, Signature};
use packlog_codec::resolve::Resolve;
use packlog_types::{Address, FieldType, Record, Schema, Value, SIGNATURE_LENGTH};
use serde::{Deserialize, Serialize};
use std::{sync::LazyLock, time::Duration};

static CANCEL_DATA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .with("have_id", FieldType::Number)
        .with("have_amount", FieldType::Uint)
        .with("order_proxy", FieldType::Address)
        .with("user", FieldType::Address)
});

static SIGNED_CANCEL: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .with("data", FieldType::Object(CancelData::schema().clone()))
        .with(
            "signature",
            FieldType::Base64 {
                size: SIGNATURE_LENGTH,
            },
        )
});

static CANCELLED_ORDER: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .with("order", FieldType::Hash(ServerOrder::schema().clone()))
        .with("cancelOn", FieldType::Number)
        .with("cancelTicket", FieldType::Object(SignedCancel::schema().clone()))
        .with("proxyAddress", FieldType::Address)
});

/// A user's request to cancel an order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelData {
    /// Asset offered by the order.
    pub have_id: u64,
    /// Amount offered by the order.
    pub have_amount: u64,
    /// Address of the order's proxy.
    pub order_proxy: Address,
    /// The user cancelling.
    pub user: Address,
}

/// A cancellation signed by its user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedCancel {
    /// The cancellation.
    pub data: CancelData,
    /// Signature over the encoded cancellation.
    pub signature: Signature,
}

/// A server order removed from the book by a signed cancellation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledOrder {
    /// The cancelled order.
    pub order: Reference<ServerOrder>,
    /// Unix time of the cancellation.
    pub cancel_on: u64,
    /// The user's signed request.
    pub cancel_ticket: SignedCancel,
    /// Address of the proxy holding the user's funds.
    pub proxy_address: Address,
}

impl Packed for CancelData {
    fn schema() -> &'static Schema {
        &CANCEL_DATA
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("have_id", Value::Number(self.have_id))
            .with("have_amount", Value::Uint(self.have_amount))
            .with("order_proxy", self.order_proxy)
            .with("user", self.user)
    }

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            have_id: fields::number(record, "have_id")?,
            have_amount: fields::uint(record, "have_amount")?,
            order_proxy: fields::address(record, "order_proxy")?,
            user: fields::address(record, "user")?,
        })
    }
}

impl Packed for SignedCancel {
    fn schema() -> &'static Schema {
        &SIGNED_CANCEL
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

impl Packed for CancelledOrder {
    fn schema() -> &'static Schema {
        &CANCELLED_ORDER
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("order", self.order.to_value())
            .with("cancelOn", Value::Number(self.cancel_on))
            .with("cancelTicket", self.cancel_ticket.to_record())
            .with("proxyAddress", self.proxy_address)
    }

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            order: fields::reference(record, "order")?,
            cancel_on: fields::number(record, "cancelOn")?,
            cancel_ticket: fields::object(record, "cancelTicket")?,
            proxy_address: fields::address(record, "proxyAddress")?,
        })
    }
}

/// Decode a cancelled order, resolving the cancelled server order through
/// `resolver`.
///
/// Fails with [`RecordError::Unresolved`] if the order cannot be found.
pub async fn decode_cancelled_order<R: Resolve>(
    bytes: &[u8],
    self_described: bool,
    resolver: &R,
    timeout: Option<Duration>,
) -> Result<CancelledOrder, RecordError> {
    decode_resolved(bytes, self_described, resolver, timeout).await
}
