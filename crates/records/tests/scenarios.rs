use packlog_codec::resolve::Unresolvable;
use packlog_log::AuditLog;
use packlog_records::{
    decode_cancelled_order, decode_match, CancelData, CancelledOrder, Match, OrderData, Packed,
    Reference, ServerOrder, SignedCancel, SignedOrder, Signature,
};
use packlog_types::{Address, Price};

fn server_order(user: u8, is_buy: bool) -> ServerOrder {
    ServerOrder {
        user_order: SignedOrder {
            data: OrderData {
                user: Address([user; 32]),
                have_id: if is_buy { 2 } else { 1 },
                want_id: if is_buy { 1 } else { 2 },
                have_amount: 100,
                want_amount: 50,
                expires_on: 1_700_000_000,
                created_on: 1_699_999_000,
            },
            signature: Signature([user; 64]),
        },
        is_buy,
        base_id: 1,
        quote_id: 2,
        price: Price::from(2u64 << 40),
        amount: 50,
        maker_fees: Price::from(1u64),
        taker_fees: Price::from(2u64),
        is_market: false,
        added_on: 1_699_999_500,
        proxy_address: Address([user ^ 0xff; 32]),
    }
}

fn trade(buy: &ServerOrder, sell: &ServerOrder) -> Match {
    Match {
        buy_order: Reference::from(buy.clone()),
        sell_order: Reference::from(sell.clone()),
        match_buy_amount: 50,
        match_sell_amount: 100,
        match_buy_fees: 1,
        match_sell_fees: 2,
        match_on: 1_700_000_001,
        match_price: Price::from(2u64 << 40),
        buy_order_first_match: true,
        buy_order_completed: true,
        sell_order_first_match: true,
        sell_order_completed: false,
    }
}

/// A log holding both orders, as the server would have appended them.
fn log_with(orders: &[&ServerOrder]) -> AuditLog {
    let log = AuditLog::new();
    for order in orders {
        log.append([order.encode_with_schema().unwrap()]);
    }
    log
}

#[tokio::test]
async fn match_without_resolver_is_unresolved() {
    let (buy, sell) = (server_order(1, true), server_order(2, false));
    let bytes = trade(&buy, &sell).encode().unwrap();

    let err = decode_match(&bytes, false, &Unresolvable, None)
        .await
        .unwrap_err();
    assert!(err.is_unresolved(), "{err}");

    // Plain decoding leaves the references as digests.
    let partial = Match::decode(&bytes).unwrap();
    assert_eq!(
        partial.buy_order,
        Reference::Digest(buy.content_digest().unwrap())
    );
    assert!(partial.sell_order.resolved().is_none());
}

#[tokio::test]
async fn match_resolves_through_log() {
    let (buy, sell) = (server_order(1, true), server_order(2, false));
    let log = log_with(&[&buy, &sell]);
    let expected = trade(&buy, &sell);
    let bytes = expected.encode().unwrap();

    let decoded = decode_match(&bytes, false, &log, None).await.unwrap();
    assert_eq!(decoded, expected);
    assert_eq!(decoded.buy_order.resolved(), Some(&buy));
    assert_eq!(decoded.sell_order.resolved(), Some(&sell));

    // The same holds for the self-described form stored in the log.
    log.append([expected.encode_with_schema().unwrap()]);
    let stored = log.get(2).unwrap();
    assert!(stored.verify(&log.root()));
    let decoded = decode_match(&stored.entry, true, &log, None).await.unwrap();
    assert_eq!(decoded, expected);
}

#[tokio::test]
async fn match_missing_one_order() {
    let (buy, sell) = (server_order(1, true), server_order(2, false));
    let log = log_with(&[&buy]);
    let bytes = trade(&buy, &sell).encode().unwrap();
    let err = decode_match(&bytes, false, &log, None).await.unwrap_err();
    assert!(
        matches!(err, packlog_records::RecordError::Unresolved { ref field, .. } if field == "sellOrder"),
        "{err}"
    );

    // Resolves once the order has been observed.
    log.append([sell.encode_with_schema().unwrap()]);
    assert!(decode_match(&bytes, false, &log, None).await.is_ok());
}

#[tokio::test]
async fn cancelled_order_resolves_through_log() {
    let order = server_order(3, true);
    let log = log_with(&[&order]);
    let cancelled = CancelledOrder {
        order: Reference::Digest(order.content_digest().unwrap()),
        cancel_on: 1_700_000_050,
        cancel_ticket: SignedCancel {
            data: CancelData {
                have_id: 2,
                have_amount: 100,
                order_proxy: order.proxy_address,
                user: order.user_order.data.user,
            },
            signature: Signature([9; 64]),
        },
        proxy_address: order.proxy_address,
    };
    let bytes = cancelled.encode_with_schema().unwrap();

    let decoded = decode_cancelled_order(&bytes, true, &log, None)
        .await
        .unwrap();
    assert_eq!(decoded.order.resolved(), Some(&order));
    assert_eq!(decoded.cancel_ticket, cancelled.cancel_ticket);
    assert_eq!(decoded.order.digest().unwrap(), cancelled.order.digest().unwrap());

    let err = decode_cancelled_order(&bytes, true, &AuditLog::new(), None)
        .await
        .unwrap_err();
    assert!(err.is_unresolved());
}

#[test]
fn digest_references_encode_like_resolved_ones() {
    let (buy, sell) = (server_order(1, true), server_order(2, false));
    let resolved = trade(&buy, &sell);
    let mut by_digest = resolved.clone();
    by_digest.buy_order = Reference::Digest(buy.content_digest().unwrap());
    by_digest.sell_order = Reference::Digest(sell.content_digest().unwrap());
    assert_eq!(resolved.encode().unwrap(), by_digest.encode().unwrap());
    assert_eq!(
        resolved.content_digest().unwrap(),
        by_digest.content_digest().unwrap()
    );
}

#[test]
fn order_scenario() {
    let order = OrderData {
        user: Address([0x11; 32]),
        have_id: 1,
        want_id: 2,
        have_amount: 100,
        want_amount: 50,
        expires_on: 1_700_000_000,
        created_on: 1_699_999_000,
    };
    let bytes = order.encode().unwrap();
    assert_eq!(OrderData::decode(&bytes).unwrap(), order);
    let bytes = order.encode_with_schema().unwrap();
    assert_eq!(OrderData::decode_self_described(&bytes).unwrap(), order);
}
