//! Property-based tests for order evaluation
//!
//! The fulfilment check and the minimum-cost computation stop at different
//! points, but must agree on which orders can be served.

use apparel_core::{
    ApparelSize, Dataset, InventoryRecord, InventoryService, MemoryStore, OrderLine, RecordId,
    UserId,
};
use proptest::prelude::*;
use std::sync::Arc;

// ===== Helpers =====

fn arbitrary_size() -> impl Strategy<Value = ApparelSize> {
    prop::sample::select(ApparelSize::ALL.to_vec())
}

fn arbitrary_stock() -> impl Strategy<Value = Vec<InventoryRecord>> {
    prop::collection::vec(
        ("P[0-3]", arbitrary_size(), 0u32..20, 0u32..10_000),
        0..12,
    )
    .prop_map(|rows| {
        let mut records: Vec<InventoryRecord> = Vec::new();
        for (code, size, quantity, cents) in rows {
            // Stock never holds two records for one code/size pair
            if records.iter().any(|r| r.matches(&code, size)) {
                continue;
            }
            records.push(InventoryRecord {
                id: RecordId::generate(),
                title: format!("Item {}", code),
                description: None,
                code,
                size,
                quantity,
                price: f64::from(cents) / 100.0,
                vendor_id: UserId::new("vendor"),
                edited_by: None,
            });
        }
        records
    })
}

fn arbitrary_order() -> impl Strategy<Value = Vec<OrderLine>> {
    prop::collection::vec(
        ("P[0-4]", arbitrary_size(), 0u32..25).prop_map(|(code, size, quantity)| OrderLine {
            code,
            size,
            quantity,
        }),
        0..8,
    )
}

fn evaluate(stock: Vec<InventoryRecord>, order: &[OrderLine]) -> (bool, Option<f64>) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(async {
        let store = Arc::new(MemoryStore::with_data(Dataset {
            users: Vec::new(),
            inventory: stock,
        }));
        let inventory = InventoryService::new(store);
        let fulfillable = inventory.check_fulfilment(order).await.unwrap();
        let cost = inventory.minimum_cost(order).await.ok();
        (fulfillable, cost)
    })
}

// ===== Property Tests =====

proptest! {
    /// Property: an order has a price exactly when it can be fulfilled
    #[test]
    fn cost_exists_iff_fulfillable(stock in arbitrary_stock(), order in arbitrary_order()) {
        let (fulfillable, cost) = evaluate(stock, &order);
        prop_assert_eq!(fulfillable, cost.is_some());
    }

    /// Property: the price of a fulfillable order is never negative
    #[test]
    fn cost_is_never_negative(stock in arbitrary_stock(), order in arbitrary_order()) {
        let (_, cost) = evaluate(stock, &order);
        if let Some(total) = cost {
            prop_assert!(total >= 0.0);
        }
    }
}
