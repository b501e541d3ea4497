//! # MVCC Conflicts and Retry
//!
//! Concurrent invocations read the same committed snapshot. The ledger
//! rejects every transaction whose reads went stale; a retry re-runs the
//! whole invocation against fresh state.

#[cfg(test)]
mod tests {
    use crate::fixtures::{strings, Harness, T0};
    use ml_marketplace::prelude::*;
    use serde_json::json;
    use std::thread;

    #[test]
    fn test_concurrent_creates_conflict_on_counter() {
        let h = Harness::new();
        let args = strings(&["Widget", "A widget", "100", "10"]);

        let mut first = h.ledger.begin("first", T0);
        let mut second = h.ledger.begin("second", T0);
        assert!(h.chaincode.invoke(&mut first, "createProduct", &args).is_ok());
        assert!(h.chaincode.invoke(&mut second, "createProduct", &args).is_ok());
        assert_eq!(second.pending_writes(), vec!["Product1", "ProductCounterNO"]);

        h.ledger.commit(first).unwrap();
        let err = h.ledger.commit(second).unwrap_err();
        assert!(matches!(err, StubError::MvccConflict { ref key, .. } if key == "ProductCounterNO" || key == "Product1"));

        // Retry sees the advanced counter.
        let mut retry = h.ledger.begin("second-retry", T0);
        assert!(h.chaincode.invoke(&mut retry, "createProduct", &args).is_ok());
        h.ledger.commit(retry).unwrap();

        assert_eq!(h.document("Product2")["Product_Id"], json!("Product2"));
        assert_eq!(h.document("ProductCounterNO"), json!({"counter": 2}));
    }

    #[test]
    fn test_retry_reevaluates_inventory() {
        let mut h = Harness::new();
        h.ok("createProduct", &["Widget", "A widget", "100", "5"]);
        let args = strings(&["Alice", "Product1", "3"]);

        let mut first = h.ledger.begin("first", T0);
        let mut second = h.ledger.begin("second", T0);
        assert!(h.chaincode.invoke(&mut first, "createOrder", &args).is_ok());
        assert!(h.chaincode.invoke(&mut second, "createOrder", &args).is_ok());

        h.ledger.commit(first).unwrap();
        assert!(h.ledger.commit(second).is_err());

        let mut retry = h.ledger.begin("second-retry", T0);
        let response = h.chaincode.invoke(&mut retry, "createOrder", &args);
        assert_eq!(response.error_kind, Some(ErrorKind::InsufficientInventory));
        drop(retry);

        assert_eq!(h.document("Product1")["Product_Quantity"], json!(2));
        assert!(h.ledger.committed("Order2").is_none());
    }

    #[test]
    fn test_status_update_conflicts_with_concurrent_update() {
        let mut h = Harness::new();
        h.ok("createProduct", &["Widget", "A widget", "100", "5"]);
        h.ok("createOrder", &["Alice", "Product1", "1"]);

        let mut ship = h.ledger.begin("ship", T0);
        let mut cancel = h.ledger.begin("cancel", T0);
        assert!(h.chaincode.invoke(&mut ship, "updateOrderStatus", &strings(&["Order1", "SHIPPED"])).is_ok());
        assert!(h.chaincode.invoke(&mut cancel, "updateOrderStatus", &strings(&["Order1", "CANCELLED"])).is_ok());

        h.ledger.commit(ship).unwrap();
        assert!(matches!(
            h.ledger.commit(cancel),
            Err(StubError::MvccConflict { .. })
        ));

        // Against fresh state the cancel is no longer a legal transition.
        let response = h.invoke("updateOrderStatus", &["Order1", "CANCELLED"]);
        assert_eq!(response.error_kind, Some(ErrorKind::Validation));
        assert_eq!(h.document("Order1")["Order_Status"], json!("SHIPPED"));
    }

    #[test]
    fn test_parallel_creates_with_retry_allocate_unique_ids() {
        const WORKERS: usize = 8;
        let h = Harness::new();

        thread::scope(|s| {
            for worker in 0..WORKERS {
                let h = &h;
                s.spawn(move || {
                    let name = format!("Item{worker}");
                    let args = strings(&[name.as_str(), "Thing", "1", "1"]);
                    for attempt in 0.. {
                        let mut ctx = h.ledger.begin(format!("w{worker}-a{attempt}"), T0);
                        let response = h.chaincode.invoke(&mut ctx, "createProduct", &args);
                        assert!(response.is_ok(), "{}", response.message);
                        match h.ledger.commit(ctx) {
                            Ok(_) => break,
                            Err(StubError::MvccConflict { .. }) => {
                                tracing::debug!(worker, attempt, "Retrying after conflict");
                            }
                            Err(e) => panic!("unexpected commit error: {e}"),
                        }
                    }
                });
            }
        });

        assert_eq!(h.document("ProductCounterNO"), json!({"counter": WORKERS}));
        let mut names: Vec<String> = (1..=WORKERS)
            .map(|i| {
                h.document(&format!("Product{i}"))["Product_Name"]
                    .as_str()
                    .unwrap()
                    .to_string()
            })
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), WORKERS);
        assert!(h.ledger.committed(&format!("Product{}", WORKERS + 1)).is_none());
    }

    #[test]
    fn test_read_only_invocations_do_not_conflict() {
        let mut h = Harness::new();
        h.ok("createProduct", &["Widget", "A widget", "100", "5"]);

        let mut reader = h.ledger.begin("reader", T0);
        let response = h.chaincode.invoke(&mut reader, "queryAllAsset", &[]);
        assert!(response.is_ok());
        assert_eq!(h.ledger.commit(reader).unwrap(), 0);
    }
}
