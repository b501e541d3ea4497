//! # Marketplace Scenarios
//!
//! Product and order lifecycle end to end, checked through the query
//! surface the way a client would see it.

#[cfg(test)]
mod tests {
    use crate::fixtures::{parse, Harness, T0, T0_RENDERED};
    use ml_marketplace::prelude::*;
    use serde_json::json;

    // =========================================================================
    // PRODUCT LIFECYCLE
    // =========================================================================

    #[test]
    fn test_create_then_query_product() {
        let mut h = Harness::new();
        assert!(h.ok("createProduct", &["Widget", "A widget", "100", "10"]).is_empty());

        let product: Product = serde_json::from_slice(&h.ok("queryAsset", &["Product1"])).unwrap();
        assert_eq!(product, Product::new("Product1", "Widget", "A widget", 100, 10));
        assert_eq!(h.document("ProductCounterNO"), json!({"counter": 1}));
    }

    #[test]
    fn test_product_ids_follow_counter() {
        let mut h = Harness::new();
        for i in 1..=5 {
            h.ok("createProduct", &["Item", "Thing", "1", "1"]);
            assert_eq!(h.document(&format!("Product{i}"))["Product_Id"], json!(format!("Product{i}")));
        }
        assert_eq!(h.document("ProductCounterNO"), json!({"counter": 5}));
    }

    #[test]
    fn test_update_product_then_history() {
        let mut h = Harness::new();
        h.ok("createProduct", &["Widget", "A widget", "100", "10"]);
        h.ok("updateProduct", &["", "Product1", "Widget", "Now blue", "120", "12"]);

        let history = parse(&h.ok("getHistoryForRecord", &["Product1"]));
        let entries = history.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["Value"]["Product_Description"], json!("Now blue"));
        assert_eq!(entries[1]["Value"]["Product_Description"], json!("A widget"));
        assert_eq!(entries[0]["TxId"], json!("tx3"));
        assert_eq!(entries[1]["TxId"], json!("tx2"));
    }

    #[test]
    fn test_update_unknown_product() {
        let mut h = Harness::new();
        let response = h.invoke("updateProduct", &["", "Product3", "W", "D", "1", "1"]);
        assert_eq!(response.error_kind, Some(ErrorKind::NotFound));
        assert_eq!(response.message, "cannot find asset: Product3");
    }

    // =========================================================================
    // ORDER LIFECYCLE
    // =========================================================================

    #[test]
    fn test_order_scenario() {
        let mut h = Harness::new();
        h.ok("createProduct", &["Widget", "A widget", "100", "10"]);
        h.ok("createOrder", &["Alice", "Product1", "4"]);

        assert_eq!(h.document("Product1")["Product_Quantity"], json!(6));
        assert_eq!(
            h.document("Order1"),
            json!({
                "Order_Id": "Order1",
                "Order_Receiver": "Alice",
                "Order_ProductId": "Product1",
                "Order_Quantity": 4,
                "Order_Status": "PLACED",
                "Order_CreationDate": T0_RENDERED
            })
        );

        h.ok("updateOrderStatus", &["Order1", "SHIPPED"]);
        let shipped = h.document("Order1");
        assert_eq!(shipped["Order_Status"], json!("SHIPPED"));
        assert_eq!(shipped["Order_Quantity"], json!(4));
        assert_eq!(shipped["Order_CreationDate"], json!(T0_RENDERED));
    }

    #[test]
    fn test_query_all_after_scenario() {
        let mut h = Harness::new();
        h.ok("createProduct", &["Widget", "A widget", "100", "10"]);
        h.ok("createOrder", &["Alice", "Product1", "4"]);

        let all = parse(&h.ok("queryAllAsset", &[]));
        let entries = all.as_array().unwrap();
        let keys: Vec<&str> = entries.iter().map(|e| e["Key"].as_str().unwrap()).collect();
        assert_eq!(keys, vec!["Order1", "OrderCounterNO", "Product1", "ProductCounterNO"]);
        for entry in entries {
            assert!(entry.get("Record").is_some());
            assert_eq!(entry.as_object().unwrap().len(), 2);
        }
        assert_eq!(entries[1]["Record"], json!({"counter": 1}));
    }

    #[test]
    fn test_history_after_order() {
        let mut h = Harness::new();
        h.ok("createProduct", &["Widget", "A widget", "100", "10"]);
        h.ok("createOrder", &["Alice", "Product1", "4"]);

        let history = parse(&h.ok("getHistoryForRecord", &["Product1"]));
        let entries = history.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["Value"]["Product_Quantity"], json!(6));
        assert_eq!(entries[1]["Value"]["Product_Quantity"], json!(10));
        for entry in entries {
            assert_eq!(entry["IsDelete"], json!("false"));
            assert_eq!(entry["Timestamp"], json!(T0_RENDERED));
        }
    }

    #[test]
    fn test_over_order_is_rejected_without_writes() {
        let mut h = Harness::new();
        h.ok("createProduct", &["Widget", "A widget", "100", "3"]);
        let before = h.ledger.committed("Product1").unwrap();

        let response = h.invoke("createOrder", &["Alice", "Product1", "4"]);
        assert_eq!(response.error_kind, Some(ErrorKind::InsufficientInventory));
        assert_eq!(h.ledger.committed("Product1").unwrap(), before);
        assert!(h.ledger.committed("Order1").is_none());
        assert_eq!(h.document("OrderCounterNO"), json!({"counter": 0}));
    }

    #[test]
    fn test_orders_drain_stock_exactly() {
        let mut h = Harness::new();
        h.ok("createProduct", &["Widget", "A widget", "100", "5"]);
        h.ok("createOrder", &["Alice", "Product1", "2"]);
        h.ok("createOrder", &["Bob", "Product1", "3"]);

        assert_eq!(h.document("Product1")["Product_Quantity"], json!(0));
        assert_eq!(h.document("Order2")["Order_Receiver"], json!("Bob"));

        let response = h.invoke("createOrder", &["Carol", "Product1", "1"]);
        assert_eq!(response.error_kind, Some(ErrorKind::InsufficientInventory));
    }

    #[test]
    fn test_order_without_timestamp_is_fatal() {
        let mut h = Harness::new();
        h.ok("createProduct", &["Widget", "A widget", "100", "5"]);

        let mut ctx = h.ledger.begin_without_timestamp("tx-no-clock");
        let response = h.chaincode.invoke(&mut ctx, "createOrder", &crate::fixtures::strings(&["Alice", "Product1", "1"]));
        assert_eq!(response.error_kind, Some(ErrorKind::Timestamp));
        drop(ctx);
        assert_eq!(h.document("Product1")["Product_Quantity"], json!(5));
    }

    #[test]
    fn test_status_lifecycle_strict() {
        let mut h = Harness::new();
        h.ok("createProduct", &["Widget", "A widget", "100", "5"]);
        h.ok("createOrder", &["Alice", "Product1", "1"]);
        h.ok("createOrder", &["Bob", "Product1", "1"]);

        h.ok("updateOrderStatus", &["Order1", "SHIPPED"]);
        h.ok("updateOrderStatus", &["Order1", "DELIVERED"]);
        h.ok("updateOrderStatus", &["Order2", "CANCELLED"]);

        for (order, status) in [("Order1", "SHIPPED"), ("Order2", "SHIPPED"), ("Order1", "PLACED")] {
            let response = h.invoke("updateOrderStatus", &[order, status]);
            assert_eq!(response.error_kind, Some(ErrorKind::Validation), "{order} -> {status}");
        }
    }

    #[test]
    fn test_status_free_form_when_permissive() {
        let mut h = Harness::with_config(ChaincodeConfig::permissive());
        h.ok("createProduct", &["Widget", "A widget", "100", "5"]);
        h.ok("createOrder", &["Alice", "Product1", "1"]);
        h.ok("updateOrderStatus", &["Order1", "IN_TRANSIT"]);

        let order: Order = serde_json::from_slice(&h.ok("queryAsset", &["Order1"])).unwrap();
        assert_eq!(order.status, OrderStatus::Other("IN_TRANSIT".to_string()));
    }

    // =========================================================================
    // QUERY SURFACE
    // =========================================================================

    #[test]
    fn test_selector_query() {
        let mut h = Harness::new();
        h.ok("createProduct", &["Widget", "A widget", "100", "5"]);
        h.ok("createOrder", &["Alice", "Product1", "1"]);
        h.ok("createOrder", &["Bob", "Product1", "1"]);
        h.ok("updateOrderStatus", &["Order2", "SHIPPED"]);

        let placed = parse(&h.ok("query", &[r#"{"selector":{"Order_Status":"PLACED"}}"#]));
        assert_eq!(placed.as_array().unwrap().len(), 1);
        assert_eq!(placed[0]["Order_Receiver"], json!("Alice"));

        let response = h.invoke("query", &[r#"{"selector":{"Order_Quantity":{"$gt":0}}}"#]);
        assert_eq!(response.error_kind, Some(ErrorKind::Ledger));
        assert_eq!(h.ledger.open_cursors(), 0);
    }

    #[test]
    fn test_unknown_function() {
        let mut h = Harness::new();
        let response = h.invoke("transferProduct", &["Product1"]);
        assert_eq!(response.status, Response::ERROR);
        assert_eq!(response.error_kind, Some(ErrorKind::UnknownOperation));
    }

    #[test]
    fn test_stats_track_outcomes() {
        let mut h = Harness::new();
        h.ok("createProduct", &["Widget", "A widget", "100", "1"]);
        h.invoke("createOrder", &["Alice", "Product1", "2"]);
        h.invoke("queryAsset", &["Product9"]);

        let stats = h.chaincode.stats();
        assert_eq!(stats.invocations, 3);
        assert_eq!(stats.successful, 1);
        assert_eq!(stats.rejected, 2);
    }

    #[test]
    fn test_timestamp_fraction_rendering() {
        let mut h = Harness::new();
        h.ok("createProduct", &["Widget", "A widget", "100", "5"]);

        let mut ctx = h.ledger.begin("tx-frac", TxTimestamp::new(T0.seconds, 120_000_000));
        let response = h.chaincode.invoke(&mut ctx, "createOrder", &crate::fixtures::strings(&["Alice", "Product1", "1"]));
        assert!(response.is_ok());
        h.ledger.commit(ctx).unwrap();
        assert_eq!(
            h.document("Order1")["Order_CreationDate"],
            json!("2023-11-14 22:13:20.12 +0000 UTC")
        );
    }
}
