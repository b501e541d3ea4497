//! # Property Tests
//!
//! Random invocation sequences against one ledger, checking the stock and
//! counter invariants after every step.

#[cfg(test)]
mod tests {
    use crate::fixtures::Harness;
    use ml_marketplace::prelude::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[derive(Clone, Debug)]
    enum Step {
        CreateProduct { quantity: i64 },
        CreateOrder { product: u64, quantity: i64 },
        Restock { product: u64, quantity: i64 },
    }

    fn arb_step() -> impl Strategy<Value = Step> {
        prop_oneof![
            (0i64..20).prop_map(|quantity| Step::CreateProduct { quantity }),
            (1u64..4, -2i64..15).prop_map(|(product, quantity)| Step::CreateOrder { product, quantity }),
            (1u64..4, 0i64..20).prop_map(|(product, quantity)| Step::Restock { product, quantity }),
        ]
    }

    fn stock(h: &Harness, key: &str) -> Option<i64> {
        h.ledger
            .committed(key)
            .map(|_| h.document(key)["Product_Quantity"].as_i64().unwrap())
    }

    fn counter(h: &Harness, key: &str) -> u64 {
        h.document(key)["counter"].as_u64().unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn stock_never_negative_and_counters_match(steps in prop::collection::vec(arb_step(), 1..25)) {
            let mut h = Harness::new();
            let mut products = 0u64;
            let mut orders = 0u64;

            for step in steps {
                match step {
                    Step::CreateProduct { quantity } => {
                        let q = quantity.to_string();
                        let response = h.invoke("createProduct", &["P", "D", "1", q.as_str()]);
                        prop_assert!(response.is_ok());
                        products += 1;
                        prop_assert_eq!(h.document(&format!("Product{products}"))["Product_Quantity"].clone(), json!(quantity));
                    }
                    Step::CreateOrder { product, quantity } => {
                        let key = format!("Product{product}");
                        let before_bytes = h.ledger.committed(&key);
                        let before = stock(&h, &key);
                        let q = quantity.to_string();
                        let response = h.invoke("createOrder", &["R", key.as_str(), q.as_str()]);

                        match before {
                            _ if quantity < 1 => {
                                prop_assert_eq!(response.error_kind, Some(ErrorKind::Validation));
                            }
                            None => prop_assert_eq!(response.error_kind, Some(ErrorKind::NotFound)),
                            Some(available) if quantity > available => {
                                prop_assert_eq!(response.error_kind, Some(ErrorKind::InsufficientInventory));
                                prop_assert_eq!(h.ledger.committed(&key), before_bytes);
                            }
                            Some(available) => {
                                prop_assert!(response.is_ok());
                                orders += 1;
                                prop_assert_eq!(stock(&h, &key), Some(available - quantity));
                            }
                        }
                    }
                    Step::Restock { product, quantity } => {
                        let key = format!("Product{product}");
                        let q = quantity.to_string();
                        let response = h.invoke("updateProduct", &["", key.as_str(), "P", "D", "1", q.as_str()]);
                        prop_assert_eq!(response.is_ok(), product <= products);
                    }
                }

                for i in 1..=products {
                    let quantity = stock(&h, &format!("Product{i}")).unwrap();
                    prop_assert!(quantity >= 0);
                }
                prop_assert_eq!(counter(&h, "ProductCounterNO"), products);
                prop_assert_eq!(counter(&h, "OrderCounterNO"), orders);
            }
        }

        #[test]
        fn product_round_trips_through_query(
            name in "[A-Za-z][A-Za-z0-9 ]{0,15}",
            description in "[^\\x00-\\x1f]{1,24}",
            price in 0i64..1_000_000,
            quantity in 0i64..10_000,
        ) {
            let mut h = Harness::new();
            let price_arg = price.to_string();
            let quantity_arg = quantity.to_string();
            h.ok("createProduct", &[name.as_str(), description.as_str(), price_arg.as_str(), quantity_arg.as_str()]);

            let stored: Product = serde_json::from_slice(&h.ok("queryAsset", &["Product1"])).unwrap();
            prop_assert_eq!(stored, Product::new("Product1", name.as_str(), description.as_str(), price, quantity));
        }
    }
}
