//! # Order Lifecycle
//!
//! `createOrder` and `updateOrderStatus`.
//!
//! Order creation writes two records, the decremented product and the new
//! order. Both land in the same write set, so they commit or fail together.

use crate::config::StatusPolicy;
use crate::domain::entities::{Order, Product};
use crate::domain::invariants::{
    check_inventory_invariant, check_order_creation_invariants,
    check_order_immutability_invariant,
};
use crate::domain::services::{parse_integer_at_least, require_args};
use crate::domain::value_objects::{AssetType, OrderStatus};
use crate::errors::ChaincodeError;
use crate::lifecycle::counter::CounterAllocator;
use crate::lifecycle::timestamp::transaction_time;
use crate::lifecycle::{require_record, store_record};
use crate::ports::outbound::ChaincodeStub;
use crate::COMPONENT_NAME;
use ml_telemetry::log_asset_event;
use tracing::warn;

/// `createOrder(receiver, productId, quantity)`
///
/// Checks stock, decrements the product, then allocates `Order<N+1>` with
/// status `PLACED` stamped with the transaction time. An over-request
/// fails before anything is written.
pub fn create_order<S: ChaincodeStub>(
    stub: &mut S,
    args: &[String],
) -> Result<Vec<u8>, ChaincodeError> {
    require_args(args, 3)?;
    let receiver = &args[0];
    let product_id = &args[1];
    let requested = parse_integer_at_least("quantity", &args[2], 1)?;

    let product: Product = require_record(&*stub, product_id)?;
    if !check_inventory_invariant(&product, requested) {
        warn!(
            product_id = %product_id,
            requested,
            available = product.quantity,
            "Order rejected: insufficient inventory"
        );
        return Err(ChaincodeError::InsufficientInventory {
            product_id: product_id.clone(),
            requested,
            available: product.quantity,
        });
    }

    let updated = product.with_units_removed(requested);
    store_record(stub, product_id, &updated)?;

    let creation_date = transaction_time(&*stub)?;
    let allocator = CounterAllocator::new(AssetType::Order);
    let order = Order::placed(
        allocator.next_id(&*stub)?,
        receiver.as_str(),
        product_id.as_str(),
        requested,
        creation_date,
    );
    check_order_creation_invariants(&product, &updated, &order).into_result()?;

    store_record(stub, &order.id, &order)?;
    allocator.advance(stub)?;

    log_asset_event!(
        info,
        COMPONENT_NAME,
        "Order placed",
        order.id,
        product_id = %product_id,
        quantity = requested,
        remaining = updated.quantity
    );
    Ok(Vec::new())
}

/// `updateOrderStatus(id, newStatus)`
///
/// Only the status changes. Under [`StatusPolicy::Strict`] the new status
/// must follow the transition table; under `Permissive` any non-empty
/// string is stored verbatim.
pub fn update_order_status<S: ChaincodeStub>(
    stub: &mut S,
    args: &[String],
    policy: StatusPolicy,
) -> Result<Vec<u8>, ChaincodeError> {
    require_args(args, 2)?;
    let id = &args[0];

    let existing: Order = require_record(&*stub, id)?;
    let next = OrderStatus::from(args[1].as_str());

    if policy == StatusPolicy::Strict && !existing.status.can_transition_to(&next) {
        warn!(order_id = %id, from = %existing.status, to = %next, "Status transition rejected");
        return Err(ChaincodeError::InvalidStatusTransition {
            from: existing.status.to_string(),
            to: next.to_string(),
        });
    }

    let updated = existing.with_status(next);
    if !check_order_immutability_invariant(&existing, &updated) || existing.id != *id {
        return Err(ChaincodeError::InvariantViolated(format!(
            "stored order id {} does not match key {id}",
            existing.id
        )));
    }

    store_record(stub, id, &updated)?;

    log_asset_event!(
        info,
        COMPONENT_NAME,
        "Order status updated",
        id,
        from = %existing.status,
        to = %updated.status
    );
    Ok(Vec::new())
}

// =============================================================================
// TESTS
// =============================================================================
