//! # Product Lifecycle
//!
//! `createProduct` and `updateProduct`.

use crate::domain::entities::Product;
use crate::domain::invariants::check_product_identity_invariant;
use crate::domain::services::{
    parse_integer_at_least, require_arg_count, require_args, require_non_empty,
};
use crate::domain::value_objects::AssetType;
use crate::errors::ChaincodeError;
use crate::lifecycle::counter::CounterAllocator;
use crate::lifecycle::{require_record, store_record};
use crate::ports::outbound::ChaincodeStub;
use crate::COMPONENT_NAME;
use ml_telemetry::log_asset_event;

/// `createProduct(name, description, price, quantity)`
///
/// Allocates `Product<N+1>`, writes the record, then advances the product
/// counter. Returns an empty payload.
pub fn create_product<S: ChaincodeStub>(
    stub: &mut S,
    args: &[String],
) -> Result<Vec<u8>, ChaincodeError> {
    require_args(args, 4)?;
    let price = parse_integer_at_least("price", &args[2], 0)?;
    let quantity = parse_integer_at_least("quantity", &args[3], 0)?;

    let allocator = CounterAllocator::new(AssetType::Product);
    let product = Product::new(allocator.next_id(&*stub)?, &args[0], &args[1], price, quantity);

    store_record(stub, &product.id, &product)?;
    allocator.advance(stub)?;

    log_asset_event!(
        info,
        COMPONENT_NAME,
        "Product created",
        product.id,
        price = product.price,
        quantity = product.quantity
    );
    Ok(Vec::new())
}

/// `updateProduct(_, id, name, description, price, quantity)`
///
/// The first argument is accepted for call-shape compatibility and ignored.
/// Every mutable field is overwritten; the product must already exist.
pub fn update_product<S: ChaincodeStub>(
    stub: &mut S,
    args: &[String],
) -> Result<Vec<u8>, ChaincodeError> {
    require_arg_count(args, 6)?;
    require_non_empty(args, &[1])?;

    let id = &args[1];
    let existing: Product = require_record(&*stub, id)?;

    let price = parse_integer_at_least("price", &args[4], 0)?;
    let quantity = parse_integer_at_least("quantity", &args[5], 0)?;
    let updated = Product::new(id.as_str(), &args[2], &args[3], price, quantity);

    if !check_product_identity_invariant(&existing, &updated) {
        return Err(ChaincodeError::InvariantViolated(format!(
            "stored product id {} does not match key {id}",
            existing.id
        )));
    }

    store_record(stub, id, &updated)?;

    log_asset_event!(
        info,
        COMPONENT_NAME,
        "Product updated",
        id,
        price,
        quantity,
        previous_quantity = existing.quantity
    );
    Ok(Vec::new())
}

// =============================================================================
// TESTS
// =============================================================================
