//! # Domain Layer (Inner Hexagon)
//!
//! Records, value objects, invariants and pure helpers of the marketplace.
//! NO ledger access here; everything is a plain function of its inputs.

pub mod entities;
pub mod invariants;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use services::*;
pub use value_objects::*;
