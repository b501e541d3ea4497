//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Port (Inbound)**: `Chaincode`, routed by function name
//! - **Driven Port (Outbound)**: `ChaincodeStub`, the ledger platform
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
