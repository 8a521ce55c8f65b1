//! Distri SDK - Rust client library for the Distri GPU rental marketplace.
//!
//! This crate provides the client-side pieces of the marketplace: PDA
//! derivation, instruction builders for the on-chain program, a
//! transaction submission path with bounded confirmation polling, and a
//! client for the off-chain order API.
//!
//! # Core Types
//!
//! - [`OrderId`], [`MachineUuid`] — fixed-width identifier seeds
//! - [`OrderStatus`] — decoded order lifecycle status
//! - [`Order`] — normalized order for display
//! - [`SdkError`] — typed error kinds for every on-chain operation
//!
//! # Clients
//!
//! - [`client::ProgramClient`] — builds, signs, submits and confirms
//!   transactions against the marketplace program
//! - [`client::OrderApiClient`] — fetches and normalizes off-chain order
//!   records
//!
//! # Example
//!
//! ```rust
//! use distri_sdk::types::{OrderId, OrderStatus};
//!
//! let order_id = OrderId::new("order-0001").unwrap();
//! assert_eq!(order_id.as_bytes().len(), 16);
//!
//! let status = OrderStatus::try_from(1).unwrap();
//! assert_eq!(status.name(), "Available");
//! ```

pub mod access;
pub mod client;
pub mod config;
pub mod error;
pub mod instructions;
pub mod types;

pub use access::{debug_console_url, AccessScope};
pub use config::ProgramConfig;
pub use error::SdkError;
pub use types::{
    Earnings, MachineInfo, MachineUuid, Order, OrderId, OrderMetadata, OrderStatus, RawOrder,
};
