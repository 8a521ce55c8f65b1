//! Core types for the Distri SDK.
//!
//! Identifier seeds, amount conversion, and order/machine models shared by
//! the on-chain path and the order API client.

pub mod amount;
pub mod ids;
pub mod machine;
pub mod order;

pub use amount::{display_from_lamports, lamports_from_display, LAMPORTS_PER_UNIT};
pub use ids::{MachineUuid, OrderId, ID_SEED_LEN};
pub use machine::MachineInfo;
pub use order::{
    status_filter_options, summarize_earnings, Earnings, FilterOption, Order, OrderMetadata,
    OrderStatus, RawOrder, TaskForm,
};
