//! Clients for the two backends the marketplace talks to.
//!
//! [`ProgramClient`] submits transactions to the on-chain program and
//! waits for finalized confirmation. [`OrderApiClient`] fetches off-chain
//! order records from the REST backend. The two paths are independent:
//! the order API reflects on-chain activity asynchronously and this crate
//! holds no authoritative state of its own.
//!
//! # Example
//!
//! ```rust,ignore
//! use distri_sdk::client::{OrderApiClient, ProgramClient};
//! use distri_sdk::config::ProgramConfig;
//! use distri_sdk::types::OrderId;
//! use solana_sdk::signature::Keypair;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let program = ProgramClient::builder()
//!         .config(ProgramConfig::new("https://api.devnet.solana.com"))
//!         .wallet(Keypair::new())
//!         .build()?;
//!
//!     let machine = program.machine_address(&provider, &uuid);
//!     let signature = program
//!         .place_order(machine, OrderId::new("order-0001")?, 10, metadata)
//!         .await?;
//!     println!("order placed: {}", signature);
//!
//!     let api = OrderApiClient::with_base_url("https://api.distri.ai")?;
//!     let page = api
//!         .get_order_list(1, 10, Default::default(), &program.wallet_pubkey())
//!         .await?;
//!     println!("{} orders", page.total);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod confirm;
pub mod error;
pub mod http;
pub mod program;

pub use config::ClientConfig;
pub use confirm::ConfirmConfig;
pub use error::ClientError;
pub use http::{OrderApiClient, OrderFilter, OrderPage};
pub use program::{ProgramClient, ProgramClientBuilder};
