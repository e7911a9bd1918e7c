//! # Ocean SDK
//!
//! Rust client bindings for a decentralized data-exchange protocol: liquidity
//! pools, token factories, datatokens and the asset metadata registry.
//!
//! ## Overview
//!
//! The SDK performs no protocol logic of its own. Pricing, fee accounting,
//! weight normalization and access control all live in deployed contracts;
//! this crate encodes calls, sends transactions and decodes results and
//! event logs. It also reads and writes asset documents (DDOs) through the
//! metadata index.
//!
//! ## Architecture
//!
//! ### Contract Layer
//! `abigen!` bindings (`contracts`) wrapped by typed models (`models`) that
//! own confirmation handling and event extraction.
//!
//! ### Metadata Layer
//! The DDO model and identifiers (`ddo`), the index client (`aquarius`) and
//! publishing/discovery (`assets`).
//!
//! ### Helpers
//! Unit conversions (`types::conversions`) and client-side fee expectations
//! (`fees`).

// Core Types
/// Argument/result structures and unit conversions
pub mod types;
/// Error types for contract interaction
pub mod errors;

// Contract Layer
/// Contract ABIs
pub mod contracts;
/// Typed contract wrappers
pub mod models;

// Metadata Layer
/// Asset documents, DIDs and credentials
pub mod ddo;
/// Metadata index client
pub mod aquarius;
/// Asset publishing and discovery
pub mod assets;

// Helpers
/// Fee expectations and slippage limits
pub mod fees;

// Infrastructure
/// Contract address file
pub mod addresses;
/// RPC connection and signer setup
pub mod connection;

// Settings & Configuration
/// Configuration management
pub mod settings;

// Re-exports for convenience
pub use addresses::ContractAddresses;
pub use aquarius::{AquariusClient, AssetIndex};
pub use assets::OceanAssets;
pub use ddo::Ddo;
pub use errors::SdkError;
pub use models::{BPool, Datatoken, DataNft, FactoryRouter, NftFactory};
pub use settings::Settings;
