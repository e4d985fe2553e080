//! # Sietch Common Library
//!
//! Shared code for all Sietch QC tools including:
//! - Error taxonomy and result type
//! - Configuration loading (`config.dat`)
//! - Authenticated session client for the inventory service
//! - Typed component record structures
//! - Board type table and string casing helpers

pub mod board_types;
pub mod casing;
pub mod client;
pub mod config;
pub mod error;
pub mod records;

pub use board_types::BoardType;
pub use client::{ComponentKind, InventoryClient, SearchKey};
pub use config::ClientConfig;
pub use error::{Error, Result};
