//! # Sietch QC tools
//!
//! Library behind the command-line tools that register batches and boards
//! and upload QC measurements to the inventory service:
//! - [`parsers`]: position CSV files and thickness files
//! - [`registration`]: batch and standalone board registration
//! - [`position`] / [`thickness`]: measurement upload and overwrite
//! - [`label`]: QR-code labels linking to board records
//! - [`cli`]: argument groups and logging setup shared by the binaries

pub mod cli;
pub mod label;
pub mod parsers;
pub mod position;
pub mod registration;
pub mod thickness;

pub use parsers::BoardKey;
