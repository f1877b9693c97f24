//! Common utility functions used throughout the dsair-rs crate.

pub mod hex;

pub use hex::{decode_hex, encode_hex};
