//! Product domain module.
//!
//! This crate contains the `Product` record and its validation rules,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod product;

pub use product::Product;
