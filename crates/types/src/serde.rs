//! Custom serde module implementations.

pub mod address;
pub mod hash;
