//! Core data types for the offer book
//!
//! All types implement SSZ serialization for deterministic encoding.
//! All monetary values use fixed-point representation (scaled by 10^8).
//!
//! ## Types
//!
//! - [`Offer`]: A standing bid keyed by bidder identity, ranked by amount
//!
//! ## Fixed-Point Arithmetic
//!
//! All amounts and quantities are stored as `u64` scaled by 10^8.
//! Example: 1.25 is stored as 125_000_000u64

mod offer;
pub mod amount;

// Re-export all types at module level
pub use offer::Offer;
