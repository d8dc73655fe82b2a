//! Offer types for the offerbook ranking core.
//!
//! ## SSZ Serialization
//!
//! All types derive `SimpleSerialize` from ssz_rs for deterministic encoding.
//! Per the SSZ spec (ethereum.org):
//! - Basic types (u64): Direct little-endian encoding
//! - Fixed-size composites: Concatenated little-endian fields
//!
//! ## Fixed-Point Representation
//!
//! Amounts and quantities are stored as u64 scaled by 10^8 (SCALE constant).
//! This provides 8 decimal places of precision without floating-point errors.

use ssz_rs::prelude::*;

// Note: SCALE constant is defined in amount.rs module
// Use: crate::types::amount::SCALE

// ============================================================================
// Offer struct
// ============================================================================

/// A standing bid in the offer book.
///
/// ## Fields
///
/// `amount` and `quantity` use fixed-point representation (scaled by 10^8).
/// The book ranks offers by `amount` alone; every other field is payload it
/// stores and returns but never compares on.
///
/// ## SSZ Layout
///
/// The struct is serialized as a fixed-size container:
/// - Total size: 80 bytes (8+8+8+8+8+8+32 = 80)
///
/// ## Example
///
/// ```
/// use offerbook::types::Offer;
///
/// // Bid 1.5 for 2 units, valid until the given deadline
/// let offer = Offer::new(
///     100,                    // bidder
///     150_000_000,            // amount: 1.50000000
///     200_000_000,            // quantity: 2.00000000
///     1703577600000,          // deadline (ms)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Offer {
    /// Bidder identity (unique key; at most one standing offer per bidder)
    pub bidder: u64,

    /// Bid amount in fixed-point (scaled by 10^8)
    /// This is the ranking key: the book orders offers by amount, max first
    pub amount: u64,

    /// Quantity bid for, in fixed-point (scaled by 10^8)
    pub quantity: u64,

    /// Unix timestamp in milliseconds after which the offer lapses
    /// Expiry is enforced by the embedding marketplace, not the book
    pub deadline: u64,

    /// Referrer identity (0 = none)
    /// Opaque payload; fee attribution happens outside the book
    pub referrer: u64,

    /// Referral fee rate in basis points
    /// Opaque payload; fee math happens outside the book
    pub fee_bps: u64,

    /// Opaque 32-byte callback commitment carried with the offer
    pub hook: [u8; 32],
}

impl Offer {
    /// Create a new offer with no referral and an empty hook
    ///
    /// # Arguments
    ///
    /// * `bidder` - Bidder identity (unique key)
    /// * `amount` - Bid amount in fixed-point (scaled by 10^8)
    /// * `quantity` - Quantity in fixed-point (scaled by 10^8)
    /// * `deadline` - Unix timestamp in milliseconds
    ///
    /// # Example
    ///
    /// ```
    /// use offerbook::types::Offer;
    ///
    /// let offer = Offer::new(100, 150_000_000, 200_000_000, 0);
    /// assert_eq!(offer.bidder, 100);
    /// assert_eq!(offer.referrer, 0);
    /// ```
    pub fn new(bidder: u64, amount: u64, quantity: u64, deadline: u64) -> Self {
        Self {
            bidder,
            amount,
            quantity,
            deadline,
            referrer: 0,
            fee_bps: 0,
            hook: [0u8; 32],
        }
    }

    /// Attach a referral to this offer
    ///
    /// # Example
    ///
    /// ```
    /// use offerbook::types::Offer;
    ///
    /// let offer = Offer::new(100, 150_000_000, 200_000_000, 0)
    ///     .with_referral(7, 250); // referrer 7, 2.5% fee
    /// assert_eq!(offer.referrer, 7);
    /// assert_eq!(offer.fee_bps, 250);
    /// ```
    pub fn with_referral(mut self, referrer: u64, fee_bps: u64) -> Self {
        self.referrer = referrer;
        self.fee_bps = fee_bps;
        self
    }

    /// Attach a 32-byte callback commitment to this offer
    pub fn with_hook(mut self, hook: [u8; 32]) -> Self {
        self.hook = hook;
        self
    }

    /// Check whether this offer carries a referral
    #[inline]
    pub fn has_referral(&self) -> bool {
        self.referrer != 0
    }

    /// Check whether this offer's deadline has passed
    ///
    /// The book never calls this; it is a convenience for the embedding
    /// marketplace, which owns expiry enforcement.
    #[inline]
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.deadline != 0 && now_ms > self.deadline
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_new() {
        let offer = Offer::new(
            100,
            150_000_000,   // 1.50000000
            200_000_000,   // 2.00000000
            1703577600000,
        );

        assert_eq!(offer.bidder, 100);
        assert_eq!(offer.amount, 150_000_000);
        assert_eq!(offer.quantity, 200_000_000);
        assert_eq!(offer.deadline, 1703577600000);
        assert_eq!(offer.referrer, 0);
        assert_eq!(offer.fee_bps, 0);
        assert_eq!(offer.hook, [0u8; 32]);
        assert!(!offer.has_referral());
    }

    #[test]
    fn test_offer_with_referral() {
        let offer = Offer::new(100, 150_000_000, 200_000_000, 0)
            .with_referral(7, 250);

        assert_eq!(offer.referrer, 7);
        assert_eq!(offer.fee_bps, 250);
        assert!(offer.has_referral());
    }

    #[test]
    fn test_offer_with_hook() {
        let offer = Offer::new(100, 150_000_000, 200_000_000, 0)
            .with_hook([0xAB; 32]);

        assert_eq!(offer.hook, [0xAB; 32]);
    }

    #[test]
    fn test_offer_expiry() {
        let offer = Offer::new(100, 150_000_000, 200_000_000, 1_000);

        assert!(!offer.is_expired(999));
        assert!(!offer.is_expired(1_000));
        assert!(offer.is_expired(1_001));

        // Deadline 0 means "no deadline"
        let open_ended = Offer::new(100, 150_000_000, 200_000_000, 0);
        assert!(!open_ended.is_expired(u64::MAX));
    }

    #[test]
    fn test_offer_ssz_roundtrip() {
        let offer = Offer::new(100, 150_000_000, 200_000_000, 1703577600000)
            .with_referral(7, 250)
            .with_hook([0xCD; 32]);

        // Serialize
        let serialized = ssz_rs::serialize(&offer).expect("Failed to serialize");

        // Deserialize
        let deserialized: Offer = ssz_rs::deserialize(&serialized).expect("Failed to deserialize");

        // Verify roundtrip
        assert_eq!(offer, deserialized);
    }

    #[test]
    fn test_offer_deterministic_serialization() {
        // Same offer should always produce identical bytes
        let offer = Offer::new(100, 150_000_000, 200_000_000, 1703577600000);

        let bytes1 = ssz_rs::serialize(&offer).expect("Failed to serialize");
        let bytes2 = ssz_rs::serialize(&offer).expect("Failed to serialize");

        assert_eq!(bytes1, bytes2, "SSZ serialization must be deterministic");
    }

    #[test]
    fn test_offer_ssz_size() {
        let offer = Offer::new(100, 150_000_000, 200_000_000, 0);
        let bytes = ssz_rs::serialize(&offer).expect("Failed to serialize");

        // Expected size: 8+8+8+8+8+8+32 = 80 bytes
        // (bidder + amount + quantity + deadline + referrer + fee_bps + hook)
        assert_eq!(bytes.len(), 80, "Offer should serialize to 80 bytes");
    }
}
