//! Indexed max-heap of offers.
//!
//! ## Architecture
//!
//! The heap uses a hybrid data structure for optimal performance:
//!
//! - **Vec slots**: Array-backed binary max-heap ordered by amount
//! - **SlotDirectory**: Bidder to slot mapping for O(1) cancel and lookup
//!
//! ## Ordering
//!
//! Offers are ranked by `amount`, max first. Comparisons are strict: equal
//! amounts never displace each other, so ties resolve in favor of whichever
//! offer already holds the higher slot.
//!
//! ## Memory Model
//!
//! The backing vector's length is the capacity high-water mark: it grows by
//! one when an insert finds every slot active and is never shrunk. Slots in
//! `[size, capacity)` hold stale content and are overwritten before the
//! vector is extended, so repeated insert/remove cycles do not reallocate.
//!
//! ## Example
//!
//! ```
//! use offerbook::heap::OfferHeap;
//! use offerbook::types::Offer;
//!
//! let mut heap = OfferHeap::new();
//!
//! heap.insert(Offer::new(1, 100_000_000, 100_000_000, 0)).unwrap();
//! heap.insert(Offer::new(2, 300_000_000, 100_000_000, 0)).unwrap();
//! heap.insert(Offer::new(3, 200_000_000, 100_000_000, 0)).unwrap();
//!
//! assert_eq!(heap.max_offer().unwrap().bidder, 2);
//! assert_eq!(heap.len(), 3);
//!
//! let top = heap.pop_max().unwrap();
//! assert_eq!(top.amount, 300_000_000);
//! assert_eq!(heap.max_offer().unwrap().bidder, 3);
//! ```

use sha2::{Digest, Sha256};

use crate::error::HeapError;
use crate::heap::SlotDirectory;
use crate::types::Offer;

/// Indexed max-heap of standing offers.
///
/// One offer per bidder, ranked by amount. Insert, remove-by-bidder, and
/// modify are O(log n); lookup-by-bidder and reading the maximum are O(1).
///
/// Every operation either fully commits or fails with no observable side
/// effects: preconditions are checked before the first slot is touched.
#[derive(Debug, Clone, Default)]
pub struct OfferHeap {
    /// Backing slot array. Length == capacity; only `[0, size)` is active
    /// and heap-ordered. Slots beyond `size` hold stale content awaiting
    /// reuse.
    slots: Vec<Offer>,

    /// Number of active offers
    size: usize,

    /// Bidder to slot mapping, kept in lockstep with every slot move
    directory: SlotDirectory,
}

impl OfferHeap {
    /// Create a new empty heap
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            size: 0,
            directory: SlotDirectory::new(),
        }
    }

    /// Create a heap with pre-reserved backing storage
    ///
    /// This only reserves allocations; the capacity high-water mark still
    /// starts at zero and grows with inserts.
    ///
    /// # Example
    ///
    /// ```
    /// use offerbook::heap::OfferHeap;
    ///
    /// let heap = OfferHeap::with_capacity(10_000);
    /// assert_eq!(heap.len(), 0);
    /// assert_eq!(heap.capacity(), 0);
    /// ```
    pub fn with_capacity(offer_capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(offer_capacity),
            size: 0,
            directory: SlotDirectory::with_capacity(offer_capacity),
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Number of active offers
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Check if the heap holds no active offers
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Capacity high-water mark: the largest size ever reached
    ///
    /// Monotonically non-decreasing. Slots between `len()` and `capacity()`
    /// are reused by inserts before the backing storage grows.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    // ========================================================================
    // Offer Management
    // ========================================================================

    /// Insert a new offer
    ///
    /// The offer is placed in the first inactive slot (reusing a stale slot
    /// when one exists, extending the backing vector by one when none does)
    /// and sifted up to its rank.
    ///
    /// # Errors
    ///
    /// [`HeapError::DuplicateOffer`] if the bidder already has a standing
    /// offer. The heap is unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use offerbook::heap::OfferHeap;
    /// use offerbook::types::Offer;
    ///
    /// let mut heap = OfferHeap::new();
    /// heap.insert(Offer::new(1, 100_000_000, 100_000_000, 0)).unwrap();
    ///
    /// assert!(heap.insert(Offer::new(1, 200_000_000, 100_000_000, 0)).is_err());
    /// assert_eq!(heap.len(), 1);
    /// ```
    pub fn insert(&mut self, offer: Offer) -> Result<(), HeapError> {
        if self.directory.contains(offer.bidder) {
            return Err(HeapError::DuplicateOffer {
                bidder: offer.bidder,
            });
        }

        let slot = self.size;
        let bidder = offer.bidder;
        if slot == self.slots.len() {
            // Every slot is active: extend the high-water mark by one
            self.slots.push(offer);
        } else {
            // Reuse a stale slot left behind by an earlier removal
            self.slots[slot] = offer;
        }

        self.directory.set(bidder, slot);
        self.size += 1;
        self.sift_up(slot);
        Ok(())
    }

    /// Remove a bidder's standing offer
    ///
    /// The offer in the last active slot is swapped into the vacated slot
    /// and sifted in whichever direction the amounts require.
    ///
    /// # Errors
    ///
    /// [`HeapError::OfferNotFound`] if the bidder has no standing offer.
    ///
    /// # Returns
    ///
    /// The removed offer.
    pub fn remove(&mut self, bidder: u64) -> Result<Offer, HeapError> {
        let slot = self
            .directory
            .lookup(bidder)
            .ok_or(HeapError::OfferNotFound { bidder })?;

        let last = self.size - 1;
        let removed = self.slots[slot].clone();
        self.directory.clear(bidder);
        self.size = last;

        if slot != last {
            // The last active offer becomes the filler for the vacated slot;
            // the removed offer is left behind as stale content.
            self.slots.swap(slot, last);
            self.directory.set(self.slots[slot].bidder, slot);
            self.restore(slot);
        }

        Ok(removed)
    }

    /// Replace a bidder's standing offer in place
    ///
    /// All fields of the stored offer are overwritten with `offer`'s fields;
    /// the bidder field names the offer to replace. A raised amount sifts
    /// up, a lowered or unchanged amount sifts down (an unchanged amount
    /// degenerates to a no-op pass).
    ///
    /// # Errors
    ///
    /// [`HeapError::OfferNotFound`] if the bidder has no standing offer.
    ///
    /// # Example
    ///
    /// ```
    /// use offerbook::heap::OfferHeap;
    /// use offerbook::types::Offer;
    ///
    /// let mut heap = OfferHeap::new();
    /// heap.insert(Offer::new(1, 100_000_000, 100_000_000, 0)).unwrap();
    /// heap.insert(Offer::new(2, 300_000_000, 100_000_000, 0)).unwrap();
    ///
    /// // Raise bidder 1 above bidder 2
    /// heap.modify(Offer::new(1, 400_000_000, 100_000_000, 0)).unwrap();
    /// assert_eq!(heap.max_offer().unwrap().bidder, 1);
    /// ```
    pub fn modify(&mut self, offer: Offer) -> Result<(), HeapError> {
        let slot = self
            .directory
            .lookup(offer.bidder)
            .ok_or(HeapError::OfferNotFound {
                bidder: offer.bidder,
            })?;

        let previous = self.slots[slot].amount;
        let raised = offer.amount > previous;
        self.slots[slot] = offer;

        if raised {
            // Can only have become too large relative to its ancestors
            self.sift_up(slot);
        } else {
            // Can only have become too small relative to its descendants
            self.sift_down(slot);
        }
        Ok(())
    }

    /// Get a reference to a bidder's standing offer
    ///
    /// # Errors
    ///
    /// [`HeapError::OfferNotFound`] if the bidder has no standing offer.
    #[inline]
    pub fn get_offer(&self, bidder: u64) -> Result<&Offer, HeapError> {
        let slot = self
            .directory
            .lookup(bidder)
            .ok_or(HeapError::OfferNotFound { bidder })?;
        Ok(&self.slots[slot])
    }

    /// Check whether a bidder has a standing offer
    #[inline]
    pub fn has_offer(&self, bidder: u64) -> bool {
        self.directory.contains(bidder)
    }

    /// Resolve a bidder to its current heap slot
    #[inline]
    pub fn slot_of(&self, bidder: u64) -> Option<usize> {
        self.directory.lookup(bidder)
    }

    // ========================================================================
    // Top of Book
    // ========================================================================

    /// Get a reference to the currently winning offer
    ///
    /// # Errors
    ///
    /// [`HeapError::Empty`] if the heap holds no offers.
    #[inline]
    pub fn max_offer(&self) -> Result<&Offer, HeapError> {
        if self.size == 0 {
            return Err(HeapError::Empty);
        }
        Ok(&self.slots[0])
    }

    /// Remove and return the currently winning offer
    ///
    /// Equivalent to [`max_offer`](Self::max_offer) followed by
    /// [`remove`](Self::remove) of that bidder.
    ///
    /// # Errors
    ///
    /// [`HeapError::EmptyPop`] if the heap holds no offers.
    pub fn pop_max(&mut self) -> Result<Offer, HeapError> {
        if self.size == 0 {
            return Err(HeapError::EmptyPop);
        }
        let bidder = self.slots[0].bidder;
        self.remove(bidder)
    }

    // ========================================================================
    // Inspection (for embedding components and tests)
    // ========================================================================

    /// The active slot range in heap order
    ///
    /// `offers()[0]` is the winning offer; beyond that the order is the
    /// heap's internal layout, not a sorted ranking.
    #[inline]
    pub fn offers(&self) -> &[Offer] {
        &self.slots[..self.size]
    }

    /// Compute a SHA-256 commitment to the active heap state
    ///
    /// Hashes the SSZ encoding of every active slot in heap order, prefixed
    /// with the active count. Identical operation sequences produce
    /// identical roots on any platform.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update((self.size as u64).to_le_bytes());
        for offer in self.offers() {
            let bytes =
                ssz_rs::serialize(offer).expect("Offer serializes as a fixed-size container");
            hasher.update(&bytes);
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        root
    }

    // ========================================================================
    // Heapify Engine
    // ========================================================================

    /// Swap two slots and resync both directory entries
    #[inline]
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        self.directory.set(self.slots[a].bidder, a);
        self.directory.set(self.slots[b].bidder, b);
    }

    /// Move the offer at `pos` toward the root until its parent outranks it
    ///
    /// Strict comparison: an offer never climbs past an equal amount.
    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.slots[pos].amount <= self.slots[parent].amount {
                break;
            }
            self.swap_slots(pos, parent);
            pos = parent;
        }
    }

    /// Move the offer at `pos` toward the leaves until no child outranks it
    fn sift_down(&mut self, mut pos: usize) {
        loop {
            let left = 2 * pos + 1;
            let right = 2 * pos + 2;
            let mut largest = pos;

            if left < self.size && self.slots[left].amount > self.slots[largest].amount {
                largest = left;
            }
            if right < self.size && self.slots[right].amount > self.slots[largest].amount {
                largest = right;
            }
            if largest == pos {
                break;
            }
            self.swap_slots(pos, largest);
            pos = largest;
        }
    }

    /// Restore the invariant at a slot whose occupant arrived by filler swap
    ///
    /// The filler's amount is not bounded relative to its new parent, so the
    /// direction must be chosen by comparison; a downward-only pass would
    /// strand a filler that outranks its parent.
    fn restore(&mut self, slot: usize) {
        if slot > 0 && self.slots[slot].amount > self.slots[(slot - 1) / 2].amount {
            self.sift_up(slot);
        } else {
            self.sift_down(slot);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
