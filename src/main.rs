//! Offerbook - Binary Entry Point
//!
//! Walks through the public surface of the ranking core: insert, lookup,
//! modify, pop, and the state-root digest.

use offerbook::types::amount;
use offerbook::{HeapError, Offer, OfferHeap};

fn main() -> Result<(), HeapError> {
    println!("===========================================");
    println!("  Offerbook - Auction Ranking Core");
    println!("===========================================");
    println!();

    let mut heap = OfferHeap::with_capacity(16);

    println!("Inserting offers...");
    let bids = [
        (1u64, "1.00"),
        (2u64, "2.50"),
        (3u64, "0.75"),
        (4u64, "3.25"),
    ];
    for (bidder, amount_str) in bids {
        let amount = amount::to_fixed(amount_str).expect("valid amount literal");
        heap.insert(Offer::new(bidder, amount, 100_000_000, 0))?;
        println!("  bidder {} bids {}", bidder, amount_str);
    }
    println!();

    let top = heap.max_offer()?;
    println!("Winning offer:");
    println!("  Bidder: {}", top.bidder);
    println!("  Amount: {} (raw)", top.amount);
    println!("  Amount: {} (human)", amount::from_fixed_trimmed(top.amount));
    println!();

    println!("Bidder 3 raises to 5.00...");
    let raised = amount::to_fixed("5.00").expect("valid amount literal");
    heap.modify(Offer::new(3, raised, 100_000_000, 0))?;
    println!("  New winner: bidder {}", heap.max_offer()?.bidder);
    println!();

    println!("State root: {}", hex::encode(heap.state_root()));
    println!();

    println!("Draining the book in rank order...");
    while let Ok(offer) = heap.pop_max() {
        println!(
            "  bidder {:>2} at {}",
            offer.bidder,
            amount::from_fixed_trimmed(offer.amount)
        );
    }
    println!();
    println!(
        "Book empty (size={}, capacity={}).",
        heap.len(),
        heap.capacity()
    );

    Ok(())
}
