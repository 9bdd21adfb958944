//! Property tests for the event ledger invariants

use proptest::prelude::*;

use idleverse::world::events::WorldEventCategory;
use idleverse::world::store::WorldStore;

proptest! {
    /// The ledger never exceeds its cap, every entry carries a positive
    /// repeat count, and entries stay ordered newest-first.
    #[test]
    fn ledger_invariants_hold(messages in prop::collection::vec(0u8..12, 0..200)) {
        let mut store = WorldStore::with_seed(1);
        for m in &messages {
            store.register_event(format!("message {m}"), WorldEventCategory::System);
        }

        prop_assert!(store.events.len() <= 50);
        for event in &store.events {
            prop_assert!(event.count >= 1);
        }
        for pair in store.events.windows(2) {
            prop_assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    /// Registrations are never lost: entry counts sum to the number of
    /// register calls as long as nothing was evicted.
    #[test]
    fn registrations_accumulate(messages in prop::collection::vec(0u8..4, 1..40)) {
        let mut store = WorldStore::with_seed(1);
        for m in &messages {
            store.register_event(format!("message {m}"), WorldEventCategory::System);
        }

        // at most 4 distinct messages, all within the dedup window, so
        // nothing is evicted and every call is accounted for
        let total: u32 = store.events.iter().map(|e| e.count).sum();
        prop_assert_eq!(total as usize, messages.len());
        prop_assert!(store.events.len() <= 4);
    }
}
