//! Property tests for arena invariants under arbitrary request sequences

use proptest::prelude::*;
use strata_arena::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fixed_cursor_never_exceeds_size(
        size in 0usize..256,
        requests in prop::collection::vec(0usize..64, 0..40),
    ) {
        let arena = FixedArena::new(size, SystemAllocator).unwrap();
        for n in requests {
            let before = arena.remaining_capacity();
            match arena.alloc(n) {
                Ok(view) => {
                    prop_assert_eq!(view.len(), n);
                    prop_assert_eq!(arena.remaining_capacity(), before - n);
                }
                Err(_) => {
                    prop_assert!(before < n);
                    prop_assert_eq!(arena.remaining_capacity(), before);
                }
            }
            prop_assert!(arena.used() <= arena.capacity());
        }
    }

    #[test]
    fn paged_positions_bounded_and_forward(
        page_size in 1usize..64,
        requests in prop::collection::vec(0usize..80, 0..60),
    ) {
        let arena = PagedArena::new(page_size, SystemAllocator).unwrap();
        let mut last_tail = 0;
        for n in requests {
            let accepted = arena.alloc(n).is_ok();
            prop_assert_eq!(accepted, n <= page_size);

            let tail = arena.tail_index();
            prop_assert!(tail >= last_tail);
            prop_assert!(tail < arena.page_count());
            last_tail = tail;

            for pos in arena.page_positions() {
                prop_assert!(pos <= page_size);
            }
            let utilization = arena.average_utilization();
            prop_assert!((0.0..=1.0).contains(&utilization));
        }
    }

    #[test]
    fn paged_resets_rewind_everything(
        page_size in 1usize..32,
        requests in prop::collection::vec(0usize..32, 1..40),
        hard in any::<bool>(),
    ) {
        let mut arena = PagedArena::new(page_size, SystemAllocator).unwrap();
        for n in requests {
            let _ = arena.alloc(n);
        }
        let pages = arena.page_count();

        if hard {
            arena.hard_reset();
            prop_assert_eq!(arena.page_count(), 1);
        } else {
            arena.reset();
            prop_assert_eq!(arena.page_count(), pages);
        }
        prop_assert_eq!(arena.tail_index(), 0);
        prop_assert!(arena.page_positions().iter().all(|pos| *pos == 0));
        prop_assert_eq!(arena.average_utilization(), 0.0);
    }

    #[test]
    fn chain_records_every_request(
        requests in prop::collection::vec(0usize..128, 0..30),
    ) {
        let tracked = TrackedAllocator::new(SystemAllocator);
        {
            let arena = ChainArena::new(&tracked);
            for &n in &requests {
                prop_assert_eq!(arena.alloc(n).unwrap().len(), n);
            }
            prop_assert_eq!(arena.block_sizes(), requests.clone());
            prop_assert_eq!(arena.used(), requests.iter().sum::<usize>());
        }
        prop_assert!(!tracked.has_leaks());
    }
}
