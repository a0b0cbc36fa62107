//! Paged arena over an instrumented host allocator
//!
//! Every host acquire/release is traced, and refused requests are logged as
//! warnings. Run with:
//!
//! ```sh
//! RUST_LOG=strata_arena=trace cargo run --example instrumented
//! ```

use strata_arena::prelude::*;
use tracing_subscriber::EnvFilter;

const WORD: usize = size_of::<i32>();

fn main() -> ArenaResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("strata_arena=trace")),
        )
        .init();

    let tracked = TrackedAllocator::new(SystemAllocator);
    {
        let arena = PagedArena::with_config(WORD * 10, &tracked, ArenaConfig::debug())?;

        let mut words = arena.alloc(WORD * 10)?;
        for (value, chunk) in (0i32..).zip(words.chunks_exact_mut(WORD)) {
            chunk.copy_from_slice(&value.to_ne_bytes());
        }

        // Larger than a page: refused, nothing acquired.
        let refused = arena.alloc(WORD * 16);
        assert!(matches!(refused, Err(ArenaError::ChunkTooLarge { .. })));

        println!("{}", arena.stats().snapshot());
        println!("{}", arena.memory_usage());
    }

    println!("{}", tracked.snapshot());
    assert!(!tracked.has_leaks());
    Ok(())
}
