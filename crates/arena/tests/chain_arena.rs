//! Integration tests for the chained block arena

use pretty_assertions::assert_eq;
use strata_arena::prelude::*;

#[test]
fn test_chain_growth_and_reset() {
    let mut arena = ChainArena::new(SystemAllocator);
    assert!(arena.is_empty());

    arena.alloc(10).unwrap();
    arena.alloc(20).unwrap();
    assert_eq!(arena.block_sizes(), vec![10, 20]);

    arena.reset();
    assert!(arena.is_empty());
    assert_eq!(arena.block_count(), 0);

    arena.alloc(7).unwrap();
    assert_eq!(arena.block_sizes(), vec![7]);
}

#[test]
fn test_blocks_keep_their_contents() {
    let mut arena = ChainArena::new(SystemAllocator);
    for i in 0..16u8 {
        arena.alloc(usize::from(i) + 1).unwrap().fill(i);
    }

    for i in 0..16u8 {
        let block = arena.block(usize::from(i)).unwrap();
        assert_eq!(block.len(), usize::from(i) + 1);
        assert!(block.iter().all(|b| *b == i));
    }
    assert!(arena.block(16).is_none());
}

#[test]
fn test_clone_block_outlives_reset() {
    let mut arena = ChainArena::new(SystemAllocator);
    arena.alloc(5).unwrap().copy_from_slice(b"block");

    let copy = arena.clone_block(0).unwrap();
    arena.reset();

    assert_eq!(copy.len(), 5);
    assert_eq!(copy.as_slice(), b"block");
}

#[test]
fn test_zero_sized_blocks() {
    let arena = ChainArena::new(SystemAllocator);
    assert!(arena.alloc(0).unwrap().is_empty());
    assert_eq!(arena.block_sizes(), vec![0]);
    assert_eq!(arena.used(), 0);
}
