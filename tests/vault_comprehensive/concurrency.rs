//! Concurrency Tests
//!
//! Tests for thread safety:
//! - Racing declarations of one key converge on one cell
//! - Concurrent declarations of distinct keys
//! - Mutation through aliasing handles from many threads
//! - Racing removals: exactly one winner

use crate::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

const NUM_THREADS: usize = 8;

#[test]
fn test_concurrent_declare_same_key_single_cell() {
    let vault = create_vault();
    let barrier = Arc::new(Barrier::new(NUM_THREADS));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|i| {
            let vault = vault.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                vault.share("race", i)
            })
        })
        .collect();

    let cells: Vec<SharedCell<usize>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let winner = cells[0].get();
    for cell in &cells {
        assert!(cell.same_cell(&cells[0]), "all threads must get the same cell");
        assert_eq!(cell.get(), winner);
    }
    assert_eq!(vault.len(), 1);
}

#[test]
fn test_concurrent_declare_distinct_keys() {
    let vault = create_vault();
    const KEYS_PER_THREAD: usize = 50;
    let barrier = Arc::new(Barrier::new(NUM_THREADS));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|t| {
            let vault = vault.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for k in 0..KEYS_PER_THREAD {
                    vault.share(format!("t{}_k{}", t, k), k);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(vault.len(), NUM_THREADS * KEYS_PER_THREAD);
    assert_eq!(vault.get::<usize>("t3_k7").unwrap().get(), 7);
}

#[test]
fn test_concurrent_updates_through_aliases() {
    let vault = create_vault();
    const INCREMENTS: u64 = 500;
    vault.share("counter", 0u64);
    let barrier = Arc::new(Barrier::new(NUM_THREADS));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|_| {
            let vault = vault.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let counter = vault.share("counter", 0u64);
                barrier.wait();
                for _ in 0..INCREMENTS {
                    counter.update(|c| *c += 1);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let counter = vault.get::<u64>("counter").unwrap();
    assert_eq!(counter.get(), NUM_THREADS as u64 * INCREMENTS);
}

#[test]
fn test_concurrent_removal_single_winner() {
    let vault = create_vault();
    let cell = vault.share("contested", 1);
    let winners = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(NUM_THREADS));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|_| {
            let cell = cell.clone();
            let winners = Arc::clone(&winners);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                if cell.remove_from_registry().is_some() {
                    winners.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(winners.load(Ordering::SeqCst), 1);
    assert!(vault.is_empty());
}

#[test]
fn test_concurrent_holders_on_global_vault() {
    let barrier = Arc::new(Barrier::new(NUM_THREADS));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            let key = unique_key("holder_thread");
            thread::spawn(move || {
                let mut holder = VaultHolder::global();
                holder.share(key.as_str(), 1u8);
                barrier.wait();
                assert!(get_shared::<u8>(&key).is_some());
                drop(holder);
                assert!(get_shared::<u8>(&key).is_none());
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}

#[test]
fn test_concurrent_comparisons_do_not_deadlock() {
    let vault = create_vault();
    let a = vault.share("cmp_a", 1i32);
    let b = vault.share("cmp_b", 2i32);
    let barrier = Arc::new(Barrier::new(NUM_THREADS));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|i| {
            let (a, b) = (a.clone(), b.clone());
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for n in 0..200 {
                    if i % 2 == 0 {
                        let _ = a < b;
                        a.set(n);
                    } else {
                        let _ = b > a;
                        b.set(n);
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
