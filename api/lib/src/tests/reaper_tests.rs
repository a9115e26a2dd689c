// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use test_with_tracing::test;

use crate::reaper;
use crate::Provider;

/// Other tests drop primitives concurrently, so the pending set is shared.
/// Flush repeatedly until it drains.
fn drain() {
    for _ in 0..200 {
        reaper::flush();
        if reaper::pending_count() == 0 {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("cleanup backlog did not drain");
}

#[test]
fn enqueued_tickets_all_run() {
    let ran = Arc::new(AtomicUsize::new(0));
    for _ in 0..16 {
        let ran = Arc::clone(&ran);
        reaper::enqueue(Box::new(move || {
            ran.fetch_add(1, Ordering::SeqCst);
        }));
    }
    reaper::flush();
    assert_eq!(ran.load(Ordering::SeqCst), 16);
}

#[test]
fn a_panicking_ticket_does_not_stop_the_worker() {
    let ran = Arc::new(AtomicUsize::new(0));
    reaper::enqueue(Box::new(|| panic!("bad ticket")));
    {
        let ran = Arc::clone(&ran);
        reaper::enqueue(Box::new(move || {
            ran.fetch_add(1, Ordering::SeqCst);
        }));
    }
    reaper::flush();
    assert_eq!(ran.load(Ordering::SeqCst), 1);
}

#[test]
fn dropped_digests_are_reclaimed() {
    let provider = Provider::new().expect("provider");
    for _ in 0..8 {
        let digest = provider.message_digest("SHA-256").expect("digest");
        drop(digest);
    }
    drain();
}

#[test]
fn closed_primitives_leave_no_backlog() {
    let provider = Provider::new().expect("provider");
    for _ in 0..8 {
        provider.message_digest("SHA-256").expect("digest").close();
    }
    drain();
}
