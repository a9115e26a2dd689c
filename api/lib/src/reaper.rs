// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

//! Background context reclamation
//!
//! Handles that are dropped rather than closed enqueue a reclamation ticket
//! here. A dedicated worker thread runs the tickets so native frees never
//! block, and never run on, the dropping thread. `close` on a primitive stays
//! the deterministic path; this is the safety net behind it.

use std::collections::HashSet;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::mpsc;

use parking_lot::Mutex;

/// One pending reclamation: a ticket id for tracking plus the closure that
/// frees the native context.
struct CleanupTicket {
    id: u64,
    reclaim: Box<dyn FnOnce() + Send>,
}

enum ReaperMsg {
    Reclaim(CleanupTicket),
    /// Ack once every message queued before this one has been processed.
    Flush(mpsc::Sender<()>),
}

struct Reaper {
    tx: Mutex<mpsc::Sender<ReaperMsg>>,
    pending: Mutex<HashSet<u64>>,
}

static NEXT_TICKET_ID: AtomicU64 = AtomicU64::new(0);

lazy_static::lazy_static! {
    static ref REAPER: Reaper = Reaper::start();
}

impl Reaper {
    fn start() -> Self {
        let (tx, rx) = mpsc::channel::<ReaperMsg>();
        std::thread::Builder::new()
            .name("ncp-cleanup".to_string())
            .spawn(move || Self::run(rx))
            .expect("failed to spawn cleanup thread");
        Self {
            tx: Mutex::new(tx),
            pending: Mutex::new(HashSet::new()),
        }
    }

    fn run(rx: mpsc::Receiver<ReaperMsg>) {
        for msg in rx.iter() {
            match msg {
                ReaperMsg::Reclaim(ticket) => {
                    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(
                        ticket.reclaim,
                    ));
                    REAPER.pending.lock().remove(&ticket.id);
                    match outcome {
                        Ok(()) => tracing::debug!(id = ticket.id, "reclaimed native context"),
                        Err(_) => {
                            // Keep draining; one bad ticket must not stop
                            // reclamation of the rest.
                            tracing::error!(id = ticket.id, "context reclamation panicked");
                        }
                    }
                }
                ReaperMsg::Flush(ack) => {
                    let _ = ack.send(());
                }
            }
        }
        tracing::error!("cleanup channel closed; reclamation worker exiting");
    }
}

/// Queues `reclaim` for the worker thread. Falls back to running it inline if
/// the worker is gone, so the context is freed either way.
pub(crate) fn enqueue(reclaim: Box<dyn FnOnce() + Send>) {
    let id = NEXT_TICKET_ID.fetch_add(1, Ordering::Relaxed);
    REAPER.pending.lock().insert(id);
    let ticket = CleanupTicket { id, reclaim };
    if let Err(mpsc::SendError(msg)) = REAPER.tx.lock().send(ReaperMsg::Reclaim(ticket)) {
        REAPER.pending.lock().remove(&id);
        if let ReaperMsg::Reclaim(ticket) = msg {
            (ticket.reclaim)();
        }
    }
}

/// Number of tickets enqueued but not yet reclaimed.
#[cfg(test)]
pub(crate) fn pending_count() -> usize {
    REAPER.pending.lock().len()
}

/// Blocks until every ticket enqueued before this call has been processed.
#[cfg(test)]
pub(crate) fn flush() {
    let (ack_tx, ack_rx) = mpsc::channel();
    if REAPER.tx.lock().send(ReaperMsg::Flush(ack_tx)).is_ok() {
        let _ = ack_rx.recv();
    }
}
