// src/discovery/worker.rs

//! Cancellable background enumeration
//!
//! A producer iterator runs on its own thread and streams records back over
//! a channel. Cancellation is cooperative: the worker checks the shared
//! token between records and reports the partial count when it stops.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::{Error, Result};

/// Shared stop flag for a running enumeration
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the worker stop before producing another record
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Progress messages sent by an enumeration worker
#[derive(Debug, Clone, PartialEq)]
pub enum EnumerationEvent<T> {
    /// One record was produced
    Discovered(T),
    /// The producer is exhausted or the worker was cancelled
    Finished { count: usize, cancelled: bool },
    /// The producer reported an error; no further events follow
    Failed(String),
}

/// Handle to a running enumeration
pub struct Enumeration<T> {
    pub events: Receiver<EnumerationEvent<T>>,
    pub token: CancellationToken,
    handle: JoinHandle<()>,
}

impl<T> Enumeration<T> {
    /// Wait for the worker thread to exit
    pub fn join(self) -> Result<()> {
        self.handle
            .join()
            .map_err(|_| Error::Enumeration("enumeration worker panicked".to_string()))
    }
}

/// Run `producer` on a worker thread, streaming its records as events.
///
/// The producer is built on the worker thread, so expensive setup does not
/// block the caller. A send failure means the receiver is gone and the
/// worker stops quietly.
pub fn spawn_enumeration<T, I, F>(
    label: &str,
    producer: F,
    token: CancellationToken,
) -> Result<Enumeration<T>>
where
    T: Send + 'static,
    I: IntoIterator<Item = Result<T>>,
    F: FnOnce() -> Result<I> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let worker_token = token.clone();
    let name = format!("lunx-{}", label);
    let label = label.to_string();

    let handle = thread::Builder::new().name(name).spawn(move || {
        let records = match producer() {
            Ok(records) => records,
            Err(e) => {
                warn!("{} enumeration failed to start: {}", label, e);
                let _ = tx.send(EnumerationEvent::Failed(e.to_string()));
                return;
            }
        };

        let mut count = 0;
        let mut cancelled = false;
        for record in records {
            // Only a record that is actually pending counts as stopping early
            if worker_token.is_cancelled() {
                cancelled = true;
                break;
            }
            match record {
                Ok(record) => {
                    if tx.send(EnumerationEvent::Discovered(record)).is_err() {
                        debug!("{} receiver dropped, stopping", label);
                        return;
                    }
                    count += 1;
                }
                Err(e) => {
                    warn!("{} enumeration failed: {}", label, e);
                    let _ = tx.send(EnumerationEvent::Failed(e.to_string()));
                    return;
                }
            }
        }

        debug!("{} enumeration finished: {} records (cancelled: {})", label, count, cancelled);
        let _ = tx.send(EnumerationEvent::Finished { count, cancelled });
    })?;

    Ok(Enumeration {
        events: rx,
        token,
        handle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::sync_channel;

    #[test]
    fn test_streams_all_records() {
        let run = spawn_enumeration(
            "numbers",
            || Ok((1..=3).map(Ok)),
            CancellationToken::new(),
        )
        .unwrap();
        let events: Vec<EnumerationEvent<i32>> = run.events.iter().collect();
        assert_eq!(
            events,
            vec![
                EnumerationEvent::Discovered(1),
                EnumerationEvent::Discovered(2),
                EnumerationEvent::Discovered(3),
                EnumerationEvent::Finished {
                    count: 3,
                    cancelled: false
                },
            ]
        );
        run.join().unwrap();
    }

    #[test]
    fn test_cancel_reports_partial_count() {
        // The producer blocks on `gate` so cancellation lands mid-stream
        let (gate_tx, gate_rx) = sync_channel::<()>(0);
        let token = CancellationToken::new();
        let run = spawn_enumeration(
            "gated",
            move || Ok((0..100).map(move |i| gate_rx.recv().map(|_| i).map_err(|e| Error::Enumeration(e.to_string())))),
            token.clone(),
        )
        .unwrap();

        gate_tx.send(()).unwrap();
        assert_eq!(run.events.recv().unwrap(), EnumerationEvent::Discovered(0));
        token.cancel();
        gate_tx.send(()).unwrap();

        let rest: Vec<_> = run.events.iter().collect();
        assert_eq!(
            rest,
            vec![EnumerationEvent::Finished {
                count: 1,
                cancelled: true
            }]
        );
        run.join().unwrap();
    }

    #[test]
    fn test_cancel_after_last_record_is_not_early() {
        let (gate_tx, gate_rx) = sync_channel::<()>(0);
        let token = CancellationToken::new();
        let run = spawn_enumeration(
            "single",
            move || Ok((0..1).map(move |i| gate_rx.recv().map(|_| i).map_err(|e| Error::Enumeration(e.to_string())))),
            token.clone(),
        )
        .unwrap();

        gate_tx.send(()).unwrap();
        assert_eq!(run.events.recv().unwrap(), EnumerationEvent::Discovered(0));
        token.cancel();

        assert_eq!(
            run.events.recv().unwrap(),
            EnumerationEvent::Finished {
                count: 1,
                cancelled: false
            }
        );
        run.join().unwrap();
    }

    #[test]
    fn test_producer_error_is_reported() {
        let run = spawn_enumeration::<i32, Vec<Result<i32>>, _>(
            "broken",
            || Err(Error::NotFound("profile".to_string())),
            CancellationToken::new(),
        )
        .unwrap();
        match run.events.recv().unwrap() {
            EnumerationEvent::Failed(msg) => assert!(msg.contains("profile")),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(run.events.recv().is_err());
    }
}
