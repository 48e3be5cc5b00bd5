//! Test utilities and fixtures for Burrow development.
//!
//! Provides a [`RecordingPresenter`] that captures every visual update a
//! playfield pushes, plus layout fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::{Arc, Mutex, MutexGuard};

use burrow_core::{DepthKey, Presenter, TokenId, Vec2, OFF_STAGE};

/// One update received by a [`RecordingPresenter`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PresenterEvent {
    Place { token: TokenId, position: Vec2 },
    Depth { token: TokenId, depth: DepthKey },
}

/// Shared handle onto the events a [`RecordingPresenter`] received.
///
/// The presenter itself is moved into the playfield; keep the log to
/// inspect what it saw.
#[derive(Clone, Debug, Default)]
pub struct PresenterLog {
    events: Arc<Mutex<Vec<PresenterEvent>>>,
}

impl PresenterLog {
    fn lock(&self) -> MutexGuard<'_, Vec<PresenterEvent>> {
        // A panicking test thread poisons the lock; the data is still usable.
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Every event so far, in arrival order.
    pub fn events(&self) -> Vec<PresenterEvent> {
        self.lock().clone()
    }

    /// Every position `token` was placed at, in order.
    pub fn placements(&self, token: TokenId) -> Vec<Vec2> {
        self.lock()
            .iter()
            .filter_map(|e| match *e {
                PresenterEvent::Place { token: t, position } if t == token => Some(position),
                _ => None,
            })
            .collect()
    }

    /// The last position `token` was placed at.
    pub fn last_position(&self, token: TokenId) -> Option<Vec2> {
        self.placements(token).last().copied()
    }

    /// Whether `token` was last seen parked off-stage.
    pub fn is_parked(&self, token: TokenId) -> bool {
        self.last_position(token) == Some(OFF_STAGE)
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// [`Presenter`] that appends every update to a shared [`PresenterLog`].
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    log: PresenterLog,
}

impl RecordingPresenter {
    /// A presenter and the log it writes to.
    pub fn new() -> (Self, PresenterLog) {
        let log = PresenterLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl Presenter for RecordingPresenter {
    fn place(&mut self, token: TokenId, position: Vec2) {
        self.log
            .lock()
            .push(PresenterEvent::Place { token, position });
    }

    fn set_depth(&mut self, token: TokenId, depth: DepthKey) {
        self.log.lock().push(PresenterEvent::Depth { token, depth });
    }
}
