// Author: Dustin Pilgrim
// License: MIT

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use eventline::{debug, info};
use monlayout_core::{Error, Result};

use crate::client::DisplayConfigClient;
use crate::error::from_zbus;
use crate::protocol::MONITORS_CHANGED;

/// The service reported that hardware or configuration changed. Any snapshot
/// held by the receiver is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent;

/// Change notifications delivered through a channel.
///
/// The listener thread exits once the signal stream closes, or on the first
/// signal after this value is dropped.
pub struct Subscription {
    events: Receiver<ChangeEvent>,
    _listener: JoinHandle<()>,
}

pub fn subscribe(client: &DisplayConfigClient) -> Result<Subscription> {
    let signals = client
        .proxy()
        .receive_signal(MONITORS_CHANGED)
        .map_err(|e| from_zbus(MONITORS_CHANGED, None, e))?;

    let (tx, rx) = mpsc::channel();

    let listener = thread::Builder::new()
        .name("monitors-changed".into())
        .spawn(move || {
            for _msg in signals {
                debug!("{MONITORS_CHANGED} received");
                if tx.send(ChangeEvent).is_err() {
                    break;
                }
            }
            debug!("{MONITORS_CHANGED} listener stopped");
        })
        .map_err(|e| Error::ServiceUnreachable(format!("spawn signal listener: {e}")))?;

    info!("subscribed to {MONITORS_CHANGED}");

    Ok(Subscription {
        events: rx,
        _listener: listener,
    })
}

impl Subscription {
    /// Block until the next change. Changes that piled up meanwhile are
    /// folded into the one returned. `None` once the stream has ended.
    pub fn wait(&self) -> Option<ChangeEvent> {
        let ev = self.events.recv().ok()?;
        while self.events.try_recv().is_ok() {}
        Some(ev)
    }

    /// Like [`Subscription::wait`], giving up after `timeout`.
    pub fn wait_timeout(&self, timeout: Duration) -> std::result::Result<ChangeEvent, RecvTimeoutError> {
        let ev = self.events.recv_timeout(timeout)?;
        while self.events.try_recv().is_ok() {}
        Ok(ev)
    }

    pub fn events(&self) -> &Receiver<ChangeEvent> {
        &self.events
    }
}
