//! Ctrl+C relay
//!
//! `ctrlc` allows a single process-wide handler, while watch sessions come
//! and go. The relay installs the handler once and forwards each interrupt
//! to whichever session is currently connected.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use crate::error::{TildeError, TildeResult};
use crate::infrastructure::source::Signal;

type Target = Arc<Mutex<Option<Sender<Signal>>>>;

/// Routes SIGINT to the active watch session.
#[derive(Clone, Default)]
pub struct InterruptRelay {
    target: Target,
    installed: Arc<AtomicBool>,
}

impl InterruptRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the process handler. Call once per process.
    pub fn install(&self) -> TildeResult<()> {
        let relay = self.clone();
        ctrlc::set_handler(move || {
            if !relay.deliver() {
                std::process::exit(130);
            }
        })
        .map_err(|e| TildeError::Io(std::io::Error::other(e.to_string())))?;
        self.installed.store(true, Ordering::SeqCst);
        Ok(())
    }

    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }

    pub fn connect(&self, tx: Sender<Signal>) {
        if let Ok(mut target) = self.target.lock() {
            *target = Some(tx);
        }
    }

    pub fn disconnect(&self) {
        if let Ok(mut target) = self.target.lock() {
            *target = None;
        }
    }

    /// Forward one interrupt; false when no session is listening.
    pub fn deliver(&self) -> bool {
        match self.target.lock() {
            Ok(target) => target
                .as_ref()
                .is_some_and(|tx| tx.send(Signal::Interrupt).is_ok()),
            Err(_) => false,
        }
    }
}
