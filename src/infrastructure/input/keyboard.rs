//! Keyboard reader
//!
//! Background thread that forwards keystrokes as [`Signal::Key`]. The
//! terminal stays in cooked mode so build output is printed untouched,
//! which means keys arrive once the line is submitted. [`LineBuffer`]
//! turns those submitted lines back into the keys the parser expects.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::infrastructure::source::Signal;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Convert a key event to the character the input parser understands.
pub fn key_to_char(key: KeyEvent) -> Option<char> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Enter => Some('\n'),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => None,
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

/// Line discipline for a terminal in cooked mode.
///
/// A non-empty line yields its characters without the newline that
/// submitted it, so `r` then Enter is a rebuild and not also a cancel.
/// Only an empty line yields `'\n'`.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<char>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key event; returns the characters released by it.
    pub fn push(&mut self, key: KeyEvent) -> Vec<char> {
        match key_to_char(key) {
            Some('\n') if self.pending.is_empty() => vec!['\n'],
            Some('\n') => std::mem::take(&mut self.pending),
            Some(c) => {
                self.pending.push(c);
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}

/// Running reader thread. Stops and joins on drop.
pub struct KeyboardReader {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl KeyboardReader {
    pub fn spawn(tx: Sender<Signal>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            if let Err(e) = read_keys(&flag, &tx) {
                tracing::warn!("keyboard input unavailable: {}", e);
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }
}

impl Drop for KeyboardReader {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn read_keys(stop: &AtomicBool, tx: &Sender<Signal>) -> std::io::Result<()> {
    let mut line = LineBuffer::new();
    while !stop.load(Ordering::SeqCst) {
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            for c in line.push(key) {
                if tx.send(Signal::Key(c)).is_err() {
                    return Ok(());
                }
            }
        }
    }
    Ok(())
}
