//! Fan-in action source
//!
//! File watcher, keyboard reader and Ctrl+C relay all feed one channel of
//! [`Signal`]s. Each call to `next_action` blocks for the first signal,
//! drains whatever else is already queued as the same tick, classifies
//! every signal into an action and lets the aggregator pick one. Changes
//! to reload files become `Reload`; everything else goes through the
//! trigger policy.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Instant;

use crate::domain::entities::{Action, FileEvent};
use crate::domain::policies::{if_changed, DebounceSettings, TriggerPolicy};
use crate::domain::ports::ActionSource;
use crate::domain::services::{aggregate, InputParser};
use crate::domain::value_objects::Iteration;
use crate::error::TildeError;
use crate::infrastructure::events::gate::{self, DebounceGate};

/// Raw input to a watch session.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    File(FileEvent),
    Key(char),
    Interrupt,
}

/// What an action in the current tick came from.
#[derive(Debug)]
enum Origin {
    File(FileEvent),
    Key,
    Interrupt,
}

type ChangeReporter = Box<dyn Fn(&FileEvent)>;

/// [`ActionSource`] backed by an mpsc channel.
pub struct ChannelActionSource {
    rx: Receiver<Signal>,
    gate: DebounceGate,
    policy: Box<dyn TriggerPolicy>,
    reload_files: HashSet<PathBuf>,
    reload_policy: Box<dyn TriggerPolicy>,
    parser: InputParser,
    on_change: Option<ChangeReporter>,
}

impl ChannelActionSource {
    pub fn new(rx: Receiver<Signal>, policy: Box<dyn TriggerPolicy>) -> Self {
        Self {
            rx,
            gate: DebounceGate::new(DebounceSettings::default()),
            policy,
            reload_files: HashSet::new(),
            reload_policy: Box::new(if_changed(Action::Reload)),
            parser: InputParser::new(),
            on_change: None,
        }
    }

    pub fn with_debounce(mut self, settings: DebounceSettings) -> Self {
        self.gate = DebounceGate::new(settings);
        self
    }

    /// Content changes to these files end the watch with `Reload`
    pub fn reload_on(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.reload_files.extend(paths);
        self
    }

    pub fn with_parser(mut self, parser: InputParser) -> Self {
        self.parser = parser;
        self
    }

    /// Called with the file event that won a tick
    pub fn on_change(mut self, reporter: impl Fn(&FileEvent) + 'static) -> Self {
        self.on_change = Some(Box::new(reporter));
        self
    }

    /// Block until at least one signal arrives or a quarantine deadline passes.
    fn wait(&self) -> Result<Vec<Signal>, TildeError> {
        let first = match self.gate.next_deadline() {
            Some(deadline) => match self.rx.recv_timeout(gate::until(deadline, Instant::now())) {
                Ok(signal) => Some(signal),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => return Err(TildeError::ChannelClosed),
            },
            None => Some(self.rx.recv().map_err(|_| TildeError::ChannelClosed)?),
        };

        let mut tick: Vec<Signal> = first.into_iter().collect();
        tick.extend(self.rx.try_iter());
        Ok(tick)
    }

    fn classify(&mut self, iteration: Iteration, tick: Vec<Signal>, now: Instant) -> Vec<(Action, Origin)> {
        let mut candidates = Vec::new();

        for signal in tick {
            match signal {
                Signal::File(event) => {
                    for ready in self.gate.offer(event, now) {
                        let action = self.decide(iteration, &ready);
                        candidates.push((action, Origin::File(ready)));
                    }
                }
                Signal::Key(c) => {
                    if let Some(action) = self.parser.parse(c) {
                        candidates.push((action, Origin::Key));
                    }
                }
                Signal::Interrupt => candidates.push((Action::CancelWatch, Origin::Interrupt)),
            }
        }

        for ready in self.gate.flush(now) {
            let action = self.decide(iteration, &ready);
            candidates.push((action, Origin::File(ready)));
        }

        candidates
    }

    fn decide(&self, iteration: Iteration, event: &FileEvent) -> Action {
        if self.reload_files.contains(event.path()) {
            self.reload_policy.decide(iteration, event)
        } else {
            self.policy.decide(iteration, event)
        }
    }
}

impl ActionSource for ChannelActionSource {
    fn on_start(&mut self, _iteration: Iteration) -> anyhow::Result<Action> {
        Ok(Action::Ignore)
    }

    fn next_action(&mut self, iteration: Iteration) -> anyhow::Result<Action> {
        loop {
            let tick = self.wait()?;
            let now = Instant::now();
            let candidates = self.classify(iteration, tick, now);

            // Every path that would have triggered counts toward anti-entropy,
            // not only the one that won the tick.
            let triggering: Vec<PathBuf> = candidates
                .iter()
                .filter_map(|(action, origin)| match origin {
                    Origin::File(event) if *action != Action::Ignore => {
                        Some(event.path().to_path_buf())
                    }
                    _ => None,
                })
                .collect();
            for path in &triggering {
                self.gate.note_trigger(path, now);
            }

            match aggregate(candidates) {
                Some((Action::Ignore, _)) | None => continue,
                Some((action, origin)) => {
                    match &origin {
                        Origin::File(event) => {
                            if let Some(report) = &self.on_change {
                                report(event);
                            }
                        }
                        Origin::Key => tracing::debug!(%action, "keyboard input"),
                        Origin::Interrupt => tracing::debug!("interrupted"),
                    }
                    return Ok(action);
                }
            }
        }
    }
}
