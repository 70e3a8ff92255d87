//! Live watch backend
//!
//! Wires the real signal sources (notify, keyboard, Ctrl+C) into a
//! [`ChannelActionSource`] and runs the build command through a
//! [`CommandRunner`] on every cycle.

use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc::channel;

use crate::application::session::WatchBackend;
use crate::config::Config;
use crate::domain::entities::Action;
use crate::domain::ports::CommandRunner;
use crate::domain::services::InputParser;
use crate::domain::value_objects::Iteration;
use crate::error::{TildeError, TildeResult};
use crate::infrastructure::{
    ChannelActionSource, IgnoreFilter, InterruptRelay, KeyboardReader, NotifyEventSource,
};

use super::driver::{WatchLoop, WatchOutcome};
use super::event::{WatchEvent, WatchOptions};

type Reporter = Rc<dyn Fn(WatchEvent)>;

/// Watch use case backed by the file system and terminal.
pub struct WatchUseCase<'a> {
    options: WatchOptions,
    runner: &'a dyn CommandRunner,
    reporter: Reporter,
    interrupts: Option<InterruptRelay>,
}

impl<'a> WatchUseCase<'a> {
    pub fn new(options: WatchOptions, runner: &'a dyn CommandRunner) -> Self {
        Self {
            options,
            runner,
            reporter: Rc::new(|_| {}),
            interrupts: None,
        }
    }

    /// Receive progress events
    pub fn on_event(mut self, reporter: impl Fn(WatchEvent) + 'static) -> Self {
        self.reporter = Rc::new(reporter);
        self
    }

    /// Route Ctrl+C to the running watch
    pub fn with_interrupts(mut self, relay: InterruptRelay) -> Self {
        self.interrupts = Some(relay);
        self
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    fn roots(&self) -> TildeResult<(PathBuf, Vec<PathBuf>)> {
        let root = self.options.project_root.canonicalize()?;
        let paths = self
            .options
            .watch_paths()
            .iter()
            .map(|p| p.canonicalize())
            .collect::<Result<Vec<_>, _>>()?;
        Ok((root, paths))
    }

    fn reload_files(&self) -> Vec<PathBuf> {
        self.options
            .reload_files()
            .iter()
            .map(|p| canonical_file(p))
            .collect()
    }

    fn fail(&self, error: TildeError, start: Iteration) -> WatchOutcome {
        (self.reporter)(WatchEvent::Error {
            message: error.to_string(),
        });
        let action = Action::handle_error(error);
        (self.reporter)(WatchEvent::terminated(&action, start));
        WatchOutcome {
            action,
            iteration: start,
        }
    }
}

impl WatchBackend for WatchUseCase<'_> {
    fn watch(&mut self, command: &str, start: Iteration) -> WatchOutcome {
        let config = &self.options.config;

        let (root, paths) = match self.roots() {
            Ok(roots) => roots,
            Err(e) => return self.fail(e, start),
        };
        let filter = match IgnoreFilter::new(&root, &config.watch.ignore) {
            Ok(filter) => filter,
            Err(e) => return self.fail(e, start),
        };

        let reload_files = self.reload_files();
        let (tx, rx) = channel();
        let subscription = match NotifyEventSource::start(&paths, &reload_files, filter, tx.clone())
        {
            Ok(subscription) => subscription,
            Err(e) => return self.fail(e, start),
        };
        let keyboard = self
            .options
            .interactive
            .then(|| KeyboardReader::spawn(tx.clone()));
        if let Some(relay) = &self.interrupts {
            relay.connect(tx.clone());
        }
        drop(tx);

        (self.reporter)(WatchEvent::WatchStarted {
            watched_command: command.to_string(),
            iteration: start.get(),
            watching: subscription
                .roots()
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        });

        let reporter = Rc::clone(&self.reporter);
        let mut source = ChannelActionSource::new(rx, config.watch.trigger.policy())
            .with_debounce(config.watch.debounce())
            .reload_on(reload_files)
            .with_parser(
                InputParser::new().with_cancel_command(config.termination.cancel_command.clone()),
            )
            .on_change(move |event| reporter(WatchEvent::file_changed(event)));

        let runner = self.runner;
        let reporter = Rc::clone(&self.reporter);
        let mut runs = start;
        let task = || {
            runs = runs.next();
            let success = match runner.run(command) {
                Ok(success) => success,
                Err(e) => {
                    reporter(WatchEvent::Error {
                        message: format!("could not run '{}': {}", command, e),
                    });
                    false
                }
            };
            reporter(WatchEvent::BuildComplete {
                iteration: runs.get(),
                success,
            });
        };

        let report = Rc::clone(&self.reporter);
        let outcome = WatchLoop::starting_at(start).run_source(task, &mut source, |event| report(event));

        if let Some(relay) = &self.interrupts {
            relay.disconnect();
        }
        drop(keyboard);
        drop(subscription);

        outcome
    }

    fn reload(&mut self) -> TildeResult<Config> {
        let config = Config::reload(&self.options.project_root, &self.options.overrides)?;
        tracing::info!("configuration reloaded");
        self.options.config = config.clone();
        Ok(config)
    }
}

/// Canonical form of a file that may not exist yet; only its directory
/// has to.
fn canonical_file(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(dir), Some(name)) => dir
            .canonicalize()
            .map(|dir| dir.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::{NoPrompt, Session, SessionState};
    use crate::config::{CliOverrides, PROJECT_CONFIG};
    use std::cell::{Cell, RefCell};
    use std::fs;
    use tempfile::tempdir;

    /// Runner that interrupts the watch on its `stop_after`-th run and
    /// otherwise writes `write` to simulate an edit.
    struct InterruptingRunner {
        relay: InterruptRelay,
        stop_after: u32,
        runs: Cell<u32>,
        write: Option<(PathBuf, &'static str)>,
    }

    impl CommandRunner for InterruptingRunner {
        fn run(&self, _command: &str) -> TildeResult<bool> {
            let run = self.runs.get() + 1;
            self.runs.set(run);
            if run >= self.stop_after {
                self.relay.deliver();
            } else if let Some((path, contents)) = &self.write {
                fs::write(path, contents)?;
            }
            Ok(true)
        }
    }

    fn options(root: &Path) -> WatchOptions {
        WatchOptions::new(root.to_path_buf()).with_interactive(false)
    }

    #[test]
    fn interrupt_after_first_build_cancels() {
        let dir = tempdir().unwrap();
        let relay = InterruptRelay::new();
        let runner = InterruptingRunner {
            relay: relay.clone(),
            stop_after: 1,
            runs: Cell::new(0),
            write: None,
        };
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);

        let mut use_case = WatchUseCase::new(options(dir.path()), &runner)
            .with_interrupts(relay)
            .on_event(move |e| sink.borrow_mut().push(e));
        let outcome = use_case.watch("make", Iteration::ZERO);

        assert_eq!(outcome.action, Action::CancelWatch);
        assert_eq!(outcome.iteration, Iteration::new(1));

        let events = events.borrow();
        assert!(matches!(events[0], WatchEvent::WatchStarted { iteration: 0, .. }));
        assert!(events.contains(&WatchEvent::BuildComplete {
            iteration: 1,
            success: true
        }));
        assert!(matches!(events.last(), Some(WatchEvent::WatchTerminated { .. })));
    }

    #[test]
    fn file_change_triggers_another_build() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        let relay = InterruptRelay::new();
        let runner = InterruptingRunner {
            relay: relay.clone(),
            stop_after: 2,
            runs: Cell::new(0),
            write: Some((dir.path().join("src/generated.rs"), "pub fn generated() {}")),
        };

        let mut use_case = WatchUseCase::new(options(dir.path()), &runner).with_interrupts(relay);
        let outcome = use_case.watch("make", Iteration::new(4));

        assert_eq!(outcome.action, Action::CancelWatch);
        assert_eq!(outcome.iteration, Iteration::new(6));
    }

    const EDITED_CONFIG: &str = "[termination]\ncancel_command = \"shell\"\n";

    fn project_with_config(root: &Path) -> PathBuf {
        let config_path = root.join(PROJECT_CONFIG);
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, "[watch]\n").unwrap();
        config_path
    }

    #[test]
    fn config_edit_ends_the_watch_with_reload() {
        let dir = tempdir().unwrap();
        let config_path = project_with_config(dir.path());
        let relay = InterruptRelay::new();
        let runner = InterruptingRunner {
            relay: relay.clone(),
            stop_after: 2,
            runs: Cell::new(0),
            write: Some((config_path, EDITED_CONFIG)),
        };

        let mut use_case = WatchUseCase::new(options(dir.path()), &runner).with_interrupts(relay);
        let outcome = use_case.watch("make", Iteration::ZERO);

        assert_eq!(outcome.action, Action::Reload);
        assert_eq!(outcome.iteration, Iteration::new(1));
        assert_eq!(runner.runs.get(), 1);
    }

    #[test]
    fn session_reloads_and_resumes_after_config_edit() {
        let dir = tempdir().unwrap();
        let config_path = project_with_config(dir.path());
        let relay = InterruptRelay::new();
        let runner = InterruptingRunner {
            relay: relay.clone(),
            stop_after: 2,
            runs: Cell::new(0),
            write: Some((config_path, EDITED_CONFIG)),
        };
        let starts = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&starts);

        let mut use_case = WatchUseCase::new(options(dir.path()), &runner)
            .with_interrupts(relay)
            .on_event(move |e| {
                if let WatchEvent::WatchStarted { iteration, .. } = e {
                    sink.borrow_mut().push(iteration);
                }
            });
        let mut prompt = NoPrompt;
        let state = Session::new(&runner, &mut use_case, &mut prompt)
            .run(SessionState::new(["~ make"]));

        assert!(!state.is_failed());
        // Resumed with the counter carried over from the first session
        assert_eq!(*starts.borrow(), vec![0, 1]);
        assert_eq!(runner.runs.get(), 2);
        assert_eq!(use_case.options().config.termination.cancel_command, "shell");
    }

    #[test]
    fn missing_watch_path_fails_without_running() {
        let dir = tempdir().unwrap();
        let runner = crate::domain::ports::RecordingRunner::new();
        let overrides = CliOverrides {
            paths: vec![PathBuf::from("does-not-exist")],
            ..CliOverrides::default()
        };
        let mut use_case =
            WatchUseCase::new(options(dir.path()).with_overrides(overrides), &runner);

        let outcome = use_case.watch("make", Iteration::new(2));

        assert!(matches!(outcome.action, Action::HandleError(_)));
        assert_eq!(outcome.iteration, Iteration::new(2));
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn reload_picks_up_new_config() {
        let dir = tempdir().unwrap();
        let runner = crate::domain::ports::RecordingRunner::new();
        let mut use_case = WatchUseCase::new(options(dir.path()), &runner);

        let config_path = dir.path().join(PROJECT_CONFIG);
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, "[termination]\ncancel_command = \"shell\"\n").unwrap();

        let config = use_case.reload().unwrap();
        assert_eq!(config.termination.cancel_command, "shell");
        assert_eq!(use_case.options().config.termination.cancel_command, "shell");
    }
}
