use anyhow::Result;

use tilde::application::watch::{WatchEvent, WatchOptions, WatchUseCase};
use tilde::application::{Session, SessionState, TerminationHandler};
use tilde::config::Config;
use tilde::infrastructure::{InterruptRelay, ShellRunner};
use tilde::presentation::cli::Cli;

use super::prompt::StdinPrompt;
use crate::ui::context::UiContext;
use crate::ui::views::watch::{render_watch_event, render_watch_header};

/// Run the command queue from the CLI; returns the process exit code.
pub fn cmd_session(cli: &Cli) -> Result<i32> {
    let project_root = std::env::current_dir()?;

    let overrides = cli.overrides();
    let config = overrides.apply(Config::load_or_default(Some(&project_root)));
    let ui = UiContext::new(cli.json, cli.verbose, &config);

    let relay = InterruptRelay::new();
    relay.install()?;

    let runner = ShellRunner::new().in_dir(&project_root).quiet(ui.json);
    let handler = TerminationHandler::from(&config.termination);

    let options = WatchOptions::new(project_root)
        .with_config(config)
        .with_overrides(overrides)
        .with_interactive(cli.reads_input() && ui.interactive());

    let mut backend = WatchUseCase::new(options, &runner)
        .with_interrupts(relay)
        .on_event(move |event| report(&ui, &event));
    let mut prompt = StdinPrompt::new(!ui.json);

    let state = Session::new(&runner, &mut backend, &mut prompt)
        .with_handler(handler)
        .run(SessionState::new(cli.queue()));

    if state.is_failed() {
        tracing::debug!("session ended in a failed state");
        return Ok(1);
    }
    Ok(0)
}

fn report(ui: &UiContext, event: &WatchEvent) {
    if ui.json {
        println!("{}", event.to_json());
        return;
    }

    if let WatchEvent::WatchStarted {
        watched_command,
        watching,
        iteration: 0,
    } = event
    {
        print!(
            "{}",
            render_watch_header(watched_command, watching, ui.color, ui.unicode)
        );
    }

    let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
    let rendered = render_watch_event(&timestamp, event, ui.color, ui.unicode);
    match event {
        WatchEvent::Error { .. } => eprint!("{rendered}"),
        _ => print!("{rendered}"),
    }
}
