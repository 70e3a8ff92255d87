use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use tilde::application::watch::WatchEvent;

/// Banner printed when a fresh watch session starts.
pub fn render_watch_header(
    command: &str,
    watching: &[String],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let title = ColoredText::info("Tilde Watch").bold().render(supports_color);
    let mut out = format!(
        "{} {}\n",
        Icon::Watch.colored(supports_color, supports_unicode),
        title
    );

    let rows = [
        ("Command:", command.to_string()),
        ("Watching:", watching.join(", ")),
        ("Keys:", "r rebuild, x exit, Enter prompt".to_string()),
    ];
    for (label, value) in rows {
        let label = ColoredText::dim(format!("{:<9}", label)).render(supports_color);
        out.push_str(&format!("  {} {}\n", label, value));
    }
    out
}

pub fn render_watch_event(
    timestamp: &str,
    event: &WatchEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = ColoredText::dim(format!("[{}]", timestamp)).render(supports_color);

    match event {
        WatchEvent::WatchStarted {
            watched_command,
            iteration,
            ..
        } => {
            let resumed = if *iteration > 0 {
                format!(" (resuming after build #{})", iteration)
            } else {
                String::new()
            };
            format!(
                "{} {} Watching: {}{}\n",
                prefix,
                Icon::Watch.colored(supports_color, supports_unicode),
                watched_command,
                resumed
            )
        }
        WatchEvent::BuildStarted { iteration } => format!(
            "{} {} Build #{}\n",
            prefix,
            Icon::Progress.colored(supports_color, supports_unicode),
            iteration
        ),
        WatchEvent::BuildComplete { iteration, success } => {
            let (icon, verdict) = if *success {
                (Icon::Success, ColoredText::success("succeeded"))
            } else {
                (Icon::Error, ColoredText::error("failed"))
            };
            format!(
                "{} {} Build #{} {}\n",
                prefix,
                icon.colored(supports_color, supports_unicode),
                iteration,
                verdict.render(supports_color)
            )
        }
        WatchEvent::Waiting { .. } => format!(
            "{} {} Waiting for source changes... (press enter to interrupt)\n",
            prefix,
            Icon::Pending.colored(supports_color, supports_unicode)
        ),
        WatchEvent::FileChanged { path, kind } => format!(
            "{} {} Changed: {} ({})\n",
            prefix,
            Icon::Arrow.colored(supports_color, supports_unicode),
            path,
            kind
        ),
        WatchEvent::WatchTerminated { action, iteration } => format!(
            "{} {} Watch stopped after {} build{} ({})\n",
            prefix,
            Icon::Stop.colored(supports_color, supports_unicode),
            iteration,
            if *iteration == 1 { "" } else { "s" },
            action.replace('_', " ")
        ),
        WatchEvent::Error { message } => format!(
            "{} {} Error: {}\n",
            prefix,
            Icon::Error.colored(supports_color, supports_unicode),
            message
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn render(events: &[WatchEvent]) -> String {
        events
            .iter()
            .map(|e| render_watch_event("12:00:00", e, false, false))
            .collect()
    }

    #[test]
    fn renders_started_event_with_watch_icon() {
        let event = WatchEvent::WatchStarted {
            watched_command: "cargo build".to_string(),
            iteration: 0,
            watching: vec![".".to_string()],
        };
        let rendered = render_watch_event("00:00:00", &event, false, false);
        assert_eq!(rendered, "[00:00:00] [~] Watching: cargo build\n");
    }

    #[test]
    fn renders_a_full_session() {
        let session = render(&[
            WatchEvent::WatchStarted {
                watched_command: "cargo test".to_string(),
                iteration: 2,
                watching: vec!["/work".to_string()],
            },
            WatchEvent::BuildStarted { iteration: 3 },
            WatchEvent::BuildComplete {
                iteration: 3,
                success: false,
            },
            WatchEvent::Waiting { iteration: 3 },
            WatchEvent::FileChanged {
                path: "src/lib.rs".to_string(),
                kind: "updated".to_string(),
            },
            WatchEvent::BuildStarted { iteration: 4 },
            WatchEvent::BuildComplete {
                iteration: 4,
                success: true,
            },
            WatchEvent::Waiting { iteration: 4 },
            WatchEvent::WatchTerminated {
                action: "cancel_watch".to_string(),
                iteration: 4,
            },
        ]);

        assert_snapshot!(session, @r"
        [12:00:00] [~] Watching: cargo test (resuming after build #2)
        [12:00:00] [..] Build #3
        [12:00:00] [FAIL] Build #3 failed
        [12:00:00] [ ] Waiting for source changes... (press enter to interrupt)
        [12:00:00] [>] Changed: src/lib.rs (updated)
        [12:00:00] [..] Build #4
        [12:00:00] [OK] Build #4 succeeded
        [12:00:00] [ ] Waiting for source changes... (press enter to interrupt)
        [12:00:00] [x] Watch stopped after 4 builds (cancel watch)
        ");
    }

    #[test]
    fn renders_error_and_single_build() {
        let out = render(&[
            WatchEvent::Error {
                message: "signal channel closed".to_string(),
            },
            WatchEvent::WatchTerminated {
                action: "handle_error".to_string(),
                iteration: 1,
            },
        ]);
        assert_snapshot!(out, @r"
        [12:00:00] [FAIL] Error: signal channel closed
        [12:00:00] [x] Watch stopped after 1 build (handle error)
        ");
    }

    #[test]
    fn header_lists_command_and_roots() {
        let header = render_watch_header(
            "make",
            &["src".to_string(), "include".to_string()],
            false,
            true,
        );
        assert_snapshot!(header, @r"
        ⟳ Tilde Watch
          Command:  make
          Watching: src, include
          Keys:     r rebuild, x exit, Enter prompt
        ");
    }
}
