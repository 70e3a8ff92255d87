use std::io::{self, BufRead, Write};

use tilde::application::ShellPrompt;

/// Reads follow-up commands from stdin, one per line.
pub struct StdinPrompt {
    show_prompt: bool,
}

impl StdinPrompt {
    pub fn new(show_prompt: bool) -> Self {
        Self { show_prompt }
    }
}

impl ShellPrompt for StdinPrompt {
    fn read_command(&mut self) -> Option<String> {
        if self.show_prompt {
            // stderr keeps stdout clean for NDJSON consumers
            eprint!("> ");
            let _ = io::stderr().flush();
        }

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!("could not read command: {}", e);
                None
            }
        }
    }
}
