//! Input Parser
//!
//! Classifies keystrokes typed while a watch session is idle:
//!
//! | Key            | Action                         |
//! |----------------|--------------------------------|
//! | `x` / `X`      | `Run(["exit"])`                |
//! | `r` / `R`      | `Trigger`                      |
//! | Enter          | `Run([<cancel command>])`      |
//! | anything else  | nothing                        |

use crate::domain::entities::Action;

/// Command queued when the user presses Enter: drop back to the shell if
/// nothing else is pending.
pub const DEFAULT_CANCEL_COMMAND: &str = "iflast shell";

/// Command queued when the user presses `x`.
pub const EXIT_COMMAND: &str = "exit";

/// Keystroke classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputParser {
    cancel_command: String,
}

impl Default for InputParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InputParser {
    pub fn new() -> Self {
        Self {
            cancel_command: DEFAULT_CANCEL_COMMAND.to_string(),
        }
    }

    /// Use a different command for the Enter key
    pub fn with_cancel_command(mut self, command: impl Into<String>) -> Self {
        self.cancel_command = command.into();
        self
    }

    /// Classify one character.
    pub fn parse(&self, c: char) -> Option<Action> {
        match c {
            'x' | 'X' => Some(Action::run([EXIT_COMMAND])),
            'r' | 'R' => Some(Action::Trigger),
            '\n' | '\r' => Some(Action::run([self.cancel_command.as_str()])),
            _ => None,
        }
    }

    /// Consume characters until one of them produces an action.
    pub fn parse_stream<I>(&self, input: I) -> Option<Action>
    where
        I: IntoIterator<Item = char>,
    {
        input.into_iter().find_map(|c| self.parse(c))
    }
}

/// Classify one character with the default cancel command.
pub fn parse_input(c: char) -> Option<Action> {
    InputParser::new().parse(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x_requests_exit() {
        assert_eq!(parse_input('x'), Some(Action::run(["exit"])));
        assert_eq!(parse_input('X'), Some(Action::run(["exit"])));
    }

    #[test]
    fn r_triggers_rebuild() {
        assert_eq!(parse_input('r'), Some(Action::Trigger));
        assert_eq!(parse_input('R'), Some(Action::Trigger));
    }

    #[test]
    fn newline_and_carriage_return_cancel_identically() {
        let lf = parse_input('\n');
        let cr = parse_input('\r');
        assert_eq!(lf, Some(Action::run([DEFAULT_CANCEL_COMMAND])));
        assert_eq!(lf, cr);
    }

    #[test]
    fn other_keys_produce_nothing() {
        for c in ['a', 'q', ' ', '1', '\t', 'é'] {
            assert_eq!(parse_input(c), None, "{c:?}");
        }
    }

    #[test]
    fn custom_cancel_command() {
        let parser = InputParser::new().with_cancel_command("shell");
        assert_eq!(parser.parse('\n'), Some(Action::run(["shell"])));
    }

    #[test]
    fn stream_skips_noise_until_first_action() {
        let parser = InputParser::new();
        assert_eq!(parser.parse_stream("abcRx".chars()), Some(Action::Trigger));
        assert_eq!(parser.parse_stream("hello".chars()), None);
    }
}
