//! Line-editor completion surface.

use std::collections::HashMap;
use std::sync::Arc;

use reedline::{Span, Suggestion};
use tracing::debug;

use crate::completer::Completer;

/// Completer handed to the interactive shell's line editor.
///
/// The command word at the start of the line completes against the known
/// command names; for commands with an attached path completer, the
/// argument word is delegated to it and candidates are filtered by the
/// typed prefix.
pub struct ShellCompleter {
    commands: Vec<String>,
    path_completers: HashMap<String, Arc<Completer>>,
}

impl ShellCompleter {
    pub fn new(commands: Vec<String>) -> Self {
        Self {
            commands,
            path_completers: HashMap::new(),
        }
    }

    /// Attaches a path completer for a command's argument position.
    pub fn with_path_completer(mut self, command: &str, completer: Arc<Completer>) -> Self {
        self.path_completers.insert(command.to_string(), completer);
        self
    }
}

impl reedline::Completer for ShellCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let trimmed = line.trim_start();

        // Command completion (at start of line)
        if !trimmed.contains(' ') {
            return self
                .commands
                .iter()
                .filter(|command| command.starts_with(trimmed))
                .map(|command| Suggestion {
                    value: command.clone(),
                    description: None,
                    style: None,
                    extra: None,
                    span: Span {
                        start: pos - trimmed.len(),
                        end: pos,
                    },
                    append_whitespace: true,
                    match_indices: None,
                })
                .collect();
        }

        // Argument completion, only for commands with a path completer
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        let completer = match parts.first().and_then(|cmd| self.path_completers.get(*cmd)) {
            Some(completer) => completer,
            None => return Vec::new(),
        };

        let last_word = if line.ends_with(' ') {
            ""
        } else {
            parts.last().copied().unwrap_or("")
        };
        let span_start = pos - last_word.len();

        // Completion failures degrade to no suggestions
        let candidates = match completer.completions(last_word) {
            Ok(candidates) => candidates,
            Err(err) => {
                debug!(%err, "path completion failed");
                return Vec::new();
            }
        };

        candidates
            .into_iter()
            .filter(|candidate| candidate.starts_with(last_word))
            .map(|candidate| Suggestion {
                value: candidate,
                description: None,
                style: None,
                extra: None,
                span: Span {
                    start: span_start,
                    end: pos,
                },
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}
