//! Display-time lyric classification
//!
//! The stored `lyrics` field is plain text; whether it reads as a bounded
//! snippet (context line, highlighted body, context line) or a full sheet is
//! decided here, at render time. Nothing in this module is persisted.

use serde::{Deserialize, Serialize};

/// Non-blank line counts within this range read as a snippet.
const SNIPPET_MIN_LINES: usize = 3;
const SNIPPET_MAX_LINES: usize = 10;

/// Line count above which the UI folds the lyrics behind a toggle.
const COLLAPSE_THRESHOLD: usize = 5;

/// How a lyric text should be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LyricsDisplay {
    /// No non-blank lines; render nothing.
    Empty,
    /// A bounded snippet: first line as context, highlighted body, last
    /// line as context.
    Snippet {
        prelude: Vec<String>,
        body: Vec<String>,
        postlude: Vec<String>,
    },
    /// A full lyric sheet.
    Full { lines: Vec<String> },
}

impl LyricsDisplay {
    /// Classify lyric text for display.
    pub fn classify(text: &str) -> Self {
        let lines: Vec<String> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.to_string())
            .collect();

        match lines.len() {
            0 => Self::Empty,
            n if (SNIPPET_MIN_LINES..=SNIPPET_MAX_LINES).contains(&n) => Self::Snippet {
                prelude: lines[..1].to_vec(),
                body: lines[1..n - 1].to_vec(),
                postlude: lines[n - 1..].to_vec(),
            },
            _ => Self::Full { lines },
        }
    }

    /// Whether the UI should fold this text behind a "show lyrics" toggle.
    pub fn is_collapsible(&self) -> bool {
        self.line_count() > COLLAPSE_THRESHOLD
    }

    fn line_count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Snippet {
                prelude,
                body,
                postlude,
            } => prelude.len() + body.len() + postlude.len(),
            Self::Full { lines } => lines.len(),
        }
    }
}
