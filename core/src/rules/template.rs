//! Name templates
//!
//! A template is the display name a rule assigns, with at most one `{}`
//! marker where the potency descriptor goes. The marker's position decides
//! how the descriptor is spaced:
//!
//! | Template               | Position | Filled with "Potent"      |
//! |------------------------|----------|---------------------------|
//! | `{}Draught of Vigor`   | `After`  | `Potent Draught of Vigor` |
//! | `Draught of Vigor{}`   | `Before` | `Draught of Vigor Potent` |
//! | `Draught of{}Vigor`    | `Both`   | `Draught of Potent Vigor` |

use std::fmt;

use thiserror::Error;

pub const PLACEHOLDER: &str = "{}";

/// Where the template's name text sits relative to the descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderPosition {
    /// Name text comes before the descriptor (marker at the end)
    Before,
    /// Name text comes after the descriptor (marker at the start)
    After,
    /// Descriptor is inside the name text
    Both,
}

/// A validated name template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate {
    text: String,
    position: PlaceholderPosition,
}

impl NameTemplate {
    pub fn parse(text: impl Into<String>) -> Result<Self, TemplateError> {
        let text = text.into();

        let open = text.matches('{').count();
        let close = text.matches('}').count();
        if open != close {
            return Err(TemplateError::Unbalanced { open, close });
        }
        if open > 1 {
            return Err(TemplateError::TooManyPlaceholders(open));
        }
        if open == 1 && !text.contains(PLACEHOLDER) {
            return Err(TemplateError::NotEmpty);
        }

        let position = if text.starts_with(PLACEHOLDER) {
            PlaceholderPosition::After
        } else if text.ends_with(PLACEHOLDER) {
            PlaceholderPosition::Before
        } else {
            PlaceholderPosition::Both
        };

        Ok(Self { text, position })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> PlaceholderPosition {
        self.position
    }

    pub fn has_placeholder(&self) -> bool {
        self.text.contains(PLACEHOLDER)
    }

    /// Replace the marker with `replacement` verbatim
    pub fn fill(&self, replacement: &str) -> String {
        self.text.replacen(PLACEHOLDER, replacement, 1)
    }

    /// Splice a descriptor word in, or strip the marker when there is none.
    ///
    /// Without a word, a `Both` marker becomes a single space so the two
    /// halves of the name stay apart.
    pub fn with_descriptor(&self, word: Option<&str>) -> String {
        let replacement = match (word, self.position) {
            (None, PlaceholderPosition::Both) => " ".to_string(),
            (None, _) => String::new(),
            (Some(word), PlaceholderPosition::Before) => format!(" {word}"),
            (Some(word), PlaceholderPosition::After) => format!("{word} "),
            (Some(word), PlaceholderPosition::Both) => format!(" {word} "),
        };
        self.fill(&replacement)
    }

    /// Remove the marker and close the gap it leaves.
    ///
    /// Whitespace touching a start or end marker is dropped; a marker inside
    /// the name collapses to exactly one space.
    pub fn without_placeholder(&self) -> String {
        let Some(at) = self.text.find(PLACEHOLDER) else {
            return self.text.clone();
        };
        let head = &self.text[..at];
        let tail = &self.text[at + PLACEHOLDER.len()..];

        match self.position {
            PlaceholderPosition::After => tail.trim_start().to_string(),
            PlaceholderPosition::Before => head.trim_end().to_string(),
            PlaceholderPosition::Both => format!("{} {}", head.trim_end(), tail.trim_start()),
        }
    }
}

impl fmt::Display for NameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unbalanced braces ({open} '{{' vs {close} '}}')")]
    Unbalanced { open: usize, close: usize },

    #[error("{0} placeholders found, at most one '{{}}' is allowed")]
    TooManyPlaceholders(usize),

    #[error("placeholder must be an empty '{{}}'")]
    NotEmpty,
}
