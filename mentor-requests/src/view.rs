//! Contract between the creation page and its presentational view.
//!
//! The page hands the view read-only [`ViewProps`]; the view reports user
//! interaction back as [`ViewEvent`]s. Layout is entirely the view's
//! business.

use crate::types::{User, UserId};
use std::fmt::Write as _;

/// Data the view renders
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewProps<'a> {
    /// Mentors to choose from
    pub mentors: &'a [User],
    /// Currently selected mentor
    pub selected_mentor: Option<&'a User>,
    /// Current description text
    pub mentor_request_description: &'a str,
    /// Whether the mentor list is loading
    pub is_loading: bool,
    /// Last failure reported by the store
    pub error: Option<&'a str>,
}

/// A text input change
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputEvent {
    value: String,
}

impl InputEvent {
    /// An input whose current value is `value`
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Current text of the input that fired the event
    #[must_use]
    pub fn target_value(&self) -> &str {
        &self.value
    }
}

/// User interaction reported by the view
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    /// A mentor was picked, or the selection was cleared
    SelectMentor(Option<UserId>),
    /// The description input changed
    DescriptionChanged(InputEvent),
    /// The submit button was pressed
    Submit,
}

/// Presentational view for the creation page
pub trait MentorRequestCreationView {
    /// Draw the page for `props`
    fn render(&mut self, props: &ViewProps<'_>);
}

/// Renders the page as plain text, keeping every frame
#[derive(Debug, Default)]
pub struct TextView {
    frames: Vec<String>,
}

impl TextView {
    /// Create a view with no frames
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent frame
    #[must_use]
    pub fn last_frame(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }

    /// Number of frames rendered
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl MentorRequestCreationView for TextView {
    fn render(&mut self, props: &ViewProps<'_>) {
        let mut frame = String::from("New mentor request\n");

        if props.is_loading {
            frame.push_str("  Loading mentors...\n");
        } else if props.mentors.is_empty() {
            frame.push_str("  No mentors available\n");
        }
        for mentor in props.mentors {
            let marker = if props.selected_mentor.is_some_and(|s| s.id == mentor.id) {
                '*'
            } else {
                ' '
            };
            let _ = writeln!(frame, "  [{marker}] {} (@{})", mentor.name, mentor.username);
        }

        let _ = writeln!(frame, "  Description: {}", props.mentor_request_description);
        if let Some(error) = props.error {
            let _ = writeln!(frame, "  Error: {error}");
        }
        frame.push_str("  [Submit]");

        tracing::trace!(lines = frame.lines().count(), "Rendered frame");
        self.frames.push(frame);
    }
}
