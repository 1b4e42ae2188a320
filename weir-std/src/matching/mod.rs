//! # Path Matching
//!
//! The backtracking state of one request: the part of the path not yet
//! consumed and the values captured by the branch currently being tried.
//!
//! Every branch attempt goes through [`attempt`], which clears the captures
//! before matching and restores the state exactly when the match fails.
//! A failed branch therefore never leaks captures or consumed path into a
//! sibling branch.
//!
//! The matcher itself is pluggable through [`PathMatcher`];
//! [`SegmentMatcher`] is the default.

mod pattern;
mod segment;

pub use pattern::{Pattern, Segment};
pub use segment::SegmentMatcher;

/// Matches a pattern against the remaining path.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a path matcher",
    label = "missing `PathMatcher` implementation"
)]
pub trait PathMatcher: Send + Sync + 'static {
    /// Try to match `pattern` at the start of the remaining path.
    ///
    /// On success, consume the matched part and append the captured values.
    /// On failure, leave `state` unchanged. A `terminal` match must consume
    /// the whole remaining path.
    fn attempt_match(&self, state: &mut MatchState, pattern: &Pattern, terminal: bool) -> bool;
}

/// Request-local path matching state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchState {
    remaining_path: String,
    captures: Vec<String>,
}

/// A saved [`MatchState`], restored when a branch completes or fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(MatchState);

impl MatchState {
    /// Start matching `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            remaining_path: path.into(),
            captures: Vec::new(),
        }
    }

    /// The part of the path not consumed yet.
    pub fn remaining_path(&self) -> &str {
        &self.remaining_path
    }

    /// Values captured by the current branch, in match order.
    pub fn captures(&self) -> &[String] {
        &self.captures
    }

    /// Consume up to `rest` and append `captures`.
    pub fn advance(&mut self, rest: String, captures: impl IntoIterator<Item = String>) {
        self.remaining_path = rest;
        self.captures.extend(captures);
    }

    /// Append a captured value.
    pub fn push_capture(&mut self, capture: impl Into<String>) {
        self.captures.push(capture.into());
    }

    /// Drop all captured values.
    pub fn clear_captures(&mut self) {
        self.captures.clear();
    }

    /// Save the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.clone())
    }

    /// Return to a saved state.
    pub fn restore(&mut self, snapshot: Snapshot) {
        *self = snapshot.0;
    }
}

/// Attempt one branch match.
///
/// Clears the captures and runs `matcher`. On success, returns the snapshot
/// taken before the attempt so the caller can restore it once the branch
/// completes. On failure, the state is already restored and `None` is
/// returned.
pub fn attempt(
    matcher: &dyn PathMatcher,
    state: &mut MatchState,
    pattern: &Pattern,
    terminal: bool,
) -> Option<Snapshot> {
    let snapshot = state.snapshot();
    state.clear_captures();
    if matcher.attempt_match(state, pattern, terminal) {
        Some(snapshot)
    } else {
        state.restore(snapshot);
        None
    }
}
