//! The default segment matcher.

use super::{MatchState, PathMatcher, Pattern, Segment};

/// Matches `/literal` and `/:param` segments against the remaining path.
///
/// A prefix match succeeds when every segment matches a whole path segment.
/// A terminal match additionally requires that nothing remains, so
/// `"ping"` matches `/ping` but neither `/ping/` nor `/ping/2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentMatcher;

impl PathMatcher for SegmentMatcher {
    fn attempt_match(&self, state: &mut MatchState, pattern: &Pattern, terminal: bool) -> bool {
        let mut rest = state.remaining_path();
        let mut captures = Vec::new();

        for segment in pattern.segments() {
            let Some(tail) = rest.strip_prefix('/') else {
                return false;
            };
            let end = tail.find('/').unwrap_or(tail.len());
            let (text, tail) = tail.split_at(end);

            match segment {
                Segment::Literal(literal) if literal == text => {}
                Segment::Param(_) if !text.is_empty() => captures.push(text.to_owned()),
                _ => return false,
            }
            rest = tail;
        }

        if terminal && !rest.is_empty() {
            return false;
        }

        let rest = rest.to_owned();
        state.advance(rest, captures);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(path: &str, pattern: &str, terminal: bool) -> Option<MatchState> {
        let mut state = MatchState::new(path);
        SegmentMatcher
            .attempt_match(&mut state, &Pattern::parse(pattern), terminal)
            .then_some(state)
    }

    #[test]
    fn test_prefix_match_captures() {
        let state = attempt("/users/7/edit", "users/:id", false).unwrap();
        assert_eq!(state.remaining_path(), "/edit");
        assert_eq!(state.captures(), ["7"]);
    }

    #[test]
    fn test_terminal_requires_empty_rest() {
        assert!(attempt("/ping", "ping", true).is_some());
        assert!(attempt("/ping/", "ping", true).is_none());
        assert!(attempt("/ping/2", "ping", true).is_none());
        assert!(attempt("/pingpong", "ping", false).is_none());
    }

    #[test]
    fn test_empty_pattern() {
        assert!(attempt("", "", true).is_some());
        assert!(attempt("/users", "", true).is_none());
        assert_eq!(attempt("/users", "", false).unwrap().remaining_path(), "/users");
    }

    #[test]
    fn test_param_rejects_empty_segment() {
        assert!(attempt("/users//edit", "users/:id", false).is_none());
    }

    #[test]
    fn test_failed_match_leaves_state_untouched() {
        let mut state = MatchState::new("/users/7");
        state.push_capture("previous");
        let before = state.clone();
        assert!(!SegmentMatcher.attempt_match(&mut state, &Pattern::parse("users/:id/edit"), false));
        assert_eq!(state, before);
    }
}
