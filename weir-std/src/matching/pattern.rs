//! Path patterns.

use std::fmt;

/// One segment of a [`Pattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches the segment text exactly.
    Literal(String),
    /// Matches any non-empty segment and captures it.
    Param(String),
}

/// A parsed path pattern such as `"users/:id/edit"`.
///
/// Leading, trailing and repeated slashes are ignored, so `"/users/"` and
/// `"users"` are the same pattern. The empty pattern has no segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse a pattern. `:name` segments are parameters.
    pub fn parse(source: &str) -> Self {
        let segments = source
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_owned()),
                None => Segment::Literal(s.to_owned()),
            })
            .collect();
        Self {
            source: source.to_owned(),
            segments,
        }
    }

    /// The empty pattern.
    pub fn empty() -> Self {
        Self::parse("")
    }

    /// The pattern's segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns `true` if the pattern has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Names of the parameters, in order.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
