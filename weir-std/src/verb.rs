//! HTTP request methods.

bitflags::bitflags! {
    /// A set of HTTP request methods.
    ///
    /// A request carries exactly one verb; routes accept a set of them,
    /// e.g. `Verb::GET | Verb::HEAD`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Verb: u16 {
        /// `GET`
        const GET = 1 << 0;
        /// `POST`
        const POST = 1 << 1;
        /// `PUT`
        const PUT = 1 << 2;
        /// `PATCH`
        const PATCH = 1 << 3;
        /// `DELETE`
        const DELETE = 1 << 4;
        /// `HEAD`
        const HEAD = 1 << 5;
        /// `OPTIONS`
        const OPTIONS = 1 << 6;
    }
}

impl Verb {
    /// Parse a single method name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        Self::from_name(&name.to_ascii_uppercase())
    }

    /// Name of the first method in the set, for logs.
    pub fn name(self) -> &'static str {
        self.iter_names().next().map_or("NONE", |(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Verb::parse("get"), Some(Verb::GET));
        assert_eq!(Verb::parse("DELETE"), Some(Verb::DELETE));
        assert_eq!(Verb::parse("TRACE"), None);
    }

    #[test]
    fn test_sets() {
        let read = Verb::GET | Verb::HEAD;
        assert!(read.contains(Verb::HEAD));
        assert!(!read.intersects(Verb::POST));
        assert_eq!(Verb::PATCH.name(), "PATCH");
    }
}
