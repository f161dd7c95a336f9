//! Dotted paths with array wildcard segments (`[]`).
//!
//! A [`Path`] is a parsed sequence of [`Segment`]s. Parsing never fails —
//! the grammar is permissive enough that every source string maps to some
//! path, with the empty string (and a lone `.`) mapping to the empty path
//! (the identity path, denoting the current subtree).

/// One element of a parsed [`Path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A named object field.
    Field(String),
    /// The `[]` wildcard: the following sub-path applies pointwise to every
    /// element of the array found here.
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path(Vec<Segment>);

impl Path {
    /// The empty path — denotes the current subtree.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Builds a path directly from already-parsed segments — used when a
    /// path is derived by splitting another parsed path (e.g. a common
    /// prefix computed by `rename`) rather than by parsing source syntax.
    pub(crate) fn from_segments(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses dotted/`[]` path syntax, per the grammar in the operator
    /// catalogue: split on `.`, and for each segment containing `[]`, yield
    /// the prefix field (if non-empty) followed by the wildcard marker.
    /// Empty segments are dropped.
    ///
    /// ```ignore
    /// parse("users[].profile.name") == [Field(users), Wildcard, Field(profile), Field(name)]
    /// parse("[].id") == [Wildcard, Field(id)]
    /// parse("") == []
    /// parse("a..b") == [Field(a), Field(b)]
    /// ```
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        for raw in source.split('.') {
            if raw.is_empty() {
                continue;
            }
            if let Some(prefix) = raw.strip_suffix("[]") {
                if !prefix.is_empty() {
                    segments.push(Segment::Field(prefix.to_string()));
                }
                segments.push(Segment::Wildcard);
            } else {
                segments.push(Segment::Field(raw.to_string()));
            }
        }
        Self(segments)
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

/// Length of the longest segment-for-segment-equal prefix shared by `a`
/// and `b`. Used by `rename`, `copy`/`move`/`set` to find the array-aligned
/// broadcast point between two paths.
pub(crate) fn common_prefix_len(a: &[Segment], b: &[Segment]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

pub(crate) fn slice_has_wildcard(segs: &[Segment]) -> bool {
    segs.iter().any(|s| matches!(s, Segment::Wildcard))
}

#[cfg(test)]
mod test {
    use super::*;
    use Segment::*;

    #[test]
    fn test_plain_path() {
        assert_eq!(
            Path::parse("users.profile.name").0,
            vec![Field("users".into()), Field("profile".into()), Field("name".into())]
        );
    }

    #[test]
    fn test_wildcard_expansion() {
        assert_eq!(
            Path::parse("users[].profile.name").0,
            vec![
                Field("users".into()),
                Wildcard,
                Field("profile".into()),
                Field("name".into())
            ]
        );
    }

    #[test]
    fn test_leading_wildcard() {
        assert_eq!(Path::parse("[].id").0, vec![Wildcard, Field("id".into())]);
    }

    #[test]
    fn test_empty_and_dot_are_identity() {
        assert!(Path::parse("").is_empty());
        assert!(Path::parse(".").is_empty());
    }

    #[test]
    fn test_double_dot_drops_empty_segment() {
        assert_eq!(Path::parse("a..b").0, vec![Field("a".into()), Field("b".into())]);
    }

    #[test]
    fn test_leading_and_trailing_dot() {
        assert_eq!(Path::parse(".a.b.").0, vec![Field("a".into()), Field("b".into())]);
    }

    #[test]
    fn test_bare_wildcard_field() {
        assert_eq!(Path::parse("[]").0, vec![Wildcard]);
    }
}
