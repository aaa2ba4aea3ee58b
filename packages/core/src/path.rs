//! Structural paths into a value tree.

use std::fmt;

/// Errors related to path parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A segment of the path string is malformed.
    InvalidSegment { position: usize, message: String },
    /// The path string is invalid as a whole.
    InvalidPath { message: String },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::InvalidSegment { position, message } => {
                write!(f, "invalid path segment at byte {}: {}", position, message)
            }
            PathError::InvalidPath { message } => {
                write!(f, "invalid path: {}", message)
            }
        }
    }
}

impl std::error::Error for PathError {}

/// One step from a parent to a child.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Segment {
    /// A record field or a map key, rendered as `.name`.
    Field(String),
    /// A sequence index, rendered as `[index]`.
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => write!(f, ".{}", name),
            Segment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// The position of a value inside the tree handed to a `Mapper`.
///
/// The root is the empty path. Entering a record field or a map entry
/// appends `.name`, entering a sequence member appends `[index]`, so the
/// second member of the first member of a nested sequence, field `Field`,
/// is `[0][1].Field`.
///
/// Paths are kept as segments and only rendered to a string on demand. The
/// rendered form cannot tell a field named `a.b` from a field `a` holding a
/// field `b`; compare segments when names may contain `.` or `[`.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path.
    pub fn root() -> Self {
        Path::default()
    }

    /// Parse the rendered form of a path.
    ///
    /// # Path Syntax
    ///
    /// - `""` is the root
    /// - `.name` enters a field or key; `name` runs until the next `.` or `[`
    /// - `[digits]` enters a sequence member
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structmap_core::{Path, Segment};
    ///
    /// let path = Path::parse("[1][1].Field").unwrap();
    /// assert_eq!(path.len(), 3);
    /// assert_eq!(path.last(), Some(&Segment::Field("Field".to_string())));
    /// assert_eq!(path.to_string(), "[1][1].Field");
    /// ```
    pub fn parse(s: &str) -> Result<Self, PathError> {
        let mut segments = Vec::new();
        let bytes = s.as_bytes();
        let mut pos = 0;

        while pos < bytes.len() {
            match bytes[pos] {
                b'.' => {
                    let start = pos + 1;
                    let end = s[start..]
                        .find(['.', '['])
                        .map_or(s.len(), |offset| start + offset);
                    if end == start {
                        return Err(PathError::InvalidSegment {
                            position: pos,
                            message: "empty field name".to_string(),
                        });
                    }
                    segments.push(Segment::Field(s[start..end].to_string()));
                    pos = end;
                }
                b'[' => {
                    let start = pos + 1;
                    let end = s[start..]
                        .find(']')
                        .map(|offset| start + offset)
                        .ok_or_else(|| PathError::InvalidSegment {
                            position: pos,
                            message: "unclosed '['".to_string(),
                        })?;
                    let digits = &s[start..end];
                    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(PathError::InvalidSegment {
                            position: pos,
                            message: format!("index '{}' is not a number", digits),
                        });
                    }
                    let index = digits.parse().map_err(|_| PathError::InvalidSegment {
                        position: pos,
                        message: format!("index '{}' is out of range", digits),
                    })?;
                    segments.push(Segment::Index(index));
                    pos = end + 1;
                }
                _ => {
                    return Err(PathError::InvalidPath {
                        message: format!("expected '.' or '[' at byte {} of '{}'", pos, s),
                    });
                }
            }
        }

        Ok(Path { segments })
    }

    /// Create a path from segments.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Path { segments }
    }

    /// Child path for a record field or map key.
    #[must_use]
    pub fn field(&self, name: impl Into<String>) -> Path {
        self.child(Segment::Field(name.into()))
    }

    /// Child path for a sequence member.
    #[must_use]
    pub fn index(&self, index: usize) -> Path {
        self.child(Segment::Index(index))
    }

    #[must_use]
    pub fn child(&self, segment: Segment) -> Path {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Path { segments }
    }

    /// Check if this is the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over segments.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// The path one level up, or `None` at the root.
    pub fn parent(&self) -> Option<Path> {
        let (_, init) = self.segments.split_last()?;
        Some(Path {
            segments: init.to_vec(),
        })
    }

    /// Check if this path has the given prefix.
    pub fn has_prefix(&self, prefix: &Path) -> bool {
        prefix.segments.len() <= self.segments.len()
            && prefix.segments == self.segments[..prefix.segments.len()]
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl std::ops::Index<usize> for Path {
    type Output = Segment;

    fn index(&self, i: usize) -> &Self::Output {
        &self.segments[i]
    }
}

/// Compare against the rendered form, segment by segment.
impl PartialEq<str> for Path {
    fn eq(&self, other: &str) -> bool {
        let mut rest = other;
        for segment in &self.segments {
            let rendered = match segment {
                Segment::Field(name) => rest
                    .strip_prefix('.')
                    .and_then(|r| r.strip_prefix(name.as_str())),
                Segment::Index(index) => rest
                    .strip_prefix('[')
                    .and_then(|r| r.strip_prefix(index.to_string().as_str()))
                    .and_then(|r| r.strip_prefix(']')),
            };
            match rendered {
                Some(r) => rest = r,
                None => return false,
            }
        }
        rest.is_empty()
    }
}

impl PartialEq<&str> for Path {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Path {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_empty_string() {
        assert_eq!(Path::root().to_string(), "");
        assert!(Path::root().is_root());
        assert_eq!(Path::parse("").unwrap(), Path::root());
    }

    #[test]
    fn child_paths() {
        let path = Path::root().field("Nested").field("A");
        assert_eq!(path.to_string(), ".Nested.A");

        let path = Path::root().index(1).index(1).field("Field");
        assert_eq!(path.to_string(), "[1][1].Field");
    }

    #[test]
    fn child_does_not_modify_parent() {
        let parent = Path::root().field("a");
        let child = parent.field("b");
        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 2);
        assert!(child.has_prefix(&parent));
        assert_eq!(child.parent(), Some(parent));
    }

    #[test]
    fn compares_with_strings() {
        let path = Path::root().field("Nested").index(12).field("A");
        assert!(path == ".Nested[12].A");
        assert!(path != ".Nested[1].A");
        assert!(path != ".Nested[12]");
        assert!(path != ".Nested[12].A.B");
        assert!(Path::root() == "");
        assert!(path == ".Nested[12].A".to_string());
    }

    #[test]
    fn parse_roundtrips_rendered_form() {
        for s in ["", ".a", "[0]", ".a[3].b", "[1][1].Field", ".key.nested[10]"] {
            assert_eq!(Path::parse(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn parse_segments() {
        let path = Path::parse(".items[2].name").unwrap();
        assert_eq!(path[0], Segment::Field("items".to_string()));
        assert_eq!(path[1], Segment::Index(2));
        assert_eq!(path[2], Segment::Field("name".to_string()));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(Path::parse("a").is_err());
        assert!(Path::parse("..a").is_err());
        assert!(Path::parse(".").is_err());
        assert!(Path::parse("[").is_err());
        assert!(Path::parse("[]").is_err());
        assert!(Path::parse("[x]").is_err());
        assert!(Path::parse("[1]x").is_err());
    }

    #[test]
    fn ambiguous_names_render_alike() {
        let dotted = Path::root().field("a.b");
        let nested = Path::root().field("a").field("b");
        assert_eq!(dotted.to_string(), nested.to_string());
        assert_ne!(dotted, nested);
    }

    #[test]
    fn path_error_display() {
        let err = Path::parse("[x]").unwrap_err();
        assert!(err.to_string().contains("not a number"));

        let err = PathError::InvalidPath {
            message: "some reason".to_string(),
        };
        assert!(err.to_string().contains("invalid path"));
    }

    #[test]
    fn path_ord() {
        let a = Path::parse("[0].a").unwrap();
        let b = Path::parse("[0].b").unwrap();
        assert!(a < b);
    }
}
