//! Field expressions: typed member-access chains that become wire field paths.
//!
//! A [`FieldExpr`] is an ordered list of segments. Member segments name a
//! schema field, index and any-element segments step into list elements, and
//! call segments record method calls so resolution can reject them.
//!
//! ```rust
//! use quarry_query::{field, FieldExpr};
//!
//! let expr = field!(followers[0].first_name);
//! assert_eq!(expr.to_string(), "followers[0].first_name");
//! assert_eq!(FieldExpr::parse("followers[0].first_name").unwrap(), expr);
//! ```

use smol_str::SmolStr;
use std::fmt;

use crate::error::{QueryError, QueryResult};

/// One step of a field expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Member access: `.name`.
    Member(SmolStr),
    /// Positional index into a list: `[0]`.
    Index(usize),
    /// Any element of a list: `[*]`.
    AnyElement,
    /// Method call: `.name()`.
    Call(SmolStr),
}

/// A member-access expression over a document type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldExpr {
    segments: Vec<Segment>,
}

impl FieldExpr {
    /// Create an empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a member access.
    pub fn member(mut self, name: impl Into<SmolStr>) -> Self {
        self.segments.push(Segment::Member(name.into()));
        self
    }

    /// Append a positional index.
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(Segment::Index(index));
        self
    }

    /// Append an any-element marker.
    pub fn any(mut self) -> Self {
        self.segments.push(Segment::AnyElement);
        self
    }

    /// Append a method call.
    pub fn call(mut self, name: impl Into<SmolStr>) -> Self {
        self.segments.push(Segment::Call(name.into()));
        self
    }

    /// The segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Check if the expression has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Parse a textual expression such as `followers[0].first_name`.
    ///
    /// Method calls parse into [`Segment::Call`] and are rejected later by
    /// the resolver. Anything else that is not a member or index chain fails
    /// here with `UnsupportedExpression`.
    pub fn parse(input: &str) -> QueryResult<Self> {
        ExprScanner::new(input).scan()
    }
}

impl fmt::Display for FieldExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Member(name) if i == 0 => write!(f, "{}", name)?,
                Segment::Member(name) => write!(f, ".{}", name)?,
                Segment::Index(idx) => write!(f, "[{}]", idx)?,
                Segment::AnyElement => f.write_str("[*]")?,
                Segment::Call(name) if i == 0 => write!(f, "{}()", name)?,
                Segment::Call(name) => write!(f, ".{}()", name)?,
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for FieldExpr {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

struct ExprScanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> ExprScanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn fail(&self, reason: &str) -> QueryError {
        QueryError::unsupported_expression(self.input, format!("{} at offset {}", reason, self.pos))
    }

    fn ident(&mut self) -> QueryResult<&'a str> {
        let input: &'a str = self.input;
        let rest = &input[self.pos..];
        let mut end = 0;
        for (i, c) in rest.char_indices() {
            let ok = if i == 0 {
                c.is_alphabetic() || c == '_'
            } else {
                c.is_alphanumeric() || c == '_'
            };
            if !ok {
                break;
            }
            end = i + c.len_utf8();
        }
        if end == 0 {
            return Err(self.fail("expected a member name"));
        }
        self.pos += end;
        Ok(&rest[..end])
    }

    fn name_segment(&mut self) -> QueryResult<Segment> {
        let name = self.ident()?;
        if self.input[self.pos..].starts_with("()") {
            self.pos += 2;
            return Ok(Segment::Call(name.into()));
        }
        Ok(Segment::Member(name.into()))
    }

    fn bracket_segment(&mut self) -> QueryResult<Segment> {
        let rest = &self.input[self.pos..];
        let Some(close) = rest.find(']') else {
            return Err(self.fail("unbalanced '['"));
        };
        let inner = rest[1..close].trim();
        let segment = if inner == "*" {
            Segment::AnyElement
        } else {
            inner
                .parse::<usize>()
                .map(Segment::Index)
                .map_err(|_| self.fail("list index must be a non-negative integer or '*'"))?
        };
        self.pos += close + 1;
        Ok(segment)
    }

    fn scan(mut self) -> QueryResult<FieldExpr> {
        self.input = self.input.trim();
        let mut expr = FieldExpr::new();
        expr.segments.push(self.name_segment()?);

        while let Some(c) = self.peek() {
            let segment = match c {
                '.' => {
                    self.pos += 1;
                    self.name_segment()?
                }
                '[' => self.bracket_segment()?,
                _ => return Err(self.fail(&format!("unexpected '{}'", c))),
            };
            expr.segments.push(segment);
        }

        Ok(expr)
    }
}

/// A filter's field: either a verbatim wire path or a typed expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldRef {
    /// Wire path used exactly as given.
    Path(String),
    /// Expression resolved against the schema at serialization.
    Expr(FieldExpr),
}

impl FieldRef {
    /// The verbatim path, if this is not an expression.
    pub fn as_path(&self) -> Option<&str> {
        match self {
            Self::Path(p) => Some(p),
            Self::Expr(_) => None,
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => f.write_str(p),
            Self::Expr(e) => write!(f, "{}", e),
        }
    }
}

impl From<&str> for FieldRef {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for FieldRef {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl From<FieldExpr> for FieldRef {
    fn from(expr: FieldExpr) -> Self {
        Self::Expr(expr)
    }
}

/// Build a [`FieldExpr`] from Rust member-access syntax.
///
/// ```rust
/// use quarry_query::field;
///
/// assert_eq!(field!(name).to_string(), "name");
/// assert_eq!(field!(followers[0].first_name).to_string(), "followers[0].first_name");
/// assert_eq!(field!(tags[*]).to_string(), "tags[*]");
/// assert_eq!(field!(name.to_lowercase()).to_string(), "name.to_lowercase()");
/// ```
#[macro_export]
macro_rules! field {
    ($head:ident $($rest:tt)*) => {
        $crate::__field_segments!(@munch $crate::path::FieldExpr::new().member(stringify!($head)); $($rest)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_segments {
    (@munch $acc:expr; ) => { $acc };
    (@munch $acc:expr; . $name:ident () $($rest:tt)*) => {
        $crate::__field_segments!(@munch $acc.call(stringify!($name)); $($rest)*)
    };
    (@munch $acc:expr; . $name:ident $($rest:tt)*) => {
        $crate::__field_segments!(@munch $acc.member(stringify!($name)); $($rest)*)
    };
    (@munch $acc:expr; [*] $($rest:tt)*) => {
        $crate::__field_segments!(@munch $acc.any(); $($rest)*)
    };
    (@munch $acc:expr; [$idx:literal] $($rest:tt)*) => {
        $crate::__field_segments!(@munch $acc.index($idx); $($rest)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_macro_segments() {
        let expr = crate::field!(followers[0].first_name);
        assert_eq!(
            expr.segments(),
            &[
                Segment::Member("followers".into()),
                Segment::Index(0),
                Segment::Member("first_name".into()),
            ]
        );
    }

    #[test]
    fn test_macro_any_and_call() {
        let expr = crate::field!(tags[*].len());
        assert_eq!(expr.segments()[1], Segment::AnyElement);
        assert_eq!(expr.segments()[2], Segment::Call("len".into()));
    }

    #[test]
    fn test_parse_matches_macro() {
        assert_eq!(FieldExpr::parse("Name").unwrap(), crate::field!(Name));
        assert_eq!(
            FieldExpr::parse(" Followers[ 2 ].FirstName ").unwrap(),
            FieldExpr::new().member("Followers").index(2).member("FirstName")
        );
        assert_eq!(FieldExpr::parse("tags[*]").unwrap(), crate::field!(tags[*]));
    }

    #[test]
    fn test_parse_call() {
        let expr = FieldExpr::parse("name.to_lowercase()").unwrap();
        assert_eq!(expr.segments()[1], Segment::Call("to_lowercase".into()));
    }

    #[test]
    fn test_parse_rejects_non_member_chains() {
        for input in ["", "a + b", "a[", "a[x]", "a..b", "1abc", "a[-1]", "\"name\""] {
            let err = FieldExpr::parse(input).unwrap_err();
            assert_eq!(err.code, ErrorCode::UnsupportedExpression, "input {:?}", input);
        }
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let expr = FieldExpr::new().member("a").any().member("b").index(3);
        assert_eq!(expr.to_string(), "a[*].b[3]");
        assert_eq!(FieldExpr::parse(&expr.to_string()).unwrap(), expr);
    }

    #[test]
    fn test_field_ref_from() {
        assert_eq!(FieldRef::from("origin").as_path(), Some("origin"));
        assert!(FieldRef::from(crate::field!(origin)).as_path().is_none());
    }
}
