//! Redaction wrapper for user-authored text
//!
//! Chat messages pass through several layers that log liberally. Wrapping the
//! raw text in `Sensitive` keeps it out of `Debug`/`Display` output while the
//! pipeline still has full access through `expose()`.

use std::fmt;

/// Value that never prints its contents
///
/// ```
/// use scoreline_core_types::Sensitive;
///
/// let text = Sensitive::new("alice beat bob".to_string());
/// assert_eq!(format!("{:?}", text), "<redacted>");
/// assert_eq!(text.expose(), "alice beat bob");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the wrapped value; callers must not log it
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl Sensitive<String> {
    /// Byte length of the wrapped text, safe to log
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: PartialEq> PartialEq for Sensitive<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
