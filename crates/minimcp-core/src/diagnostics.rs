//! Path-qualified diagnostics.
//!
//! Both the codec and the schema validator address locations inside nested
//! values with the same convention: dotted fields and bracketed indices,
//! e.g. `profile.age` or `items[1].id`.

use std::fmt;

/// A single path-qualified finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Location of the finding inside the input, empty at the root.
    pub path: String,
    /// What went wrong there.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic at the given path.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Joins a field name onto a path prefix: `profile` + `age` → `profile.age`.
#[must_use]
pub fn field(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Joins an element index onto a path: `items` + `1` → `items[1]`.
#[must_use]
pub fn element(prefix: &str, index: usize) -> String {
    format!("{prefix}[{index}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_compose() {
        assert_eq!(field("", "profile"), "profile");
        assert_eq!(field("profile", "age"), "profile.age");
        assert_eq!(element("items", 1), "items[1]");
        assert_eq!(field(&element("items", 1), "id"), "items[1].id");
    }

    #[test]
    fn display_includes_path_when_present() {
        let d = Diagnostic::new("profile.age", "missing parameter");
        assert_eq!(d.to_string(), "profile.age: missing parameter");

        let root = Diagnostic::new("", "invalid payload");
        assert_eq!(root.to_string(), "invalid payload");
    }
}
