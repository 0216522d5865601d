//! Path-qualified field errors and their aggregation.
//!
//! Every check in the crate reports into a [`FieldErrors`] accumulator
//! instead of returning early, so one validation pass surfaces every defect
//! at once. The accumulator is append-only: insertion order is preserved and
//! nothing is deduplicated, because two checks may legitimately report
//! different problems at the same path.

use std::fmt;

use serde::{Serialize, Serializer};

// ── FieldPath ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Location of a value inside an install config.
///
/// Used only for reporting. Renders as `platform.ibmcloud.subnets` or
/// `compute[1].platform.ibmcloud.type`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Start a path at a top-level field.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Key(root.into())],
        }
    }

    /// Descend into a named child field.
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(name.into()));
        Self { segments }
    }

    /// Descend into an element of a list field.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(name) if i == 0 => f.write_str(name)?,
                Segment::Key(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── FieldErrorKind ───────────────────────────────────────────────────────────

/// What went wrong at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldErrorKind {
    /// A mandatory value is absent.
    Required,
    /// A value is present but fails a semantic or consistency rule.
    Invalid,
    /// A referenced remote resource does not exist.
    NotFound,
    /// A value is not in a fixed enumerated set.
    NotSupported,
    /// The remote lookup itself failed.
    InternalError,
}

impl FieldErrorKind {
    /// Label used in the rendered report.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Required => "Required value",
            Self::Invalid => "Invalid value",
            Self::NotFound => "Not found",
            Self::NotSupported => "Unsupported value",
            Self::InternalError => "Internal error",
        }
    }

    /// Whether the offending value is part of the rendered message.
    const fn shows_value(&self) -> bool {
        matches!(self, Self::Invalid | Self::NotFound | Self::NotSupported)
    }
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── FieldError ───────────────────────────────────────────────────────────────

/// A single defect: where, what kind, which value, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: FieldPath,
    pub kind: FieldErrorKind,
    pub value: String,
    pub detail: String,
}

impl FieldError {
    pub fn required(path: FieldPath, detail: impl Into<String>) -> Self {
        Self {
            path,
            kind: FieldErrorKind::Required,
            value: String::new(),
            detail: detail.into(),
        }
    }

    pub fn invalid(path: FieldPath, value: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            path,
            kind: FieldErrorKind::Invalid,
            value: value.into(),
            detail: detail.into(),
        }
    }

    pub fn not_found(path: FieldPath, value: impl Into<String>) -> Self {
        Self {
            path,
            kind: FieldErrorKind::NotFound,
            value: value.into(),
            detail: String::new(),
        }
    }

    /// `supported` is rendered in the order given; callers pass it sorted.
    pub fn not_supported<S: AsRef<str>>(
        path: FieldPath,
        value: impl Into<String>,
        supported: &[S],
    ) -> Self {
        let quoted: Vec<String> = supported
            .iter()
            .map(|s| format!("\"{}\"", s.as_ref()))
            .collect();
        Self {
            path,
            kind: FieldErrorKind::NotSupported,
            value: value.into(),
            detail: format!("supported values: {}", quoted.join(", ")),
        }
    }

    /// Wraps the failure of a lookup; the cause becomes the detail.
    pub fn internal(path: FieldPath, cause: &dyn std::error::Error) -> Self {
        Self {
            path,
            kind: FieldErrorKind::InternalError,
            value: String::new(),
            detail: cause.to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)?;
        if self.kind.shows_value() {
            write!(f, ": \"{}\"", self.value)?;
        }
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

// ── FieldErrors ──────────────────────────────────────────────────────────────

/// Ordered, append-only accumulator for one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Move every error of `other` onto the end of this list.
    pub fn append(&mut self, other: FieldErrors) {
        self.errors.extend(other.errors);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// `None` iff nothing was ever appended.
    pub fn into_aggregate(self) -> Option<AggregateError> {
        if self.errors.is_empty() {
            None
        } else {
            Some(AggregateError {
                errors: self.errors,
            })
        }
    }
}

impl Extend<FieldError> for FieldErrors {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl FromIterator<FieldError> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

// ── AggregateError ───────────────────────────────────────────────────────────

/// One reportable error built from a non-empty [`FieldErrors`].
///
/// Displays one defect per line, in the order they were accumulated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateError {
    errors: Vec<FieldError>,
}

impl AggregateError {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always `false`; an aggregate is only built from a non-empty list.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}
