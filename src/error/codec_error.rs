//! Decode failure types.
//!
//! [`CodecError`] describes one failed check; [`CodecErrors`] is the non-empty
//! collection every failed decode returns.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::ValuePath;

/// A single decode failure.
///
/// - **path**: where in the input the failure occurred
/// - **message**: human-readable description
/// - **code**: machine-readable category (`invalid_type`, `required`, ...)
/// - **got** / **expected**: optional descriptions of the offending value and
///   what the codec wanted instead
/// - **context**: names of the codecs that were validating when the failure
///   occurred, outermost first
///
/// # Example
///
/// ```rust
/// use codecs::{CodecError, ValuePath};
///
/// let error = CodecError::new(ValuePath::from_field("created"), "invalid date")
///     .with_code("invalid_date")
///     .with_got("yesterday")
///     .with_expected("Date")
///     .within("Date")
///     .within("Order");
///
/// assert_eq!(error.context, vec!["Order", "Date"]);
/// assert_eq!(error.to_string(), "created: invalid date (expected: Date) (got: yesterday)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CodecError {
    pub path: ValuePath,
    pub message: String,
    pub got: Option<String>,
    pub expected: Option<String>,
    pub code: String,
    pub context: Vec<String>,
}

impl CodecError {
    /// Creates an error with the generic `decode_error` code.
    pub fn new(path: ValuePath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            got: None,
            expected: None,
            code: "decode_error".to_string(),
            context: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Records that this failure was reported while `codec` was validating.
    ///
    /// Each enclosing codec calls this on the way out, so the context ends up
    /// ordered from the outermost codec to the one that raised the failure.
    pub fn within(mut self, codec: impl Into<String>) -> Self {
        self.context.insert(0, codec.into());
        self
    }

    /// The codec that raised the failure.
    pub fn innermost_codec(&self) -> Option<&str> {
        self.context.last().map(String::as_str)
    }
}

impl Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)?;
        } else {
            write!(f, "{}: {}", self.path, self.message)?;
        }
        if let Some(expected) = &self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(got) = &self.got {
            write!(f, " (got: {})", got)?;
        }
        Ok(())
    }
}

impl std::error::Error for CodecError {}

/// All failures of one decode. Never empty.
///
/// Failures from independent checks (sibling fields, intersection members)
/// are combined with [`Semigroup::combine`], so a decode reports everything
/// that is wrong with the input in one pass.
///
/// ```rust
/// use codecs::{CodecError, CodecErrors, ValuePath};
/// use stillwater::prelude::*;
///
/// let missing = CodecErrors::single(
///     CodecError::new(ValuePath::from_field("id"), "required field 'id' is missing")
///         .with_code("required"),
/// );
/// let wrong = CodecErrors::single(
///     CodecError::new(ValuePath::from_field("kind"), "expected Kind")
///         .with_code("invalid_enum"),
/// );
///
/// let all = missing.combine(wrong);
/// assert_eq!(all.len(), 2);
/// assert_eq!(all.with_code("required").len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CodecErrors(NonEmptyVec<CodecError>);

impl CodecErrors {
    pub fn single(error: CodecError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    pub fn from_non_empty(errors: NonEmptyVec<CodecError>) -> Self {
        Self(errors)
    }

    /// Builds a collection from a vec that must contain at least one error.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty.
    pub fn from_vec(errors: Vec<CodecError>) -> Self {
        Self(NonEmptyVec::from_vec(errors).expect("CodecErrors requires at least one error"))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &CodecError> {
        self.0.iter()
    }

    pub fn first(&self) -> &CodecError {
        self.0.head()
    }

    /// Failures reported at exactly `path`.
    pub fn at_path(&self, path: &ValuePath) -> Vec<&CodecError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Failures with the given code.
    pub fn with_code(&self, code: &str) -> Vec<&CodecError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Marks every failure as reported within `codec`. See [`CodecError::within`].
    pub fn within(self, codec: &str) -> Self {
        Self::from_vec(self.into_iter().map(|e| e.within(codec)).collect())
    }

    pub fn into_vec(self) -> Vec<CodecError> {
        self.0.into_vec()
    }

    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<CodecError> {
        &self.0
    }
}

impl Semigroup for CodecErrors {
    fn combine(self, other: Self) -> Self {
        CodecErrors(self.0.combine(other.0))
    }
}

impl Display for CodecErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Decoding failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for CodecErrors {}

impl IntoIterator for CodecErrors {
    type Item = CodecError;
    type IntoIter = std::vec::IntoIter<CodecError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a CodecErrors {
    type Item = &'a CodecError;
    type IntoIter = Box<dyn Iterator<Item = &'a CodecError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<CodecErrors>();
    assert_sync::<CodecErrors>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let error = CodecError::new(ValuePath::from_field("id"), "bad id");

        assert_eq!(error.code, "decode_error");
        assert!(error.got.is_none());
        assert!(error.expected.is_none());
        assert!(error.context.is_empty());
        assert_eq!(error.innermost_codec(), None);
    }

    #[test]
    fn test_context_is_outermost_first() {
        let error = CodecError::new(ValuePath::root(), "expected string")
            .within("string")
            .within("{ a: string }")
            .within("Child");

        assert_eq!(error.context, vec!["Child", "{ a: string }", "string"]);
        assert_eq!(error.innermost_codec(), Some("string"));
    }

    #[test]
    fn test_display_root() {
        let error = CodecError::new(ValuePath::root(), "expected object");
        assert_eq!(error.to_string(), "(root): expected object");
    }

    #[test]
    fn test_errors_within_applies_to_all() {
        let errors = CodecErrors::single(CodecError::new(ValuePath::from_field("a"), "x"))
            .combine(CodecErrors::single(CodecError::new(
                ValuePath::from_field("b"),
                "y",
            )))
            .within("Outer");

        assert!(errors.iter().all(|e| e.context == vec!["Outer"]));
    }

    #[test]
    fn test_at_path_and_with_code() {
        let a = ValuePath::from_field("a");
        let errors = CodecErrors::single(CodecError::new(a.clone(), "1").with_code("required"))
            .combine(CodecErrors::single(
                CodecError::new(a.clone(), "2").with_code("invalid_type"),
            ))
            .combine(CodecErrors::single(
                CodecError::new(ValuePath::from_field("b"), "3").with_code("required"),
            ));

        assert_eq!(errors.at_path(&a).len(), 2);
        assert_eq!(errors.with_code("required").len(), 2);
        assert_eq!(errors.first().message, "1");
    }

    #[test]
    fn test_errors_display() {
        let errors = CodecErrors::single(
            CodecError::new(ValuePath::from_field("p"), "required field 'p' is missing"),
        );
        let display = errors.to_string();

        assert!(display.contains("1 error(s)"));
        assert!(display.contains("p: required field 'p' is missing"));
    }

    #[test]
    fn test_combine_is_associative() {
        let e = |m: &str| CodecErrors::single(CodecError::new(ValuePath::root(), m));

        let left = e("1").combine(e("2")).combine(e("3"));
        let right = e("1").combine(e("2").combine(e("3")));

        let messages = |errors: &CodecErrors| {
            errors.iter().map(|e| e.message.clone()).collect::<Vec<_>>()
        };
        assert_eq!(messages(&left), messages(&right));
    }
}
