//! Accumulated validation outcome.

/// Outcome of one validation run.
///
/// Valid until the first error is recorded; errors keep their insertion
/// order so messages surface in pipeline order. A fresh result is built
/// per run and never shared across calls.
///
/// # Examples
///
/// ```
/// use engine_validation::ValidationResult;
///
/// let ok = ValidationResult::from_errors(vec![]);
/// assert!(ok.valid());
///
/// let bad = ValidationResult::from_errors(vec!["Trade date is required".into()]);
/// assert!(!bad.valid());
/// assert_eq!(bad.errors().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    /// Builds a result from the concatenated error lists of the checks.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self { errors }
    }

    /// Returns whether no check recorded an error.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all recorded error messages, in pipeline order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Consumes the result, yielding the error messages.
    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_valid() {
        assert!(ValidationResult::default().valid());
    }

    #[test]
    fn test_errors_preserve_order() {
        let result = ValidationResult::from_errors(vec!["first".into(), "second".into()]);
        assert!(!result.valid());
        assert_eq!(result.errors(), ["first", "second"]);
        assert_eq!(result.into_errors(), vec!["first", "second"]);
    }
}
