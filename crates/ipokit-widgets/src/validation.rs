//! Declarative validation rules.
//!
//! A field holds an ordered list of [`ValidationRule`]s. Evaluation checks the
//! required flag first, then walks the rules in order and stops at the first
//! one that fails. A failing rule is data, not an error.

use regex::Regex;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Message reported when a required field is blank.
pub const REQUIRED_MESSAGE: &str = "This field is required";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[\d\s\-()]+$").expect("valid phone regex"))
}

/// Predicate a rule applies.
#[derive(Clone)]
pub enum RuleKind {
    /// `local@domain.tld` shape.
    Email,
    /// Digits, spaces, dashes and parentheses with an optional leading `+`.
    Phone,
    /// Parses as an absolute URL.
    Url,
    /// At least N characters.
    MinLength(usize),
    /// At most N characters.
    MaxLength(usize),
    /// Matches the regular expression.
    Pattern(Regex),
    /// Arbitrary predicate.
    Custom(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Email => f.write_str("Email"),
            RuleKind::Phone => f.write_str("Phone"),
            RuleKind::Url => f.write_str("Url"),
            RuleKind::MinLength(n) => f.debug_tuple("MinLength").field(n).finish(),
            RuleKind::MaxLength(n) => f.debug_tuple("MaxLength").field(n).finish(),
            RuleKind::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            RuleKind::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl RuleKind {
    /// Whether `value` passes.
    pub fn check(&self, value: &str) -> bool {
        match self {
            RuleKind::Email => email_regex().is_match(value),
            RuleKind::Phone => phone_regex().is_match(value),
            RuleKind::Url => url::Url::parse(value).is_ok(),
            RuleKind::MinLength(min) => value.chars().count() >= *min,
            RuleKind::MaxLength(max) => value.chars().count() <= *max,
            RuleKind::Pattern(re) => re.is_match(value),
            RuleKind::Custom(predicate) => predicate(value),
        }
    }
}

/// A predicate plus the message shown when it fails.
#[derive(Debug, Clone)]
pub struct ValidationRule {
    pub kind: RuleKind,
    pub message: String,
}

impl ValidationRule {
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn email() -> Self {
        Self::new(RuleKind::Email, "Please enter a valid email address")
    }

    pub fn phone() -> Self {
        Self::new(RuleKind::Phone, "Please enter a valid phone number")
    }

    pub fn url() -> Self {
        Self::new(RuleKind::Url, "Please enter a valid URL")
    }

    pub fn min_length(min: usize) -> Self {
        Self::new(
            RuleKind::MinLength(min),
            format!("Must be at least {min} characters"),
        )
    }

    pub fn max_length(max: usize) -> Self {
        Self::new(
            RuleKind::MaxLength(max),
            format!("Must be at most {max} characters"),
        )
    }

    /// Compile `pattern` into a rule.
    pub fn pattern(pattern: &str, message: impl Into<String>) -> ipokit_util::Result<Self> {
        Ok(Self::from_regex(ipokit_util::compile_pattern(pattern)?, message))
    }

    pub fn from_regex(regex: Regex, message: impl Into<String>) -> Self {
        Self::new(RuleKind::Pattern(regex), message)
    }

    pub fn custom(
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        Self::new(RuleKind::Custom(Arc::new(predicate)), message)
    }

    /// Replace the failure message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn check(&self, value: &str) -> bool {
        self.kind.check(value)
    }
}

/// Result of evaluating a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    /// Message of the first failure.
    pub error: Option<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }
}

/// Evaluate `value` against `required` and then `rules` in order.
///
/// Blank means empty after trimming. A blank value that is not required is
/// valid and skips the rules.
pub fn validate_value(value: &str, required: bool, rules: &[ValidationRule]) -> ValidationOutcome {
    if value.trim().is_empty() {
        return if required {
            ValidationOutcome::invalid(REQUIRED_MESSAGE)
        } else {
            ValidationOutcome::valid()
        };
    }

    rules
        .iter()
        .find(|rule| !rule.check(value))
        .map(|rule| ValidationOutcome::invalid(rule.message.as_str()))
        .unwrap_or_else(ValidationOutcome::valid)
}
