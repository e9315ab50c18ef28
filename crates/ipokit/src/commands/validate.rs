//! `ipokit validate`: check a value against validation rules.

use anyhow::{bail, Context};
use ipokit_widgets::{validate_value, ValidationOutcome, ValidationRule};

/// Parse a rule spec: `email`, `phone`, `url`, `min:N`, `max:N` or `pattern:RE`.
pub fn parse_rule(spec: &str) -> anyhow::Result<ValidationRule> {
    let (name, arg) = match spec.split_once(':') {
        Some((name, arg)) => (name, Some(arg)),
        None => (spec, None),
    };

    let rule = match (name.trim().to_lowercase().as_str(), arg) {
        ("email", None) => ValidationRule::email(),
        ("phone", None) => ValidationRule::phone(),
        ("url", None) => ValidationRule::url(),
        ("min", Some(n)) => ValidationRule::min_length(
            n.trim()
                .parse()
                .with_context(|| format!("Invalid length in rule '{spec}'"))?,
        ),
        ("max", Some(n)) => ValidationRule::max_length(
            n.trim()
                .parse()
                .with_context(|| format!("Invalid length in rule '{spec}'"))?,
        ),
        ("pattern", Some(re)) => ValidationRule::pattern(re, format!("Must match {re}"))
            .with_context(|| format!("Invalid rule '{spec}'"))?,
        _ => bail!(
            "Unknown rule '{spec}'. Expected email, phone, url, min:N, max:N or pattern:RE"
        ),
    };
    Ok(rule)
}

/// Validate `value` and print the outcome.
pub fn run_validate(
    value: &str,
    rule_specs: &[String],
    required: bool,
    json: bool,
) -> anyhow::Result<ValidationOutcome> {
    let rules = rule_specs
        .iter()
        .map(|spec| parse_rule(spec))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let outcome = validate_value(value, required, &rules);
    tracing::debug!(rules = rules.len(), valid = outcome.is_valid, "Value validated");

    if json {
        println!(
            "{}",
            serde_json::json!({
                "is_valid": outcome.is_valid,
                "error": outcome.error,
            })
        );
    } else if let Some(error) = &outcome.error {
        println!("invalid: {error}");
    } else {
        println!("valid");
    }
    Ok(outcome)
}
