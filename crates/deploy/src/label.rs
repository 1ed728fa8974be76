//! Subdomain label resolution and validation.
//!
//! A label is the hostname segment a deployment is published under. It must
//! match `^[a-z0-9-]{3,63}$`; nothing reaches the network otherwise.

use std::fmt;

use worldbuilder_protocol::constants::{LABEL_MAX_LEN, LABEL_MIN_LEN};

use crate::error::DeployError;

/// A validated subdomain label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    /// Validates an already normalized label.
    pub fn parse(candidate: &str) -> Result<Self, DeployError> {
        let invalid = |reason: &str| DeployError::InvalidLabel {
            label: candidate.to_string(),
            reason: reason.to_string(),
        };

        if let Some(c) = candidate.chars().find(|c| !is_label_char(*c)) {
            return Err(invalid(&format!(
                "character '{c}' is not allowed, use lowercase letters, digits or hyphens"
            )));
        }
        if candidate.len() < LABEL_MIN_LEN {
            return Err(invalid(&format!(
                "must be at least {LABEL_MIN_LEN} characters long"
            )));
        }
        if candidate.len() > LABEL_MAX_LEN {
            return Err(invalid(&format!(
                "must be at most {LABEL_MAX_LEN} characters long"
            )));
        }

        Ok(Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resolves the label for a deployment.
///
/// A non-blank `custom_label` wins and is only lowercased and stripped of
/// disallowed characters. Otherwise the label is derived from `project_name`.
pub fn resolve(project_name: &str, custom_label: Option<&str>) -> Result<Label, DeployError> {
    let candidate = match custom_label.map(str::trim).filter(|s| !s.is_empty()) {
        Some(custom) => normalize_custom(custom),
        None => derive_from_name(project_name),
    };
    Label::parse(&candidate)
}

/// Lowercases and drops every character outside `[a-z0-9-]`.
pub fn normalize_custom(custom: &str) -> String {
    custom
        .to_lowercase()
        .chars()
        .filter(|c| is_label_char(*c))
        .collect()
}

/// Lowercases, turns runs of other characters into one hyphen, trims
/// hyphens from both ends and cuts to the maximum label length.
pub fn derive_from_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());

    for c in name.to_lowercase().chars() {
        let c = if is_label_char(c) { c } else { '-' };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }

    // Only ASCII remains, so byte truncation is char-safe.
    let trimmed = out.trim_matches('-');
    let cut = &trimmed[..trimmed.len().min(LABEL_MAX_LEN)];
    cut.trim_end_matches('-').to_string()
}

fn is_label_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
}
