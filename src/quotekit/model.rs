use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which of the two record collections an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Product,
    Supplier,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Product => write!(f, "product"),
            RecordKind::Supplier => write!(f, "supplier"),
        }
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "product" | "products" => Ok(RecordKind::Product),
            "supplier" | "suppliers" => Ok(RecordKind::Supplier),
            other => Err(format!(
                "Unknown kind '{}'. Expected 'products' or 'suppliers'.",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Attachment reference, only persisted by the gallery backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    pub email: String,
}

impl Supplier {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Trim surrounding whitespace.
pub fn normalize(s: &str) -> String {
    s.trim().to_string()
}

/// Normalize for case-insensitive comparison. No accent folding.
pub fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Minimal `local@domain.tld` shape check: no whitespace, exactly one `@`,
/// and a dot with non-empty text on both sides inside the domain.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    matches!(
        domain.rsplit_once('.'),
        Some((host, tld)) if !host.is_empty() && !tld.is_empty()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("sales.team@acme-parts.example.com"));
        assert!(is_valid_email("  padded@b.co  "));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@b@c.co"));
        assert!(!is_valid_email("a b@c.co"));
    }

    #[test]
    fn fold_lowercases_without_accent_folding() {
        assert_eq!(fold("  Acme "), "acme");
        // Accented characters keep their accents.
        assert_eq!(fold("Café"), "café");
    }

    #[test]
    fn record_kind_parses_both_forms() {
        assert_eq!("products".parse::<RecordKind>(), Ok(RecordKind::Product));
        assert_eq!("Supplier".parse::<RecordKind>(), Ok(RecordKind::Supplier));
        assert!("widgets".parse::<RecordKind>().is_err());
    }
}
