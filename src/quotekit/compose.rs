//! Template loading and message composition.
//!
//! A template is a plain-text file containing two placeholders:
//! `{supplier_name}` and `{product_list}`. The product list renders as
//! newline-joined `- name: description` lines.

use crate::error::{QuoteError, Result};
use crate::model::Product;
use std::fs;
use std::path::Path;

pub const SUPPLIER_PLACEHOLDER: &str = "{supplier_name}";
pub const PRODUCTS_PLACEHOLDER: &str = "{product_list}";

/// Rendered in place of the product list when no products were selected.
pub const EMPTY_LIST_LINE: &str = "- (no products listed)";

/// Starter template written by `init` when none exists.
pub const DEFAULT_TEMPLATE: &str = "\
Dear {supplier_name},

We would like to request a price quote for the following items:

{product_list}

Please include availability and delivery terms in your reply.

Kind regards,
";

/// Read the template file. Missing file is a hard error at send time.
pub fn load_template(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(QuoteError::TemplateMissing(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Fill the template with the supplier name and the selected products.
pub fn compose(template: &str, supplier_name: &str, products: &[Product]) -> String {
    let list = if products.is_empty() {
        EMPTY_LIST_LINE.to_string()
    } else {
        products
            .iter()
            .map(|p| format!("- {}: {}", p.name, p.description))
            .collect::<Vec<_>>()
            .join("\n")
    };

    template
        .replace(SUPPLIER_PLACEHOLDER, supplier_name)
        .replace(PRODUCTS_PLACEHOLDER, &list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_both_placeholders() {
        let products = vec![
            Product::new("Bolt M6", "Zinc plated"),
            Product::new("Nut M6", ""),
        ];
        let body = compose("To {supplier_name}:\n{product_list}", "Acme", &products);
        assert_eq!(body, "To Acme:\n- Bolt M6: Zinc plated\n- Nut M6: ");
    }

    #[test]
    fn empty_product_list_yields_fixed_line() {
        let body = compose("{product_list}", "Acme", &[]);
        assert_eq!(body, EMPTY_LIST_LINE);
    }

    #[test]
    fn missing_template_is_a_hard_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = load_template(&temp_dir.path().join("email_template.txt")).unwrap_err();
        assert!(matches!(err, QuoteError::TemplateMissing(_)));
    }

    #[test]
    fn default_template_contains_both_placeholders() {
        assert!(DEFAULT_TEMPLATE.contains(SUPPLIER_PLACEHOLDER));
        assert!(DEFAULT_TEMPLATE.contains(PRODUCTS_PLACEHOLDER));
    }
}
