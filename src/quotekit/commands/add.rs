use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{Store, StoreBackend};

pub fn product<B: StoreBackend>(
    store: &Store<B>,
    name: &str,
    description: &str,
    image: Option<&str>,
) -> Result<CmdResult> {
    let product = store.add_product(name, description, image)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Product added: {}",
        product.name
    )));
    Ok(result)
}

pub fn supplier<B: StoreBackend>(store: &Store<B>, name: &str, email: &str) -> Result<CmdResult> {
    let supplier = store.add_supplier(name, email)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Supplier added: {} <{}>",
        supplier.name, supplier.email
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemBackend;

    #[test]
    fn trims_before_storing() {
        let store = Store::with_backend(MemBackend::new());
        product(&store, "  Bolt  ", "  Zinc  ", None).unwrap();

        let listed = store.list_products().unwrap();
        assert_eq!(listed[0].name, "Bolt");
        assert_eq!(listed[0].description, "Zinc");
    }

    #[test]
    fn duplicate_under_different_case_fails() {
        let store = Store::with_backend(MemBackend::new());
        supplier(&store, "Acme", "a@b.co").unwrap();
        assert!(supplier(&store, "ACME", "c@d.co").is_err());
    }
}
