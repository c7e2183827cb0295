use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::RecordKind;
use crate::store::{Store, StoreBackend};

pub fn run<B: StoreBackend>(store: &Store<B>, kind: RecordKind, term: &str) -> Result<CmdResult> {
    let mut result = match kind {
        RecordKind::Product => CmdResult::default().with_products(store.search_products(term)?),
        RecordKind::Supplier => CmdResult::default().with_suppliers(store.search_suppliers(term)?),
    };

    if result.products.is_empty() && result.suppliers.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No {} records match '{}'.",
            kind,
            term.trim()
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemBackend;

    #[test]
    fn matches_secondary_field() {
        let store = Store::with_backend(MemBackend::new());
        store.add_supplier("Acme", "sales@acme.example").unwrap();
        store.add_supplier("Globex", "quotes@globex.example").unwrap();

        let result = run(&store, RecordKind::Supplier, "GLOBEX.example").unwrap();
        assert_eq!(result.suppliers.len(), 1);
        assert_eq!(result.suppliers[0].name, "Globex");
    }

    #[test]
    fn empty_term_returns_everything() {
        let store = Store::with_backend(MemBackend::new());
        store.add_product("Bolt", "", None).unwrap();
        store.add_product("Nut", "", None).unwrap();

        let result = run(&store, RecordKind::Product, "").unwrap();
        assert_eq!(result.products.len(), 2);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn no_match_adds_info_message() {
        let store = Store::with_backend(MemBackend::new());
        let result = run(&store, RecordKind::Product, "ghost").unwrap();
        assert_eq!(result.messages.len(), 1);
    }
}
