use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::RecordKind;
use crate::store::{Store, StoreBackend};

pub fn run<B: StoreBackend>(store: &Store<B>, kind: RecordKind) -> Result<CmdResult> {
    match kind {
        RecordKind::Product => Ok(CmdResult::default().with_products(store.list_products()?)),
        RecordKind::Supplier => Ok(CmdResult::default().with_suppliers(store.list_suppliers()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemBackend;

    #[test]
    fn lists_the_requested_collection() {
        let store = Store::with_backend(MemBackend::new());
        store.add_product("Bolt", "", None).unwrap();
        store.add_supplier("Acme", "a@b.co").unwrap();

        let result = run(&store, RecordKind::Product).unwrap();
        assert_eq!(result.products.len(), 1);
        assert!(result.suppliers.is_empty());

        let result = run(&store, RecordKind::Supplier).unwrap();
        assert_eq!(result.suppliers.len(), 1);
    }
}
