use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::RecordKind;
use crate::store::{Store, StoreBackend};

pub fn run<B: StoreBackend>(store: &Store<B>, kind: RecordKind, name: &str) -> Result<CmdResult> {
    let removed = match kind {
        RecordKind::Product => store.delete_product(name)?,
        RecordKind::Supplier => store.delete_supplier(name)?,
    };

    let mut result = CmdResult::default().with_removed(removed);
    if removed == 0 {
        result.add_message(CmdMessage::info(format!(
            "No {} named '{}' found.",
            kind,
            name.trim()
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Removed {} {} record(s) named '{}'.",
            removed,
            kind,
            name.trim()
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemBackend;

    #[test]
    fn reports_zero_for_missing_name() {
        let store = Store::with_backend(MemBackend::new());
        let result = run(&store, RecordKind::Product, "Ghost").unwrap();
        assert_eq!(result.removed, 0);
        assert!(result.messages[0].content.contains("No product"));
    }

    #[test]
    fn reports_count_removed() {
        let store = Store::with_backend(MemBackend::new());
        store.add_supplier("Acme", "a@b.co").unwrap();

        let result = run(&store, RecordKind::Supplier, "acme").unwrap();
        assert_eq!(result.removed, 1);
        assert!(store.list_suppliers().unwrap().is_empty());
    }
}
