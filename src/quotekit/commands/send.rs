use crate::commands::{CmdMessage, CmdResult};
use crate::compose::load_template;
use crate::dispatch::Dispatcher;
use crate::error::{QuoteError, Result};
use crate::store::{Store, StoreBackend};
use std::path::Path;

/// Resolve the selection to full records, compose one message per
/// supplier and hand the batch to the dispatcher.
///
/// A batch where nothing could be delivered is an error carrying the
/// backup artifact location; partial failure succeeds with the failed
/// recipients enumerated as warnings.
pub fn run<B: StoreBackend>(
    store: &Store<B>,
    dispatcher: &Dispatcher,
    template_path: &Path,
    product_names: &[String],
    supplier_names: &[String],
    cc: Option<&str>,
) -> Result<CmdResult> {
    let products = store.products_by_names(product_names)?;
    let suppliers = store.suppliers_by_names(supplier_names)?;

    if products.is_empty() || suppliers.is_empty() {
        return Err(QuoteError::Validation(
            "Select at least one known product and one known supplier".to_string(),
        ));
    }

    let template = load_template(template_path)?;
    let summary = dispatcher.send_batch(&template, &suppliers, &products, cc)?;

    if summary.all_failed() {
        let location = summary
            .backup
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        return Err(QuoteError::Delivery(format!(
            "no quote request could be delivered; composed messages were saved to {}",
            location
        )));
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Sent {} of {} quote requests.",
        summary.delivered.len(),
        suppliers.len()
    )));
    for failure in &summary.failed {
        result.add_message(CmdMessage::warning(format!(
            "Could not deliver to {}: {}",
            failure.supplier, failure.reason
        )));
    }
    Ok(result.with_summary(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::memory::MemoryChannel;
    use crate::dispatch::DeliveryChannel;
    use crate::store::memory::MemBackend;
    use std::fs;
    use std::time::Duration;

    fn seeded_store() -> Store<MemBackend> {
        let store = Store::with_backend(MemBackend::new());
        store.add_product("Bolt M6", "Zinc plated", None).unwrap();
        store.add_supplier("Acme", "sales@acme.example").unwrap();
        store.add_supplier("Globex", "quotes@globex.example").unwrap();
        store
    }

    fn write_template(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("email_template.txt");
        fs::write(&path, "Dear {supplier_name},\n{product_list}\n").unwrap();
        path
    }

    fn dispatcher(channels: Vec<Box<dyn DeliveryChannel>>, dir: &Path) -> Dispatcher {
        Dispatcher::new(channels, "Price quote request", Duration::ZERO, dir)
    }

    #[test]
    fn sends_to_each_selected_supplier() {
        let temp_dir = tempfile::tempdir().unwrap();
        let template = write_template(temp_dir.path());
        let channel = MemoryChannel::new("primary");
        let outbox = channel.outbox();

        let store = seeded_store();
        let d = dispatcher(vec![Box::new(channel)], temp_dir.path());
        let result = run(
            &store,
            &d,
            &template,
            &["Bolt M6".to_string()],
            &["acme".to_string(), "Globex".to_string()],
            None,
        )
        .unwrap();

        assert_eq!(outbox.borrow().len(), 2);
        let summary = result.summary.unwrap();
        assert_eq!(summary.delivered.len(), 2);
    }

    #[test]
    fn empty_selection_is_a_validation_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let template = write_template(temp_dir.path());
        let store = seeded_store();
        let d = dispatcher(vec![Box::new(MemoryChannel::new("primary"))], temp_dir.path());

        let err = run(&store, &d, &template, &[], &["Acme".to_string()], None).unwrap_err();
        assert!(matches!(err, QuoteError::Validation(_)));

        // Unknown names resolve to nothing, same error.
        let err = run(
            &store,
            &d,
            &template,
            &["Ghost".to_string()],
            &["Acme".to_string()],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, QuoteError::Validation(_)));
    }

    #[test]
    fn missing_template_is_a_hard_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = seeded_store();
        let d = dispatcher(vec![Box::new(MemoryChannel::new("primary"))], temp_dir.path());

        let err = run(
            &store,
            &d,
            &temp_dir.path().join("missing.txt"),
            &["Bolt M6".to_string()],
            &["Acme".to_string()],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, QuoteError::TemplateMissing(_)));
    }

    #[test]
    fn total_failure_fails_batch_and_names_backup() {
        let temp_dir = tempfile::tempdir().unwrap();
        let template = write_template(temp_dir.path());
        let store = seeded_store();
        let d = dispatcher(
            vec![
                Box::new(MemoryChannel::failing("primary", "down")),
                Box::new(MemoryChannel::failing("secondary", "down")),
            ],
            temp_dir.path(),
        );

        let err = run(
            &store,
            &d,
            &template,
            &["Bolt M6".to_string()],
            &["Acme".to_string()],
            None,
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("quote-backup-"), "got: {}", message);
    }

    #[test]
    fn partial_failure_succeeds_with_warnings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let template = write_template(temp_dir.path());

        let store = seeded_store();
        store.delete_supplier("Globex").unwrap();
        // A supplier with a bad address, bypassing add validation the
        // way a hand-edited store file would.
        store
            .backend()
            .save_suppliers(&[
                crate::model::Supplier::new("Acme", "sales@acme.example"),
                crate::model::Supplier::new("NoMail", "bogus"),
            ])
            .unwrap();

        let d = dispatcher(vec![Box::new(MemoryChannel::new("primary"))], temp_dir.path());
        let result = run(
            &store,
            &d,
            &template,
            &["Bolt M6".to_string()],
            &["Acme".to_string(), "NoMail".to_string()],
            None,
        )
        .unwrap();

        let summary = result.summary.as_ref().unwrap();
        assert_eq!(summary.delivered, vec!["Acme"]);
        assert_eq!(summary.failed.len(), 1);
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.contains("NoMail")));
    }
}
