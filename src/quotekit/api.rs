//! # API Facade
//!
//! Thin facade over the command layer and the single entry point for
//! all quotekit operations, whatever the UI. It dispatches, normalizes
//! inputs and returns structured `Result<CmdResult>` values; business
//! logic stays in `commands/*.rs` and no I/O assumptions are made here
//! (no stdout, no process exit, no terminal).
//!
//! `QuoteApi<B: StoreBackend>` is generic over the storage backend:
//! production code hands it a workbook, sqlite or gallery backend
//! (possibly boxed), tests hand it `MemBackend`.

use crate::commands;
use crate::commands::config::ConfigAction;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::model::RecordKind;
use crate::store::{Store, StoreBackend};
use std::path::PathBuf;

pub struct QuoteApi<B: StoreBackend> {
    store: Store<B>,
    dispatcher: Dispatcher,
    template_path: PathBuf,
    config_dir: PathBuf,
}

impl<B: StoreBackend> QuoteApi<B> {
    pub fn new(
        store: Store<B>,
        dispatcher: Dispatcher,
        template_path: PathBuf,
        config_dir: PathBuf,
    ) -> Self {
        Self {
            store,
            dispatcher,
            template_path,
            config_dir,
        }
    }

    pub fn init(&self) -> Result<commands::CmdResult> {
        commands::init::run(&self.store, &self.template_path)
    }

    pub fn add_product(
        &self,
        name: &str,
        description: &str,
        image: Option<&str>,
    ) -> Result<commands::CmdResult> {
        commands::add::product(&self.store, name, description, image)
    }

    pub fn add_supplier(&self, name: &str, email: &str) -> Result<commands::CmdResult> {
        commands::add::supplier(&self.store, name, email)
    }

    pub fn delete(&self, kind: RecordKind, name: &str) -> Result<commands::CmdResult> {
        commands::delete::run(&self.store, kind, name)
    }

    pub fn list(&self, kind: RecordKind) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, kind)
    }

    pub fn search(&self, kind: RecordKind, term: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, kind, term)
    }

    pub fn send_quotes(
        &self,
        product_names: &[String],
        supplier_names: &[String],
        cc: Option<&str>,
    ) -> Result<commands::CmdResult> {
        commands::send::run(
            &self.store,
            &self.dispatcher,
            &self.template_path,
            product_names,
            supplier_names,
            cc,
        )
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::memory::MemoryChannel;
    use crate::store::memory::MemBackend;
    use std::time::Duration;

    fn api(temp_dir: &std::path::Path) -> QuoteApi<MemBackend> {
        let template_path = temp_dir.join("email_template.txt");
        let dispatcher = Dispatcher::new(
            vec![Box::new(MemoryChannel::new("primary"))],
            "Price quote request",
            Duration::ZERO,
            temp_dir,
        );
        QuoteApi::new(
            Store::with_backend(MemBackend::new()),
            dispatcher,
            template_path,
            temp_dir.to_path_buf(),
        )
    }

    #[test]
    fn dispatches_through_all_operations() {
        let temp_dir = tempfile::tempdir().unwrap();
        let api = api(temp_dir.path());

        api.init().unwrap();
        api.add_product("Bolt", "Zinc", None).unwrap();
        api.add_supplier("Acme", "a@b.co").unwrap();

        assert_eq!(api.list(RecordKind::Product).unwrap().products.len(), 1);
        assert_eq!(
            api.search(RecordKind::Supplier, "acme")
                .unwrap()
                .suppliers
                .len(),
            1
        );

        let result = api
            .send_quotes(&["Bolt".to_string()], &["Acme".to_string()], None)
            .unwrap();
        assert_eq!(result.summary.unwrap().delivered.len(), 1);

        assert_eq!(api.delete(RecordKind::Product, "bolt").unwrap().removed, 1);
    }
}
