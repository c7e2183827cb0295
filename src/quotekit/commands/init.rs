use crate::commands::{CmdMessage, CmdResult};
use crate::compose::DEFAULT_TEMPLATE;
use crate::error::Result;
use crate::store::{Store, StoreBackend};
use std::fs;
use std::path::Path;

/// Create the store (empty collections) and a starter template when
/// either is missing. Safe to run repeatedly.
pub fn run<B: StoreBackend>(store: &Store<B>, template_path: &Path) -> Result<CmdResult> {
    store.backend().initialize()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Store ready: {}",
        store.backend().describe()
    )));

    if !template_path.exists() {
        if let Some(parent) = template_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(template_path, DEFAULT_TEMPLATE)?;
        result.add_message(CmdMessage::success(format!(
            "Template written to {}",
            template_path.display()
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "Template already present at {}",
            template_path.display()
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemBackend;

    #[test]
    fn writes_template_once() {
        let temp_dir = tempfile::tempdir().unwrap();
        let template = temp_dir.path().join("data").join("email_template.txt");
        let store = Store::with_backend(MemBackend::new());

        run(&store, &template).unwrap();
        assert!(template.exists());
        let first = fs::read_to_string(&template).unwrap();
        assert!(first.contains("{supplier_name}"));

        // Re-running leaves an edited template alone.
        fs::write(&template, "edited").unwrap();
        run(&store, &template).unwrap();
        assert_eq!(fs::read_to_string(&template).unwrap(), "edited");
    }
}
