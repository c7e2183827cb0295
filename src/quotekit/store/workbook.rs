//! Xlsx workbook backend.
//!
//! Layout: one `Products` sheet (Name, Description) and one
//! `Suppliers` sheet (Name, Email). Sheet and column names must match
//! exactly. Every save rewrites the whole workbook, so both sheets are
//! re-emitted on any mutation.

use super::StoreBackend;
use crate::error::{QuoteError, Result};
use crate::model::{Product, Supplier};
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::fs;
use std::path::{Path, PathBuf};

pub const PRODUCTS_SHEET: &str = "Products";
pub const SUPPLIERS_SHEET: &str = "Suppliers";

pub const HEADERS_PRODUCTS: [&str; 2] = ["Name", "Description"];
pub const HEADERS_SUPPLIERS: [&str; 2] = ["Name", "Email"];

pub struct WorkbookBackend {
    path: PathBuf,
}

impl WorkbookBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, products: &[Product], suppliers: &[Supplier]) -> Result<()> {
        let product_rows: Vec<Vec<String>> = products
            .iter()
            .map(|p| vec![p.name.clone(), p.description.clone()])
            .collect();
        let supplier_rows: Vec<Vec<String>> = suppliers
            .iter()
            .map(|s| vec![s.name.clone(), s.email.clone()])
            .collect();

        let mut workbook = Workbook::new();
        write_sheet(
            workbook.add_worksheet(),
            PRODUCTS_SHEET,
            &HEADERS_PRODUCTS,
            &product_rows,
        )?;
        write_sheet(
            workbook.add_worksheet(),
            SUPPLIERS_SHEET,
            &HEADERS_SUPPLIERS,
            &supplier_rows,
        )?;
        workbook.save(&self.path)?;
        Ok(())
    }
}

impl StoreBackend for WorkbookBackend {
    fn load_products(&self) -> Result<Vec<Product>> {
        let rows = read_sheet(&self.path, PRODUCTS_SHEET, &HEADERS_PRODUCTS)?;
        Ok(rows
            .into_iter()
            .map(|mut row| Product::new(row.remove(0), row.remove(0)))
            .collect())
    }

    fn save_products(&self, products: &[Product]) -> Result<()> {
        let suppliers = self.load_suppliers()?;
        self.write_all(products, &suppliers)
    }

    fn load_suppliers(&self) -> Result<Vec<Supplier>> {
        let rows = read_sheet(&self.path, SUPPLIERS_SHEET, &HEADERS_SUPPLIERS)?;
        Ok(rows
            .into_iter()
            .map(|mut row| Supplier::new(row.remove(0), row.remove(0)))
            .collect())
    }

    fn save_suppliers(&self, suppliers: &[Supplier]) -> Result<()> {
        let products = self.load_products()?;
        self.write_all(&products, suppliers)
    }

    fn initialize(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        self.write_all(&[], &[])
    }

    fn supports_images(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        format!("workbook {}", self.path.display())
    }

    fn backup_dir(&self) -> PathBuf {
        parent_dir(&self.path)
    }
}

pub(crate) fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Read one sheet, returning row values in `expected` column order.
/// Fully empty rows are skipped; every cell is normalized to trimmed
/// text regardless of its cell type.
pub(crate) fn read_sheet(path: &Path, sheet: &str, expected: &[&str]) -> Result<Vec<Vec<String>>> {
    if !path.exists() {
        return Err(QuoteError::Store(format!(
            "Store not found at {}. Run `quotekit init` to create it, or point --store at a \
             workbook with '{}' and '{}' sheets.",
            path.display(),
            PRODUCTS_SHEET,
            SUPPLIERS_SHEET
        )));
    }

    let mut workbook = open_workbook_auto(path)?;
    let range = workbook.worksheet_range(sheet).map_err(|_| {
        QuoteError::Store(format!(
            "Sheet '{}' is missing in {}. Expected sheets '{}' ({}) and '{}' ({}).",
            sheet,
            path.display(),
            PRODUCTS_SHEET,
            HEADERS_PRODUCTS.join(", "),
            SUPPLIERS_SHEET,
            HEADERS_SUPPLIERS.join(", ")
        ))
    })?;

    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(cells) => cells.iter().map(|c| cell_text(Some(c))).collect(),
        None => Vec::new(),
    };

    let mut columns = Vec::with_capacity(expected.len());
    let mut missing = Vec::new();
    for name in expected {
        match header.iter().position(|h| h == name) {
            Some(idx) => columns.push(idx),
            None => missing.push(*name),
        }
    }
    if !missing.is_empty() {
        return Err(QuoteError::Store(format!(
            "Sheet '{}' in {} is missing required columns: {}. Expected: {}.",
            sheet,
            path.display(),
            missing.join(", "),
            expected.join(", ")
        )));
    }

    let mut out = Vec::new();
    for cells in rows {
        let values: Vec<String> = columns
            .iter()
            .map(|&idx| cell_text(cells.get(idx)))
            .collect();
        if values.iter().all(|v| v.is_empty()) {
            continue;
        }
        out.push(values);
    }
    Ok(out)
}

fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

pub(crate) fn write_sheet(
    worksheet: &mut Worksheet,
    name: &str,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<()> {
    worksheet.set_name(name)?;

    let bold = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    for (row, values) in rows.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            worksheet.write_string((row + 1) as u32, col as u16, value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    #[test]
    fn roundtrips_both_collections() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = WorkbookBackend::new(temp_dir.path().join("database.xlsx"));
        backend.initialize().unwrap();

        let store = Store::with_backend(backend);
        store.add_product("Bolt M6", "Zinc plated", None).unwrap();
        store.add_supplier("Acme", "sales@acme.example").unwrap();
        store.add_product("Washer", "", None).unwrap();

        let products = store.list_products().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Bolt M6");
        assert_eq!(products[0].description, "Zinc plated");

        // Saving products must not drop the supplier sheet.
        let suppliers = store.list_suppliers().unwrap();
        assert_eq!(suppliers.len(), 1);
        assert_eq!(suppliers[0].email, "sales@acme.example");
    }

    #[test]
    fn image_references_are_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = WorkbookBackend::new(temp_dir.path().join("database.xlsx"));
        backend.initialize().unwrap();

        // The two-sheet layout has no image column, so accepting the
        // reference would drop it on the next load.
        let store = Store::with_backend(backend);
        let err = store
            .add_product("Bolt", "Zinc", Some("bolt.png"))
            .unwrap_err();
        assert!(err.to_string().contains("gallery"), "got: {}", err);
        assert!(store.list_products().unwrap().is_empty());

        store.add_product("Bolt", "Zinc", None).unwrap();
        assert_eq!(store.list_products().unwrap().len(), 1);
    }

    #[test]
    fn missing_file_reports_remediation_hint() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = WorkbookBackend::new(temp_dir.path().join("nope.xlsx"));

        let err = backend.load_products().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("quotekit init"), "got: {}", message);
    }

    #[test]
    fn missing_sheet_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("partial.xlsx");

        // A workbook with only a Products sheet.
        let mut workbook = Workbook::new();
        write_sheet(
            workbook.add_worksheet(),
            PRODUCTS_SHEET,
            &HEADERS_PRODUCTS,
            &[],
        )
        .unwrap();
        workbook.save(&path).unwrap();

        let backend = WorkbookBackend::new(&path);
        assert!(backend.load_products().is_ok());
        let err = backend.load_suppliers().unwrap_err();
        assert!(err.to_string().contains(SUPPLIERS_SHEET));
    }

    #[test]
    fn missing_column_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("columns.xlsx");

        let mut workbook = Workbook::new();
        write_sheet(workbook.add_worksheet(), PRODUCTS_SHEET, &["Name"], &[]).unwrap();
        write_sheet(
            workbook.add_worksheet(),
            SUPPLIERS_SHEET,
            &HEADERS_SUPPLIERS,
            &[],
        )
        .unwrap();
        workbook.save(&path).unwrap();

        let err = WorkbookBackend::new(&path).load_products().unwrap_err();
        assert!(err.to_string().contains("Description"));
    }

    #[test]
    fn initialize_is_idempotent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = WorkbookBackend::new(temp_dir.path().join("data").join("db.xlsx"));
        backend.initialize().unwrap();

        let store = Store::with_backend(backend);
        store.add_product("Bolt", "", None).unwrap();

        store.backend().initialize().unwrap();
        assert_eq!(store.list_products().unwrap().len(), 1);
    }
}
