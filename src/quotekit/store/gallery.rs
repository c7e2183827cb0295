//! Workbook backend with image attachments.
//!
//! Same layout as [`super::workbook`], except the product sheet carries
//! a third `Image` column and an attachment folder sits next to the
//! workbook (`<stem>_images/`). On save, an image reference that points
//! at a file outside the folder is copied in and stored by file name,
//! so the workbook plus its folder stay self-contained.

use super::workbook::{
    parent_dir, read_sheet, write_sheet, HEADERS_SUPPLIERS, PRODUCTS_SHEET, SUPPLIERS_SHEET,
};
use super::StoreBackend;
use crate::error::{QuoteError, Result};
use crate::model::{Product, Supplier};
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::{Path, PathBuf};

pub const HEADERS_PRODUCTS_GALLERY: [&str; 3] = ["Name", "Description", "Image"];

pub struct GalleryBackend {
    path: PathBuf,
    attachments_dir: PathBuf,
}

impl GalleryBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "store".to_string());
        let attachments_dir = parent_dir(&path).join(format!("{}_images", stem));
        Self {
            path,
            attachments_dir,
        }
    }

    pub fn attachments_dir(&self) -> &Path {
        &self.attachments_dir
    }

    /// Bring an image reference into the attachment folder. References
    /// that already name a file in the folder (or nothing on disk) are
    /// kept as-is. A different file arriving under an already-used name
    /// is an error rather than a clobber.
    fn adopt_image(&self, reference: &str) -> Result<String> {
        let source = Path::new(reference);
        if !source.is_file() || source.parent() == Some(self.attachments_dir.as_path()) {
            return Ok(reference.to_string());
        }

        let file_name = source
            .file_name()
            .ok_or_else(|| {
                QuoteError::Store(format!("'{}' is not a usable image path", reference))
            })?
            .to_string_lossy()
            .to_string();

        fs::create_dir_all(&self.attachments_dir)?;
        let target = self.attachments_dir.join(&file_name);
        if target.exists() {
            // Re-adopting identical bytes is a no-op.
            if fs::read(&target)? == fs::read(source)? {
                return Ok(file_name);
            }
            return Err(QuoteError::Validation(format!(
                "An image named '{}' already exists in {}; rename the file before attaching it",
                file_name,
                self.attachments_dir.display()
            )));
        }
        fs::copy(source, target)?;
        Ok(file_name)
    }

    fn write_all(&self, products: &[Product], suppliers: &[Supplier]) -> Result<()> {
        let product_rows: Vec<Vec<String>> = products
            .iter()
            .map(|p| {
                vec![
                    p.name.clone(),
                    p.description.clone(),
                    p.image.clone().unwrap_or_default(),
                ]
            })
            .collect();
        let supplier_rows: Vec<Vec<String>> = suppliers
            .iter()
            .map(|s| vec![s.name.clone(), s.email.clone()])
            .collect();

        let mut workbook = Workbook::new();
        write_sheet(
            workbook.add_worksheet(),
            PRODUCTS_SHEET,
            &HEADERS_PRODUCTS_GALLERY,
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

impl StoreBackend for GalleryBackend {
    fn load_products(&self) -> Result<Vec<Product>> {
        let rows = read_sheet(&self.path, PRODUCTS_SHEET, &HEADERS_PRODUCTS_GALLERY)?;
        Ok(rows
            .into_iter()
            .map(|mut row| {
                let product = Product::new(row.remove(0), row.remove(0));
                let image = row.remove(0);
                if image.is_empty() {
                    product
                } else {
                    product.with_image(image)
                }
            })
            .collect())
    }

    fn save_products(&self, products: &[Product]) -> Result<()> {
        let suppliers = self.load_suppliers()?;

        let mut adopted = Vec::with_capacity(products.len());
        for product in products {
            let mut product = product.clone();
            if let Some(reference) = &product.image {
                product.image = Some(self.adopt_image(reference)?);
            }
            adopted.push(product);
        }

        self.write_all(&adopted, &suppliers)
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
        fs::create_dir_all(&self.attachments_dir)?;
        if self.path.exists() {
            return Ok(());
        }
        self.write_all(&[], &[])
    }

    fn supports_images(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!(
            "workbook {} (attachments in {})",
            self.path.display(),
            self.attachments_dir.display()
        )
    }

    fn backup_dir(&self) -> PathBuf {
        parent_dir(&self.path)
    }
}
