//! # Storage Layer
//!
//! The [`StoreBackend`] trait covers raw whole-collection I/O only: load
//! and save the product and supplier lists. Everything that must behave
//! identically regardless of backend — trimming, case-insensitive
//! duplicate detection, email validation, substring search, delete
//! counts — lives in [`Store`], which wraps a backend.
//!
//! ## Implementations
//!
//! - [`workbook::WorkbookBackend`]: xlsx file with a `Products` sheet
//!   (Name, Description) and a `Suppliers` sheet (Name, Email).
//! - [`sqlite::SqliteBackend`]: embedded sqlite file with `products`
//!   and `suppliers` tables (autoincrement id, unique name).
//! - [`gallery::GalleryBackend`]: workbook variant with an extra Image
//!   column and an attachment folder next to the file.
//! - [`memory::MemBackend`]: in-memory storage for tests.
//!
//! Every operation is a full read-modify-write of its collection; there
//! is no partial-update API. Concurrent external modification of the
//! underlying file is unsupported.

use crate::error::{QuoteError, Result};
use crate::model::{fold, is_valid_email, normalize, Product, Supplier};
use std::collections::HashSet;
use std::path::PathBuf;

pub mod gallery;
pub mod memory;
pub mod sqlite;
pub mod workbook;

/// Abstract interface for raw catalog storage.
///
/// Implementations handle the "how" of persistence; [`Store`] handles
/// the "what" (normalization, dedup, validation).
pub trait StoreBackend {
    /// Load the full product collection.
    fn load_products(&self) -> Result<Vec<Product>>;

    /// Replace the full product collection.
    fn save_products(&self, products: &[Product]) -> Result<()>;

    /// Load the full supplier collection.
    fn load_suppliers(&self) -> Result<Vec<Supplier>>;

    /// Replace the full supplier collection.
    fn save_suppliers(&self, suppliers: &[Supplier]) -> Result<()>;

    /// Create the store if it does not exist yet (empty collections).
    fn initialize(&self) -> Result<()>;

    /// Whether the backend persists the product image reference.
    fn supports_images(&self) -> bool;

    /// Human-readable location, for user-facing messages.
    fn describe(&self) -> String;

    /// Directory next to the store where backup artifacts are written.
    fn backup_dir(&self) -> PathBuf;
}

impl StoreBackend for Box<dyn StoreBackend> {
    fn load_products(&self) -> Result<Vec<Product>> {
        (**self).load_products()
    }

    fn save_products(&self, products: &[Product]) -> Result<()> {
        (**self).save_products(products)
    }

    fn load_suppliers(&self) -> Result<Vec<Supplier>> {
        (**self).load_suppliers()
    }

    fn save_suppliers(&self, suppliers: &[Supplier]) -> Result<()> {
        (**self).save_suppliers(suppliers)
    }

    fn initialize(&self) -> Result<()> {
        (**self).initialize()
    }

    fn supports_images(&self) -> bool {
        (**self).supports_images()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn backup_dir(&self) -> PathBuf {
        (**self).backup_dir()
    }
}

/// The catalog store. Owns the contract shared by all backends.
pub struct Store<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> Store<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn list_products(&self) -> Result<Vec<Product>> {
        self.backend.load_products()
    }

    pub fn list_suppliers(&self) -> Result<Vec<Supplier>> {
        self.backend.load_suppliers()
    }

    /// Case-insensitive substring match over name and description.
    /// An empty query returns the full collection.
    pub fn search_products(&self, query: &str) -> Result<Vec<Product>> {
        let q = fold(query);
        let products = self.backend.load_products()?;
        if q.is_empty() {
            return Ok(products);
        }
        Ok(products
            .into_iter()
            .filter(|p| fold(&p.name).contains(&q) || fold(&p.description).contains(&q))
            .collect())
    }

    /// Case-insensitive substring match over name and email.
    pub fn search_suppliers(&self, query: &str) -> Result<Vec<Supplier>> {
        let q = fold(query);
        let suppliers = self.backend.load_suppliers()?;
        if q.is_empty() {
            return Ok(suppliers);
        }
        Ok(suppliers
            .into_iter()
            .filter(|s| fold(&s.name).contains(&q) || fold(&s.email).contains(&q))
            .collect())
    }

    /// Add a product. Fails on an empty name, a case-insensitive
    /// duplicate, or an image reference on a backend that cannot keep
    /// it; the store is left unchanged on failure.
    pub fn add_product(
        &self,
        name: &str,
        description: &str,
        image: Option<&str>,
    ) -> Result<Product> {
        let name = normalize(name);
        if name.is_empty() {
            return Err(QuoteError::Validation(
                "Product name cannot be empty".to_string(),
            ));
        }

        let image = image.map(normalize).filter(|i| !i.is_empty());
        if image.is_some() && !self.backend.supports_images() {
            return Err(QuoteError::Validation(format!(
                "{} does not store product images; use the gallery backend",
                self.backend.describe()
            )));
        }

        let mut products = self.backend.load_products()?;
        if products.iter().any(|p| fold(&p.name) == fold(&name)) {
            return Err(QuoteError::Validation(format!(
                "A product named '{}' already exists",
                name
            )));
        }

        let product = Product {
            name,
            description: normalize(description),
            image,
        };
        products.push(product.clone());
        self.backend.save_products(&products)?;
        Ok(product)
    }

    /// Add a supplier. Validates the email shape before persistence.
    pub fn add_supplier(&self, name: &str, email: &str) -> Result<Supplier> {
        let name = normalize(name);
        let email = normalize(email);
        if name.is_empty() {
            return Err(QuoteError::Validation(
                "Supplier name cannot be empty".to_string(),
            ));
        }
        if !is_valid_email(&email) {
            return Err(QuoteError::Validation(format!(
                "'{}' is not a valid email address",
                email
            )));
        }

        let mut suppliers = self.backend.load_suppliers()?;
        if suppliers.iter().any(|s| fold(&s.name) == fold(&name)) {
            return Err(QuoteError::Validation(format!(
                "A supplier named '{}' already exists",
                name
            )));
        }

        let supplier = Supplier { name, email };
        suppliers.push(supplier.clone());
        self.backend.save_suppliers(&suppliers)?;
        Ok(supplier)
    }

    /// Remove every product whose name matches case-insensitively.
    /// Returns the count removed; zero matches performs no write.
    pub fn delete_product(&self, name: &str) -> Result<usize> {
        let target = fold(name);
        if target.is_empty() {
            return Ok(0);
        }

        let products = self.backend.load_products()?;
        let kept: Vec<Product> = products
            .iter()
            .filter(|p| fold(&p.name) != target)
            .cloned()
            .collect();
        let removed = products.len() - kept.len();
        if removed > 0 {
            self.backend.save_products(&kept)?;
        }
        Ok(removed)
    }

    pub fn delete_supplier(&self, name: &str) -> Result<usize> {
        let target = fold(name);
        if target.is_empty() {
            return Ok(0);
        }

        let suppliers = self.backend.load_suppliers()?;
        let kept: Vec<Supplier> = suppliers
            .iter()
            .filter(|s| fold(&s.name) != target)
            .cloned()
            .collect();
        let removed = suppliers.len() - kept.len();
        if removed > 0 {
            self.backend.save_suppliers(&kept)?;
        }
        Ok(removed)
    }

    /// Resolve a selection of product names to full records. Blank
    /// names are ignored; unknown names silently resolve to nothing.
    pub fn products_by_names<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Product>> {
        let wanted: HashSet<String> = names
            .iter()
            .map(|n| fold(n.as_ref()))
            .filter(|n| !n.is_empty())
            .collect();
        if wanted.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .backend
            .load_products()?
            .into_iter()
            .filter(|p| wanted.contains(&fold(&p.name)))
            .collect())
    }

    pub fn suppliers_by_names<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Supplier>> {
        let wanted: HashSet<String> = names
            .iter()
            .map(|n| fold(n.as_ref()))
            .filter(|n| !n.is_empty())
            .collect();
        if wanted.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .backend
            .load_suppliers()?
            .into_iter()
            .filter(|s| wanted.contains(&fold(&s.name)))
            .collect())
    }
}
