use super::StoreBackend;
use crate::error::{QuoteError, Result};
use crate::model::{Product, Supplier};
use std::cell::RefCell;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since quotekit is
/// single-threaded; the `StoreBackend` trait can then take `&self`
/// for all methods.
#[derive(Default)]
pub struct MemBackend {
    products: RefCell<Vec<Product>>,
    suppliers: RefCell<Vec<Supplier>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl StoreBackend for MemBackend {
    fn load_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.borrow().clone())
    }

    fn save_products(&self, products: &[Product]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(QuoteError::Store("Simulated write error".to_string()));
        }
        *self.products.borrow_mut() = products.to_vec();
        Ok(())
    }

    fn load_suppliers(&self) -> Result<Vec<Supplier>> {
        Ok(self.suppliers.borrow().clone())
    }

    fn save_suppliers(&self, suppliers: &[Supplier]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(QuoteError::Store("Simulated write error".to_string()));
        }
        *self.suppliers.borrow_mut() = suppliers.to_vec();
        Ok(())
    }

    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn supports_images(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "in-memory store".to_string()
    }

    fn backup_dir(&self) -> PathBuf {
        std::env::temp_dir()
    }
}
