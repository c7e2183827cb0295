//! Embedded sqlite backend.
//!
//! Two tables, autoincrement id and unique name each. The schema is
//! created on open, so unlike the workbook backends a missing file is
//! not an error. sqlx is async; the backend owns a private
//! current-thread runtime and blocks on it, keeping the
//! `StoreBackend` surface synchronous like the rest of the crate.

use super::StoreBackend;
use crate::error::Result;
use crate::model::{Product, Supplier};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

const CREATE_PRODUCTS: &str = "
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        description TEXT NOT NULL DEFAULT ''
    )
";

const CREATE_SUPPLIERS: &str = "
    CREATE TABLE IF NOT EXISTS suppliers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL
    )
";

pub struct SqliteBackend {
    runtime: Runtime,
    pool: SqlitePool,
    path: PathBuf,
}

impl SqliteBackend {
    /// Open (or create) the database at the given path.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let url = format!("sqlite:{}?mode=rwc", path.display());
        Self::connect(&url, path)
    }

    /// In-memory database for testing.
    pub fn in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:", PathBuf::from(":memory:"))
    }

    fn connect(url: &str, path: PathBuf) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let pool = runtime.block_on(async {
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .connect(url)
                .await?;
            sqlx::query(CREATE_PRODUCTS).execute(&pool).await?;
            sqlx::query(CREATE_SUPPLIERS).execute(&pool).await?;
            Ok::<_, sqlx::Error>(pool)
        })?;
        Ok(Self {
            runtime,
            pool,
            path,
        })
    }
}

impl StoreBackend for SqliteBackend {
    fn load_products(&self) -> Result<Vec<Product>> {
        let rows = self.runtime.block_on(
            sqlx::query("SELECT name, description FROM products ORDER BY id")
                .fetch_all(&self.pool),
        )?;
        Ok(rows
            .iter()
            .map(|row| Product::new(row.get::<String, _>("name"), row.get::<String, _>("description")))
            .collect())
    }

    fn save_products(&self, products: &[Product]) -> Result<()> {
        self.runtime.block_on(async {
            let mut tx = self.pool.begin().await?;
            sqlx::query("DELETE FROM products").execute(&mut *tx).await?;
            for product in products {
                sqlx::query("INSERT INTO products (name, description) VALUES (?, ?)")
                    .bind(&product.name)
                    .bind(&product.description)
                    .execute(&mut *tx)
                    .await?;
            }
            tx.commit().await?;
            Ok::<_, sqlx::Error>(())
        })?;
        Ok(())
    }

    fn load_suppliers(&self) -> Result<Vec<Supplier>> {
        let rows = self.runtime.block_on(
            sqlx::query("SELECT name, email FROM suppliers ORDER BY id").fetch_all(&self.pool),
        )?;
        Ok(rows
            .iter()
            .map(|row| Supplier::new(row.get::<String, _>("name"), row.get::<String, _>("email")))
            .collect())
    }

    fn save_suppliers(&self, suppliers: &[Supplier]) -> Result<()> {
        self.runtime.block_on(async {
            let mut tx = self.pool.begin().await?;
            sqlx::query("DELETE FROM suppliers").execute(&mut *tx).await?;
            for supplier in suppliers {
                sqlx::query("INSERT INTO suppliers (name, email) VALUES (?, ?)")
                    .bind(&supplier.name)
                    .bind(&supplier.email)
                    .execute(&mut *tx)
                    .await?;
            }
            tx.commit().await?;
            Ok::<_, sqlx::Error>(())
        })?;
        Ok(())
    }

    fn initialize(&self) -> Result<()> {
        // Schema creation happened on open.
        Ok(())
    }

    fn supports_images(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        format!("sqlite database {}", self.path.display())
    }

    fn backup_dir(&self) -> PathBuf {
        super::workbook::parent_dir(&self.path)
    }
}
