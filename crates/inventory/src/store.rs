//! File-backed inventory store.
//!
//! Owns the in-memory sequence of products (insertion order preserved, ids
//! unique) and rewrites the whole backing file after every mutation. Saves
//! go through a temporary file that atomically replaces the backing file,
//! so the file on disk is never observed half-written.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use almacen_core::DomainError;
use almacen_products::Product;

use crate::format::{parse_line, serialize_line};

/// Well-known backing file used when no path is configured.
pub const DEFAULT_PATH: &str = "inventario.txt";

/// Persistence failure: file creation, read, or write/replace.
///
/// Load-time occurrences degrade to recorded warnings; save-time occurrences
/// surface as [`Outcome::NotSaved`].
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("no se pudo crear el archivo '{path}': {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no se pudo leer el archivo '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no se pudo escribir el archivo temporal '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no se pudo reemplazar el archivo '{path}': {source}")]
    Replace {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result of a mutation that also rewrites the backing file.
///
/// The mutation itself already succeeded in memory; `NotSaved` reports that
/// the resave failed and the file still holds the previous snapshot.
#[derive(Debug)]
#[must_use]
pub enum Outcome {
    Saved,
    NotSaved(PersistError),
}

impl Outcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Outcome::Saved)
    }
}

/// The in-memory + file-backed collection of products.
pub struct InventoryStore {
    path: PathBuf,
    products: Vec<Product>,
    warnings: Vec<String>,
}

impl InventoryStore {
    /// Open the store at `path`, creating an empty backing file if missing
    /// and loading whatever valid records the file holds.
    ///
    /// Never fails: I/O problems and malformed lines degrade to warnings
    /// (see [`InventoryStore::load_warnings`]) and a partial or empty set.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            path: path.into(),
            products: Vec::new(),
            warnings: Vec::new(),
        };
        store.load();
        store
    }

    /// Open the store at [`DEFAULT_PATH`].
    pub fn open_default() -> Self {
        Self::open(DEFAULT_PATH)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Warnings collected during the most recent load, in order.
    pub fn load_warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Register a new product. Fails without mutating if the id is taken.
    pub fn add(&mut self, product: Product) -> Result<Outcome, DomainError> {
        if self.find(product.id()).is_some() {
            return Err(DomainError::duplicate_id(product.id()));
        }
        self.products.push(product);
        Ok(self.resave_outcome())
    }

    /// Remove the product with the given id.
    pub fn remove(&mut self, id: &str) -> Result<Outcome, DomainError> {
        let Some(idx) = self.find(id) else {
            return Err(DomainError::not_found(id));
        };
        self.products.remove(idx);
        Ok(self.resave_outcome())
    }

    /// Update quantity and/or price of the product with the given id.
    ///
    /// Validate-then-apply: candidate values are staged on a copy, so a
    /// rejected value leaves the stored record completely untouched.
    pub fn update(
        &mut self,
        id: &str,
        quantity: Option<i64>,
        price: Option<f64>,
    ) -> Result<Outcome, DomainError> {
        let Some(idx) = self.find(id) else {
            return Err(DomainError::not_found(id));
        };

        let mut staged = self.products[idx].clone();
        if let Some(quantity) = quantity {
            staged.set_quantity(quantity)?;
        }
        if let Some(price) = price {
            staged.set_price(price)?;
        }
        self.products[idx] = staged;
        Ok(self.resave_outcome())
    }

    /// Case-insensitive substring match against product names, in store
    /// order. A blank query matches every record.
    pub fn search_by_name(&self, query: &str) -> Vec<&Product> {
        let query = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| p.name().to_lowercase().contains(&query))
            .collect()
    }

    /// The full in-memory sequence, in store order.
    pub fn list_all(&self) -> &[Product] {
        &self.products
    }

    fn find(&self, id: &str) -> Option<usize> {
        self.products.iter().position(|p| p.id() == id)
    }

    /// Clear and rebuild the in-memory set and the warning list from the
    /// backing file. Bad lines are skipped, never fatal.
    fn load(&mut self) {
        self.products.clear();
        self.warnings.clear();

        if !self.path.exists() {
            if let Err(source) = fs::write(&self.path, "") {
                let err = PersistError::Create {
                    path: self.path.clone(),
                    source,
                };
                warn!(%err, "could not create backing file; starting empty");
                self.warnings.push(err.to_string());
                return;
            }
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(source) => {
                let err = PersistError::Read {
                    path: self.path.clone(),
                    source,
                };
                warn!(%err, "could not read backing file; starting empty");
                self.warnings.push(err.to_string());
                return;
            }
        };

        for (idx, line) in contents.lines().enumerate() {
            let number = idx + 1;
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(line) {
                Ok(product) => {
                    if self.find(product.id()).is_some() {
                        warn!(line = number, id = product.id(), "duplicate id, keeping first occurrence");
                        self.warnings.push(format!(
                            "línea {number}: ID duplicado '{}', se conserva la primera aparición",
                            product.id()
                        ));
                    } else {
                        self.products.push(product);
                    }
                }
                Err(err) => {
                    warn!(line = number, %err, "skipping malformed line");
                    self.warnings.push(format!("línea {number}: {err}"));
                }
            }
        }

        info!(
            path = %self.path.display(),
            records = self.products.len(),
            warnings = self.warnings.len(),
            "inventory loaded"
        );
    }

    fn resave_outcome(&self) -> Outcome {
        match self.resave() {
            Ok(()) => Outcome::Saved,
            Err(err) => {
                warn!(%err, "mutation applied in memory but not persisted");
                Outcome::NotSaved(err)
            }
        }
    }

    /// Serialize every record to `<path>.tmp`, then atomically replace the
    /// backing file. On failure the original file is left untouched; the
    /// temporary file is removed regardless of outcome.
    fn resave(&self) -> Result<(), PersistError> {
        let tmp = tmp_path(&self.path);

        let result = self.write_snapshot(&tmp).and_then(|()| {
            fs::rename(&tmp, &self.path).map_err(|source| PersistError::Replace {
                path: self.path.clone(),
                source,
            })
        });

        if tmp.exists() {
            let _ = fs::remove_file(&tmp);
        }

        if result.is_ok() {
            debug!(
                path = %self.path.display(),
                records = self.products.len(),
                "inventory resaved"
            );
        }
        result
    }

    fn write_snapshot(&self, tmp: &Path) -> Result<(), PersistError> {
        let mut buf = String::new();
        for product in &self.products {
            buf.push_str(&serialize_line(product));
            buf.push('\n');
        }
        fs::write(tmp, buf).map_err(|source| PersistError::Write {
            path: tmp.to_path_buf(),
            source,
        })
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}
