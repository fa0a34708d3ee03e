use serde::{Deserialize, Serialize};

use almacen_core::{DomainError, DomainResult};

/// One inventory record: identity plus mutable stock and pricing fields.
///
/// Fields are private so the non-negativity and non-blank invariants can only
/// be established through [`Product::new`] and the fallible setters. The id
/// is immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: String,
    name: String,
    quantity: i64,
    price: f64,
}

impl Product {
    /// Build a validated product.
    ///
    /// Id and name are trimmed; blank values and negative quantity/price are
    /// rejected with a `DomainError::Validation`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: i64,
        price: f64,
    ) -> DomainResult<Self> {
        let id = id.into().trim().to_string();
        let name = name.into().trim().to_string();

        if id.is_empty() {
            return Err(DomainError::validation("El ID no puede estar vacío."));
        }
        if name.is_empty() {
            return Err(DomainError::validation("El nombre no puede estar vacío."));
        }
        check_quantity(quantity)?;
        check_price(price)?;

        Ok(Self {
            id,
            name,
            quantity,
            price,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Rename the product. Blank names are rejected.
    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("El nombre no puede estar vacío."));
        }
        self.name = name;
        Ok(())
    }

    /// Replace the stocked quantity. Negative values are rejected.
    pub fn set_quantity(&mut self, quantity: i64) -> DomainResult<()> {
        check_quantity(quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    /// Replace the unit price. Negative values are rejected.
    pub fn set_price(&mut self, price: f64) -> DomainResult<()> {
        check_price(price)?;
        self.price = price;
        Ok(())
    }
}

fn check_quantity(quantity: i64) -> DomainResult<()> {
    if quantity < 0 {
        return Err(DomainError::validation("La cantidad no puede ser negativa."));
    }
    Ok(())
}

fn check_price(price: f64) -> DomainResult<()> {
    if price < 0.0 || !price.is_finite() {
        return Err(DomainError::validation("El precio no puede ser negativo."));
    }
    Ok(())
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "ID: {} | Nombre: {} | Cantidad: {} | Precio: ${:.2}",
            self.id, self.name, self.quantity, self.price
        )
    }
}
