//! Line codec for the backing file.
//!
//! One record per line, four fields separated by a literal `|` in fixed
//! order `id|name|quantity|price`. Fields are trimmed before use; there is
//! no escaping, so a `|` inside a field corrupts the line.

use thiserror::Error;

use almacen_core::DomainError;
use almacen_products::Product;

pub const FIELD_SEPARATOR: char = '|';
const FIELD_COUNT: usize = 4;

/// Why a line of the backing file was rejected.
///
/// Rendered (in Spanish) into the load warning shown to the user.
#[derive(Debug, Error)]
pub enum LineError {
    #[error("se esperaban {FIELD_COUNT} campos separados por '{FIELD_SEPARATOR}', hay {0}")]
    FieldCount(usize),

    #[error("cantidad no numérica: '{0}'")]
    Quantity(String),

    #[error("precio no numérico: '{0}'")]
    Price(String),

    /// Blank id/name or a negative value, rejected by `Product::new`.
    #[error("{0}")]
    Invalid(#[from] DomainError),
}

/// Parse one line of the backing file into a validated [`Product`].
pub fn parse_line(line: &str) -> Result<Product, LineError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != FIELD_COUNT {
        return Err(LineError::FieldCount(fields.len()));
    }

    let id = fields[0].trim();
    let name = fields[1].trim();
    let quantity = fields[2].trim();
    let price = fields[3].trim();

    let quantity: i64 = quantity
        .parse()
        .map_err(|_| LineError::Quantity(quantity.to_string()))?;
    let price: f64 = price
        .parse()
        .map_err(|_| LineError::Price(price.to_string()))?;

    Ok(Product::new(id, name, quantity, price)?)
}

/// Serialize one record as a backing-file line (no trailing newline).
///
/// Numbers use plain `Display`, so integers stay integers and values entered
/// through the menu round-trip exactly.
pub fn serialize_line(product: &Product) -> String {
    format!(
        "{}{sep}{}{sep}{}{sep}{}",
        product.id(),
        product.name(),
        product.quantity(),
        product.price(),
        sep = FIELD_SEPARATOR,
    )
}
