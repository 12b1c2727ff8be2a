//! Products Data

use rust_decimal::Decimal;

/// New Product Data
///
/// Identifiers are assigned by the store, so none is carried here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Display name.
    pub name: String,

    /// Unit price, kept at the precision it was given.
    pub price: Decimal,

    /// Stock on hand.
    pub quantity: Decimal,

    /// Image path or URL.
    pub image: String,
}

/// Product Update Data
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    /// Replacement name.
    pub name: Option<String>,

    /// Replacement price.
    pub price: Option<Decimal>,

    /// Replacement quantity.
    pub quantity: Option<Decimal>,

    /// Replacement image.
    pub image: Option<String>,
}
