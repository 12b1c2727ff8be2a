//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::products::data::{NewProduct, ProductUpdate},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    /// Store-assigned identifier.
    pub uuid: ProductUuid,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub price: Decimal,

    /// Stock on hand.
    pub quantity: Decimal,

    /// Image path or URL.
    pub image: String,

    /// When the product was created.
    pub created_at: Timestamp,

    /// When the product was last written.
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Build a freshly created record, stamped with `now`.
    pub fn create(uuid: ProductUuid, product: NewProduct, now: Timestamp) -> Self {
        Self {
            uuid,
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            image: product.image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the fields present in `update` into this record.
    ///
    /// The identifier and creation time never change.
    pub fn apply(&mut self, update: ProductUpdate, now: Timestamp) {
        if let Some(name) = update.name {
            self.name = name;
        }

        if let Some(price) = update.price {
            self.price = price;
        }

        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }

        if let Some(image) = update.image {
            self.image = image;
        }

        self.updated_at = now;
    }
}
