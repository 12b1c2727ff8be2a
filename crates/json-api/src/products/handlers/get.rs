//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::records::ProductRecord;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{
        errors::{FETCH_FAILED, PRODUCT_NOT_FOUND, into_api_error, parse_product_uuid},
        payload::serialize_amount,
    },
    state::State,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: Uuid,

    /// The product name
    pub name: String,

    /// Unit price
    #[serde(serialize_with = "serialize_amount")]
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    /// Units in stock
    #[serde(serialize_with = "serialize_amount")]
    #[salvo(schema(value_type = f64))]
    pub quantity: Decimal,

    /// Image URL or path
    pub image: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.uuid.into_uuid(),
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            image: product.image,
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uuid = parse_product_uuid(&id.into_inner(), PRODUCT_NOT_FOUND)?;

    let product = state
        .app
        .products
        .get_product(uuid)
        .await
        .map_err(|error| into_api_error(error, Some(PRODUCT_NOT_FOUND), FETCH_FAILED))?;

    Ok(Json(product.into()))
}
