//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    errors::ApiError,
    extensions::*,
    products::{
        errors::{LIST_FAILED, NO_PRODUCTS_FOUND, into_api_error},
        get::ProductResponse,
    },
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductsResponse {
    /// Number of products returned
    pub total: usize,

    /// Every stored product, oldest first
    pub all_products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns every product. An empty catalogue is reported as 404.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "All products"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products()
        .await
        .map_err(|error| into_api_error(error, Some(NO_PRODUCTS_FOUND), LIST_FAILED))?;

    if products.is_empty() {
        return Err(ApiError::not_found(NO_PRODUCTS_FOUND));
    }

    Ok(Json(ProductsResponse {
        total: products.len(),
        all_products: products.into_iter().map(Into::into).collect(),
    }))
}
