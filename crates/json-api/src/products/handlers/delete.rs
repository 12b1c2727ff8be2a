//! Delete Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    errors::ApiError,
    extensions::*,
    products::errors::{DELETE_FAILED, into_api_error, no_product_with_id, parse_product_uuid},
    state::State,
};

const PRODUCT_DELETED: &str = "Product deleted..";

/// Product Deleted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDeletedResponse {
    /// Confirmation message
    pub msg: String,
}

/// Delete Product Handler
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    responses(
        (status_code = StatusCode::OK, description = "Product deleted"),
    ),
)]
#[tracing::instrument(
    name = "products.delete",
    skip(id, depot),
    fields(product_id = tracing::field::Empty)
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductDeletedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();

    tracing::Span::current().record("product_id", id.as_str());

    let not_found = no_product_with_id(&id);
    let uuid = parse_product_uuid(&id, &not_found)?;

    state
        .app
        .products
        .get_product(uuid)
        .await
        .map_err(|error| into_api_error(error, Some(&not_found), DELETE_FAILED))?;

    state
        .app
        .products
        .delete_product(uuid)
        .await
        .map_err(|error| into_api_error(error, Some(&not_found), DELETE_FAILED))?;

    tracing::info!(product_uuid = %uuid, "deleted product");

    Ok(Json(ProductDeletedResponse {
        msg: PRODUCT_DELETED.to_owned(),
    }))
}
