//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use storefront_app::domain::products::data::ProductUpdate;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{
        errors::{
            INVALID_PRODUCT_DATA, PRODUCT_NOT_FOUND_FOR_UPDATE, UPDATE_FAILED, into_api_error,
            parse_product_uuid,
        },
        get::ProductResponse,
        payload::{amount, read_body, text},
    },
    state::State,
};

/// Update Product Request
///
/// Absent or `null` fields keep their stored value. Unknown fields, `id` included, are ignored.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    #[salvo(schema(value_type = Option<String>))]
    pub name: Option<Value>,

    #[salvo(schema(value_type = Option<f64>))]
    pub price: Option<Value>,

    #[salvo(schema(value_type = Option<f64>))]
    pub quantity: Option<Value>,

    #[salvo(schema(value_type = Option<String>))]
    pub image: Option<Value>,
}

impl TryFrom<UpdateProductRequest> for ProductUpdate {
    type Error = ApiError;

    fn try_from(request: UpdateProductRequest) -> Result<Self, Self::Error> {
        let invalid = || ApiError::bad_request(INVALID_PRODUCT_DATA);

        Ok(ProductUpdate {
            name: request.name.map(|name| text(name).ok_or_else(invalid)).transpose()?,
            price: request.price.map(|price| amount(&price).ok_or_else(invalid)).transpose()?,
            quantity: request
                .quantity
                .map(|quantity| amount(&quantity).ok_or_else(invalid))
                .transpose()?,
            image: request.image.map(|image| text(image).ok_or_else(invalid)).transpose()?,
        })
    }
}

/// Product Update Handler
///
/// The product must exist before the body is looked at, so an unknown id is
/// a 404 whatever was sent.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    request_body = UpdateProductRequest,
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(id, req, depot),
    fields(product_uuid = tracing::field::Empty)
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uuid = parse_product_uuid(&id.into_inner(), PRODUCT_NOT_FOUND_FOR_UPDATE)?;

    tracing::Span::current().record("product_uuid", tracing::field::display(uuid));

    let into_update_error =
        |error| into_api_error(error, Some(PRODUCT_NOT_FOUND_FOR_UPDATE), UPDATE_FAILED);

    state
        .app
        .products
        .get_product(uuid)
        .await
        .map_err(into_update_error)?;

    let update = ProductUpdate::try_from(read_body::<UpdateProductRequest>(req).await?)?;

    let product = state
        .app
        .products
        .update_product(uuid, update)
        .await
        .map_err(into_update_error)?;

    tracing::info!(product_uuid = %uuid, "updated product");

    Ok(Json(product.into()))
}
