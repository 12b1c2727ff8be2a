//! Product Errors

use tracing::error;

use storefront_app::domain::products::{ProductsServiceError, records::ProductUuid};

use crate::errors::ApiError;

pub(crate) const NO_PRODUCTS_FOUND: &str = "No products found!";
pub(crate) const PRODUCT_NOT_FOUND: &str = "Product does not exist";
pub(crate) const PRODUCT_NOT_FOUND_FOR_UPDATE: &str = "Product does not exist.";
pub(crate) const MISSING_PARAMETERS: &str = "Please provide all the required parameters..";
pub(crate) const INVALID_PRODUCT_DATA: &str = "Invalid product data.";
pub(crate) const MALFORMED_BODY: &str = "Request body must be a JSON object.";

pub(crate) const LIST_FAILED: &str = "An error occurred while fetching the products.";
pub(crate) const FETCH_FAILED: &str = "An error occurred while fetching the product.";
pub(crate) const CREATE_FAILED: &str = "An error occurred while creating the product.";
pub(crate) const UPDATE_FAILED: &str = "An error occurred while updating the product.";
pub(crate) const DELETE_FAILED: &str = "An error occurred while deleting the product.";

/// Message for a delete aimed at an unknown product.
pub(crate) fn no_product_with_id(id: &str) -> String {
    format!("No product with ID {id}")
}

/// Product identifiers that do not parse can never exist in storage.
pub(crate) fn parse_product_uuid(id: &str, not_found: &str) -> Result<ProductUuid, ApiError> {
    id.parse().map_err(|_ignored| ApiError::not_found(not_found))
}

/// Translate a storage failure into the response for this route.
///
/// `not_found` is the message for a missing product, or `None` where the
/// route has no product to miss. Anything unexpected is logged here with its
/// cause since the client only sees `failure`.
pub(crate) fn into_api_error(
    error: ProductsServiceError,
    not_found: Option<&str>,
    failure: &str,
) -> ApiError {
    match (error, not_found) {
        (ProductsServiceError::NotFound, Some(message)) => ApiError::not_found(message),
        (ProductsServiceError::MissingRequiredData, _) => ApiError::bad_request(MISSING_PARAMETERS),
        (ProductsServiceError::InvalidData, _) => ApiError::bad_request(INVALID_PRODUCT_DATA),
        (error, _) => {
            error!(error = ?error, "{failure}");

            ApiError::internal(failure)
        }
    }
}
