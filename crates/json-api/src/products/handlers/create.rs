//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use storefront_app::domain::products::data::NewProduct;

use crate::{
    errors::ApiError,
    extensions::*,
    products::{
        errors::{CREATE_FAILED, INVALID_PRODUCT_DATA, MISSING_PARAMETERS, into_api_error},
        get::ProductResponse,
        payload::{amount, is_truthy, read_body, text},
    },
    state::State,
};

/// Create Product Request
///
/// Every field is required; `null`, `false`, `0` and `""` count as missing.
/// `price` and `quantity` may be numbers or numeric strings.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    #[salvo(schema(value_type = Option<String>))]
    pub name: Option<Value>,

    #[salvo(schema(value_type = Option<f64>))]
    pub price: Option<Value>,

    #[salvo(schema(value_type = Option<f64>))]
    pub quantity: Option<Value>,

    #[salvo(schema(value_type = Option<String>))]
    pub image: Option<Value>,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = ApiError;

    fn try_from(request: CreateProductRequest) -> Result<Self, Self::Error> {
        let present = |field: Option<Value>| {
            field
                .filter(is_truthy)
                .ok_or_else(|| ApiError::bad_request(MISSING_PARAMETERS))
        };

        let name = present(request.name)?;
        let price = present(request.price)?;
        let quantity = present(request.quantity)?;
        let image = present(request.image)?;

        let invalid = || ApiError::bad_request(INVALID_PRODUCT_DATA);

        Ok(NewProduct {
            name: text(name).ok_or_else(invalid)?,
            price: amount(&price).ok_or_else(invalid)?,
            quantity: amount(&quantity).ok_or_else(invalid)?,
            image: text(image).ok_or_else(invalid)?,
        })
    }
}

/// Product Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductCreatedResponse {
    /// The stored product, including its assigned id
    pub new_product: ProductResponse,
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    request_body = CreateProductRequest,
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductCreatedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = NewProduct::try_from(read_body::<CreateProductRequest>(req).await?)?;

    let created = state
        .app
        .products
        .create_product(product)
        .await
        .map_err(|error| into_api_error(error, None, CREATE_FAILED))?;

    res.add_header(LOCATION, format!("/product/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductCreatedResponse {
        new_product: created.into(),
    }))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::{
        errors::ErrorResponse,
        products::errors::MALFORMED_BODY,
        test_helpers::{make_product, products_service, untouched_products_mock},
    };

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("product").post(handler))
    }

    fn pen() -> NewProduct {
        NewProduct {
            name: "Pen".to_owned(),
            price: Decimal::from(10),
            quantity: Decimal::from(5),
            image: "pen.png".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let uuid = ProductUuid::new();
        let product = make_product(uuid);

        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .withf(|new| *new == pen())
            .return_once(move |_| Ok(product));

        let mut res = TestClient::post("http://example.com/product")
            .json(&json!({ "name": "Pen", "price": 10, "quantity": 5, "image": "pen.png" }))
            .send(&make_service(repo))
            .await;

        let body: ProductCreatedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/product/{uuid}").as_str()));
        assert_eq!(body.new_product.id, uuid.into_uuid());
        assert_eq!(body.new_product.name, "Pen");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_accepts_fractional_and_string_amounts() -> TestResult {
        let cases = [
            (json!(9.99), json!(5), Decimal::new(999, 2), Decimal::from(5)),
            (json!("10"), json!("2.5"), Decimal::from(10), Decimal::new(25, 1)),
        ];

        for (price, quantity, expected_price, expected_quantity) in cases {
            let uuid = ProductUuid::new();

            let mut stored = make_product(uuid);

            stored.price = expected_price;
            stored.quantity = expected_quantity;

            let mut repo = MockProductsService::new();

            repo.expect_create_product()
                .once()
                .withf(move |new| {
                    *new == NewProduct {
                        price: expected_price,
                        quantity: expected_quantity,
                        ..pen()
                    }
                })
                .return_once(move |_| Ok(stored));

            let payload = json!({
                "name": "Pen",
                "price": price,
                "quantity": quantity,
                "image": "pen.png",
            });

            let mut res = TestClient::post("http://example.com/product")
                .json(&payload)
                .send(&make_service(repo))
                .await;

            assert_eq!(
                res.status_code,
                Some(StatusCode::CREATED),
                "payload {payload} should be accepted"
            );

            let body: ProductCreatedResponse = res.take_json().await?;

            assert_eq!(body.new_product.price, expected_price);
            assert_eq!(body.new_product.quantity, expected_quantity);
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_missing_or_falsy_fields_return_400() -> TestResult {
        let payloads = [
            json!({}),
            json!({ "price": 10, "quantity": 5, "image": "pen.png" }),
            json!({ "name": "Pen", "quantity": 5, "image": "pen.png" }),
            json!({ "name": "Pen", "price": 10, "image": "pen.png" }),
            json!({ "name": "Pen", "price": 10, "quantity": 5 }),
            json!({ "name": "", "price": 10, "quantity": 5, "image": "pen.png" }),
            json!({ "name": "Pen", "price": 0, "quantity": 5, "image": "pen.png" }),
            json!({ "name": "Pen", "price": null, "quantity": 5, "image": "pen.png" }),
            json!({ "name": "Pen", "price": 10, "quantity": 0, "image": "pen.png" }),
            json!({ "name": "Pen", "price": 10, "quantity": false, "image": "pen.png" }),
            json!({ "name": "Pen", "price": 10, "quantity": 5, "image": "" }),
        ];

        for payload in payloads {
            let mut res = TestClient::post("http://example.com/product")
                .json(&payload)
                .send(&make_service(untouched_products_mock()))
                .await;

            let body: ErrorResponse = res.take_json().await?;

            assert_eq!(
                res.status_code,
                Some(StatusCode::BAD_REQUEST),
                "payload {payload} should be rejected"
            );
            assert_eq!(body.error, MISSING_PARAMETERS);
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_without_body_returns_missing_parameters() -> TestResult {
        let mut res = TestClient::post("http://example.com/product")
            .send(&make_service(untouched_products_mock()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, MISSING_PARAMETERS);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_non_numeric_amount_returns_invalid_data() -> TestResult {
        let payloads = [
            json!({ "name": "Pen", "price": "ten", "quantity": 5, "image": "pen.png" }),
            json!({ "name": "Pen", "price": 10, "quantity": [5], "image": "pen.png" }),
            json!({ "name": 42, "price": 10, "quantity": 5, "image": "pen.png" }),
        ];

        for payload in payloads {
            let mut res = TestClient::post("http://example.com/product")
                .json(&payload)
                .send(&make_service(untouched_products_mock()))
                .await;

            let body: ErrorResponse = res.take_json().await?;

            assert_eq!(
                res.status_code,
                Some(StatusCode::BAD_REQUEST),
                "payload {payload} should be rejected"
            );
            assert_eq!(body.error, INVALID_PRODUCT_DATA);
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_malformed_json_returns_error_envelope() -> TestResult {
        for raw in [r#"{"name": "Pen", "price": "#, "[1, 2]", "\"Pen\""] {
            let mut res = TestClient::post("http://example.com/product")
                .raw_json(raw)
                .send(&make_service(untouched_products_mock()))
                .await;

            let body: ErrorResponse = res.take_json().await?;

            assert_eq!(
                res.status_code,
                Some(StatusCode::BAD_REQUEST),
                "body {raw} should be rejected"
            );
            assert_eq!(body.error, MALFORMED_BODY);
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_storage_failure_returns_500() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::AlreadyExists));

        let mut res = TestClient::post("http://example.com/product")
            .json(&json!({ "name": "Pen", "price": 10, "quantity": 5, "image": "pen.png" }))
            .send(&make_service(repo))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body.error, CREATE_FAILED);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_not_found_from_storage_returns_500() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let mut res = TestClient::post("http://example.com/product")
            .json(&json!({ "name": "Pen", "price": 10, "quantity": 5, "image": "pen.png" }))
            .send(&make_service(repo))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body.error, CREATE_FAILED);

        Ok(())
    }

    #[test]
    fn test_whitespace_name_is_accepted() -> TestResult {
        let product = NewProduct::try_from(CreateProductRequest {
            name: Some(json!(" ")),
            price: Some(json!(1)),
            quantity: Some(json!(1)),
            image: Some(json!("x")),
        })?;

        assert_eq!(product.name, " ");

        Ok(())
    }
}
