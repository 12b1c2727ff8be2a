//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    context::AppContext,
    domain::products::{
        MockProductsService,
        records::{ProductRecord, ProductUuid},
    },
};

use crate::{errors::catcher, state::State};

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Pen".to_owned(),
        price: Decimal::from(10),
        quantity: Decimal::from(5),
        image: "pen.png".to_owned(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A mock that fails the test if any storage call is made.
pub(crate) fn untouched_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(AppContext::new(Arc::new(
                products,
            )))))
            .push(route),
    )
    .catcher(catcher())
}
