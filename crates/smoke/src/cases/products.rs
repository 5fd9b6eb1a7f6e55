//! Product CRUD, search, and barcode-render cases

use posmate_api::{NewProduct, Product};

use super::{reason, CaseOutcome};
use crate::checks;
use crate::client::{ApiClient, Exchange};
use crate::error::SmokeResult;
use crate::state::SuiteState;

/// Substring the name-search case queries for. The fixture set is built so
/// exactly one product matches.
const NAME_QUERY: &str = "Gold";

fn fixtures() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Gold Ring 22K".to_string(),
            category: "Rings".to_string(),
            stock: 5,
            mrp: 45_000.0,
            sell_price: 42_000.0,
        },
        NewProduct {
            name: "Diamond Necklace".to_string(),
            category: "Necklaces".to_string(),
            stock: 2,
            mrp: 125_000.0,
            sell_price: 120_000.0,
        },
        NewProduct {
            name: "Silver Bracelet".to_string(),
            category: "Bracelets".to_string(),
            stock: 10,
            mrp: 8_500.0,
            sell_price: 8_000.0,
        },
    ]
}

/// Create the three fixture products and record their ids in order. Each
/// response must carry the backend-generated id, code, and barcode.
pub(crate) async fn create(api: &ApiClient, state: &mut SuiteState) -> SmokeResult<CaseOutcome> {
    let mut codes = Vec::new();

    for fixture in fixtures() {
        let payload = serde_json::to_value(&fixture)?;
        let Exchange { success, data, error } = api.post("/products", &payload).await;
        let Some(body) = data.filter(|_| success) else {
            return Ok(CaseOutcome::fail(format!(
                "failed to create {}: {}",
                fixture.name,
                reason(error)
            )));
        };

        let product: Product = serde_json::from_value(body)?;
        if !product.has_generated_fields() {
            return Ok(CaseOutcome::fail(format!(
                "{} created without generated id/code/barcode",
                fixture.name
            )));
        }

        state.record_product(product.id);
        codes.push(product.code);
    }

    Ok(CaseOutcome::pass(format!(
        "created {} products ({})",
        codes.len(),
        codes.join(", ")
    )))
}

/// `GET /products` must list at least the three fixtures.
pub(crate) async fn list(api: &ApiClient) -> SmokeResult<CaseOutcome> {
    let Exchange { success, data, error } = api.get("/products").await;
    let Some(body) = data.filter(|_| success) else {
        return Ok(CaseOutcome::fail(format!(
            "failed to list products: {}",
            reason(error)
        )));
    };

    let products: Vec<Product> = serde_json::from_value(body)?;
    if products.len() >= 3 {
        Ok(CaseOutcome::pass(format!("listed {} products", products.len())))
    } else {
        Ok(CaseOutcome::fail(format!(
            "expected at least 3 products, got {}",
            products.len()
        )))
    }
}

/// `GET /products/{id}` must round-trip the identifier.
pub(crate) async fn fetch_single(api: &ApiClient, state: &SuiteState) -> SmokeResult<CaseOutcome> {
    let id = match state.require_products(1) {
        Ok(ids) => ids[0].clone(),
        Err(why) => return Ok(CaseOutcome::skip(why)),
    };

    let Exchange { success, data, error } = api.get(&format!("/products/{id}")).await;
    let Some(body) = data.filter(|_| success) else {
        return Ok(CaseOutcome::fail(format!(
            "failed to fetch product: {}",
            reason(error)
        )));
    };

    let product: Product = serde_json::from_value(body)?;
    if product.id == id {
        Ok(CaseOutcome::pass(format!("fetched {}", product.name)))
    } else {
        Ok(CaseOutcome::fail(format!(
            "product id mismatch: asked for {}, got {}",
            id, product.id
        )))
    }
}

/// Substring search must return a non-empty set and nothing outside the
/// match.
pub(crate) async fn search_by_name(api: &ApiClient) -> SmokeResult<CaseOutcome> {
    let Exchange { success, data, error } =
        api.get(&format!("/products?query={NAME_QUERY}")).await;
    let Some(body) = data.filter(|_| success) else {
        return Ok(CaseOutcome::fail(format!(
            "failed to search products: {}",
            reason(error)
        )));
    };

    let products: Vec<Product> = serde_json::from_value(body)?;
    if products.is_empty() {
        return Ok(CaseOutcome::fail(format!(
            "search for {NAME_QUERY:?} returned nothing"
        )));
    }

    if let Some(stray) = products.iter().find(|p| !p.name.contains(NAME_QUERY)) {
        return Ok(CaseOutcome::fail(format!(
            "search for {NAME_QUERY:?} returned unrelated product {:?}",
            stray.name
        )));
    }

    Ok(CaseOutcome::pass(format!(
        "found {} product(s) matching {NAME_QUERY:?}",
        products.len()
    )))
}

/// Exact-barcode search must return exactly the product carrying it.
pub(crate) async fn search_by_barcode(
    api: &ApiClient,
    state: &SuiteState,
) -> SmokeResult<CaseOutcome> {
    let id = match state.require_products(1) {
        Ok(ids) => ids[0].clone(),
        Err(why) => return Ok(CaseOutcome::skip(why)),
    };

    let Exchange { success, data, error } = api.get(&format!("/products/{id}")).await;
    let Some(body) = data.filter(|_| success) else {
        return Ok(CaseOutcome::fail(format!(
            "failed to fetch product for barcode lookup: {}",
            reason(error)
        )));
    };

    let product: Product = serde_json::from_value(body)?;
    if product.barcode.is_empty() {
        return Ok(CaseOutcome::fail("product has no barcode".to_string()));
    }

    let Exchange { success, data, error } = api
        .get(&format!("/products?barcode={}", product.barcode))
        .await;
    let Some(body) = data.filter(|_| success) else {
        return Ok(CaseOutcome::fail(format!(
            "failed to search by barcode: {}",
            reason(error)
        )));
    };

    let matches: Vec<Product> = serde_json::from_value(body)?;
    match matches.as_slice() {
        [found] if found.barcode == product.barcode => Ok(CaseOutcome::pass(format!(
            "barcode lookup returned {}",
            found.name
        ))),
        _ => Ok(CaseOutcome::fail(format!(
            "barcode lookup returned {} result(s) instead of the exact product",
            matches.len()
        ))),
    }
}

/// `PUT /products/{id}` must echo every updated field.
pub(crate) async fn update(api: &ApiClient, state: &SuiteState) -> SmokeResult<CaseOutcome> {
    let id = match state.require_products(1) {
        Ok(ids) => ids[0].clone(),
        Err(why) => return Ok(CaseOutcome::skip(why)),
    };

    let wanted = NewProduct {
        name: "Gold Ring 22K - Updated".to_string(),
        category: "Rings".to_string(),
        stock: 8,
        mrp: 46_000.0,
        sell_price: 43_000.0,
    };
    let payload = serde_json::to_value(&wanted)?;

    let Exchange { success, data, error } = api.put(&format!("/products/{id}"), &payload).await;
    let Some(body) = data.filter(|_| success) else {
        return Ok(CaseOutcome::fail(format!(
            "failed to update product: {}",
            reason(error)
        )));
    };

    let product: Product = serde_json::from_value(body)?;
    let round_tripped = product.name == wanted.name
        && product.category == wanted.category
        && product.stock == wanted.stock
        && checks::money_eq(product.mrp, wanted.mrp)
        && checks::money_eq(product.sell_price, wanted.sell_price);

    if round_tripped {
        Ok(CaseOutcome::pass(format!("product updated to {}", product.name)))
    } else {
        Ok(CaseOutcome::fail(
            "product updated but echoed values do not match".to_string(),
        ))
    }
}

/// `GET /products/{id}/barcode` must yield a plausible PNG payload.
pub(crate) async fn render_barcode(
    api: &ApiClient,
    state: &SuiteState,
) -> SmokeResult<CaseOutcome> {
    let id = match state.require_products(1) {
        Ok(ids) => ids[0].clone(),
        Err(why) => return Ok(CaseOutcome::skip(why)),
    };

    let raw = api.fetch_bytes(&format!("/products/{id}/barcode")).await;
    if !raw.success {
        return Ok(CaseOutcome::fail(format!(
            "failed to render barcode: {}",
            reason(raw.error)
        )));
    }

    if checks::is_plausible_png(&raw.content_type, raw.body.len()) {
        Ok(CaseOutcome::pass(format!(
            "rendered a {} byte PNG",
            raw.body.len()
        )))
    } else {
        Ok(CaseOutcome::fail(format!(
            "implausible barcode payload: {} bytes declared as {:?}",
            raw.body.len(),
            raw.content_type
        )))
    }
}

/// Delete the third fixture - the one no invoice references - and confirm a
/// follow-up fetch fails.
pub(crate) async fn delete(api: &ApiClient, state: &SuiteState) -> SmokeResult<CaseOutcome> {
    let id = match state.require_products(3) {
        Ok(ids) => ids[2].clone(),
        Err(why) => return Ok(CaseOutcome::skip(why)),
    };

    let Exchange { success, data, error } = api.delete(&format!("/products/{id}")).await;
    let Some(body) = data.filter(|_| success) else {
        return Ok(CaseOutcome::fail(format!(
            "failed to delete product: {}",
            reason(error)
        )));
    };

    if body.get("success").and_then(serde_json::Value::as_bool) != Some(true) {
        return Ok(CaseOutcome::fail(
            "delete did not acknowledge success".to_string(),
        ));
    }

    let confirm = api.get(&format!("/products/{id}")).await;
    if confirm.success {
        Ok(CaseOutcome::fail(
            "product still fetchable after delete".to_string(),
        ))
    } else {
        Ok(CaseOutcome::pass("product deleted and confirmed gone"))
    }
}
