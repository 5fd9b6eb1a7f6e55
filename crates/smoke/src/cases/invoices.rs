//! Invoice creation, listing, and PDF-render cases

use posmate_api::{CreatedInvoice, Customer, InvoiceDraft, InvoiceItem, Product};
use serde_json::Value;

use super::{reason, CaseOutcome};
use crate::checks;
use crate::client::{ApiClient, Exchange};
use crate::error::SmokeResult;
use crate::state::SuiteState;

const DISCOUNT_PERCENT: f64 = 5.0;

/// Deep-links are long; keep log lines readable.
fn truncate(link: &str) -> &str {
    link.get(..50).unwrap_or(link)
}

/// Create a two-line invoice from the first two recorded products and verify
/// the backend's totals and the derived WhatsApp deep-link.
pub(crate) async fn create(api: &ApiClient, state: &mut SuiteState) -> SmokeResult<CaseOutcome> {
    let ids: Vec<String> = match state.require_products(2) {
        Ok(ids) => ids.to_vec(),
        Err(why) => return Ok(CaseOutcome::skip(why)),
    };

    let mut products: Vec<Product> = Vec::new();
    for id in &ids {
        let Exchange { success, data, error } = api.get(&format!("/products/{id}")).await;
        let Some(body) = data.filter(|_| success) else {
            return Ok(CaseOutcome::fail(format!(
                "failed to fetch product {} for the draft: {}",
                id,
                reason(error)
            )));
        };
        products.push(serde_json::from_value(body)?);
    }

    let sub_total = products[0].sell_price + products[1].sell_price * 2.0;
    let expected_total = checks::grand_total(sub_total, DISCOUNT_PERCENT);

    let draft = InvoiceDraft {
        customer: Customer {
            name: "Rajesh Kumar".to_string(),
            whatsapp: "+919876543210".to_string(),
        },
        items: vec![
            InvoiceItem {
                product_id: products[0].id.clone(),
                name: products[0].name.clone(),
                qty: 1,
                price: products[0].sell_price,
            },
            InvoiceItem {
                product_id: products[1].id.clone(),
                name: products[1].name.clone(),
                qty: 2,
                price: products[1].sell_price,
            },
        ],
        discount_percent: DISCOUNT_PERCENT,
        sub_total,
        grand_total: expected_total,
    };

    let payload = serde_json::to_value(&draft)?;
    let Exchange { success, data, error } = api.post("/invoices", &payload).await;
    let Some(body) = data.filter(|_| success) else {
        return Ok(CaseOutcome::fail(format!(
            "failed to create invoice: {}",
            reason(error)
        )));
    };

    let created: CreatedInvoice = serde_json::from_value(body)?;
    if created.invoice.id.is_empty() {
        return Ok(CaseOutcome::fail("invoice created without an id".to_string()));
    }

    // Record before the remaining assertions so the PDF cases can still run
    // against the created record.
    state.record_invoice(created.invoice.id.clone());

    if !checks::money_eq(created.invoice.grand_total, expected_total) {
        return Ok(CaseOutcome::fail(format!(
            "grand total {} does not match expected {}",
            created.invoice.grand_total, expected_total
        )));
    }

    if !created.whatsapp_link.contains("wa.me") {
        return Ok(CaseOutcome::fail(format!(
            "missing wa.me deep-link, got {:?}",
            truncate(&created.whatsapp_link)
        )));
    }

    Ok(CaseOutcome::pass(format!(
        "created invoice {} with deep-link {}...",
        created.invoice.id,
        truncate(&created.whatsapp_link)
    )))
}

/// `GET /invoices` must list at least the invoice created above.
pub(crate) async fn list(api: &ApiClient) -> SmokeResult<CaseOutcome> {
    let Exchange { success, data, error } = api.get("/invoices").await;
    let Some(body) = data.filter(|_| success) else {
        return Ok(CaseOutcome::fail(format!(
            "failed to list invoices: {}",
            reason(error)
        )));
    };

    match body.as_array() {
        Some(invoices) if !invoices.is_empty() => Ok(CaseOutcome::pass(format!(
            "listed {} invoice(s)",
            invoices.len()
        ))),
        Some(_) => Ok(CaseOutcome::fail("expected at least 1 invoice".to_string())),
        None => Ok(CaseOutcome::fail("invoice list is not an array".to_string())),
    }
}

/// `GET /invoices/{id}` must round-trip the identifier.
pub(crate) async fn fetch_single(api: &ApiClient, state: &SuiteState) -> SmokeResult<CaseOutcome> {
    let id = match state.require_invoice() {
        Ok(id) => id.to_string(),
        Err(why) => return Ok(CaseOutcome::skip(why)),
    };

    let Exchange { success, data, error } = api.get(&format!("/invoices/{id}")).await;
    let Some(body) = data.filter(|_| success) else {
        return Ok(CaseOutcome::fail(format!(
            "failed to fetch invoice: {}",
            reason(error)
        )));
    };

    match body.get("id").and_then(Value::as_str) {
        Some(got) if got == id => Ok(CaseOutcome::pass(format!("fetched invoice {id}"))),
        other => Ok(CaseOutcome::fail(format!(
            "invoice id mismatch: asked for {}, got {:?}",
            id,
            other.unwrap_or("missing")
        ))),
    }
}

/// `GET /invoices/{id}/{variant}` must yield a real PDF stream: declared as
/// `application/pdf` and starting with the `%PDF` signature.
pub(crate) async fn render_pdf(
    api: &ApiClient,
    state: &SuiteState,
    variant: &str,
) -> SmokeResult<CaseOutcome> {
    let id = match state.require_invoice() {
        Ok(id) => id.to_string(),
        Err(why) => return Ok(CaseOutcome::skip(why)),
    };

    let raw = api.fetch_bytes(&format!("/invoices/{id}/{variant}")).await;
    if !raw.success {
        return Ok(CaseOutcome::fail(format!(
            "failed to render {}: {}",
            variant,
            reason(raw.error)
        )));
    }

    if !raw.content_type.contains("application/pdf") {
        return Ok(CaseOutcome::fail(format!(
            "wrong content type for {}: {:?}",
            variant, raw.content_type
        )));
    }

    if !checks::is_pdf(&raw.body) {
        return Ok(CaseOutcome::fail(format!(
            "{} payload does not start with %PDF",
            variant
        )));
    }

    Ok(CaseOutcome::pass(format!(
        "rendered a {} byte PDF",
        raw.body.len()
    )))
}
