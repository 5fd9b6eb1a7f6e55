//! Shop settings cases: fetch, update, read-after-write

use posmate_api::ShopSettings;
use serde_json::Value;

use super::{reason, CaseOutcome};
use crate::client::{ApiClient, Exchange};
use crate::error::SmokeResult;

fn updated_settings() -> ShopSettings {
    ShopSettings {
        name: "Golden Jewelry Store".to_string(),
        phone: "+91-9876543210".to_string(),
        address: "123 Main Street, Mumbai, Maharashtra 400001".to_string(),
        gst: "27AABCU9603R1ZM".to_string(),
    }
}

/// `GET /settings/shop` must serve a settings record even before anything
/// was configured.
pub(crate) async fn fetch_defaults(api: &ApiClient) -> SmokeResult<CaseOutcome> {
    let Exchange { success, data, error } = api.get("/settings/shop").await;
    let Some(body) = data.filter(|_| success) else {
        return Ok(CaseOutcome::fail(format!(
            "failed to fetch settings: {}",
            reason(error)
        )));
    };

    let name = body.get("name").and_then(Value::as_str).unwrap_or("n/a");
    Ok(CaseOutcome::pass(format!("retrieved settings for {name}")))
}

/// `PUT /settings/shop` must echo the written record field for field.
pub(crate) async fn update(api: &ApiClient) -> SmokeResult<CaseOutcome> {
    let wanted = updated_settings();
    let payload = serde_json::to_value(&wanted)?;

    let Exchange { success, data, error } = api.put("/settings/shop", &payload).await;
    let Some(body) = data.filter(|_| success) else {
        return Ok(CaseOutcome::fail(format!(
            "failed to update settings: {}",
            reason(error)
        )));
    };

    let echoed: ShopSettings = serde_json::from_value(body)?;
    if echoed == wanted {
        Ok(CaseOutcome::pass(format!("settings updated to {}", echoed.name)))
    } else {
        Ok(CaseOutcome::fail(
            "settings updated but echoed values do not match".to_string(),
        ))
    }
}

/// A fresh `GET` must still serve the record written by the update case.
pub(crate) async fn persistence(api: &ApiClient) -> SmokeResult<CaseOutcome> {
    let wanted = updated_settings();

    let Exchange { success, data, error } = api.get("/settings/shop").await;
    let Some(body) = data.filter(|_| success) else {
        return Ok(CaseOutcome::fail(format!(
            "failed to re-fetch settings: {}",
            reason(error)
        )));
    };

    match body.get("name").and_then(Value::as_str) {
        Some(name) if name == wanted.name => {
            Ok(CaseOutcome::pass("settings persisted across fetches"))
        }
        other => Ok(CaseOutcome::fail(format!(
            "settings not persisted, shop name is {:?}",
            other.unwrap_or("missing")
        ))),
    }
}
