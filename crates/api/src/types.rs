//! Core types for the Posmate backend API

use serde::{Deserialize, Serialize};

/// Shop configuration record served by `GET /settings/shop` and replaced by
/// `PUT /settings/shop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopSettings {
    pub name: String,
    pub phone: String,
    pub address: String,
    /// Tax identifier (GSTIN).
    pub gst: String,
}

/// Payload for `POST /products` and `PUT /products/{id}`. The backend fills
/// in `id`, `code`, and `barcode` itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub stock: u32,
    pub mrp: f64,
    pub sell_price: f64,
}

/// Product record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    /// Backend-generated short product code.
    pub code: String,
    /// Backend-generated scannable barcode value.
    pub barcode: String,
    pub name: String,
    pub category: String,
    pub stock: u32,
    pub mrp: f64,
    pub sell_price: f64,
}

impl Product {
    /// True when every backend-generated identifier is present and non-empty.
    pub fn has_generated_fields(&self) -> bool {
        !self.id.is_empty() && !self.code.is_empty() && !self.barcode.is_empty()
    }
}

/// Invoice customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    /// Messaging handle used for the deep-link derivation.
    pub whatsapp: String,
}

/// A single invoice line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub product_id: String,
    pub name: String,
    pub qty: u32,
    pub price: f64,
}

/// Payload for `POST /invoices`. Totals are computed client-side and the
/// backend is expected to echo them back on the created record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub customer: Customer,
    pub items: Vec<InvoiceItem>,
    pub discount_percent: f64,
    pub sub_total: f64,
    pub grand_total: f64,
}

/// Invoice record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub customer: Customer,
    pub items: Vec<InvoiceItem>,
    pub discount_percent: f64,
    pub sub_total: f64,
    pub grand_total: f64,
}

/// Envelope returned by `POST /invoices`: the created record plus the derived
/// WhatsApp deep-link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedInvoice {
    pub invoice: Invoice,
    pub whatsapp_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_parses_backend_json() {
        // Realistic create-response body, including fields we do not model.
        let body = serde_json::json!({
            "id": "c0a8012e-77d1-4e6b-9b8e-1f2a3b4c5d6e",
            "code": "PRD-0001",
            "barcode": "8901234567890",
            "name": "Gold Ring 22K",
            "category": "Rings",
            "stock": 5,
            "mrp": 45000,
            "sellPrice": 42000,
            "createdAt": "2024-11-03T10:15:00Z"
        });

        let product: Product = serde_json::from_value(body).unwrap();
        assert!(product.has_generated_fields());
        assert_eq!(product.sell_price, 42000.0);
        assert_eq!(product.stock, 5);
    }

    #[test]
    fn generated_fields_must_be_non_empty() {
        let body = serde_json::json!({
            "id": "p1",
            "code": "",
            "barcode": "8901234567890",
            "name": "Gold Ring 22K",
            "category": "Rings",
            "stock": 5,
            "mrp": 45000,
            "sellPrice": 42000
        });

        let product: Product = serde_json::from_value(body).unwrap();
        assert!(!product.has_generated_fields());
    }

    #[test]
    fn invoice_draft_serializes_camel_case() {
        let draft = InvoiceDraft {
            customer: Customer {
                name: "Rajesh Kumar".to_string(),
                whatsapp: "+919876543210".to_string(),
            },
            items: vec![InvoiceItem {
                product_id: "p1".to_string(),
                name: "Gold Ring 22K".to_string(),
                qty: 1,
                price: 42000.0,
            }],
            discount_percent: 5.0,
            sub_total: 42000.0,
            grand_total: 39900.0,
        };

        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("discountPercent").is_some());
        assert!(value.get("subTotal").is_some());
        assert!(value.get("grandTotal").is_some());
        assert!(value["items"][0].get("productId").is_some());
        assert_eq!(value["customer"]["whatsapp"], "+919876543210");
    }

    #[test]
    fn created_invoice_envelope_parses() {
        let body = serde_json::json!({
            "invoice": {
                "id": "inv-42",
                "customer": { "name": "Rajesh Kumar", "whatsapp": "+919876543210" },
                "items": [
                    { "productId": "p1", "name": "Gold Ring 22K", "qty": 1, "price": 42000 },
                    { "productId": "p2", "name": "Diamond Necklace", "qty": 2, "price": 120000 }
                ],
                "discountPercent": 5,
                "subTotal": 282000,
                "grandTotal": 267900
            },
            "whatsappLink": "https://wa.me/919876543210?text=Invoice%20inv-42"
        });

        let created: CreatedInvoice = serde_json::from_value(body).unwrap();
        assert_eq!(created.invoice.id, "inv-42");
        assert_eq!(created.invoice.items.len(), 2);
        assert!(created.whatsapp_link.contains("wa.me"));
    }
}
