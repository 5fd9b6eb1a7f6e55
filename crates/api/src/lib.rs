//! Posmate API Wire Types
//!
//! Typed models for the JSON surface of the Posmate jewelry POS backend.
//! The backend speaks camelCase JSON; every type here maps to it with serde
//! and tolerates unknown fields, so the smoke suite keeps working when the
//! backend grows new response fields.

pub mod types;

// Re-export commonly used types
pub use types::{
    CreatedInvoice, Customer, Invoice, InvoiceDraft, InvoiceItem, NewProduct, Product,
    ShopSettings,
};
