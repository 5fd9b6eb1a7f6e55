//! Payload and arithmetic checks shared by the test cases

/// Leading bytes of every well-formed PDF stream.
pub const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Anything smaller than this cannot be a real barcode PNG; error pages
/// misreported as images tend to be tiny or empty.
pub const MIN_PNG_BYTES: usize = 100;

/// Money comparisons tolerate sub-paisa float noise.
const MONEY_EPSILON: f64 = 0.01;

/// True when `bytes` starts with the `%PDF` signature.
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.len() >= PDF_MAGIC.len() && &bytes[..PDF_MAGIC.len()] == PDF_MAGIC
}

/// True when the response plausibly carries a rendered barcode image: the
/// declared content type is PNG and the body exceeds the minimum size.
pub fn is_plausible_png(content_type: &str, len: usize) -> bool {
    content_type.contains("image/png") && len > MIN_PNG_BYTES
}

/// Grand total after applying a percentage discount to a subtotal.
pub fn grand_total(sub_total: f64, discount_percent: f64) -> f64 {
    sub_total * (1.0 - discount_percent / 100.0)
}

/// Equality for currency amounts carried as JSON numbers.
pub fn money_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < MONEY_EPSILON
}
