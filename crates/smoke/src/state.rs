//! Cross-case shared state

/// Identifiers created by earlier cases and consumed by later ones.
///
/// The runner owns exactly one instance and threads it through the case table
/// by `&mut`, so dependencies are explicit and a second suite run starts from
/// a clean slate.
#[derive(Debug, Default)]
pub struct SuiteState {
    product_ids: Vec<String>,
    invoice_ids: Vec<String>,
}

impl SuiteState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a product id returned by a successful creation call.
    /// Callers must have verified the id is non-empty.
    pub fn record_product(&mut self, id: impl Into<String>) {
        self.product_ids.push(id.into());
    }

    pub fn record_invoice(&mut self, id: impl Into<String>) {
        self.invoice_ids.push(id.into());
    }

    pub fn product_ids(&self) -> &[String] {
        &self.product_ids
    }

    pub fn invoice_ids(&self) -> &[String] {
        &self.invoice_ids
    }

    /// First `count` recorded product ids, or a skip reason when earlier
    /// creation cases have not delivered enough of them.
    pub fn require_products(&self, count: usize) -> Result<&[String], String> {
        if self.product_ids.len() < count {
            Err(format!(
                "need {} recorded product id(s), have {}",
                count,
                self.product_ids.len()
            ))
        } else {
            Ok(&self.product_ids[..count])
        }
    }

    /// The first recorded invoice id, or a skip reason.
    pub fn require_invoice(&self) -> Result<&str, String> {
        self.invoice_ids
            .first()
            .map(String::as_str)
            .ok_or_else(|| "no recorded invoice id".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_products_reports_shortfall() {
        let mut state = SuiteState::new();
        assert_eq!(
            state.require_products(2).unwrap_err(),
            "need 2 recorded product id(s), have 0"
        );

        state.record_product("p1");
        state.record_product("p2");
        state.record_product("p3");

        let first_two = state.require_products(2).unwrap();
        assert_eq!(first_two, ["p1", "p2"]);
    }

    #[test]
    fn require_invoice_needs_a_creation_first() {
        let mut state = SuiteState::new();
        assert!(state.require_invoice().is_err());

        state.record_invoice("inv-1");
        assert_eq!(state.require_invoice().unwrap(), "inv-1");
    }
}
