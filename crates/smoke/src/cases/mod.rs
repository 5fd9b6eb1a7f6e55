//! The ordered smoke-test table
//!
//! Order is significant: creation cases must run before the cases that read,
//! update, or delete what they created. The runner walks [`SmokeTest::ALL`]
//! front to back and never reorders.

mod invoices;
mod products;
mod settings;

use crate::client::ApiClient;
use crate::error::SmokeResult;
use crate::state::SuiteState;

/// Three-valued outcome of one case.
///
/// `Skipped` means a precondition on [`SuiteState`] was unmet - an upstream
/// creation case did not deliver - which is distinct from an assertion
/// failing against a live response.
#[derive(Debug, Clone)]
pub enum CaseOutcome {
    Passed(String),
    Failed(String),
    Skipped(String),
}

impl CaseOutcome {
    pub fn pass(detail: impl Into<String>) -> Self {
        Self::Passed(detail.into())
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }

    pub fn skip(reason: impl Into<String>) -> Self {
        Self::Skipped(reason.into())
    }
}

/// Failure text for an exchange that produced no usable body.
pub(crate) fn reason(error: Option<String>) -> String {
    error.unwrap_or_else(|| "empty response body".to_string())
}

/// Every case the suite knows, one variant per backend behavior under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokeTest {
    SettingsFetch,
    SettingsUpdate,
    SettingsPersistence,
    ProductsCreate,
    ProductsList,
    ProductsFetch,
    ProductsSearchByName,
    ProductsSearchByBarcode,
    ProductsUpdate,
    BarcodeRender,
    InvoicesCreate,
    InvoicesList,
    InvoicesFetch,
    PdfA4,
    PdfThermal,
    ProductsDelete,
}

impl SmokeTest {
    /// Declared execution order. Delete runs last so the third product stays
    /// available as the one no invoice references.
    pub const ALL: &'static [SmokeTest] = &[
        SmokeTest::SettingsFetch,
        SmokeTest::SettingsUpdate,
        SmokeTest::SettingsPersistence,
        SmokeTest::ProductsCreate,
        SmokeTest::ProductsList,
        SmokeTest::ProductsFetch,
        SmokeTest::ProductsSearchByName,
        SmokeTest::ProductsSearchByBarcode,
        SmokeTest::ProductsUpdate,
        SmokeTest::BarcodeRender,
        SmokeTest::InvoicesCreate,
        SmokeTest::InvoicesList,
        SmokeTest::InvoicesFetch,
        SmokeTest::PdfA4,
        SmokeTest::PdfThermal,
        SmokeTest::ProductsDelete,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SmokeTest::SettingsFetch => "Settings - Fetch Defaults",
            SmokeTest::SettingsUpdate => "Settings - Update",
            SmokeTest::SettingsPersistence => "Settings - Persistence",
            SmokeTest::ProductsCreate => "Products - Create",
            SmokeTest::ProductsList => "Products - List",
            SmokeTest::ProductsFetch => "Products - Fetch Single",
            SmokeTest::ProductsSearchByName => "Products - Search By Name",
            SmokeTest::ProductsSearchByBarcode => "Products - Search By Barcode",
            SmokeTest::ProductsUpdate => "Products - Update",
            SmokeTest::BarcodeRender => "Barcode - Render Image",
            SmokeTest::InvoicesCreate => "Invoices - Create",
            SmokeTest::InvoicesList => "Invoices - List",
            SmokeTest::InvoicesFetch => "Invoices - Fetch Single",
            SmokeTest::PdfA4 => "PDF - A4 Render",
            SmokeTest::PdfThermal => "PDF - Thermal Render",
            SmokeTest::ProductsDelete => "Products - Delete",
        }
    }

    /// Look up a case by its display name (case-insensitive).
    pub fn by_name(name: &str) -> Option<SmokeTest> {
        Self::ALL
            .iter()
            .copied()
            .find(|case| case.name().eq_ignore_ascii_case(name))
    }

    /// Execute this case. An `Err` here is an unexpected fault (for example a
    /// response that does not decode into the typed model); the runner's
    /// fault barrier records it as a failure.
    pub async fn run(self, api: &ApiClient, state: &mut SuiteState) -> SmokeResult<CaseOutcome> {
        match self {
            SmokeTest::SettingsFetch => settings::fetch_defaults(api).await,
            SmokeTest::SettingsUpdate => settings::update(api).await,
            SmokeTest::SettingsPersistence => settings::persistence(api).await,
            SmokeTest::ProductsCreate => products::create(api, state).await,
            SmokeTest::ProductsList => products::list(api).await,
            SmokeTest::ProductsFetch => products::fetch_single(api, state).await,
            SmokeTest::ProductsSearchByName => products::search_by_name(api).await,
            SmokeTest::ProductsSearchByBarcode => products::search_by_barcode(api, state).await,
            SmokeTest::ProductsUpdate => products::update(api, state).await,
            SmokeTest::BarcodeRender => products::render_barcode(api, state).await,
            SmokeTest::InvoicesCreate => invoices::create(api, state).await,
            SmokeTest::InvoicesList => invoices::list(api).await,
            SmokeTest::InvoicesFetch => invoices::fetch_single(api, state).await,
            SmokeTest::PdfA4 => invoices::render_pdf(api, state, "pdf-a4").await,
            SmokeTest::PdfThermal => invoices::render_pdf(api, state, "pdf-thermal").await,
            SmokeTest::ProductsDelete => products::delete(api, state).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(case: SmokeTest) -> usize {
        SmokeTest::ALL
            .iter()
            .position(|c| *c == case)
            .expect("case missing from table")
    }

    #[test]
    fn table_names_are_unique() {
        let mut names: Vec<_> = SmokeTest::ALL.iter().map(|c| c.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), SmokeTest::ALL.len());
    }

    #[test]
    fn creation_cases_precede_their_dependents() {
        let create = position(SmokeTest::ProductsCreate);
        assert!(create < position(SmokeTest::ProductsFetch));
        assert!(create < position(SmokeTest::ProductsUpdate));
        assert!(create < position(SmokeTest::BarcodeRender));
        assert!(create < position(SmokeTest::InvoicesCreate));
        assert!(create < position(SmokeTest::ProductsDelete));

        let invoice = position(SmokeTest::InvoicesCreate);
        assert!(invoice < position(SmokeTest::InvoicesFetch));
        assert!(invoice < position(SmokeTest::PdfA4));
        assert!(invoice < position(SmokeTest::PdfThermal));
    }

    #[test]
    fn delete_runs_last() {
        assert_eq!(
            position(SmokeTest::ProductsDelete),
            SmokeTest::ALL.len() - 1
        );
    }

    #[test]
    fn by_name_round_trips() {
        for case in SmokeTest::ALL {
            assert_eq!(SmokeTest::by_name(case.name()), Some(*case));
        }
        assert_eq!(SmokeTest::by_name("products - create"), Some(SmokeTest::ProductsCreate));
        assert_eq!(SmokeTest::by_name("no such case"), None);
    }
}
