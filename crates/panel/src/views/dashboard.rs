//! Landing screen: headline figures and the most recent records.

use content_admin_client::ProductApi;
use content_admin_core::ProductId;
use content_admin_products::{DashboardSummary, Product};

use crate::prompt::Prompt;
use crate::views::{CONFIRM_DELETE_PRODUCT, DeleteOutcome, LOAD_PRODUCTS_FAILED, confirm_and_delete};

#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    products: Vec<Product>,
    connected: Option<bool>,
    loading: bool,
    error: Option<String>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// `None` until the first probe has finished.
    pub fn connected(&self) -> Option<bool> {
        self.connected
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary::from_products(&self.products)
    }

    /// Probe the API, then fetch the list. A failed fetch clears the list.
    pub async fn load<A: ProductApi>(&mut self, api: &A) {
        self.loading = true;
        self.error = None;

        let connected = api.test_connection().await;
        self.connected = Some(connected);

        match api.list_products().await {
            Ok(products) => self.products = products,
            Err(e) => {
                tracing::error!(error = %e, "failed to load dashboard products");
                self.products.clear();
                self.error = Some(LOAD_PRODUCTS_FAILED.to_string());
            }
        }

        self.loading = false;
    }

    pub async fn delete<A, P>(&mut self, api: &A, prompt: &P, id: &ProductId) -> DeleteOutcome
    where
        A: ProductApi,
        P: Prompt + ?Sized,
    {
        confirm_and_delete(api, prompt, CONFIRM_DELETE_PRODUCT, id, &mut self.products).await
    }
}
