//! The paginated content list.

use content_admin_client::ProductApi;
use content_admin_core::ProductId;
use content_admin_products::{PageRange, Paginator, Product};

use crate::prompt::Prompt;
use crate::route::Route;
use crate::views::{CONFIRM_DELETE_PRODUCT, DeleteOutcome, LOAD_PRODUCTS_FAILED, confirm_and_delete};

#[derive(Debug, Clone, Default)]
pub struct ContentsView {
    products: Vec<Product>,
    paginator: Paginator,
    loading: bool,
    error: Option<String>,
}

impl ContentsView {
    pub fn new(page_size: usize) -> Self {
        Self {
            paginator: Paginator::new(page_size),
            ..Self::default()
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Fetch every record. A failed fetch leaves an empty list and an error.
    pub async fn load<A: ProductApi>(&mut self, api: &A) {
        self.loading = true;
        self.error = None;

        match api.list_products().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "products loaded");
                self.products = products;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load products");
                self.products.clear();
                self.error = Some(LOAD_PRODUCTS_FAILED.to_string());
            }
        }

        self.paginator.clamp(self.products.len());
        self.loading = false;
    }

    pub fn page_items(&self) -> &[Product] {
        self.paginator.page(&self.products)
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.paginator.go_to(page, self.products.len())
    }

    pub fn next_page(&mut self) -> usize {
        self.paginator.next(self.products.len())
    }

    pub fn previous_page(&mut self) -> usize {
        self.paginator.previous(self.products.len())
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages(self.products.len())
    }

    pub fn has_previous(&self) -> bool {
        self.paginator.has_previous()
    }

    pub fn has_next(&self) -> bool {
        self.paginator.has_next(self.products.len())
    }

    pub fn shows_controls(&self) -> bool {
        self.paginator.shows_controls(self.products.len())
    }

    pub fn range(&self) -> Option<PageRange> {
        self.paginator.range(self.products.len())
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        self.paginator.page_numbers(self.products.len()).collect()
    }

    /// Where clicking a row leads.
    pub fn open(&self, id: &ProductId) -> Route {
        Route::EditContent(id.clone())
    }

    pub fn create(&self) -> Route {
        Route::CreateContent
    }

    /// Confirm, delete, and drop the row. The current page stays in range.
    pub async fn delete<A, P>(&mut self, api: &A, prompt: &P, id: &ProductId) -> DeleteOutcome
    where
        A: ProductApi,
        P: Prompt + ?Sized,
    {
        let outcome =
            confirm_and_delete(api, prompt, CONFIRM_DELETE_PRODUCT, id, &mut self.products).await;
        self.paginator.clamp(self.products.len());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, Op, ScriptedPrompt, products};

    #[tokio::test]
    async fn loads_and_paginates() {
        let api = FakeApi::with_products(products(23));
        let mut view = ContentsView::new(10);

        view.load(&api).await;

        assert!(!view.is_loading());
        assert_eq!(view.error(), None);
        assert_eq!(view.total_pages(), 3);
        assert_eq!(view.page_items().len(), 10);
        assert_eq!(view.page_numbers(), vec![1, 2, 3]);
        assert!(view.shows_controls());

        assert_eq!(view.go_to_page(3), 3);
        assert_eq!(view.page_items().len(), 3);
        assert_eq!(view.page_items()[0].title, "Item 21");
        assert_eq!(view.range(), Some(PageRange { first: 21, last: 23, total: 23 }));
        assert!(!view.has_next());

        assert_eq!(view.go_to_page(99), 3);
        assert_eq!(view.previous_page(), 2);
    }

    #[tokio::test]
    async fn failed_load_leaves_empty_list_and_error() {
        let api = FakeApi::with_products(products(3)).failing(&[Op::List]);
        let mut view = ContentsView::new(10);

        view.load(&api).await;

        assert!(view.products().is_empty());
        assert_eq!(view.error(), Some(LOAD_PRODUCTS_FAILED));
        assert!(!view.shows_controls());
        assert_eq!(view.range(), None);
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let api = FakeApi::with_products(products(2));
        let prompt = ScriptedPrompt::declining();
        let mut view = ContentsView::new(10);
        view.load(&api).await;

        let outcome = view.delete(&api, &prompt, &ProductId::from_raw("1")).await;

        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(prompt.confirmations(), vec![CONFIRM_DELETE_PRODUCT.to_string()]);
        assert!(api.deleted.borrow().is_empty());
        assert_eq!(view.products().len(), 2);
    }

    #[tokio::test]
    async fn delete_on_last_page_steps_back() {
        let api = FakeApi::with_products(products(11));
        let prompt = ScriptedPrompt::accepting();
        let mut view = ContentsView::new(10);
        view.load(&api).await;
        view.go_to_page(2);

        let outcome = view.delete(&api, &prompt, &ProductId::from_raw("11")).await;

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(view.products().len(), 10);
        assert_eq!(view.paginator().current(), 1);
        assert!(!view.shows_controls());
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_row() {
        let api = FakeApi::with_products(products(2)).failing(&[Op::Delete]);
        let prompt = ScriptedPrompt::accepting();
        let mut view = ContentsView::new(10);
        view.load(&api).await;

        let outcome = view.delete(&api, &prompt, &ProductId::from_raw("2")).await;

        assert_eq!(outcome, DeleteOutcome::Failed);
        assert_eq!(view.products().len(), 2);
        assert!(prompt.alerts().is_empty());
    }

    #[test]
    fn row_click_opens_editor() {
        let view = ContentsView::new(10);
        assert_eq!(
            view.open(&ProductId::from_raw("p-7")).path(),
            "/contents/p-7"
        );
        assert_eq!(view.create(), Route::CreateContent);
    }
}
