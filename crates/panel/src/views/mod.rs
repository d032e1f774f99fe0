//! View models behind each screen.
//!
//! A view owns the screen's state and exposes the user's actions as async
//! methods over a [`ProductApi`] and a [`Prompt`]. Actions that leave the
//! screen return the [`Route`](crate::Route) to go to.

pub mod contents;
pub mod dashboard;
pub mod editor;
pub mod settings;

pub use contents::ContentsView;
pub use dashboard::DashboardView;
pub use editor::{EditorMode, EditorView};
pub use settings::SettingsView;

use content_admin_client::ProductApi;
use content_admin_core::{Entity, ProductId};
use content_admin_products::Product;

use crate::prompt::Prompt;

pub const CONFIRM_DELETE_PRODUCT: &str = "Delete this product?";
pub const CONFIRM_DELETE_CONTENT: &str = "Delete this content? This cannot be undone.";
pub const LOAD_PRODUCTS_FAILED: &str = "Failed to load products. Please try again.";
pub const LOAD_PRODUCT_FAILED: &str = "Failed to load product data. Please try again.";
pub const UPLOAD_FAILED: &str = "Failed to upload image. Please try again.";
pub const IMAGE_REQUIRED: &str = "Please upload an image";
pub const SAVE_FAILED: &str = "Failed to save product. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete product. Please try again.";

/// Result of a confirm-then-delete action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user said no; nothing was sent.
    Declined,
    Deleted,
    /// The API refused; local state is unchanged.
    Failed,
}

/// Confirm with `message`, delete `id`, and drop it from `rows` on success.
pub(crate) async fn confirm_and_delete<A, P>(
    api: &A,
    prompt: &P,
    message: &str,
    id: &ProductId,
    rows: &mut Vec<Product>,
) -> DeleteOutcome
where
    A: ProductApi,
    P: Prompt + ?Sized,
{
    if !prompt.confirm(message) {
        return DeleteOutcome::Declined;
    }

    match api.delete_product(id).await {
        Ok(()) => {
            rows.retain(|p| !p.is(id.as_str()));
            tracing::info!(%id, "product deleted");
            DeleteOutcome::Deleted
        }
        Err(e) => {
            tracing::error!(%id, error = %e, "failed to delete product");
            DeleteOutcome::Failed
        }
    }
}
