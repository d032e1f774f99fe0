use content_admin_core::ProductId;
use content_admin_products::{
    CreateProductRequest, ImageSelection, Product, UpdateProductRequest, UploadedImage,
};

use crate::error::ClientError;

/// Operations the panel needs from the content API.
///
/// Every call is a single awaited request; nothing is retried except
/// [`create_product_with_fallback`](ProductApi::create_product_with_fallback).
pub trait ProductApi {
    /// Probe `GET /products`; true when the API answered with success.
    async fn test_connection(&self) -> bool;

    /// All records. An unexpected response shape yields an empty list.
    async fn list_products(&self) -> Result<Vec<Product>, ClientError>;

    async fn get_product(&self, id: &ProductId) -> Result<Product, ClientError>;

    async fn create_product(&self, request: &CreateProductRequest) -> Result<Product, ClientError>;

    /// Returns the updated record when the API echoes one back.
    async fn update_product(
        &self,
        id: &ProductId,
        request: &UpdateProductRequest,
    ) -> Result<Option<Product>, ClientError>;

    async fn delete_product(&self, id: &ProductId) -> Result<(), ClientError>;

    /// Check the selection locally, then upload it.
    async fn upload_image(&self, selection: &ImageSelection) -> Result<UploadedImage, ClientError>;

    /// Create with the `productImageKey` shape; if the API rejects it, retry
    /// once carrying the image under `key`. The second error wins.
    async fn create_product_with_fallback(
        &self,
        request: &CreateProductRequest,
    ) -> Result<Product, ClientError> {
        match self.create_product(request).await {
            Ok(product) => Ok(product),
            Err(first) => {
                tracing::warn!(error = %first, "create with productImageKey failed; retrying with key");
                let product = self.create_product(&request.with_key_field()).await?;
                tracing::info!(id = %product.id, "product created with key field");
                Ok(product)
            }
        }
    }
}
