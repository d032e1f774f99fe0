//! `reqwest` implementation of [`ProductApi`].

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};

use content_admin_auth::TokenStore;
use content_admin_core::{CompanyId, ProductId};
use content_admin_products::{
    CreateProductRequest, ImageSelection, ImageUploadResponse, Product, UpdateProductRequest,
    UploadedImage,
};

use crate::api::ProductApi;
use crate::envelope::{decode_list, decode_payload};
use crate::error::ClientError;

/// Where the API lives and which company uploads are filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub upload_company_id: CompanyId,
}

/// Client for the content API.
///
/// The bearer token is read from the shared [`TokenStore`] on every request,
/// so replacing the stored token takes effect immediately.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    upload_company_id: CompanyId,
    tokens: Arc<dyn TokenStore>,
    http: reqwest::Client,
}

impl core::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("upload_company_id", &self.upload_company_id)
            .field("authenticated", &self.tokens.is_authenticated())
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: ApiClientConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self::with_http(config, tokens, reqwest::Client::new())
    }

    pub fn with_http(config: ApiClientConfig, tokens: Arc<dyn TokenStore>, http: reqwest::Client) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            upload_company_id: config.upload_company_id,
            tokens,
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.tokens.bearer_token() {
            Some(bearer) => req.header(AUTHORIZATION, bearer),
            None => req,
        }
    }

    /// Send and turn non-success statuses into [`ClientError::Api`].
    async fn send(&self, req: RequestBuilder) -> Result<Response, ClientError> {
        let resp = self
            .authorize(req)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %body, "API request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }

    async fn body_text(resp: Response) -> Result<String, ClientError> {
        resp.text().await.map_err(|e| ClientError::Network(e.to_string()))
    }
}

impl ProductApi for ApiClient {
    async fn test_connection(&self) -> bool {
        match self.send(self.http.get(self.url("/products"))).await {
            Ok(_) => {
                tracing::info!(base_url = %self.base_url, "API connection successful");
                true
            }
            Err(e) => {
                tracing::error!(base_url = %self.base_url, error = %e, "API connection failed");
                false
            }
        }
    }

    async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let resp = self.send(self.http.get(self.url("/products"))).await?;
        let body = Self::body_text(resp).await?;

        match decode_list(&body)? {
            Some(items) => {
                tracing::debug!(count = items.len(), "fetched products");
                Ok(items)
            }
            None => {
                tracing::warn!(%body, "list response has no items array");
                Ok(Vec::new())
            }
        }
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ClientError> {
        let resp = self
            .send(self.http.get(self.url(&format!("/products/{id}"))))
            .await?;
        let body = Self::body_text(resp).await?;
        decode_payload(&body)
    }

    async fn create_product(&self, request: &CreateProductRequest) -> Result<Product, ClientError> {
        let image_field = if request.key.is_some() { "key" } else { "productImageKey" };
        tracing::info!(title = %request.title, image_field, "creating product");
        let resp = self
            .send(self.http.post(self.url("/products")).json(request))
            .await?;
        let body = Self::body_text(resp).await?;
        let product: Product = decode_payload(&body)?;
        tracing::info!(id = %product.id, "product created");
        Ok(product)
    }

    async fn update_product(
        &self,
        id: &ProductId,
        request: &UpdateProductRequest,
    ) -> Result<Option<Product>, ClientError> {
        tracing::info!(%id, "updating product");
        let resp = self
            .send(self.http.put(self.url(&format!("/products/{id}"))).json(request))
            .await?;
        let body = Self::body_text(resp).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        decode_payload(&body).map(Some)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ClientError> {
        tracing::info!(%id, "deleting product");
        self.send(self.http.delete(self.url(&format!("/products/{id}"))))
            .await?;
        Ok(())
    }

    async fn upload_image(&self, selection: &ImageSelection) -> Result<UploadedImage, ClientError> {
        selection.validate()?;

        let part = Part::bytes(selection.bytes.clone())
            .file_name(selection.file_name.clone())
            .mime_str(&selection.mime_type)
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        let form = Form::new().part("image", part);

        tracing::info!(
            file = %selection.file_name,
            size = selection.size(),
            company_id = %self.upload_company_id,
            "uploading image"
        );

        let req = self
            .http
            .post(self.url("/products/upload-image"))
            .query(&[("companyId", self.upload_company_id.as_str())])
            .multipart(form);
        let resp = self.send(req).await?;
        let body = Self::body_text(resp).await?;

        let uploaded = decode_payload::<ImageUploadResponse>(&body)?.resolve();
        tracing::info!(key = %uploaded.key, url = %uploaded.url, "image uploaded");
        Ok(uploaded)
    }
}
