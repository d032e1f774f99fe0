//! Create/edit screen: form state, image upload, submit, delete.

use content_admin_client::ProductApi;
use content_admin_core::{CompanyId, FieldErrors, ProductId};
use content_admin_products::{FormField, ImageSelection, ProductForm, UploadedImage};

use crate::prompt::Prompt;
use crate::route::Route;
use crate::views::{
    CONFIRM_DELETE_CONTENT, DELETE_FAILED, IMAGE_REQUIRED, LOAD_PRODUCT_FAILED, SAVE_FAILED,
    UPLOAD_FAILED,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(ProductId),
}

#[derive(Debug, Clone)]
pub struct EditorView {
    mode: EditorMode,
    form: ProductForm,
    errors: FieldErrors,
    image: Option<UploadedImage>,
    /// Owner for new records; edits keep the loaded record's owner when it has one.
    company_id: CompanyId,
    image_base_url: String,
    loading: bool,
    uploading: bool,
}

impl EditorView {
    pub fn create(company_id: CompanyId, image_base_url: impl Into<String>) -> Self {
        Self::with_mode(EditorMode::Create, company_id, image_base_url.into())
    }

    pub fn edit(id: ProductId, company_id: CompanyId, image_base_url: impl Into<String>) -> Self {
        Self::with_mode(EditorMode::Edit(id), company_id, image_base_url.into())
    }

    fn with_mode(mode: EditorMode, company_id: CompanyId, image_base_url: String) -> Self {
        Self {
            mode,
            form: ProductForm::new(),
            errors: FieldErrors::new(),
            image: None,
            company_id,
            image_base_url,
            loading: false,
            uploading: false,
        }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, EditorMode::Edit(_))
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(field.wire_name())
    }

    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Submitting is blocked while a load, save, or upload is in flight.
    pub fn is_busy(&self) -> bool {
        self.loading || self.uploading
    }

    /// Fill the form from the stored record (edit mode only).
    ///
    /// Returns the route to leave for when the record cannot be loaded.
    pub async fn load<A, P>(&mut self, api: &A, prompt: &P) -> Option<Route>
    where
        A: ProductApi,
        P: Prompt + ?Sized,
    {
        let EditorMode::Edit(id) = &self.mode else {
            return None;
        };

        self.loading = true;
        let result = api.get_product(id).await;
        self.loading = false;

        match result {
            Ok(product) => {
                self.form = ProductForm::from_product(&product);
                self.image = product.image_key().map(|key| UploadedImage {
                    key: key.to_string(),
                    url: product.image_url(&self.image_base_url).unwrap_or_default(),
                });
                if !product.company_id.trim().is_empty() {
                    self.company_id = CompanyId::from_raw(product.company_id.as_str());
                }
                self.errors = FieldErrors::new();
                None
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "failed to load product");
                prompt.alert(LOAD_PRODUCT_FAILED);
                Some(Route::Contents)
            }
        }
    }

    /// Apply an input change and clear that field's error.
    pub fn set_field(&mut self, field: FormField, value: &str) {
        self.form.set(field, value);
        self.errors.clear(field.wire_name());
    }

    pub fn set_active(&mut self, active: bool) {
        self.form.set_active(active);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Check and upload a picked file. Returns whether an image is now attached.
    pub async fn select_image<A, P>(&mut self, api: &A, prompt: &P, selection: &ImageSelection) -> bool
    where
        A: ProductApi,
        P: Prompt + ?Sized,
    {
        if let Err(e) = selection.validate() {
            tracing::warn!(file = %selection.file_name, error = %e, "image rejected");
            prompt.alert(&e.to_string());
            return false;
        }

        self.uploading = true;
        let result = api.upload_image(selection).await;
        self.uploading = false;

        match result {
            Ok(image) => {
                tracing::info!(key = %image.key, "image uploaded");
                self.image = Some(image);
                true
            }
            Err(e) => {
                tracing::error!(file = %selection.file_name, error = %e, "image upload failed");
                prompt.alert(UPLOAD_FAILED);
                self.image = None;
                false
            }
        }
    }

    /// Attached image usable for this mode: create needs key and preview URL,
    /// edit only the key.
    fn usable_image_key(&self) -> Option<&str> {
        let image = self.image.as_ref().filter(|img| img.has_key())?;
        match self.mode {
            EditorMode::Create if !image.has_url() => None,
            _ => Some(image.key.as_str()),
        }
    }

    /// Validate and save. Returns the route to go to on success.
    pub async fn submit<A, P>(&mut self, api: &A, prompt: &P) -> Option<Route>
    where
        A: ProductApi,
        P: Prompt + ?Sized,
    {
        if self.is_busy() {
            tracing::debug!("submit ignored while busy");
            return None;
        }

        let valid = match self.form.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                tracing::debug!(%errors, "form rejected");
                self.errors = errors;
                return None;
            }
        };
        self.errors = FieldErrors::new();

        let Some(image_key) = self.usable_image_key().map(str::to_string) else {
            prompt.alert(IMAGE_REQUIRED);
            return None;
        };

        self.loading = true;
        let result = match &self.mode {
            EditorMode::Create => {
                let request = valid.to_create_request(&image_key, &self.company_id);
                api.create_product_with_fallback(&request)
                    .await
                    .map(|product| tracing::info!(id = %product.id, "product created"))
            }
            EditorMode::Edit(id) => {
                let request = valid.to_update_request(&image_key, &self.company_id);
                api.update_product(id, &request)
                    .await
                    .map(|_| tracing::info!(%id, "product updated"))
            }
        };
        self.loading = false;

        match result {
            Ok(()) => Some(Route::Contents),
            Err(e) => {
                tracing::error!(error = %e, "failed to save product");
                prompt.alert(SAVE_FAILED);
                None
            }
        }
    }

    /// Confirm and delete the record being edited.
    pub async fn delete<A, P>(&mut self, api: &A, prompt: &P) -> Option<Route>
    where
        A: ProductApi,
        P: Prompt + ?Sized,
    {
        let EditorMode::Edit(id) = &self.mode else {
            return None;
        };
        if self.is_busy() || !prompt.confirm(CONFIRM_DELETE_CONTENT) {
            return None;
        }

        self.loading = true;
        let result = api.delete_product(id).await;
        self.loading = false;

        match result {
            Ok(()) => {
                tracing::info!(%id, "product deleted");
                Some(Route::Contents)
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "failed to delete product");
                prompt.alert(DELETE_FAILED);
                None
            }
        }
    }

    pub fn cancel(&self) -> Route {
        Route::Contents
    }
}
