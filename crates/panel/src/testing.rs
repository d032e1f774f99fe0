//! In-memory [`ProductApi`] and [`Prompt`] doubles for view tests.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use content_admin_client::{ClientError, ProductApi};
use content_admin_core::{Entity, ProductId};
use content_admin_products::{
    CreateProductRequest, ImageSelection, Product, UpdateProductRequest, UploadedImage,
};

use crate::prompt::Prompt;

pub(crate) fn product(id: &str, title: &str) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        content: format!("<p>{title} body</p>"),
        phone_number: "010-1234-5678".to_string(),
        start_date: "2024-01-01".to_string(),
        end_date: "2024-12-31".to_string(),
        product_image_key: format!("img-{id}"),
        created_at: "2024-01-02T03:04:05.000Z".to_string(),
        ..Product::default()
    }
}

pub(crate) fn products(n: usize) -> Vec<Product> {
    (1..=n).map(|i| product(&i.to_string(), &format!("Item {i}"))).collect()
}

/// Operations a [`FakeApi`] can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    Connect,
    List,
    Get,
    Create,
    /// Reject only creates that carry `productImageKey`.
    CreateWithProductImageKey,
    Update,
    Delete,
    Upload,
}

#[derive(Default)]
pub(crate) struct FakeApi {
    pub products: RefCell<Vec<Product>>,
    failing: RefCell<HashSet<Op>>,
    pub created: RefCell<Vec<CreateProductRequest>>,
    pub updated: RefCell<Vec<(ProductId, UpdateProductRequest)>>,
    pub deleted: RefCell<Vec<ProductId>>,
    pub uploads: RefCell<Vec<String>>,
    pub calls: Cell<usize>,
}

impl FakeApi {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RefCell::new(products),
            ..Self::default()
        }
    }

    pub fn failing(self, ops: &[Op]) -> Self {
        self.failing.borrow_mut().extend(ops.iter().copied());
        self
    }

    fn check(&self, op: Op) -> Result<(), ClientError> {
        self.calls.set(self.calls.get() + 1);
        if self.failing.borrow().contains(&op) {
            Err(ClientError::Api {
                status: 500,
                body: format!("{op:?} failed"),
            })
        } else {
            Ok(())
        }
    }
}

impl ProductApi for FakeApi {
    async fn test_connection(&self) -> bool {
        self.check(Op::Connect).is_ok()
    }

    async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        self.check(Op::List)?;
        Ok(self.products.borrow().clone())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ClientError> {
        self.check(Op::Get)?;
        self.products
            .borrow()
            .iter()
            .find(|p| p.is(id.as_str()))
            .cloned()
            .ok_or(ClientError::Api {
                status: 404,
                body: "not found".into(),
            })
    }

    async fn create_product(&self, request: &CreateProductRequest) -> Result<Product, ClientError> {
        self.created.borrow_mut().push(request.clone());
        self.check(Op::Create)?;
        if request.product_image_key.is_some() {
            self.check(Op::CreateWithProductImageKey)?;
        }
        let record = Product {
            id: format!("new-{}", self.created.borrow().len()),
            title: request.title.clone(),
            content: request.content.clone(),
            product_image_key: request.image_key().unwrap_or_default().to_string(),
            ..Product::default()
        };
        self.products.borrow_mut().push(record.clone());
        Ok(record)
    }

    async fn update_product(
        &self,
        id: &ProductId,
        request: &UpdateProductRequest,
    ) -> Result<Option<Product>, ClientError> {
        self.updated.borrow_mut().push((id.clone(), request.clone()));
        self.check(Op::Update)?;
        Ok(None)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ClientError> {
        self.check(Op::Delete)?;
        self.deleted.borrow_mut().push(id.clone());
        self.products.borrow_mut().retain(|p| !p.is(id.as_str()));
        Ok(())
    }

    async fn upload_image(&self, selection: &ImageSelection) -> Result<UploadedImage, ClientError> {
        selection.validate()?;
        self.check(Op::Upload)?;
        self.uploads.borrow_mut().push(selection.file_name.clone());
        Ok(UploadedImage {
            key: format!("uploads/{}", selection.file_name),
            url: format!("http://cdn.test/uploads/{}", selection.file_name),
        })
    }
}

/// Answers every confirmation the same way and records what was shown.
#[derive(Default)]
pub(crate) struct ScriptedPrompt {
    answer: bool,
    confirmations: RefCell<Vec<String>>,
    alerts: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn accepting() -> Self {
        Self {
            answer: true,
            ..Self::default()
        }
    }

    pub fn declining() -> Self {
        Self::default()
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.confirmations.borrow_mut().push(message.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}
