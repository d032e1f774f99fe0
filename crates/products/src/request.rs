//! Request bodies for `POST /products` and `PUT /products/{id}`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use content_admin_core::CompanyId;

use crate::product::PostingPeriodType;

/// Body of `POST /products`.
///
/// The backend has accepted the image reference under two different names
/// over time. The primary shape sends `productImageKey` (+ `logoImageKey`);
/// [`CreateProductRequest::with_key_field`] produces the older `key` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub title: String,
    pub content: String,
    pub phone_number: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub posting_period_type: PostingPeriodType,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_image_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub company_id: CompanyId,
}

impl CreateProductRequest {
    /// The image key this request carries, whichever field holds it.
    pub fn image_key(&self) -> Option<&str> {
        self.product_image_key
            .as_deref()
            .or(self.key.as_deref())
            .or(self.logo_image_key.as_deref())
    }

    /// Same request with the image key moved into the legacy `key` field.
    pub fn with_key_field(&self) -> Self {
        let key = self.image_key().map(str::to_string);
        Self {
            logo_image_key: None,
            product_image_key: None,
            key,
            ..self.clone()
        }
    }
}

/// Body of `PUT /products/{id}`. Unset fields are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posting_period_type: Option<PostingPeriodType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
}

impl UpdateProductRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
