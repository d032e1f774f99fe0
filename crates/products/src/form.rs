//! Editor form state and validation.
//!
//! The form holds exactly what the user typed. Nothing is trusted until
//! [`ProductForm::validate`] turns it into a [`ValidatedForm`], which is the
//! only thing request builders accept.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use content_admin_core::{CompanyId, DomainError, DomainResult, FieldErrors, ValueObject};

use crate::product::{PostingPeriodType, Product, parse_calendar_date, unwrap_paragraph, wrap_paragraph};
use crate::request::{CreateProductRequest, UpdateProductRequest};

/// Editable fields, named as the API names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Title,
    Content,
    PhoneNumber,
    StartDate,
    EndDate,
    PostingPeriodType,
    IsActive,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Title,
        FormField::Content,
        FormField::PhoneNumber,
        FormField::StartDate,
        FormField::EndDate,
        FormField::PostingPeriodType,
        FormField::IsActive,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Content => "content",
            FormField::PhoneNumber => "phoneNumber",
            FormField::StartDate => "startDate",
            FormField::EndDate => "endDate",
            FormField::PostingPeriodType => "postingPeriodType",
            FormField::IsActive => "isActive",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }
}

/// Raw editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    pub title: String,
    pub content: String,
    pub phone_number: String,
    pub start_date: String,
    pub end_date: String,
    pub posting_period_type: PostingPeriodType,
    pub is_active: bool,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductForm {
    /// Blank form for the create view.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            phone_number: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            posting_period_type: PostingPeriodType::Daily,
            is_active: true,
        }
    }

    /// Form pre-filled from a loaded record.
    ///
    /// Timestamps are cut to their date so a date input can show them, and a
    /// single outer `<p>` is removed so resubmitting does not nest paragraphs.
    pub fn from_product(product: &Product) -> Self {
        let date_field = |raw: &str| {
            parse_calendar_date(raw)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| raw.to_string())
        };

        Self {
            title: product.title.clone(),
            content: unwrap_paragraph(&product.content).to_string(),
            phone_number: product.phone_number.clone(),
            start_date: date_field(&product.start_date),
            end_date: date_field(&product.end_date),
            posting_period_type: product
                .posting_period_type
                .clone()
                .filter(|p| !p.as_str().trim().is_empty())
                .unwrap_or(PostingPeriodType::Permanent),
            is_active: product.is_active,
        }
    }

    /// Apply one input change. Checkbox values accept `true`/`on`/`1`.
    pub fn set(&mut self, field: FormField, value: &str) {
        match field {
            FormField::Title => self.title = value.to_string(),
            FormField::Content => self.content = value.to_string(),
            FormField::PhoneNumber => self.phone_number = value.to_string(),
            FormField::StartDate => self.start_date = value.to_string(),
            FormField::EndDate => self.end_date = value.to_string(),
            FormField::PostingPeriodType => self.posting_period_type = PostingPeriodType::from(value),
            FormField::IsActive => {
                self.is_active = matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "on" | "1")
            }
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// Check required fields and date ordering.
    ///
    /// Every failing field gets its own message. Ordering is only checked when
    /// both dates parse; the ordering message lands on `endDate`.
    pub fn validate(&self) -> Result<ValidatedForm, FieldErrors> {
        let mut errors = FieldErrors::new();

        let required = [
            (FormField::Title, &self.title, "Title is required"),
            (FormField::Content, &self.content, "Content is required"),
            (FormField::PhoneNumber, &self.phone_number, "Phone number is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.insert(field.wire_name(), message);
            }
        }

        let start = parse_date_field(&mut errors, FormField::StartDate, &self.start_date, "Start date");
        let end = parse_date_field(&mut errors, FormField::EndDate, &self.end_date, "End date");

        let window = match (start, end) {
            (Some(start), Some(end)) => match DateWindow::new(start, end) {
                Ok(window) => Some(window),
                Err(_) => {
                    errors.insert(FormField::EndDate.wire_name(), "End date must be after start date");
                    None
                }
            },
            _ => None,
        };

        match window {
            Some(window) if errors.is_empty() => Ok(ValidatedForm {
                title: self.title.clone(),
                content: self.content.clone(),
                phone_number: self.phone_number.clone(),
                window,
                posting_period_type: self.posting_period_type.clone(),
                is_active: self.is_active,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_date_field(
    errors: &mut FieldErrors,
    field: FormField,
    raw: &str,
    label: &str,
) -> Option<NaiveDate> {
    if raw.trim().is_empty() {
        errors.insert(field.wire_name(), format!("{label} is required"));
        return None;
    }
    let parsed = parse_calendar_date(raw);
    if parsed.is_none() {
        errors.insert(field.wire_name(), format!("{label} is invalid"));
    }
    parsed
}

/// Active window of a listing; `start` is strictly before `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ValueObject for DateWindow {}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start >= end {
            return Err(DomainError::validation("end date must be after start date"));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// Form content that passed [`ProductForm::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    pub title: String,
    pub content: String,
    pub phone_number: String,
    pub window: DateWindow,
    pub posting_period_type: PostingPeriodType,
    pub is_active: bool,
}

impl ValidatedForm {
    /// Create body in the `productImageKey` shape; the logo shares the product image.
    pub fn to_create_request(&self, image_key: &str, company_id: &CompanyId) -> CreateProductRequest {
        CreateProductRequest {
            title: self.title.clone(),
            content: wrap_paragraph(&self.content),
            phone_number: self.phone_number.clone(),
            start_date: self.window.start(),
            end_date: self.window.end(),
            posting_period_type: self.posting_period_type.clone(),
            is_active: self.is_active,
            logo_image_key: Some(image_key.to_string()),
            product_image_key: Some(image_key.to_string()),
            key: None,
            company_id: company_id.clone(),
        }
    }

    /// Full-record update body.
    pub fn to_update_request(&self, image_key: &str, company_id: &CompanyId) -> UpdateProductRequest {
        UpdateProductRequest {
            title: Some(self.title.clone()),
            content: Some(wrap_paragraph(&self.content)),
            phone_number: Some(self.phone_number.clone()),
            start_date: Some(self.window.start()),
            end_date: Some(self.window.end()),
            posting_period_type: Some(self.posting_period_type.clone()),
            is_active: Some(self.is_active),
            product_image_key: Some(image_key.to_string()),
            key: None,
            company_id: Some(company_id.clone()),
        }
    }
}
