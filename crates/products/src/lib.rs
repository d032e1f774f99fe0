//! Product/content listing domain.
//!
//! Deterministic logic only (no IO, no HTTP): the record as the API sends it,
//! the editor form and its validation, request bodies, image checks,
//! pagination, and dashboard figures.

pub mod dashboard;
pub mod form;
pub mod image;
pub mod pagination;
pub mod product;
pub mod request;

pub use dashboard::{DashboardSummary, RECENT_LIMIT};
pub use form::{DateWindow, FormField, ProductForm, ValidatedForm};
pub use image::{ImageError, ImageSelection, ImageUploadResponse, MAX_IMAGE_BYTES, UploadedImage};
pub use pagination::{DEFAULT_PAGE_SIZE, PageRange, Paginator};
pub use product::{PostingPeriodType, Product, image_url, strip_html_tags};
pub use request::{CreateProductRequest, UpdateProductRequest};
