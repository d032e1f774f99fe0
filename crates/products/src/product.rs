use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use content_admin_core::{Entity, ProductId};

/// How long a listing stays posted.
///
/// Unknown values coming back from the API are preserved verbatim so a
/// full-record update never rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostingPeriodType {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Permanent,
    Other(String),
}

impl PostingPeriodType {
    /// Values offered by the editor's select box.
    pub const SELECTABLE: [PostingPeriodType; 3] = [
        PostingPeriodType::Daily,
        PostingPeriodType::Weekly,
        PostingPeriodType::Monthly,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            PostingPeriodType::Daily => "DAILY",
            PostingPeriodType::Weekly => "WEEKLY",
            PostingPeriodType::Monthly => "MONTHLY",
            PostingPeriodType::Permanent => "PERMANENT",
            PostingPeriodType::Other(s) => s,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PostingPeriodType::Daily => "Daily",
            PostingPeriodType::Weekly => "Weekly",
            PostingPeriodType::Monthly => "Monthly",
            PostingPeriodType::Permanent => "Permanent",
            PostingPeriodType::Other(s) => s,
        }
    }
}

impl From<String> for PostingPeriodType {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "DAILY" => PostingPeriodType::Daily,
            "WEEKLY" => PostingPeriodType::Weekly,
            "MONTHLY" => PostingPeriodType::Monthly,
            "PERMANENT" => PostingPeriodType::Permanent,
            _ => PostingPeriodType::Other(value),
        }
    }
}

impl From<&str> for PostingPeriodType {
    fn from(value: &str) -> Self {
        PostingPeriodType::from(value.to_string())
    }
}

impl From<PostingPeriodType> for String {
    fn from(value: PostingPeriodType) -> Self {
        match value {
            PostingPeriodType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl core::fmt::Display for PostingPeriodType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product/content record as the API returns it.
///
/// Every field is optional on the wire. The legacy fields (`name`,
/// `description`, `price`, `imageKey`, `category`) come from an older schema
/// and are only read as fallbacks by the display helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posting_period_type: Option<PostingPeriodType>,
    #[serde(deserialize_with = "null_as_true")]
    pub is_active: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub logo_image_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_image_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            content: String::new(),
            phone_number: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            posting_period_type: None,
            is_active: true,
            logo_image_key: String::new(),
            product_image_key: String::new(),
            company_id: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
            name: None,
            description: None,
            price: None,
            image_key: None,
            category: None,
        }
    }
}

/// An explicit `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

impl Entity for Product {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn non_blank(s: &str) -> Option<&str> {
    if s.trim().is_empty() { None } else { Some(s) }
}

impl Product {
    pub fn product_id(&self) -> Option<ProductId> {
        self.id.parse().ok()
    }

    /// `title`, falling back to the legacy `name`.
    pub fn display_title(&self) -> &str {
        non_blank(&self.title)
            .or_else(|| self.name.as_deref().and_then(non_blank))
            .unwrap_or("Untitled product")
    }

    /// Raw HTML body: `content`, falling back to the legacy `description`.
    pub fn display_content(&self) -> &str {
        non_blank(&self.content)
            .or_else(|| self.description.as_deref().and_then(non_blank))
            .unwrap_or("No description")
    }

    /// Body with markup removed, for table cells and cards.
    pub fn plain_content(&self) -> String {
        strip_html_tags(self.display_content())
    }

    /// `productImageKey`, falling back to the legacy `imageKey`.
    pub fn image_key(&self) -> Option<&str> {
        non_blank(&self.product_image_key)
            .or_else(|| self.image_key.as_deref().and_then(non_blank))
    }

    /// Public URL of the record's image under `image_base_url`.
    pub fn image_url(&self, image_base_url: &str) -> Option<String> {
        self.image_key().map(|key| image_url(image_base_url, key))
    }

    /// Posting period, falling back to the legacy `category`.
    pub fn category_label(&self) -> &str {
        self.posting_period_type
            .as_ref()
            .map(PostingPeriodType::as_str)
            .and_then(non_blank)
            .or_else(|| self.category.as_deref().and_then(non_blank))
            .unwrap_or("Uncategorized")
    }

    /// Legacy price; records from the current schema count as zero.
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// Calendar date the record was created, if `createdAt` parses.
    pub fn created_on(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.created_at)
    }

    pub fn created_label(&self) -> String {
        self.created_on()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "No date".to_string())
    }
}

/// `{base}/images/{key}` with exactly one slash between the parts.
pub fn image_url(image_base_url: &str, key: &str) -> String {
    format!("{}/images/{}", image_base_url.trim_end_matches('/'), key)
}

/// Accepts either `YYYY-MM-DD` or an RFC 3339 timestamp and returns the date part.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
}

/// Remove anything between `<` and `>`.
pub fn strip_html_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// The API stores bodies as HTML; plain text from the editor goes out as one paragraph.
pub fn wrap_paragraph(text: &str) -> String {
    format!("<p>{text}</p>")
}

/// Inverse of [`wrap_paragraph`] for exactly one outer `<p>…</p>`.
pub fn unwrap_paragraph(html: &str) -> &str {
    let trimmed = html.trim();
    match trimmed.strip_prefix("<p>").and_then(|s| s.strip_suffix("</p>")) {
        Some(inner) if !inner.contains("<p>") => inner,
        _ => html,
    }
}
