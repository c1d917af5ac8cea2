use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::sync::{Identified, Record};

/// A row of the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Product {
    pub id: String,
    pub company_id: String,
    #[schema(example = "Landing page package")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[schema(example = 1500000.0)]
    pub price: f64,
    #[schema(example = "COP")]
    pub currency: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub stock_quantity: i32,
    #[serde(default = "default_true", deserialize_with = "crate::nullable::or_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub views_count: i64,
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub clicks_count: i64,
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub sales_count: i64,
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub display_order: i32,
    #[serde(default = "Utc::now", deserialize_with = "crate::nullable::or_now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", deserialize_with = "crate::nullable::or_now")]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Record for Product {
    const TABLE: &'static str = "products";
}

impl Identified for Product {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Product {
    /// Copy validated form fields onto this product.
    pub fn apply(&mut self, fields: &ProductFields, now: DateTime<Utc>) {
        self.company_id = fields.company_id.clone();
        self.name = fields.name.clone();
        self.description = fields.description.clone();
        self.price = fields.price;
        self.currency = fields.currency.clone();
        self.image_url = fields.image_url.clone();
        self.category = fields.category.clone();
        self.stock_quantity = fields.stock_quantity;
        self.is_active = fields.is_active;
        self.updated_at = now;
    }
}

/// The product editor as typed by the user; numbers are still text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub category: String,
    pub stock_quantity: String,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            image_url: String::new(),
            category: String::new(),
            stock_quantity: "0".into(),
        }
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
            image_url: product.image_url.clone().unwrap_or_default(),
            category: product.category.clone().unwrap_or_default(),
            stock_quantity: product.stock_quantity.to_string(),
        }
    }
}

/// Column values written on create and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductFields {
    pub company_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub stock_quantity: i32,
    pub is_active: bool,
}

fn optional(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

impl ProductForm {
    pub fn validate(&self, company_id: &str, currency: &str) -> Result<ProductFields, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required { field: "name" });
        }

        let price_text = self.price.trim();
        if price_text.is_empty() {
            return Err(ValidationError::Required { field: "price" });
        }
        let price: f64 = price_text
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| ValidationError::InvalidNumber {
                field: "price",
                value: price_text.to_string(),
            })?;

        let stock_text = self.stock_quantity.trim();
        let stock_quantity = if stock_text.is_empty() {
            0
        } else {
            stock_text
                .parse::<i32>()
                .ok()
                .filter(|s| *s >= 0)
                .ok_or_else(|| ValidationError::InvalidNumber {
                    field: "stock_quantity",
                    value: stock_text.to_string(),
                })?
        };

        Ok(ProductFields {
            company_id: company_id.to_string(),
            name: name.to_string(),
            description: optional(&self.description),
            price,
            currency: currency.to_string(),
            image_url: optional(&self.image_url),
            category: optional(&self.category),
            stock_quantity,
            is_active: true,
        })
    }
}

/// Active products in display order, as shown on a public profile.
pub fn storefront(products: &[Product]) -> Vec<Product> {
    let mut visible: Vec<Product> = products.iter().filter(|p| p.is_active).cloned().collect();
    visible.sort_by_key(|p| p.display_order);
    visible
}
