use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::link::LinkItem;
use crate::sync::{Identified, Record};

/// A row of the `companies` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Company {
    #[schema(example = "7f1c2d9e-0b7a-4c51-9a61-0d3c5b1e2f44")]
    pub id: String,
    /// Owning account.
    pub user_id: String,
    /// URL-safe public handle.
    #[schema(example = "techcali-solutions")]
    pub slug: String,
    #[schema(example = "TechCali Solutions")]
    pub company_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    /// One of `egresado`, `empresa`, `instructor`.
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub category: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub year_founded: Option<i32>,
    #[serde(default)]
    pub employee_count: Option<String>,
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub services: Vec<String>,
    /// Platform id to handle or URL, in the column's key order.
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    #[schema(value_type = Object)]
    pub social_links: Map<String, Value>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub selected_theme: Option<String>,
    #[serde(default)]
    pub custom_color: Option<String>,
    /// Ordered link list saved from the dashboard. Absent until the first save.
    #[serde(default)]
    pub links: Option<Vec<LinkItem>>,
    #[serde(default = "Utc::now", deserialize_with = "crate::nullable::or_now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", deserialize_with = "crate::nullable::or_now")]
    pub updated_at: DateTime<Utc>,
}

impl Record for Company {
    const TABLE: &'static str = "companies";
}

impl Identified for Company {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Display label for a company category. Unknown categories are shown verbatim.
pub fn category_label(category: &str) -> &str {
    match category {
        "egresado" => "SENA Graduate",
        "empresa" => "Company",
        "instructor" => "SENA Instructor",
        other => other,
    }
}

/// `city, department`, skipping whichever is missing.
pub fn location_line(company: &Company) -> Option<String> {
    let parts: Vec<&str> = [company.city.as_deref(), company.department.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
