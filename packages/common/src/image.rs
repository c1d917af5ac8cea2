use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::sync::{Identified, Record};

/// Upload ceiling for company images (5 MiB).
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Logo,
    Cover,
    Gallery,
}

impl ImageKind {
    /// Logo and cover have at most one current image; gallery is unbounded.
    pub fn is_singleton(&self) -> bool {
        matches!(self, Self::Logo | Self::Cover)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::Cover => "cover",
            Self::Gallery => "gallery",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Logo => "Logo",
            Self::Cover => "Cover",
            Self::Gallery => "Gallery image",
        }
    }
}

impl std::str::FromStr for ImageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "logo" => Ok(Self::Logo),
            "cover" => Ok(Self::Cover),
            "gallery" => Ok(Self::Gallery),
            other => Err(format!("unknown image kind: {other}")),
        }
    }
}

/// A row of the `company_images` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CompanyImage {
    pub id: String,
    pub company_id: String,
    pub image_type: ImageKind,
    pub image_url: String,
    #[serde(default)]
    pub storage_path: Option<String>,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub display_order: i32,
    #[serde(default = "Utc::now", deserialize_with = "crate::nullable::or_now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", deserialize_with = "crate::nullable::or_now")]
    pub updated_at: DateTime<Utc>,
}

impl Record for CompanyImage {
    const TABLE: &'static str = "company_images";
}

impl Identified for CompanyImage {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A file picked for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Extension taken from the file name, falling back to the MIME subtype.
    pub fn extension(&self) -> String {
        match self.file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext.to_ascii_lowercase(),
            _ => self
                .content_type
                .split_once('/')
                .map(|(_, sub)| sub.split(['+', ';']).next().unwrap_or(sub))
                .filter(|sub| !sub.is_empty())
                .unwrap_or("bin")
                .to_string(),
        }
    }
}

/// Reject anything that is not an image or exceeds `max_bytes`.
pub fn validate_upload(file: &UploadFile, max_bytes: u64) -> Result<(), ValidationError> {
    if !file.content_type.starts_with("image/") {
        return Err(ValidationError::NotAnImage(file.content_type.clone()));
    }
    if file.size() > max_bytes {
        return Err(ValidationError::FileTooLarge {
            actual: file.size(),
            limit: max_bytes,
        });
    }
    Ok(())
}

/// Object key for an upload: `<company_id>/<kind>-<millis>.<ext>`.
pub fn storage_key(company_id: &str, kind: ImageKind, extension: &str, millis: i64) -> String {
    format!("{company_id}/{}-{millis}.{extension}", kind.as_str())
}

pub fn alt_text(kind: ImageKind, company_name: &str) -> String {
    format!("{} of {company_name}", kind.label())
}

/// Images grouped by role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, utoipa::ToSchema)]
pub struct ImageSet {
    pub logo: Option<CompanyImage>,
    pub cover: Option<CompanyImage>,
    pub gallery: Vec<CompanyImage>,
}

impl ImageSet {
    pub fn from_images(images: &[CompanyImage]) -> Self {
        let first = |kind| images.iter().find(|img| img.image_type == kind).cloned();
        Self {
            logo: first(ImageKind::Logo),
            cover: first(ImageKind::Cover),
            gallery: images
                .iter()
                .filter(|img| img.image_type == ImageKind::Gallery)
                .cloned()
                .collect(),
        }
    }

    /// Cover first, then the gallery.
    pub fn carousel(&self) -> Vec<&CompanyImage> {
        self.cover.iter().chain(self.gallery.iter()).collect()
    }
}
