use chrono::Utc;
use common::image::{
    CompanyImage, ImageKind, ImageSet, UploadFile, alt_text, storage_key, validate_upload,
};
use common::sync::CrudList;
use serde_json::json;
use tracing::{info, instrument};

use super::{ActionError, Dashboard};
use crate::backend::table;

impl Dashboard {
    pub fn images(&self) -> &CrudList<CompanyImage> {
        &self.images
    }

    pub fn image_set(&self) -> ImageSet {
        ImageSet::from_images(self.images.items())
    }

    /// Kind of the upload in flight, if any.
    pub fn max_upload_bytes(&self) -> u64 {
        self.settings.max_upload_bytes
    }

    pub fn uploading(&self) -> Option<ImageKind> {
        self.uploading
    }

    /// Upload an image of `kind`.
    ///
    /// Type and size are checked before anything is sent. Logo and cover
    /// replace the existing record of that kind; gallery images append.
    #[instrument(skip(self, file), fields(file = %file.file_name, size = file.size()))]
    pub async fn upload_image(
        &mut self,
        kind: ImageKind,
        file: UploadFile,
    ) -> Result<CompanyImage, ActionError> {
        let action = format!("upload the {}", kind.label().to_lowercase());
        if self.uploading.is_some() {
            return Err(self.report(&action, ActionError::Busy));
        }
        validate_upload(&file, self.settings.max_upload_bytes)
            .map_err(|e| self.report(&action, e.into()))?;

        self.uploading = Some(kind);
        let result = self.store_image(kind, file).await;
        self.uploading = None;

        let image = result.map_err(|e| self.report(&action, e))?;
        self.notifier
            .alert(&format!("{} updated successfully!", kind.label()));
        Ok(image)
    }

    async fn store_image(
        &mut self,
        kind: ImageKind,
        file: UploadFile,
    ) -> Result<CompanyImage, ActionError> {
        let now = Utc::now();
        let key = storage_key(
            &self.company.id,
            kind,
            &file.extension(),
            now.timestamp_millis(),
        );
        let objects = self.backend.objects.as_ref();
        objects
            .upload(&self.bucket, &key, file.bytes, &file.content_type, true)
            .await?;
        let url = objects.public_url(&self.bucket, &key);

        let tables = self.backend.tables.as_ref();
        let existing = if kind.is_singleton() {
            self.images
                .items()
                .iter()
                .find(|image| image.image_type == kind)
                .map(|image| image.id.clone())
        } else {
            None
        };

        match existing {
            Some(id) => {
                let patch = json!({
                    "image_url": url,
                    "storage_path": key,
                    "updated_at": now,
                });
                table::update::<CompanyImage>(tables, &id, &patch).await?;
                self.images.update(&id, |image| {
                    image.image_url = url;
                    image.storage_path = Some(key);
                    image.updated_at = now;
                });
                info!(image = %id, kind = kind.as_str(), "Image replaced");
                self.images
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| ActionError::NotFound(format!("image `{id}`")))
            }
            None => {
                let row = json!({
                    "company_id": self.company.id,
                    "image_url": url,
                    "storage_path": key,
                    "image_type": kind,
                    "alt_text": alt_text(kind, &self.company.company_name),
                    "display_order": self.images.len(),
                });
                let image: CompanyImage = table::insert(tables, &row).await?;
                info!(image = %image.id, kind = kind.as_str(), "Image added");
                self.images.append(image.clone());
                Ok(image)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_image(&mut self, id: &str) -> Result<CompanyImage, ActionError> {
        let Some(label) = self.images.get(id).map(|i| i.image_type.label()) else {
            return Err(self.report(
                "delete the image",
                ActionError::NotFound(format!("image `{id}`")),
            ));
        };
        self.confirm(&format!("Delete this {}?", label.to_lowercase()))?;
        table::delete::<CompanyImage>(self.backend.tables.as_ref(), id)
            .await
            .map_err(|e| self.report("delete the image", e.into()))?;
        let removed = self
            .images
            .remove(id)
            .ok_or_else(|| ActionError::NotFound(format!("image `{id}`")))?;
        info!(image = id, "Image deleted");
        self.notifier.alert("Image deleted");
        Ok(removed)
    }
}
