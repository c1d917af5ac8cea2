use chrono::Utc;
use common::product::{Product, ProductForm};
use common::sync::CrudList;
use serde_json::json;
use tracing::{info, instrument};

use super::{ActionError, Dashboard};
use crate::backend::table;

impl Dashboard {
    pub fn products(&self) -> &CrudList<Product> {
        &self.products
    }

    /// Create a product, or update `editing` when given.
    #[instrument(skip(self, form))]
    pub async fn save_product(
        &mut self,
        form: &ProductForm,
        editing: Option<&str>,
    ) -> Result<Product, ActionError> {
        let action = if editing.is_some() {
            "update the product"
        } else {
            "create the product"
        };
        let result = self.write_product(form, editing).await;
        let product = result.map_err(|e| self.report(action, e))?;
        self.notifier.alert(if editing.is_some() {
            "Product updated!"
        } else {
            "Product created!"
        });
        Ok(product)
    }

    async fn write_product(
        &mut self,
        form: &ProductForm,
        editing: Option<&str>,
    ) -> Result<Product, ActionError> {
        let fields = form.validate(&self.company.id, &self.settings.currency)?;
        let tables = self.backend.tables.as_ref();
        match editing {
            Some(id) => {
                if !self.products.contains(id) {
                    return Err(ActionError::NotFound(format!("product `{id}`")));
                }
                table::update::<Product>(tables, id, &fields).await?;
                let now = Utc::now();
                self.products.update(id, |p| p.apply(&fields, now));
                info!(product = id, "Product updated");
                self.products
                    .get(id)
                    .cloned()
                    .ok_or_else(|| ActionError::NotFound(format!("product `{id}`")))
            }
            None => {
                let product: Product = table::insert(tables, &fields).await?;
                info!(product = %product.id, "Product created");
                self.products.append(product.clone());
                Ok(product)
            }
        }
    }

    /// Flip a product's storefront visibility.
    #[instrument(skip(self))]
    pub async fn toggle_product(&mut self, id: &str) -> Result<bool, ActionError> {
        let Some(current) = self.products.get(id).map(|p| p.is_active) else {
            return Err(self.report(
                "update the product",
                ActionError::NotFound(format!("product `{id}`")),
            ));
        };
        let active = !current;
        table::update::<Product>(
            self.backend.tables.as_ref(),
            id,
            &json!({ "is_active": active }),
        )
        .await
        .map_err(|e| self.report("update the product", e.into()))?;
        self.products.update(id, |p| p.is_active = active);
        Ok(active)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&mut self, id: &str) -> Result<Product, ActionError> {
        let Some(name) = self.products.get(id).map(|p| p.name.clone()) else {
            return Err(self.report(
                "delete the product",
                ActionError::NotFound(format!("product `{id}`")),
            ));
        };
        self.confirm(&format!("Delete the product \"{name}\"?"))?;
        table::delete::<Product>(self.backend.tables.as_ref(), id)
            .await
            .map_err(|e| self.report("delete the product", e.into()))?;
        let removed = self
            .products
            .remove(id)
            .ok_or_else(|| ActionError::NotFound(format!("product `{id}`")))?;
        info!(product = id, "Product deleted");
        self.notifier.alert("Product deleted");
        Ok(removed)
    }
}
