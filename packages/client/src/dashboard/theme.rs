use chrono::Utc;
use common::company::Company;
use common::theme::ThemeSelection;
use serde_json::json;
use tracing::{info, instrument};

use super::{ActionError, Dashboard};
use crate::backend::table;

impl Dashboard {
    pub fn theme(&self) -> &ThemeSelection {
        &self.theme
    }

    pub fn saving_theme(&self) -> bool {
        self.saving_theme
    }

    pub fn select_theme(&mut self, id: &str) -> bool {
        self.theme.select_preset(id)
    }

    pub fn set_custom_color(&mut self, color: &str) {
        self.theme.set_custom_color(color);
    }

    /// Persist the selected theme and color on the company row.
    #[instrument(skip(self), fields(theme = self.theme.theme_id()))]
    pub async fn save_theme(&mut self) -> Result<(), ActionError> {
        self.theme
            .validate()
            .map_err(|e| self.report("save the design", e.into()))?;

        let now = Utc::now();
        let patch = json!({
            "selected_theme": self.theme.theme_id(),
            "custom_color": self.theme.color(),
            "updated_at": now,
        });
        self.saving_theme = true;
        let result =
            table::update::<Company>(self.backend.tables.as_ref(), &self.company.id, &patch).await;
        self.saving_theme = false;
        result.map_err(|e| self.report("save the design", e.into()))?;

        self.company.selected_theme = Some(self.theme.theme_id().to_string());
        self.company.custom_color = Some(self.theme.color().to_string());
        self.company.updated_at = now;
        info!(color = self.theme.color(), "Design saved");
        self.notifier.alert("Design settings saved");
        Ok(())
    }
}
