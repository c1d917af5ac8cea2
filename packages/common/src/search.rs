use serde::Serialize;

use crate::company::Company;

/// A company as listed in the directory search.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct DirectoryEntry {
    pub id: String,
    #[schema(example = "techcali-solutions")]
    pub slug: String,
    #[schema(example = "TechCali Solutions")]
    pub name: String,
    #[schema(example = "Technology")]
    pub category: String,
    pub services: Vec<String>,
}

impl From<&Company> for DirectoryEntry {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id.clone(),
            slug: company.slug.clone(),
            name: company.company_name.clone(),
            category: company
                .industry
                .clone()
                .unwrap_or_else(|| company.category.clone()),
            services: company.services.clone(),
        }
    }
}

impl DirectoryEntry {
    fn searchable_text(&self) -> String {
        format!("{} {} {}", self.name, self.category, self.services.join(" ")).to_lowercase()
    }
}

/// Case-insensitive substring filter over name, category and services.
///
/// A blank query returns every entry. Input order is preserved.
pub fn search<'a>(entries: &'a [DirectoryEntry], query: &str) -> Vec<&'a DirectoryEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|entry| entry.searchable_text().contains(&needle))
        .collect()
}
