use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::company::{Company, category_label, location_line};
use crate::hours::{BusinessHours, WeekHours};
use crate::image::{CompanyImage, ImageSet};
use crate::link::{LinkItem, initial_links};
use crate::product::{Product, storefront};
use crate::review::{Review, ReviewSummary, public_reviews};
use crate::theme::primary_color;

/// The public columns of a company row. Ownership, theme settings and the
/// raw link column stay private.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct PublicCompany {
    pub id: String,
    #[schema(example = "techcali-solutions")]
    pub slug: String,
    #[schema(example = "TechCali Solutions")]
    pub company_name: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub category: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub address: Option<String>,
    /// `city, department`.
    #[schema(example = "Cali, Valle del Cauca")]
    pub location: Option<String>,
    pub year_founded: Option<i32>,
    pub employee_count: Option<String>,
    pub services: Vec<String>,
    pub logo_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Company> for PublicCompany {
    fn from(company: Company) -> Self {
        Self {
            location: location_line(&company),
            id: company.id,
            slug: company.slug,
            company_name: company.company_name,
            description: company.description,
            short_description: company.short_description,
            category: company.category,
            industry: company.industry,
            website: company.website,
            email: company.email,
            phone: company.phone,
            whatsapp: company.whatsapp,
            address: company.address,
            year_founded: company.year_founded,
            employee_count: company.employee_count,
            services: company.services,
            logo_url: company.logo_url,
            cover_image_url: company.cover_image_url,
            created_at: company.created_at,
        }
    }
}

/// Everything the public profile page shows, assembled from one fetch of
/// each table.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct CompanyProfile {
    pub company: PublicCompany,
    /// Active links in saved order, derived from contact fields when the
    /// company never saved a list.
    pub links: Vec<LinkItem>,
    #[schema(example = "Company")]
    pub category_label: String,
    #[schema(example = "#2F4D2A")]
    pub primary_color: String,
    pub images: ImageSet,
    /// Active products in display order.
    pub products: Vec<Product>,
    pub hours: WeekHours,
    /// Approved reviews, newest first.
    pub reviews: Vec<Review>,
    pub rating: ReviewSummary,
}

impl CompanyProfile {
    pub fn assemble(
        company: Company,
        images: &[CompanyImage],
        products: &[Product],
        hours: Vec<BusinessHours>,
        reviews: &[Review],
    ) -> Self {
        Self {
            links: initial_links(&company)
                .into_iter()
                .filter(|link| link.is_active)
                .collect(),
            category_label: category_label(&company.category).to_string(),
            primary_color: primary_color(
                company.custom_color.as_deref(),
                company.selected_theme.as_deref(),
            ),
            images: ImageSet::from_images(images),
            products: storefront(products),
            hours: WeekHours::from_rows(&company.id, hours),
            reviews: public_reviews(reviews),
            rating: ReviewSummary::of(reviews),
            company: company.into(),
        }
    }
}
