use serde::{Deserialize, Serialize};

use crate::company::Company;
use crate::sync::Identified;

/// Whether a link points at a known provider or is free-form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Platform,
    Custom,
}

/// An outbound link shown on a public profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LinkItem {
    #[schema(example = "social-instagram")]
    pub id: String,
    #[schema(example = "Instagram")]
    pub title: String,
    #[schema(example = "https://instagram.com/techcali")]
    pub url: String,
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub clicks: u64,
    #[serde(default = "default_active", deserialize_with = "crate::nullable::or_true")]
    pub is_active: bool,
    #[serde(rename = "type")]
    pub kind: LinkKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_id: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Identified for LinkItem {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A known social or contact provider.
pub struct Platform {
    pub id: &'static str,
    pub name: &'static str,
    /// Prepended to a bare handle to build the profile URL.
    pub url_prefix: Option<&'static str>,
}

pub const PLATFORMS: &[Platform] = &[
    Platform {
        id: "instagram",
        name: "Instagram",
        url_prefix: Some("https://instagram.com/"),
    },
    Platform {
        id: "whatsapp",
        name: "WhatsApp",
        url_prefix: Some("https://wa.me/"),
    },
    Platform {
        id: "tiktok",
        name: "TikTok",
        url_prefix: Some("https://tiktok.com/@"),
    },
    Platform {
        id: "youtube",
        name: "YouTube",
        url_prefix: Some("https://youtube.com/"),
    },
    Platform {
        id: "facebook",
        name: "Facebook",
        url_prefix: Some("https://facebook.com/"),
    },
    Platform {
        id: "twitter",
        name: "X",
        url_prefix: Some("https://x.com/"),
    },
    Platform {
        id: "spotify",
        name: "Spotify",
        url_prefix: Some("https://open.spotify.com/user/"),
    },
    Platform {
        id: "website",
        name: "Personal Website",
        url_prefix: None,
    },
];

pub fn find_platform(id: &str) -> Option<&'static Platform> {
    PLATFORMS.iter().find(|p| p.id == id)
}

pub fn platform_name(id: &str) -> &str {
    find_platform(id).map_or(id, |p| p.name)
}

/// Expand a handle into a full URL for `platform_id`.
///
/// Values that already carry a scheme are kept as-is.
pub fn platform_url(platform_id: &str, value: &str) -> String {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        return value.to_string();
    }
    match find_platform(platform_id).and_then(|p| p.url_prefix) {
        Some(prefix) => format!("{prefix}{}", value.trim_start_matches('@')),
        None => format!("https://{value}"),
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Build the initial link list for a company that has never saved one:
/// social links first, then website, email and WhatsApp.
pub fn derive_links(company: &Company) -> Vec<LinkItem> {
    let mut links = Vec::new();

    for (platform, value) in &company.social_links {
        let Some(value) = value.as_str().map(str::trim).filter(|v| !v.is_empty()) else {
            continue;
        };
        links.push(LinkItem {
            id: format!("social-{platform}"),
            title: platform_name(platform).to_string(),
            url: platform_url(platform, value),
            clicks: 0,
            is_active: true,
            kind: LinkKind::Platform,
            platform_id: Some(platform.clone()),
        });
    }

    if let Some(website) = non_blank(&company.website) {
        links.push(LinkItem {
            id: "website".into(),
            title: "Website".into(),
            url: website.to_string(),
            clicks: 0,
            is_active: true,
            kind: LinkKind::Custom,
            platform_id: None,
        });
    }

    if let Some(email) = non_blank(&company.email) {
        links.push(LinkItem {
            id: "email".into(),
            title: "Email".into(),
            url: format!("mailto:{email}"),
            clicks: 0,
            is_active: true,
            kind: LinkKind::Custom,
            platform_id: None,
        });
    }

    if let Some(number) = non_blank(&company.whatsapp) {
        links.push(LinkItem {
            id: "whatsapp".into(),
            title: "WhatsApp".into(),
            url: format!("https://wa.me/{number}"),
            clicks: 0,
            is_active: true,
            kind: LinkKind::Platform,
            platform_id: Some("whatsapp".into()),
        });
    }

    links
}

/// The company's saved link list, or a derived one if it never saved any.
pub fn initial_links(company: &Company) -> Vec<LinkItem> {
    match &company.links {
        Some(saved) => saved.clone(),
        None => derive_links(company),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::company::fixtures;

    #[test]
    fn handles_expand_with_platform_prefix() {
        assert_eq!(
            platform_url("instagram", "@techcali"),
            "https://instagram.com/techcali"
        );
        assert_eq!(
            platform_url("tiktok", "techcali"),
            "https://tiktok.com/@techcali"
        );
        assert_eq!(
            platform_url("linkedin", "linkedin.com/company/x"),
            "https://linkedin.com/company/x"
        );
        assert_eq!(
            platform_url("youtube", "https://youtube.com/@x"),
            "https://youtube.com/@x"
        );
    }

    #[test]
    fn unknown_platform_keeps_its_id_as_name() {
        assert_eq!(platform_name("twitter"), "X");
        assert_eq!(platform_name("mastodon"), "mastodon");
    }

    #[test]
    fn derived_links_skip_blank_values_and_follow_fixed_order() {
        let mut company = fixtures::company();
        company
            .social_links
            .insert("instagram".into(), "@techcali".into());
        company.social_links.insert("facebook".into(), "  ".into());
        company.social_links.insert("tiktok".into(), Value::Null);
        company.website = Some("https://techcali.co".into());
        company.email = Some("hola@techcali.co".into());
        company.whatsapp = Some("573001112233".into());

        let links = derive_links(&company);
        let ids: Vec<&str> = links.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["social-instagram", "website", "email", "whatsapp"]);
        assert_eq!(links[2].url, "mailto:hola@techcali.co");
        assert_eq!(links[3].kind, LinkKind::Platform);
        assert!(links.iter().all(|l| l.clicks == 0 && l.is_active));
    }

    #[test]
    fn social_links_keep_column_order() {
        let company: Company = serde_json::from_value(serde_json::json!({
            "id": "c1", "user_id": "u1", "slug": "s", "company_name": "S",
            "social_links": {"youtube": "@s", "instagram": "@s", "facebook": "s.page"},
        }))
        .unwrap();
        let ids: Vec<String> = derive_links(&company).into_iter().map(|l| l.id).collect();
        assert_eq!(ids, ["social-youtube", "social-instagram", "social-facebook"]);
    }

    #[test]
    fn saved_links_win_over_derivation() {
        let mut company = fixtures::company();
        company.website = Some("https://techcali.co".into());
        company.links = Some(vec![]);
        assert!(initial_links(&company).is_empty());
    }

    #[test]
    fn link_kind_serializes_under_type_key() {
        let link = LinkItem {
            id: "x".into(),
            title: "X".into(),
            url: "https://x.com/a".into(),
            clicks: 3,
            is_active: false,
            kind: LinkKind::Custom,
            platform_id: None,
        };
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["type"], "custom");
        assert!(value.get("platform_id").is_none());
    }
}
