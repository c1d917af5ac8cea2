use serde::Serialize;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct Hero {
    pub headline: String,
    pub subheadline: String,
    pub call_to_action: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct Story {
    pub company: String,
    pub quote: String,
    pub author: String,
}

/// Static marketing sections of the landing page.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LandingContent {
    pub hero: Hero,
    pub faqs: Vec<Faq>,
    pub stories: Vec<Story>,
}

const FAQS: &[(&str, &str)] = &[
    (
        "Is listing my company free?",
        "Yes. Every graduate, instructor and company can publish a profile at no cost.",
    ),
    (
        "Who can see my profile?",
        "Anyone with the link, and everyone searching the directory by name, sector or service.",
    ),
    (
        "Can I change my links and products later?",
        "Yes. The dashboard lets you reorder links, edit products and swap images at any time.",
    ),
    (
        "Are reviews published immediately?",
        "No. Reviews appear on your profile once you approve them from the dashboard.",
    ),
];

const STORIES: &[(&str, &str, &str)] = &[
    (
        "TechCali Solutions",
        "Clients started finding us through the directory within the first week.",
        "Laura M.",
    ),
    (
        "EcoVerde Cali",
        "One link for our catalog, our WhatsApp and our hours. That is all we needed.",
        "Andres P.",
    ),
    (
        "Gastronomia Valluna",
        "Approved reviews gave new customers the confidence to call us.",
        "Camila R.",
    ),
];

pub fn landing_content() -> LandingContent {
    LandingContent {
        hero: Hero {
            headline: "Find the companies built by our community".into(),
            subheadline: "Search graduates, instructors and companies by name, sector or service."
                .into(),
            call_to_action: "Create your profile".into(),
        },
        faqs: FAQS
            .iter()
            .map(|(question, answer)| Faq {
                question: (*question).into(),
                answer: (*answer).into(),
            })
            .collect(),
        stories: STORIES
            .iter()
            .map(|(company, quote, author)| Story {
                company: (*company).into(),
                quote: (*quote).into(),
                author: (*author).into(),
            })
            .collect(),
    }
}
