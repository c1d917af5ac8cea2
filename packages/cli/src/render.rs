//! Plain-text rendering of directory pages and dashboard sections.

use client::Dashboard;
use common::landing::LandingContent;
use common::link::LinkItem;
use common::profile::CompanyProfile;
use common::search::DirectoryEntry;
use common::theme::PRESETS;
use console::style;

fn heading(text: &str) {
    println!("\n{}", style(text).bold().underlined());
}

pub fn landing(content: &LandingContent) {
    println!("{}", style(&content.hero.headline).bold().green());
    println!("{}", content.hero.subheadline);
    println!("  -> {}", style(&content.hero.call_to_action).cyan());

    heading("Frequently asked questions");
    for faq in &content.faqs {
        println!("{}", style(&faq.question).bold());
        println!("  {}", faq.answer);
    }

    heading("Success stories");
    for story in &content.stories {
        println!("\"{}\"", story.quote);
        println!("  {} - {}", story.author, style(&story.company).dim());
    }
}

pub fn entries(entries: &[DirectoryEntry]) {
    if entries.is_empty() {
        println!("No companies found.");
        return;
    }
    for entry in entries {
        println!(
            "{:<32} {:<20} {}",
            style(&entry.name).bold(),
            entry.category,
            style(&entry.slug).dim()
        );
        if !entry.services.is_empty() {
            println!("  {}", entry.services.join(", "));
        }
    }
    println!("\n{} result(s)", entries.len());
}

fn link_line(index: usize, link: &LinkItem) -> String {
    let state = if link.is_active {
        style("on ").green()
    } else {
        style("off").red()
    };
    format!(
        "{index:>2}. [{state}] {:<24} {}  ({} clicks)  {}",
        link.title,
        link.url,
        link.clicks,
        style(&link.id).dim()
    )
}

pub fn profile(profile: &CompanyProfile) {
    let company = &profile.company;
    println!(
        "{}  {}",
        style(&company.company_name).bold().green(),
        style(&profile.category_label).dim()
    );
    if let Some(tagline) = &company.short_description {
        println!("{tagline}");
    }
    if let Some(location) = &company.location {
        println!("{location}");
    }
    println!("Accent color: {}", profile.primary_color);

    if !profile.links.is_empty() {
        heading("Links");
        for (i, link) in profile.links.iter().enumerate() {
            println!("{}", link_line(i, link));
        }
    }

    if !profile.products.is_empty() {
        heading("Products");
        for product in &profile.products {
            println!("{:<32} {:>14.2} {}", product.name, product.price, product.currency);
        }
    }

    heading("Hours");
    for day in &profile.hours.days {
        println!("{:<10} {}", day.day_of_week.name(), day.describe());
    }

    heading("Reviews");
    let rating = &profile.rating;
    println!("{:.1} / 5 from {} review(s)", rating.average, rating.count);
    for review in &profile.reviews {
        println!(
            "{} {}",
            style("*".repeat(usize::from(review.rating.get()))).yellow(),
            review.author_name
        );
        if let Some(comment) = &review.comment {
            println!("  {comment}");
        }
    }

    let carousel = profile.images.carousel();
    if !carousel.is_empty() {
        heading("Images");
        for image in carousel {
            println!("{:<8} {}", image.image_type.as_str(), image.image_url);
        }
    }
}

pub fn links(dashboard: &Dashboard) {
    heading("Links");
    let links = dashboard.links();
    if links.is_empty() {
        println!("No links yet.");
    }
    for (i, link) in links.items().iter().enumerate() {
        println!("{}", link_line(i, link));
    }
}

pub fn products(dashboard: &Dashboard) {
    heading("Products");
    for product in dashboard.products().items() {
        let state = if product.is_active { "active" } else { "hidden" };
        println!(
            "{:<32} {:>14.2} {} stock {:<5} {:<6} {}",
            product.name,
            product.price,
            product.currency,
            product.stock_quantity,
            state,
            style(&product.id).dim()
        );
    }
}

pub fn images(dashboard: &Dashboard) {
    heading("Images");
    for image in dashboard.images().items() {
        println!(
            "{:<8} {}  {}",
            image.image_type.as_str(),
            image.image_url,
            style(&image.id).dim()
        );
    }
}

pub fn reviews(dashboard: &Dashboard) {
    heading("Reviews");
    let summary = dashboard.review_summary();
    println!("{:.1} / 5 from {} approved", summary.average, summary.count);
    for review in dashboard.reviews().items() {
        let state = if review.is_approved { "approved" } else { "pending" };
        println!(
            "{} {:<20} {:<9} {}",
            review.rating.get(),
            review.author_name,
            state,
            style(&review.id).dim()
        );
    }
}

pub fn hours(dashboard: &Dashboard) {
    heading("Hours");
    for (i, day) in dashboard.hours().days.iter().enumerate() {
        println!("{i} {:<10} {}", day.day_of_week.name(), day.describe());
    }
}

pub fn theme(dashboard: &Dashboard) {
    heading("Design");
    let theme = dashboard.theme();
    for preset in PRESETS {
        let marker = if preset.id == theme.theme_id() { ">" } else { " " };
        println!(
            "{marker} {:<14} {} {}",
            preset.id,
            preset.color,
            style(preset.description).dim()
        );
    }
    println!("Current: {} {}", theme.theme_id(), theme.color());
}
