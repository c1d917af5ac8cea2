//! Interactive dashboard prompt.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use client::{ActionError, Dashboard};
use common::ValidationError;
use common::hours::Weekday;
use common::image::{ImageKind, UploadFile};
use common::product::ProductForm;
use console::style;
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Links,
    Products,
    Images,
    Reviews,
    Hours,
    Theme,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Logout,
    Reload,
    Show(Option<Section>),
    LinkToggle(String),
    LinkEdit(String),
    LinkDuplicate(String),
    LinkRemove(String),
    LinkMove { from: usize, to: usize },
    LinkSave,
    ProductAdd,
    ProductEdit(String),
    ProductToggle(String),
    ProductRemove(String),
    ImageUpload { kind: ImageKind, path: PathBuf },
    ImageRemove(String),
    ReviewApprove(String),
    ReviewHide(String),
    ReviewRemove(String),
    HoursClosed { day: Weekday, on: bool },
    Hours24 { day: Weekday, on: bool },
    HoursSet { day: Weekday, open: String, close: String },
    ThemeUse(String),
    ThemeColor(String),
    ThemeSave,
}

const HELP: &str = "\
show [links|products|images|reviews|hours|theme]
link toggle|edit|dup|rm <id>      link move <from> <to>      link save
product add | product edit|toggle|rm <id>
image upload <logo|cover|gallery> <path> | image rm <id>
review approve|hide|rm <id>
hours closed|24h <day> on|off      hours set <day> <HH:MM> <HH:MM>
theme use <preset> | theme color <#hex> | theme save
reload | logout | quit";

fn section(name: &str) -> Result<Section> {
    Ok(match name {
        "links" => Section::Links,
        "products" => Section::Products,
        "images" => Section::Images,
        "reviews" => Section::Reviews,
        "hours" => Section::Hours,
        "theme" | "design" => Section::Theme,
        other => bail!("unknown section `{other}`"),
    })
}

/// Accepts `0`-`6` (Monday first) or an English day name or prefix.
fn weekday(text: &str) -> Result<Weekday> {
    if let Ok(index) = text.parse::<u8>() {
        return Weekday::try_from(index).map_err(|e| anyhow!(e));
    }
    let lower = text.to_lowercase();
    Weekday::all()
        .find(|day| lower.len() >= 2 && day.name().to_lowercase().starts_with(&lower))
        .ok_or_else(|| anyhow!("unknown day `{text}`"))
}

fn switch(text: &str) -> Result<bool> {
    match text {
        "on" | "yes" | "true" => Ok(true),
        "off" | "no" | "false" => Ok(false),
        other => bail!("expected on/off, got `{other}`"),
    }
}

fn index(text: &str) -> Result<usize> {
    text.parse()
        .with_context(|| format!("expected a position, got `{text}`"))
}

/// Parse one prompt line. Blank lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let command = match words.as_slice() {
        [] => return Ok(None),
        ["help" | "?"] => Command::Help,
        ["quit" | "exit"] => Command::Quit,
        ["logout"] => Command::Logout,
        ["reload"] => Command::Reload,
        ["show" | "list"] => Command::Show(None),
        ["show" | "list", name] => Command::Show(Some(section(name)?)),

        ["link", "toggle", id] => Command::LinkToggle(id.to_string()),
        ["link", "edit", id] => Command::LinkEdit(id.to_string()),
        ["link", "dup" | "copy", id] => Command::LinkDuplicate(id.to_string()),
        ["link", "rm", id] => Command::LinkRemove(id.to_string()),
        ["link", "move", from, to] => Command::LinkMove {
            from: index(from)?,
            to: index(to)?,
        },
        ["link", "save"] => Command::LinkSave,

        ["product", "add"] => Command::ProductAdd,
        ["product", "edit", id] => Command::ProductEdit(id.to_string()),
        ["product", "toggle", id] => Command::ProductToggle(id.to_string()),
        ["product", "rm", id] => Command::ProductRemove(id.to_string()),

        ["image", "upload", kind, path @ ..] if !path.is_empty() => Command::ImageUpload {
            kind: kind.parse().map_err(|e: String| anyhow!(e))?,
            path: PathBuf::from(path.join(" ")),
        },
        ["image", "rm", id] => Command::ImageRemove(id.to_string()),

        ["review", "approve", id] => Command::ReviewApprove(id.to_string()),
        ["review", "hide", id] => Command::ReviewHide(id.to_string()),
        ["review", "rm", id] => Command::ReviewRemove(id.to_string()),

        ["hours", "closed", day, on] => Command::HoursClosed {
            day: weekday(day)?,
            on: switch(on)?,
        },
        ["hours", "24h" | "allday", day, on] => Command::Hours24 {
            day: weekday(day)?,
            on: switch(on)?,
        },
        ["hours", "set" | "times", day, open, close] => Command::HoursSet {
            day: weekday(day)?,
            open: open.to_string(),
            close: close.to_string(),
        },

        ["theme", "use" | "select", id] => Command::ThemeUse(id.to_string()),
        ["theme", "color", color] => Command::ThemeColor(color.to_string()),
        ["theme", "save"] => Command::ThemeSave,

        _ => bail!("unrecognized command `{}` (try `help`)", line.trim()),
    };
    Ok(Some(command))
}

fn ask(theme: &ColorfulTheme, prompt: &str, initial: &str, required: bool) -> Result<String> {
    Ok(Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(!required)
        .interact_text()?)
}

fn product_form(theme: &ColorfulTheme, initial: ProductForm) -> Result<ProductForm> {
    Ok(ProductForm {
        name: ask(theme, "Name", &initial.name, true)?,
        description: ask(theme, "Description", &initial.description, false)?,
        price: ask(theme, "Price", &initial.price, true)?,
        image_url: ask(theme, "Image URL", &initial.image_url, false)?,
        category: ask(theme, "Category", &initial.category, false)?,
        stock_quantity: ask(theme, "Stock", &initial.stock_quantity, false)?,
    })
}

/// Load an image from disk. Files over `max_bytes` are rejected from their
/// metadata, before any bytes are read.
fn read_upload(path: &Path, max_bytes: u64) -> Result<UploadFile> {
    let size = fs::metadata(path)
        .with_context(|| format!("could not read {}", path.display()))?
        .len();
    if size > max_bytes {
        return Err(ValidationError::FileTooLarge {
            actual: size,
            limit: max_bytes,
        }
        .into());
    }
    let bytes = fs::read(path).with_context(|| format!("could not read {}", path.display()))?;
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(UploadFile {
        file_name,
        content_type,
        bytes,
    })
}

/// Print every dashboard section.
pub fn render_all(dashboard: &Dashboard) {
    show(dashboard, None);
}

fn show(dashboard: &Dashboard, section: Option<Section>) {
    let all = section.is_none();
    if all || section == Some(Section::Links) {
        render::links(dashboard);
    }
    if all || section == Some(Section::Products) {
        render::products(dashboard);
    }
    if all || section == Some(Section::Images) {
        render::images(dashboard);
    }
    if all || section == Some(Section::Reviews) {
        render::reviews(dashboard);
    }
    if all || section == Some(Section::Hours) {
        render::hours(dashboard);
    }
    if all || section == Some(Section::Theme) {
        render::theme(dashboard);
    }
}

/// Whether the loop should keep going after a command.
enum Flow {
    Continue,
    Quit,
    Logout,
}

/// Action failures were already reported through the notifier, so they
/// are swallowed here; only terminal and file errors propagate.
fn settle<T>(result: Result<T, ActionError>) -> Option<T> {
    result.ok()
}

async fn execute(dashboard: &mut Dashboard, theme: &ColorfulTheme, command: Command) -> Result<Flow> {
    match command {
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(Flow::Quit),
        Command::Logout => return Ok(Flow::Logout),
        Command::Show(section) => show(dashboard, section),
        Command::Reload => {
            if settle(dashboard.reload().await).is_some() {
                show(dashboard, None);
            }
        }

        Command::LinkToggle(id) => {
            if !dashboard.toggle_link(&id) {
                println!("No link `{id}`.");
            }
        }
        Command::LinkEdit(id) => {
            let Some(draft) = dashboard.start_link_edit(&id) else {
                println!("No link `{id}`.");
                return Ok(Flow::Continue);
            };
            let edited = ask(theme, "Title", &draft.title, true)
                .and_then(|title| Ok((title, ask(theme, "URL", &draft.url, true)?)));
            match edited {
                Ok((title, url)) => {
                    dashboard.commit_link_edit(&id, &title, &url);
                }
                Err(e) => {
                    dashboard.cancel_link_edit();
                    return Err(e);
                }
            }
        }
        Command::LinkDuplicate(id) => match dashboard.duplicate_link(&id) {
            Some(copy) => println!("Added {}.", copy.title),
            None => println!("No link `{id}`."),
        },
        Command::LinkRemove(id) => {
            if let Some(link) = settle(dashboard.remove_link(&id)) {
                println!("Removed {}.", link.title);
            }
        }
        Command::LinkMove { from, to } => {
            if settle(dashboard.move_link(from, to).await) == Some(false) {
                println!("Nothing to move.");
            }
        }
        Command::LinkSave => {
            if settle(dashboard.save_links().await).is_some() {
                println!("Links saved.");
            }
        }

        Command::ProductAdd => {
            let form = product_form(theme, ProductForm::default())?;
            settle(dashboard.save_product(&form, None).await);
        }
        Command::ProductEdit(id) => {
            let Some(product) = dashboard.products().get(&id) else {
                println!("No product `{id}`.");
                return Ok(Flow::Continue);
            };
            let form = product_form(theme, ProductForm::from(product))?;
            settle(dashboard.save_product(&form, Some(&id)).await);
        }
        Command::ProductToggle(id) => {
            if let Some(active) = settle(dashboard.toggle_product(&id).await) {
                println!("Product is now {}.", if active { "active" } else { "hidden" });
            }
        }
        Command::ProductRemove(id) => {
            settle(dashboard.delete_product(&id).await);
        }

        Command::ImageUpload { kind, path } => {
            let file = read_upload(&path, dashboard.max_upload_bytes())?;
            settle(dashboard.upload_image(kind, file).await);
        }
        Command::ImageRemove(id) => {
            settle(dashboard.delete_image(&id).await);
        }

        Command::ReviewApprove(id) => {
            settle(dashboard.approve_review(&id).await);
        }
        Command::ReviewHide(id) => {
            settle(dashboard.hide_review(&id).await);
        }
        Command::ReviewRemove(id) => {
            settle(dashboard.delete_review(&id).await);
        }

        Command::HoursClosed { day, on } => {
            settle(dashboard.set_day_closed(day, on).await);
        }
        Command::Hours24 { day, on } => {
            settle(dashboard.set_day_24_hours(day, on).await);
        }
        Command::HoursSet { day, open, close } => {
            settle(dashboard.set_day_times(day, &open, &close).await);
        }

        Command::ThemeUse(id) => {
            if !dashboard.select_theme(&id) {
                println!("Unknown theme `{id}`; see `show theme`.");
            }
        }
        Command::ThemeColor(color) => dashboard.set_custom_color(&color),
        Command::ThemeSave => {
            settle(dashboard.save_theme().await);
        }
    }
    Ok(Flow::Continue)
}

/// Run the prompt until `quit` or `logout`.
pub async fn run(mut dashboard: Dashboard) -> Result<()> {
    let theme = ColorfulTheme::default();
    let prompt = format!("{}> ", dashboard.company().slug);
    println!(
        "Managing {}. Type `help` for commands.",
        style(&dashboard.company().company_name).bold()
    );

    let mut line = String::new();
    loop {
        print!("{prompt}");
        io::stdout().flush().ok();

        line.clear();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{} {e}", style("error:").red());
                continue;
            }
        };
        match execute(&mut dashboard, &theme, command).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Ok(Flow::Logout) => {
                dashboard.sign_out().await?;
                println!("Signed out.");
                return Ok(());
            }
            Err(e) => eprintln!("{} {e:#}", style("error:").red()),
        }
    }
    Ok(())
}
