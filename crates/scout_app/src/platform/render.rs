//! Turns the view model into terminal lines.
use chrono::DateTime;
use scout_core::{ActionView, AppViewModel, NoticeLevel, PollingStatus, Screen};

pub const HELP: &str = "\
Commands:
  preview <url>                 look up a video
  generate                      generate a recipe for the previewed video
  recipes [page]                browse recipes
  recipe <slug>                 open a recipe
  history [remove <slug>|clear] browsing history
  library [generate|delete <video_id>]
  home | account
  login <email> <password> [--remember]
  register <name> <email> <password> <confirmation>
  logout
  forgot-password <email>
  reset-password <token> <email> <password> <confirmation>
  profile <name> <email>
  password <current> <new> <confirmation>
  help | quit
Quote arguments containing spaces: profile \"Ada Lovelace\" ada@example.com";

/// Renders the current screen followed by notices and any pending prompt.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    match view.screen {
        Screen::Home => render_home(view, &mut lines),
        Screen::Recipes => render_recipes(view, &mut lines),
        Screen::Recipe => render_recipe(view, &mut lines),
        Screen::History => render_history(view, &mut lines),
        Screen::Library => render_library(view, &mut lines),
        Screen::Account => render_account(view, &mut lines),
    }

    if !view.form_errors.is_empty() {
        for (field, message) in &view.form_errors {
            lines.push(format!("  {field}: {message}"));
        }
    }
    for notice in &view.notices {
        let tag = match notice.level {
            NoticeLevel::Info => "[i]",
            NoticeLevel::Success => "[ok]",
            NoticeLevel::Error => "[!]",
        };
        lines.push(format!("{tag} {}", notice.text));
    }
    if let Some(prompt) = &view.confirmation_prompt {
        lines.push(format!("{prompt} [y/N]"));
    }
    lines
}

fn render_home(view: &AppViewModel, lines: &mut Vec<String>) {
    if view.preview_loading {
        lines.push("Loading video...".to_string());
        return;
    }
    if let Some(error) = &view.preview_error {
        lines.push(format!("Error: {error}"));
        return;
    }
    let Some(preview) = &view.preview else {
        lines.push("Paste a video link: preview <url>".to_string());
        return;
    };

    lines.push(preview.title.clone());
    let mut meta = Vec::new();
    if !preview.channel.is_empty() {
        meta.push(preview.channel.clone());
    }
    if let Some(duration) = &preview.duration {
        meta.push(duration.clone());
    }
    if let Some(published) = preview.published_at.as_deref().map(format_published) {
        meta.push(published);
    }
    if !meta.is_empty() {
        lines.push(format!("  {}", meta.join(" | ")));
    }
    if preview.polling == PollingStatus::Processing {
        lines.push("  Generating recipe... checking every few seconds".to_string());
    } else {
        lines.push(format!("  Status: {}", preview.status));
    }
    if let Some(action) = &preview.action {
        lines.push(format!("  {}", action_line(action)));
    }
}

fn render_recipes(view: &AppViewModel, lines: &mut Vec<String>) {
    if view.recipes_loading {
        lines.push("Loading recipes...".to_string());
        return;
    }
    let Some(page) = &view.recipes else {
        return;
    };
    if page.rows.is_empty() {
        lines.push("No recipes yet.".to_string());
    }
    for row in &page.rows {
        lines.push(recipe_row(
            &row.slug,
            &row.title,
            row.channel.as_deref(),
            row.cooking_time.as_deref(),
        ));
    }
    let mut footer = format!("Page {} of {}", page.page, page.last_page);
    if let Some(total) = page.total {
        footer.push_str(&format!(" ({total} recipes)"));
    }
    lines.push(footer);
}

fn render_recipe(view: &AppViewModel, lines: &mut Vec<String>) {
    if view.recipe_loading {
        lines.push("Loading recipe...".to_string());
        return;
    }
    let Some(recipe) = &view.recipe else {
        return;
    };

    lines.push(recipe.title.clone());
    let facts: Vec<String> = [
        recipe.channel.clone(),
        recipe.cooking_time.as_ref().map(|t| format!("cook {t}")),
        recipe.serving_size.as_ref().map(|s| format!("serves {s}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !facts.is_empty() {
        lines.push(format!("  {}", facts.join(" | ")));
    }
    if let Some(summary) = &recipe.summary {
        lines.push(String::new());
        lines.push(summary.clone());
    }
    for (group, items) in &recipe.ingredient_groups {
        lines.push(String::new());
        lines.push(format!("{group}:"));
        lines.extend(items.iter().map(|item| format!("  - {item}")));
    }
    if !recipe.steps.is_empty() {
        lines.push(String::new());
        lines.push("Steps:".to_string());
        lines.extend(recipe.steps.iter().map(|step| format!("  {step}")));
    }
    if !recipe.tips.is_empty() {
        lines.push(String::new());
        lines.push("Tips:".to_string());
        lines.extend(recipe.tips.iter().map(|tip| format!("  {tip}")));
    }
}

fn render_history(view: &AppViewModel, lines: &mut Vec<String>) {
    if !view.history_loaded {
        lines.push("Loading history...".to_string());
        return;
    }
    if view.history.is_empty() {
        lines.push("No recipes viewed yet.".to_string());
        return;
    }
    lines.push("Recently viewed:".to_string());
    for row in &view.history {
        lines.push(recipe_row(
            &row.slug,
            &row.title,
            row.channel.as_deref(),
            row.cooking_time.as_deref(),
        ));
    }
}

fn render_library(view: &AppViewModel, lines: &mut Vec<String>) {
    if view.library_loading {
        lines.push("Loading library...".to_string());
        return;
    }
    if view.library.is_empty() {
        lines.push("Your library is empty.".to_string());
        return;
    }
    for row in &view.library {
        let mut line = format!("{}  {} [{}]", row.video_id, row.title, row.status);
        if let Some(action) = &row.action {
            line.push_str(&format!("  {}", action_line(action)));
        }
        lines.push(line);
    }
}

fn render_account(view: &AppViewModel, lines: &mut Vec<String>) {
    if view.session_loading {
        lines.push("Checking session...".to_string());
        return;
    }
    match &view.user_name {
        Some(name) => lines.push(format!("Signed in as {name}")),
        None => lines.push("Not signed in. login <email> <password>".to_string()),
    }
}

fn recipe_row(slug: &str, title: &str, channel: Option<&str>, cooking_time: Option<&str>) -> String {
    let mut line = format!("{slug}  {title}");
    if let Some(channel) = channel {
        line.push_str(&format!(" ({channel})"));
    }
    if let Some(time) = cooking_time {
        line.push_str(&format!(" | {time}"));
    }
    line
}

fn action_line(action: &ActionView) -> String {
    let mut line = if action.enabled {
        format!("> {}", action.label)
    } else {
        format!("x {}", action.label)
    };
    if let Some(hint) = &action.hint {
        line.push_str(&format!(" ({hint})"));
    }
    line
}

/// RFC 3339 timestamps render as a date; anything else is shown as sent.
fn format_published(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
