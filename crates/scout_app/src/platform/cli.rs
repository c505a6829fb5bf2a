//! Command-line flags and the interactive shell grammar.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "recipe_scout")]
#[command(about = "Turn cooking videos into recipes from the terminal")]
pub struct Args {
    /// Config file (RON). Defaults to ./recipe_scout.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Backend origin, e.g. http://localhost:8000.
    #[arg(long)]
    pub base_url: Option<String>,
    /// Where browsing history is stored.
    #[arg(long)]
    pub history: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,
    /// Log debug output.
    #[arg(long)]
    pub verbose: bool,
}

/// One line typed into the shell.
#[derive(Debug, Parser)]
#[command(
    name = "recipe_scout",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ShellCommand {
    /// Look up a video by URL.
    Preview { url: String },
    /// Generate a recipe for the previewed video.
    Generate,
    /// Browse recipes.
    Recipes {
        #[arg(default_value_t = 1)]
        page: u32,
    },
    /// Open a recipe.
    Recipe { slug: String },
    /// Show, remove from, or clear the browsing history.
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Show or manage your video library.
    Library {
        #[command(subcommand)]
        action: Option<LibraryAction>,
    },
    /// Back to the video preview.
    Home,
    /// Show your account.
    Account,
    Login {
        email: String,
        password: String,
        #[arg(long)]
        remember: bool,
    },
    Register {
        name: String,
        email: String,
        password: String,
        password_confirmation: String,
    },
    Logout,
    /// Email a password reset link.
    ForgotPassword { email: String },
    ResetPassword {
        token: String,
        email: String,
        password: String,
        password_confirmation: String,
    },
    /// Update your name and email.
    Profile { name: String, email: String },
    /// Change your password.
    Password {
        current_password: String,
        password: String,
        password_confirmation: String,
    },
    /// List commands.
    Help,
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum HistoryAction {
    Remove { slug: String },
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum LibraryAction {
    Generate { video_id: String },
    Delete { video_id: String },
}

/// Parses a shell line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, clap::Error> {
    let words = split_words(line);
    if words.is_empty() {
        return Ok(None);
    }
    ShellLine::try_parse_from(words).map(|parsed| Some(parsed.command))
}

/// Splits on whitespace; double quotes group words ("Ada Lovelace").
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut pending = false;
    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                pending = true;
            }
            c if c.is_whitespace() && !quoted => {
                if pending {
                    words.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }
    if pending {
        words.push(current);
    }
    words
}

/// Interprets the answer to a y/N confirmation prompt.
pub fn is_affirmative(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
