//! Wire-level projections of server state.
//!
//! These types mirror the JSON resources served by the recipe backend. They are
//! read-only from the client's point of view: every fetch replaces them
//! wholesale, and the only in-place mutation is the shallow [`VideoUpdate`]
//! patch applied when a generation job completes.
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Field name → messages, as returned with HTTP 422.
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

/// Server-side recipe generation status for a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

/// Which affordance the client should offer for a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    #[default]
    Generate,
    Processing,
    ViewRecipe,
    Retry,
    LimitExceeded,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelRef {
    pub id: String,
    #[serde(alias = "title")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoPreview {
    pub video_id: String,
    #[serde(default)]
    pub video_url: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Seconds.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub recipe_slug: Option<String>,
    #[serde(default)]
    pub recipe_generation_status: JobStatus,
    #[serde(default)]
    pub recipe_generation_status_message: Option<String>,
    #[serde(default)]
    pub channel: ChannelRef,
    #[serde(default)]
    pub action_type: ActionType,
}

impl VideoPreview {
    /// URL to submit for generation; falls back to the canonical watch URL.
    pub fn watch_url(&self) -> String {
        self.video_url
            .clone()
            .unwrap_or_else(|| format!("https://www.youtube.com/watch?v={}", self.video_id))
    }

    /// Shallow overwrite of the fields carried by a status update.
    pub fn apply(&mut self, update: &VideoUpdate) {
        if update.video_id != self.video_id {
            return;
        }
        self.action_type = update.action_type;
        self.recipe_generation_status = update.status;
        if update.recipe_slug.is_some() {
            self.recipe_slug = update.recipe_slug.clone();
        }
    }
}

/// Response of the job status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStatus {
    pub status: JobStatus,
    #[serde(default)]
    pub action_type: Option<ActionType>,
    #[serde(default)]
    pub recipe_slug: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Partial patch delivered by the poller once a job completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUpdate {
    pub video_id: String,
    pub action_type: ActionType,
    pub recipe_slug: Option<String>,
    pub status: JobStatus,
}

impl VideoUpdate {
    pub fn completed(video_id: impl Into<String>, recipe_slug: Option<String>) -> Self {
        Self {
            video_id: video_id.into(),
            action_type: ActionType::ViewRecipe,
            recipe_slug,
            status: JobStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dish {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

/// Recipe list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: u64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub cooking_time: Option<String>,
    #[serde(default)]
    pub dish: Dish,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub step_number: u32,
    pub description: String,
    #[serde(default)]
    pub start_time_in_seconds: Option<u32>,
    #[serde(default)]
    pub end_time_in_seconds: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub description: String,
    #[serde(default)]
    pub related_step_number: Option<u32>,
    #[serde(default)]
    pub start_time_in_seconds: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeVideo {
    pub video_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: u64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub cooking_time: Option<String>,
    #[serde(default)]
    pub dish: Dish,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub serving_size: Option<String>,
    #[serde(default)]
    pub video: Option<RecipeVideo>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub tips: Vec<Tip>,
}

/// One recently viewed recipe. Unique by `slug` within the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub cooking_time: Option<String>,
    #[serde(default)]
    pub dish: Dish,
}

impl From<&RecipeDetail> for HistoryEntry {
    fn from(recipe: &RecipeDetail) -> Self {
        let thumbnail_url = recipe
            .video
            .as_ref()
            .and_then(|video| video.thumbnail_url.clone())
            .or_else(|| recipe.thumbnail_url.clone());
        Self {
            id: recipe.id,
            slug: recipe.slug.clone(),
            title: recipe.title.clone(),
            channel_name: recipe.channel_name.clone(),
            thumbnail_url,
            cooking_time: recipe.cooking_time.clone(),
            dish: recipe.dish.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub from: Option<u64>,
    #[serde(default)]
    pub to: Option<u64>,
}

/// Paginated collection (`{data, meta}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub token: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordUpdate {
    pub current_password: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Stand-in printed for secrets so requests can be logged safely.
const REDACTED: &str = "***";

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("remember", &self.remember)
            .finish()
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("password_confirmation", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for PasswordResetRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordResetRequest")
            .field("token", &REDACTED)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("password_confirmation", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for PasswordUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordUpdate")
            .field("current_password", &REDACTED)
            .field("password", &REDACTED)
            .field("password_confirmation", &REDACTED)
            .finish()
    }
}
