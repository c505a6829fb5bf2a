use std::collections::BTreeSet;

use url::Url;

use crate::view_model::AppViewModel;
use crate::{
    HistoryEntry, Page, PollingStatus, RecipeDetail, RecipeSummary, User, ValidationErrors,
    VideoPreview,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Recipes,
    Recipe,
    History,
    Library,
    Account,
}

/// Authenticated user for the lifetime of one run.
///
/// Constructed once per run inside [`AppState`], loaded by the `LoadSession`
/// effect and torn down on logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
    loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn load(&mut self, user: Option<User>) {
        self.user = user;
        self.loading = false;
    }

    pub(crate) fn teardown(&mut self) {
        self.user = None;
        self.loading = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Transient message for the user (a toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// Destructive action waiting for a yes/no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    ClearHistory,
    DeleteLibraryVideo { video_id: String },
}

impl Confirmation {
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirmation::ClearHistory => "Delete your entire browsing history?",
            Confirmation::DeleteLibraryVideo { .. } => "Delete this video from your library?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) screen: Screen,
    pub(crate) session: Session,
    pub(crate) preview: Option<VideoPreview>,
    pub(crate) preview_loading: bool,
    pub(crate) preview_error: Option<String>,
    pub(crate) polling: PollingStatus,
    pub(crate) generating: bool,
    pub(crate) recipes: Option<Page<RecipeSummary>>,
    pub(crate) recipes_loading: bool,
    pub(crate) requested_page: u32,
    pub(crate) recipe: Option<RecipeDetail>,
    pub(crate) recipe_loading: bool,
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) history_loaded: bool,
    pub(crate) library: Vec<VideoPreview>,
    pub(crate) library_loading: bool,
    pub(crate) library_generating: BTreeSet<String>,
    pub(crate) pending_confirmation: Option<Confirmation>,
    pub(crate) form_errors: ValidationErrors,
    pub(crate) notices: Vec<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(self, self.dirty)
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn preview(&self) -> Option<&VideoPreview> {
        self.preview.as_ref()
    }

    pub fn polling(&self) -> PollingStatus {
        self.polling
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn library(&self) -> &[VideoPreview] {
        &self.library
    }

    pub fn pending_confirmation(&self) -> Option<&Confirmation> {
        self.pending_confirmation.as_ref()
    }

    pub fn form_errors(&self) -> &ValidationErrors {
        &self.form_errors
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drains queued notices; the renderer shows each one once.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push(Notice {
            level,
            text: text.into(),
        });
        self.dirty = true;
    }
}

/// Validates a user-typed video URL; only absolute http(s) URLs are accepted.
pub fn normalize_video_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let url = Url::parse(trimmed).ok()?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Some(url.to_string()),
        _ => None,
    }
}
