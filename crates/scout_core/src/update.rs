use crate::state::{normalize_video_url, Confirmation, NoticeLevel, Screen};
use crate::{
    reconcile_polling, ActionType, AppState, Effect, ErrorKind, ErrorReport, HistoryEntry,
    JobStatus, Msg, PollingStatus, RequestKind, VideoPreview,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![Effect::LoadSession, Effect::LoadHistory],
        Msg::HomeShown => {
            state.screen = Screen::Home;
            state.mark_dirty();
            Vec::new()
        }
        Msg::AccountShown => {
            state.screen = Screen::Account;
            state.mark_dirty();
            Vec::new()
        }
        Msg::PreviewRequested(raw) => {
            let Some(url) = normalize_video_url(&raw) else {
                state.notify(NoticeLevel::Error, "Enter a valid video URL");
                return (state, Vec::new());
            };
            state.screen = Screen::Home;
            state.preview = None;
            state.preview_error = None;
            state.preview_loading = true;
            state.generating = false;
            state.polling = PollingStatus::Idle;
            state.mark_dirty();
            vec![Effect::StopPolling, Effect::FetchPreview { url }]
        }
        Msg::PreviewLoaded(video) => {
            state.preview_loading = false;
            adopt_preview(&mut state, video)
        }
        Msg::GenerateRequested => {
            let Some((action, url)) = state
                .preview
                .as_ref()
                .map(|preview| (preview.action_type, preview.watch_url()))
            else {
                state.notify(NoticeLevel::Error, "Preview a video first");
                return (state, Vec::new());
            };
            if state.generating || state.polling.is_polling() {
                return (state, Vec::new());
            }
            match action {
                ActionType::Generate | ActionType::Retry => {}
                ActionType::ViewRecipe | ActionType::Processing | ActionType::LimitExceeded => {
                    state.notify(NoticeLevel::Info, "Generation is not available for this video");
                    return (state, Vec::new());
                }
            }
            state.generating = true;
            state.mark_dirty();
            vec![Effect::CreateVideo { url }]
        }
        Msg::VideoCreated(video) => {
            state.generating = false;
            if video.action_type == ActionType::LimitExceeded {
                state.notify(
                    NoticeLevel::Error,
                    "A recipe cannot be generated from this video",
                );
            }
            adopt_preview(&mut state, video)
        }
        Msg::VideoUpdated(update) => {
            let mut matched = false;
            if let Some(preview) = state.preview.as_mut() {
                if preview.video_id == update.video_id {
                    preview.apply(&update);
                    matched = true;
                }
            }
            if matched {
                state.polling = PollingStatus::Completed;
            }
            for video in state
                .library
                .iter_mut()
                .filter(|video| video.video_id == update.video_id)
            {
                video.apply(&update);
                matched = true;
            }
            if !matched {
                return (state, Vec::new());
            }
            match update.recipe_slug.as_deref() {
                Some(slug) => state.notify(
                    NoticeLevel::Success,
                    format!("Recipe ready: open it with `recipe {slug}`"),
                ),
                None => state.notify(NoticeLevel::Success, "Recipe ready"),
            }
            Vec::new()
        }
        Msg::PollingFailed { video_id } => {
            if let Some(preview) = state.preview.as_mut() {
                if preview.video_id == video_id {
                    preview.recipe_generation_status = JobStatus::Failed;
                    preview.action_type = ActionType::Retry;
                    state.polling = PollingStatus::Failed;
                }
            }
            state.notify(NoticeLevel::Error, "Recipe generation failed");
            Vec::new()
        }
        Msg::RecipesRequested { page } => {
            let page = page.max(1);
            state.screen = Screen::Recipes;
            state.requested_page = page;
            state.recipes_loading = true;
            state.mark_dirty();
            vec![Effect::FetchRecipes { page }]
        }
        Msg::RecipesLoaded(page) => {
            state.recipes_loading = false;
            state.recipes = Some(page);
            state.mark_dirty();
            Vec::new()
        }
        Msg::RecipeOpened { slug } => {
            let slug = slug.trim().to_string();
            if slug.is_empty() {
                return (state, Vec::new());
            }
            state.screen = Screen::Recipe;
            state.recipe = None;
            state.recipe_loading = true;
            state.mark_dirty();
            vec![Effect::FetchRecipe { slug }]
        }
        Msg::RecipeLoaded(recipe) => {
            state.recipe_loading = false;
            let entry = HistoryEntry::from(&recipe);
            state.recipe = Some(recipe);
            state.mark_dirty();
            vec![Effect::RecordHistory(entry)]
        }
        Msg::HistoryShown => {
            state.screen = Screen::History;
            state.mark_dirty();
            Vec::new()
        }
        Msg::HistoryChanged(entries) => {
            state.history = entries;
            state.history_loaded = true;
            state.mark_dirty();
            Vec::new()
        }
        Msg::HistoryCleared { cleared, entries } => {
            state.history = entries;
            state.history_loaded = true;
            state.mark_dirty();
            if cleared {
                state.notify(NoticeLevel::Success, "Cleared all browsing history");
            } else {
                state.notify(NoticeLevel::Error, "Could not clear browsing history");
            }
            Vec::new()
        }
        Msg::HistoryRemoveRequested { slug } => {
            if !state.history.iter().any(|entry| entry.slug == slug) {
                state.notify(NoticeLevel::Info, format!("`{slug}` is not in your history"));
                return (state, Vec::new());
            }
            state.notify(NoticeLevel::Success, "Removed from history");
            vec![Effect::RemoveHistory { slug }]
        }
        Msg::HistoryClearRequested => {
            if state.history.is_empty() {
                state.notify(NoticeLevel::Info, "History is already empty");
            } else {
                state.pending_confirmation = Some(Confirmation::ClearHistory);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LibraryShown => {
            if !state.session.is_authenticated() {
                state.notify(NoticeLevel::Error, "Sign in to view your library");
                return (state, Vec::new());
            }
            state.screen = Screen::Library;
            state.library_loading = true;
            state.mark_dirty();
            vec![Effect::FetchLibrary]
        }
        Msg::LibraryLoaded(videos) => {
            state.library_loading = false;
            state.library = videos;
            state.mark_dirty();
            Vec::new()
        }
        Msg::LibraryGenerateRequested { video_id } => {
            if state.library_generating.contains(&video_id) {
                return (state, Vec::new());
            }
            let Some(url) = state
                .library
                .iter()
                .find(|video| video.video_id == video_id)
                .map(VideoPreview::watch_url)
            else {
                state.notify(NoticeLevel::Error, "No such video in your library");
                return (state, Vec::new());
            };
            state.library_generating.insert(video_id.clone());
            state.mark_dirty();
            vec![Effect::GenerateLibraryVideo { video_id, url }]
        }
        Msg::LibraryGenerateFinished { video_id } => {
            state.library_generating.remove(&video_id);
            state.mark_dirty();
            vec![Effect::FetchLibrary]
        }
        Msg::LibraryDeleteRequested { video_id } => {
            if state.library.iter().any(|video| video.video_id == video_id) {
                state.pending_confirmation = Some(Confirmation::DeleteLibraryVideo { video_id });
                state.mark_dirty();
            } else {
                state.notify(NoticeLevel::Error, "No such video in your library");
            }
            Vec::new()
        }
        Msg::LibraryDeleted { video_id } => {
            state.library.retain(|video| video.video_id != video_id);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ConfirmationAnswered(confirmed) => {
            let Some(pending) = state.pending_confirmation.take() else {
                return (state, Vec::new());
            };
            state.mark_dirty();
            if !confirmed {
                return (state, Vec::new());
            }
            match pending {
                Confirmation::ClearHistory => vec![Effect::ClearHistory],
                Confirmation::DeleteLibraryVideo { video_id } => {
                    // Optimistic; a failed delete re-fetches the library.
                    state.library.retain(|video| video.video_id != video_id);
                    state.notify(NoticeLevel::Success, "Deleted from your library");
                    vec![Effect::DeleteLibraryVideo { video_id }]
                }
            }
        }
        Msg::LoginSubmitted(request) => {
            state.form_errors.clear();
            state.mark_dirty();
            vec![Effect::Login(request)]
        }
        Msg::RegisterSubmitted(request) => {
            state.form_errors.clear();
            state.mark_dirty();
            vec![Effect::Register(request)]
        }
        Msg::LogoutRequested => {
            if !state.session.is_authenticated() {
                return (state, Vec::new());
            }
            vec![Effect::Logout]
        }
        Msg::ForgotPasswordSubmitted { email } => {
            state.form_errors.clear();
            state.mark_dirty();
            vec![Effect::ForgotPassword { email }]
        }
        Msg::PasswordResetSubmitted(request) => {
            state.form_errors.clear();
            state.mark_dirty();
            vec![Effect::ResetPassword(request)]
        }
        Msg::ProfileSubmitted(request) => {
            if !state.session.is_authenticated() {
                state.notify(NoticeLevel::Error, "Sign in to update your profile");
                return (state, Vec::new());
            }
            state.form_errors.clear();
            state.mark_dirty();
            vec![Effect::UpdateProfile(request)]
        }
        Msg::PasswordSubmitted(request) => {
            if !state.session.is_authenticated() {
                state.notify(NoticeLevel::Error, "Sign in to change your password");
                return (state, Vec::new());
            }
            state.form_errors.clear();
            state.mark_dirty();
            vec![Effect::UpdatePassword(request)]
        }
        Msg::SessionLoaded(user) => {
            state.session.load(user);
            state.mark_dirty();
            Vec::new()
        }
        Msg::AuthSucceeded { request, user } => {
            let text = match request {
                RequestKind::Register => format!("Welcome, {}", user.name),
                RequestKind::Profile => "Profile updated".to_string(),
                _ => format!("Signed in as {}", user.name),
            };
            if request != RequestKind::Profile {
                state.screen = Screen::Home;
            }
            state.session.load(Some(user));
            state.form_errors.clear();
            state.notify(NoticeLevel::Success, text);
            Vec::new()
        }
        Msg::LoggedOut => {
            state.session.teardown();
            state.library.clear();
            state.library_generating.clear();
            if matches!(state.screen, Screen::Library | Screen::Account) {
                state.screen = Screen::Home;
            }
            state.notify(NoticeLevel::Success, "Signed out");
            Vec::new()
        }
        Msg::PasswordUpdated => {
            state.form_errors.clear();
            state.notify(NoticeLevel::Success, "Password changed");
            Vec::new()
        }
        Msg::PasswordResetLinkSent { message } => {
            state.form_errors.clear();
            let text = message.unwrap_or_else(|| "Password reset link sent".to_string());
            state.notify(NoticeLevel::Success, text);
            Vec::new()
        }
        Msg::PasswordReset => {
            state.form_errors.clear();
            state.notify(
                NoticeLevel::Success,
                "Password reset. Sign in with your new password",
            );
            Vec::new()
        }
        Msg::RequestFailed {
            request,
            video_id,
            error,
        } => apply_failure(&mut state, request, video_id, error),
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Replaces the previewed video and reconciles polling with its status.
fn adopt_preview(state: &mut AppState, video: VideoPreview) -> Vec<Effect> {
    let same_video = state
        .preview
        .as_ref()
        .is_some_and(|current| current.video_id == video.video_id);
    let previous = if same_video {
        state.polling
    } else {
        PollingStatus::Idle
    };
    state.polling = reconcile_polling(previous, video.recipe_generation_status);
    let effect = if state.polling.is_polling() {
        Effect::StartPolling {
            video_id: video.video_id.clone(),
        }
    } else {
        Effect::StopPolling
    };
    state.preview = Some(video);
    state.mark_dirty();
    vec![effect]
}

fn apply_failure(
    state: &mut AppState,
    request: RequestKind,
    video_id: Option<String>,
    error: ErrorReport,
) -> Vec<Effect> {
    let mut effects = Vec::new();
    match request {
        RequestKind::Session => {
            state.session.load(None);
            state.mark_dirty();
            return effects;
        }
        RequestKind::Preview => {
            state.preview_loading = false;
            state.preview_error = Some(user_text(request, &error));
        }
        RequestKind::Generate => state.generating = false,
        RequestKind::Recipes => state.recipes_loading = false,
        RequestKind::Recipe => state.recipe_loading = false,
        RequestKind::Library => state.library_loading = false,
        RequestKind::LibraryGenerate => {
            if let Some(video_id) = video_id.as_deref() {
                state.library_generating.remove(video_id);
            }
        }
        RequestKind::LibraryDelete => effects.push(Effect::FetchLibrary),
        RequestKind::Login
        | RequestKind::Register
        | RequestKind::Logout
        | RequestKind::ForgotPassword
        | RequestKind::ResetPassword
        | RequestKind::Profile
        | RequestKind::Password => {}
    }
    if request.is_form() && error.kind == ErrorKind::Validation {
        state.form_errors = error.fields.clone();
    }
    state.notify(NoticeLevel::Error, user_text(request, &error));
    effects
}

/// Server-supplied message when there is one, otherwise a per-request fallback.
fn user_text(request: RequestKind, error: &ErrorReport) -> String {
    if error.message.is_empty() {
        request.failure_text().to_string()
    } else {
        error.message.clone()
    }
}
