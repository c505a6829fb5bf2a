use crate::{
    ErrorReport, HistoryEntry, LoginRequest, Page, PasswordResetRequest, PasswordUpdate,
    ProfileUpdate, RecipeDetail, RecipeSummary, RegisterRequest, RequestKind, User, VideoPreview,
    VideoUpdate,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application start: load the session and the persisted history.
    Started,

    /// User submitted a video URL for preview.
    PreviewRequested(String),
    /// User asked to generate a recipe for the previewed video.
    GenerateRequested,
    /// User opened a page of the recipe list.
    RecipesRequested { page: u32 },
    /// User opened a recipe detail.
    RecipeOpened { slug: String },
    /// User switched to the browsing history.
    HistoryShown,
    HistoryRemoveRequested { slug: String },
    /// User asked to clear the history; needs confirmation.
    HistoryClearRequested,
    /// User switched to the video library.
    LibraryShown,
    LibraryGenerateRequested { video_id: String },
    /// User asked to delete a library video; needs confirmation.
    LibraryDeleteRequested { video_id: String },
    /// Answer to the pending confirmation prompt.
    ConfirmationAnswered(bool),
    LoginSubmitted(LoginRequest),
    RegisterSubmitted(RegisterRequest),
    LogoutRequested,
    ForgotPasswordSubmitted { email: String },
    PasswordResetSubmitted(PasswordResetRequest),
    ProfileSubmitted(ProfileUpdate),
    PasswordSubmitted(PasswordUpdate),
    /// User switched to the home screen.
    HomeShown,
    /// User opened the account screen.
    AccountShown,

    /// Current user resolved at startup; `None` when signed out.
    SessionLoaded(Option<User>),
    PreviewLoaded(VideoPreview),
    VideoCreated(VideoPreview),
    /// Poller observed a completed job.
    VideoUpdated(VideoUpdate),
    /// Poller observed a failed job.
    PollingFailed { video_id: String },
    RecipesLoaded(Page<RecipeSummary>),
    RecipeLoaded(RecipeDetail),
    /// History contents after a load or mutation.
    HistoryChanged(Vec<HistoryEntry>),
    /// Outcome of a confirmed clear; `entries` is what is left afterwards.
    HistoryCleared {
        cleared: bool,
        entries: Vec<HistoryEntry>,
    },
    LibraryLoaded(Vec<VideoPreview>),
    LibraryGenerateFinished { video_id: String },
    LibraryDeleted { video_id: String },
    /// Login, registration or profile update returned the fresh user.
    AuthSucceeded { request: RequestKind, user: User },
    LoggedOut,
    PasswordUpdated,
    PasswordResetLinkSent { message: Option<String> },
    PasswordReset,
    /// Any request failed.
    RequestFailed {
        request: RequestKind,
        /// Video the request was about, for per-video bookkeeping.
        video_id: Option<String>,
        error: ErrorReport,
    },

    /// Render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
