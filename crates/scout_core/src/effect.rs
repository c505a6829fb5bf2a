use crate::{
    HistoryEntry, LoginRequest, PasswordResetRequest, PasswordUpdate, ProfileUpdate,
    RegisterRequest,
};

/// IO requested by [`crate::update`]; executed by the app's effect runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadSession,
    LoadHistory,
    FetchPreview { url: String },
    CreateVideo { url: String },
    /// Track a processing job until it reaches a terminal state.
    StartPolling { video_id: String },
    StopPolling,
    FetchRecipes { page: u32 },
    FetchRecipe { slug: String },
    RecordHistory(HistoryEntry),
    RemoveHistory { slug: String },
    ClearHistory,
    FetchLibrary,
    GenerateLibraryVideo { video_id: String, url: String },
    DeleteLibraryVideo { video_id: String },
    Login(LoginRequest),
    Register(RegisterRequest),
    Logout,
    ForgotPassword { email: String },
    ResetPassword(PasswordResetRequest),
    UpdateProfile(ProfileUpdate),
    UpdatePassword(PasswordUpdate),
}
