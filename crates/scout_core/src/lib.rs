//! Recipe Scout core: domain model, browsing history and the pure state machine.
mod effect;
mod history;
mod model;
mod msg;
mod polling;
mod report;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use history::{History, HISTORY_CAPACITY};
pub use model::{
    ActionType, ChannelRef, Dish, HistoryEntry, Ingredient, JobStatus, LoginRequest, Page,
    PageMeta, PasswordResetRequest, PasswordUpdate, ProfileUpdate, RecipeDetail, RecipeSummary,
    RecipeVideo, RegisterRequest, Step, Tip, User, ValidationErrors, VideoPreview, VideoStatus,
    VideoUpdate,
};
pub use msg::Msg;
pub use polling::{reconcile_polling, PollingStatus};
pub use report::{ErrorKind, ErrorReport, RequestKind};
pub use state::{
    normalize_video_url, AppState, Confirmation, Notice, NoticeLevel, Screen, Session,
};
pub use update::update;
pub use view_model::{
    action_view, format_timestamp, group_ingredients, ActionView, AppViewModel, HistoryRowView,
    LibraryRowView, PreviewView, RecipePageView, RecipeRowView, RecipeView,
    DEFAULT_INGREDIENT_GROUP,
};
