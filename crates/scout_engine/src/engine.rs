use std::sync::{mpsc, Arc};
use std::thread;

use scout_core::{
    LoginRequest, Page, PasswordResetRequest, PasswordUpdate, ProfileUpdate, RecipeDetail,
    RecipeSummary, RegisterRequest, User, VideoPreview, VideoUpdate,
};
use scout_logging::{scout_debug, scout_info};
use thiserror::Error;

use crate::poller::StatusPoller;
use crate::{ApiClient, ApiError, ApiSettings, PollSettings};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to start engine thread: {0}")]
    Thread(std::io::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Work the engine performs on behalf of the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    LoadSession,
    Preview { url: String },
    Create { url: String },
    StartPolling { video_id: String },
    StopPolling,
    Recipes { page: u32 },
    Recipe { slug: String },
    Library,
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

/// Results reported back to the UI, one per command (plus poll outcomes).
#[derive(Debug)]
pub enum EngineEvent {
    Session(Result<User, ApiError>),
    Preview(Result<VideoPreview, ApiError>),
    Created(Result<VideoPreview, ApiError>),
    PollCompleted(VideoUpdate),
    PollFailed { video_id: String },
    Recipes(Result<Page<RecipeSummary>, ApiError>),
    Recipe(Result<RecipeDetail, ApiError>),
    Library(Result<Vec<VideoPreview>, ApiError>),
    LibraryGenerated {
        video_id: String,
        result: Result<VideoPreview, ApiError>,
    },
    LibraryDeleted {
        video_id: String,
        result: Result<(), ApiError>,
    },
    LoggedIn(Result<User, ApiError>),
    Registered(Result<User, ApiError>),
    LoggedOut(Result<(), ApiError>),
    ResetLinkSent(Result<Option<String>, ApiError>),
    PasswordReset(Result<(), ApiError>),
    ProfileUpdated(Result<User, ApiError>),
    PasswordUpdated(Result<(), ApiError>),
}

/// Owns the engine thread: a tokio runtime executing commands concurrently,
/// plus the status poller. Dropping the handle shuts both down.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        api: ApiSettings,
        poll: PollSettings,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Result<Self, EngineError> {
        let client = Arc::new(ApiClient::new(&api)?);
        let runtime = tokio::runtime::Runtime::new()?;
        let poller = StatusPoller::new(client.clone(), &poll, runtime.handle().clone());

        let completed_tx = event_tx.clone();
        poller.set_on_complete(move |update| {
            let _ = completed_tx.send(EngineEvent::PollCompleted(update));
        });
        let failed_tx = event_tx.clone();
        poller.set_on_failed(move |video_id| {
            let _ = failed_tx.send(EngineEvent::PollFailed { video_id });
        });

        let (cmd_tx, cmd_rx) = mpsc::channel();
        thread::Builder::new()
            .name("scout-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::StartPolling { video_id } => {
                            poller.start(&video_id);
                        }
                        EngineCommand::StopPolling => poller.stop(),
                        command => {
                            let client = client.clone();
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                if let Some(event) = handle_command(&client, command).await {
                                    let _ = event_tx.send(event);
                                }
                            });
                        }
                    }
                }
                // Poller goes first so its task is aborted before the runtime shuts down.
                drop(poller);
                scout_info!("Engine thread stopped");
            })
            .map_err(EngineError::Thread)?;

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, command: EngineCommand) {
        scout_debug!("Engine command {:?}", command);
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(client: &ApiClient, command: EngineCommand) -> Option<EngineEvent> {
    let event = match command {
        EngineCommand::LoadSession => EngineEvent::Session(client.current_user().await),
        EngineCommand::Preview { url } => EngineEvent::Preview(client.preview_video(&url).await),
        EngineCommand::Create { url } => EngineEvent::Created(client.create_video(&url).await),
        EngineCommand::Recipes { page } => EngineEvent::Recipes(client.recipes(page).await),
        EngineCommand::Recipe { slug } => EngineEvent::Recipe(client.recipe(&slug).await),
        EngineCommand::Library => EngineEvent::Library(client.library().await),
        EngineCommand::GenerateLibraryVideo { video_id, url } => EngineEvent::LibraryGenerated {
            video_id,
            result: client.create_video(&url).await,
        },
        EngineCommand::DeleteLibraryVideo { video_id } => {
            let result = client.delete_library_video(&video_id).await;
            EngineEvent::LibraryDeleted { video_id, result }
        }
        EngineCommand::Login(request) => EngineEvent::LoggedIn(client.login(&request).await),
        EngineCommand::Register(request) => {
            EngineEvent::Registered(client.register(&request).await)
        }
        EngineCommand::Logout => EngineEvent::LoggedOut(client.logout().await),
        EngineCommand::ForgotPassword { email } => {
            EngineEvent::ResetLinkSent(client.forgot_password(&email).await)
        }
        EngineCommand::ResetPassword(request) => {
            EngineEvent::PasswordReset(client.reset_password(&request).await)
        }
        EngineCommand::UpdateProfile(update) => {
            EngineEvent::ProfileUpdated(client.update_profile(&update).await)
        }
        EngineCommand::UpdatePassword(update) => {
            EngineEvent::PasswordUpdated(client.update_password(&update).await)
        }
        // Poll commands are handled on the engine thread itself.
        EngineCommand::StartPolling { .. } | EngineCommand::StopPolling => return None,
    };
    Some(event)
}
