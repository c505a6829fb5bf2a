use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use scout_core::{Effect, Msg, RequestKind};
use scout_engine::{
    ApiError, EngineCommand, EngineEvent, EngineHandle, HistoryCache, HistoryStore, JsonFileStore,
};
use scout_logging::{scout_debug, scout_info, scout_warn};

use super::app::AppEvent;
use super::config::AppConfig;

/// Executes effects: history effects synchronously against the local store,
/// everything else on the engine thread.
pub struct EffectRunner {
    engine: EngineHandle,
    history: HistoryCache<JsonFileStore>,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, app_tx: mpsc::Sender<AppEvent>) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();
        let engine = EngineHandle::new(config.api_settings(), config.poll_settings(), event_tx)
            .context("failed to start the engine")?;
        spawn_event_loop(event_rx, app_tx);

        let history = HistoryCache::open(JsonFileStore::new(&config.history_path));
        Ok(Self { engine, history })
    }

    /// Runs `effects`; returns messages produced synchronously.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            scout_debug!("Effect {:?}", effect);
            if let Some(msg) = apply_history_effect(&mut self.history, &effect) {
                follow_ups.push(msg);
            } else if let Some(command) = engine_command(effect) {
                self.engine.submit(command);
            }
        }
        follow_ups
    }
}

fn spawn_event_loop(event_rx: mpsc::Receiver<EngineEvent>, app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            if app_tx.send(AppEvent::Msg(engine_event_to_msg(event))).is_err() {
                break;
            }
        }
        scout_info!("Engine event loop stopped");
    });
}

/// Applies a history effect and reports the resulting list, plus whether a
/// clear reached storage. Returns `None` for effects that are not about history.
pub fn apply_history_effect<S: HistoryStore>(
    history: &mut HistoryCache<S>,
    effect: &Effect,
) -> Option<Msg> {
    match effect {
        Effect::LoadHistory => {}
        Effect::RecordHistory(entry) => history.add(entry.clone()),
        Effect::RemoveHistory { slug } => {
            history.remove(slug);
        }
        Effect::ClearHistory => {
            let cleared = history.clear();
            return Some(Msg::HistoryCleared {
                cleared,
                entries: history.entries().to_vec(),
            });
        }
        _ => return None,
    }
    Some(Msg::HistoryChanged(history.entries().to_vec()))
}

/// Maps an effect to an engine command; history effects map to `None`.
pub fn engine_command(effect: Effect) -> Option<EngineCommand> {
    let command = match effect {
        Effect::LoadSession => EngineCommand::LoadSession,
        Effect::FetchPreview { url } => EngineCommand::Preview { url },
        Effect::CreateVideo { url } => EngineCommand::Create { url },
        Effect::StartPolling { video_id } => EngineCommand::StartPolling { video_id },
        Effect::StopPolling => EngineCommand::StopPolling,
        Effect::FetchRecipes { page } => EngineCommand::Recipes { page },
        Effect::FetchRecipe { slug } => EngineCommand::Recipe { slug },
        Effect::FetchLibrary => EngineCommand::Library,
        Effect::GenerateLibraryVideo { video_id, url } => {
            EngineCommand::GenerateLibraryVideo { video_id, url }
        }
        Effect::DeleteLibraryVideo { video_id } => EngineCommand::DeleteLibraryVideo { video_id },
        Effect::Login(request) => EngineCommand::Login(request),
        Effect::Register(request) => EngineCommand::Register(request),
        Effect::Logout => EngineCommand::Logout,
        Effect::ForgotPassword { email } => EngineCommand::ForgotPassword { email },
        Effect::ResetPassword(request) => EngineCommand::ResetPassword(request),
        Effect::UpdateProfile(update) => EngineCommand::UpdateProfile(update),
        Effect::UpdatePassword(update) => EngineCommand::UpdatePassword(update),
        Effect::LoadHistory
        | Effect::RecordHistory(_)
        | Effect::RemoveHistory { .. }
        | Effect::ClearHistory => return None,
    };
    Some(command)
}

pub fn engine_event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Session(result) => match result {
            Ok(user) => Msg::SessionLoaded(Some(user)),
            // Signed out is the normal state, not a failure worth a notice.
            Err(ApiError::Unauthenticated { .. }) => Msg::SessionLoaded(None),
            Err(err) => failed(RequestKind::Session, None, err),
        },
        EngineEvent::Preview(result) => match result {
            Ok(video) => Msg::PreviewLoaded(video),
            Err(err) => failed(RequestKind::Preview, None, err),
        },
        EngineEvent::Created(result) => match result {
            Ok(video) => Msg::VideoCreated(video),
            Err(err) => failed(RequestKind::Generate, None, err),
        },
        EngineEvent::PollCompleted(update) => Msg::VideoUpdated(update),
        EngineEvent::PollFailed { video_id } => Msg::PollingFailed { video_id },
        EngineEvent::Recipes(result) => match result {
            Ok(page) => Msg::RecipesLoaded(page),
            Err(err) => failed(RequestKind::Recipes, None, err),
        },
        EngineEvent::Recipe(result) => match result {
            Ok(recipe) => Msg::RecipeLoaded(recipe),
            Err(err) => failed(RequestKind::Recipe, None, err),
        },
        EngineEvent::Library(result) => match result {
            Ok(videos) => Msg::LibraryLoaded(videos),
            Err(err) => failed(RequestKind::Library, None, err),
        },
        EngineEvent::LibraryGenerated { video_id, result } => match result {
            Ok(_) => Msg::LibraryGenerateFinished { video_id },
            Err(err) => failed(RequestKind::LibraryGenerate, Some(video_id), err),
        },
        EngineEvent::LibraryDeleted { video_id, result } => match result {
            Ok(()) => Msg::LibraryDeleted { video_id },
            Err(err) => failed(RequestKind::LibraryDelete, Some(video_id), err),
        },
        EngineEvent::LoggedIn(result) => authenticated(RequestKind::Login, result),
        EngineEvent::Registered(result) => authenticated(RequestKind::Register, result),
        EngineEvent::ProfileUpdated(result) => authenticated(RequestKind::Profile, result),
        EngineEvent::LoggedOut(result) => match result {
            Ok(()) => Msg::LoggedOut,
            Err(err) => failed(RequestKind::Logout, None, err),
        },
        EngineEvent::ResetLinkSent(result) => match result {
            Ok(message) => Msg::PasswordResetLinkSent { message },
            Err(err) => failed(RequestKind::ForgotPassword, None, err),
        },
        EngineEvent::PasswordReset(result) => match result {
            Ok(()) => Msg::PasswordReset,
            Err(err) => failed(RequestKind::ResetPassword, None, err),
        },
        EngineEvent::PasswordUpdated(result) => match result {
            Ok(()) => Msg::PasswordUpdated,
            Err(err) => failed(RequestKind::Password, None, err),
        },
    }
}

fn authenticated(request: RequestKind, result: Result<scout_core::User, ApiError>) -> Msg {
    match result {
        Ok(user) => Msg::AuthSucceeded { request, user },
        Err(err) => failed(request, None, err),
    }
}

fn failed(request: RequestKind, video_id: Option<String>, err: ApiError) -> Msg {
    scout_warn!("{:?} request failed: {}", request, err);
    Msg::RequestFailed {
        request,
        video_id,
        error: err.report(),
    }
}
