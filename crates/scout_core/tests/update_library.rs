use scout_core::{
    update, ActionType, AppState, Confirmation, Effect, ErrorKind, ErrorReport, JobStatus, Msg,
    RequestKind, Screen, User, VideoPreview, VideoUpdate,
};

fn library_video(id: &str) -> VideoPreview {
    VideoPreview {
        video_id: id.to_string(),
        video_url: None,
        title: format!("Video {id}"),
        description: None,
        thumbnail_url: None,
        duration: None,
        published_at: None,
        recipe_slug: None,
        recipe_generation_status: JobStatus::Pending,
        recipe_generation_status_message: None,
        channel: Default::default(),
        action_type: ActionType::Generate,
    }
}

fn signed_in_with_library(ids: &[&str]) -> AppState {
    let user = User {
        id: 1,
        name: "Aiko".into(),
        email: "aiko@example.com".into(),
    };
    let (state, _) = update(AppState::new(), Msg::SessionLoaded(Some(user)));
    let (state, effects) = update(state, Msg::LibraryShown);
    assert_eq!(effects, vec![Effect::FetchLibrary]);
    let videos = ids.iter().map(|id| library_video(id)).collect();
    let (state, _) = update(state, Msg::LibraryLoaded(videos));
    state
}

fn library_ids(state: &AppState) -> Vec<&str> {
    state.library().iter().map(|v| v.video_id.as_str()).collect()
}

#[test]
fn library_requires_sign_in() {
    let (mut state, effects) = update(AppState::new(), Msg::LibraryShown);
    assert!(effects.is_empty());
    assert_eq!(state.screen(), Screen::Home);
    assert_eq!(state.take_notices().len(), 1);
}

#[test]
fn delete_waits_for_confirmation() {
    let state = signed_in_with_library(&["a", "b"]);
    let (state, effects) = update(
        state,
        Msg::LibraryDeleteRequested {
            video_id: "a".into(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.pending_confirmation(),
        Some(&Confirmation::DeleteLibraryVideo {
            video_id: "a".into()
        })
    );
    assert!(state.view().confirmation_prompt.is_some());

    let (state, effects) = update(state, Msg::ConfirmationAnswered(false));
    assert!(effects.is_empty());
    assert!(state.pending_confirmation().is_none());
    assert_eq!(library_ids(&state), vec!["a", "b"]);
}

#[test]
fn confirmed_delete_is_optimistic_and_rolls_back_on_failure() {
    let state = signed_in_with_library(&["a", "b"]);
    let (state, _) = update(
        state,
        Msg::LibraryDeleteRequested {
            video_id: "a".into(),
        },
    );
    let (state, effects) = update(state, Msg::ConfirmationAnswered(true));

    assert_eq!(
        effects,
        vec![Effect::DeleteLibraryVideo {
            video_id: "a".into()
        }]
    );
    assert_eq!(library_ids(&state), vec!["b"]);

    let (state, effects) = update(
        state,
        Msg::RequestFailed {
            request: RequestKind::LibraryDelete,
            video_id: Some("a".into()),
            error: ErrorReport::new(ErrorKind::Server, ""),
        },
    );
    assert_eq!(effects, vec![Effect::FetchLibrary]);

    let (state, _) = update(
        state,
        Msg::LibraryLoaded(vec![library_video("a"), library_video("b")]),
    );
    assert_eq!(library_ids(&state), vec!["a", "b"]);
}

#[test]
fn generate_guards_in_flight_ids() {
    let state = signed_in_with_library(&["a"]);
    let (state, effects) = update(
        state,
        Msg::LibraryGenerateRequested {
            video_id: "a".into(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::GenerateLibraryVideo {
            video_id: "a".into(),
            url: "https://www.youtube.com/watch?v=a".into(),
        }]
    );

    let (state, effects) = update(
        state,
        Msg::LibraryGenerateRequested {
            video_id: "a".into(),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.library[0].action.as_ref().unwrap().enabled);

    let (state, effects) = update(
        state,
        Msg::LibraryGenerateFinished {
            video_id: "a".into(),
        },
    );
    assert_eq!(effects, vec![Effect::FetchLibrary]);
    assert!(state.view().library[0].action.as_ref().unwrap().enabled);
}

#[test]
fn failed_generate_releases_the_guard() {
    let state = signed_in_with_library(&["a"]);
    let (state, _) = update(
        state,
        Msg::LibraryGenerateRequested {
            video_id: "a".into(),
        },
    );
    let (state, effects) = update(
        state,
        Msg::RequestFailed {
            request: RequestKind::LibraryGenerate,
            video_id: Some("a".into()),
            error: ErrorReport::new(ErrorKind::Server, "limit reached"),
        },
    );
    assert!(effects.is_empty());

    let (_, effects) = update(
        state,
        Msg::LibraryGenerateRequested {
            video_id: "a".into(),
        },
    );
    assert_eq!(effects.len(), 1);
}

#[test]
fn completion_updates_matching_library_rows() {
    let state = signed_in_with_library(&["a", "b"]);
    let (state, _) = update(
        state,
        Msg::VideoUpdated(VideoUpdate::completed("b", Some("curry".into()))),
    );
    assert_eq!(state.library()[0].action_type, ActionType::Generate);
    assert_eq!(state.library()[1].action_type, ActionType::ViewRecipe);
    assert_eq!(state.library()[1].recipe_slug.as_deref(), Some("curry"));
}
