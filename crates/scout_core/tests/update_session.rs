use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use scout_core::{
    update, AppState, Effect, ErrorKind, ErrorReport, LoginRequest, Msg, PasswordResetRequest,
    PasswordUpdate, ProfileUpdate, RegisterRequest, RequestKind, Screen, User,
};

fn user() -> User {
    User {
        id: 7,
        name: "Ren".into(),
        email: "ren@example.com".into(),
    }
}

fn login_request() -> LoginRequest {
    LoginRequest {
        email: "ren@example.com".into(),
        password: "secret".into(),
        remember: true,
    }
}

#[test]
fn session_starts_loading_and_resolves() {
    let state = AppState::new();
    assert!(state.session().is_loading());

    let (state, _) = update(state, Msg::SessionLoaded(None));
    assert!(!state.session().is_loading());
    assert!(!state.session().is_authenticated());
}

#[test]
fn failed_session_load_means_signed_out() {
    let (state, effects) = update(
        AppState::new(),
        Msg::RequestFailed {
            request: RequestKind::Session,
            video_id: None,
            error: ErrorReport::new(ErrorKind::Unauthorized, ""),
        },
    );
    assert!(effects.is_empty());
    assert!(state.notices().is_empty());
    assert!(!state.session().is_authenticated());
}

#[test]
fn login_validation_errors_are_kept_per_field() {
    let (state, effects) = update(AppState::new(), Msg::LoginSubmitted(login_request()));
    assert_eq!(effects, vec![Effect::Login(login_request())]);

    let mut fields = BTreeMap::new();
    fields.insert(
        "email".to_string(),
        vec!["These credentials do not match our records.".to_string()],
    );
    let (state, _) = update(
        state,
        Msg::RequestFailed {
            request: RequestKind::Login,
            video_id: None,
            error: ErrorReport::validation("The given data was invalid.", fields.clone()),
        },
    );
    assert_eq!(state.form_errors(), &fields);
    assert_eq!(
        state.view().form_errors,
        vec![(
            "email".to_string(),
            "These credentials do not match our records.".to_string()
        )]
    );

    // Resubmitting clears stale field errors.
    let (state, _) = update(state, Msg::LoginSubmitted(login_request()));
    assert!(state.form_errors().is_empty());
}

#[test]
fn login_success_then_logout_tears_down_session() {
    let (state, _) = update(
        AppState::new(),
        Msg::AuthSucceeded {
            request: RequestKind::Login,
            user: user(),
        },
    );
    assert_eq!(state.session().user(), Some(&user()));
    assert_eq!(state.view().user_name.as_deref(), Some("Ren"));

    let (state, effects) = update(state, Msg::LogoutRequested);
    assert_eq!(effects, vec![Effect::Logout]);

    let (state, _) = update(state, Msg::LoggedOut);
    assert!(!state.session().is_authenticated());
    assert_eq!(state.screen(), Screen::Home);
}

#[test]
fn logout_when_signed_out_is_ignored() {
    let (_, effects) = update(AppState::new(), Msg::LogoutRequested);
    assert!(effects.is_empty());
}

#[test]
fn profile_and_password_require_a_session() {
    let profile = ProfileUpdate {
        name: "Ren".into(),
        email: "ren@example.com".into(),
    };
    let (_, effects) = update(AppState::new(), Msg::ProfileSubmitted(profile.clone()));
    assert!(effects.is_empty());

    let (state, _) = update(AppState::new(), Msg::SessionLoaded(Some(user())));
    let (state, effects) = update(state, Msg::ProfileSubmitted(profile.clone()));
    assert_eq!(effects, vec![Effect::UpdateProfile(profile)]);

    let password = PasswordUpdate {
        current_password: "old".into(),
        password: "new-secret".into(),
        password_confirmation: "new-secret".into(),
    };
    let (_, effects) = update(state, Msg::PasswordSubmitted(password.clone()));
    assert_eq!(effects, vec![Effect::UpdatePassword(password)]);
}

#[test]
fn profile_update_keeps_the_current_screen() {
    let (state, _) = update(AppState::new(), Msg::SessionLoaded(Some(user())));
    let (state, _) = update(state, Msg::HistoryShown);
    let mut renamed = user();
    renamed.name = "Ren K.".into();
    let (state, _) = update(
        state,
        Msg::AuthSucceeded {
            request: RequestKind::Profile,
            user: renamed,
        },
    );
    assert_eq!(state.screen(), Screen::History);
    assert_eq!(state.view().user_name.as_deref(), Some("Ren K."));
}

#[test]
fn credentials_never_appear_in_debug_output() {
    let logged = format!("{:?}", Effect::Login(login_request()));
    assert!(logged.contains("ren@example.com"));
    assert!(!logged.contains("secret"));

    let register = RegisterRequest {
        name: "Ren".into(),
        email: "ren@example.com".into(),
        password: "hunter2".into(),
        password_confirmation: "hunter2".into(),
    };
    let reset = PasswordResetRequest {
        token: "tok-123".into(),
        email: "ren@example.com".into(),
        password: "hunter2".into(),
        password_confirmation: "hunter2".into(),
    };
    let change = PasswordUpdate {
        current_password: "old-pass".into(),
        password: "hunter2".into(),
        password_confirmation: "hunter2".into(),
    };
    for logged in [
        format!("{:?}", Msg::RegisterSubmitted(register)),
        format!("{:?}", Effect::ResetPassword(reset)),
        format!("{:?}", Effect::UpdatePassword(change)),
    ] {
        assert!(!logged.contains("hunter2"), "{logged}");
        assert!(!logged.contains("old-pass"), "{logged}");
        assert!(!logged.contains("tok-123"), "{logged}");
        assert!(logged.contains("***"), "{logged}");
    }
}
