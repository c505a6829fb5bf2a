use scout_core::{update, AppState, Effect, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn tick_does_not_dirty_state() {
    let (mut next, effects) = update(AppState::new(), Msg::Tick);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

#[test]
fn start_loads_session_and_history() {
    let (_, effects) = update(AppState::new(), Msg::Started);
    assert_eq!(effects, vec![Effect::LoadSession, Effect::LoadHistory]);
}

#[test]
fn screen_switches_mark_dirty() {
    use scout_core::Screen;

    let (mut state, effects) = update(AppState::new(), Msg::AccountShown);
    assert!(effects.is_empty());
    assert_eq!(state.screen(), Screen::Account);
    assert!(state.consume_dirty());

    let (state, _) = update(state, Msg::HomeShown);
    assert_eq!(state.screen(), Screen::Home);
}
