use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Result;
use scout_core::{
    update, AppState, LoginRequest, Msg, PasswordResetRequest, PasswordUpdate, ProfileUpdate,
    RegisterRequest,
};
use scout_logging::{scout_info, scout_warn};

use super::cli::{self, HistoryAction, LibraryAction, ShellCommand};
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::render;

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// A line typed by the user.
    Input(String),
    /// Stdin reached end of file.
    InputClosed,
    /// Result delivered by the engine.
    Msg(Msg),
}

/// What a shell line asks the loop to do.
#[derive(Debug, PartialEq, Eq)]
enum LineAction {
    Dispatch(Msg),
    Help,
    Quit,
    Nothing,
}

pub fn run(config: &AppConfig) -> Result<()> {
    let (app_tx, app_rx) = mpsc::channel::<AppEvent>();
    let mut runner = EffectRunner::new(config, app_tx.clone())?;
    spawn_input_reader(app_tx);

    println!("Recipe Scout. Type `help` for commands.");
    let mut app = App {
        state: AppState::new(),
        runner: &mut runner,
    };
    app.dispatch(Msg::Started);
    prompt();

    while let Ok(event) = app_rx.recv() {
        match event {
            AppEvent::Input(line) => match app.interpret(&line) {
                LineAction::Dispatch(msg) => app.dispatch(msg),
                LineAction::Help => println!("{}", render::HELP),
                LineAction::Quit => break,
                LineAction::Nothing => {}
            },
            AppEvent::InputClosed => break,
            AppEvent::Msg(msg) => app.dispatch(msg),
        }
        prompt();
    }

    scout_info!("Shutting down");
    Ok(())
}

struct App<'a> {
    state: AppState,
    runner: &'a mut EffectRunner,
}

impl App<'_> {
    /// Runs `msg` and any synchronous follow-ups through `update`, then
    /// renders once if anything changed.
    fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            queue.extend(self.runner.run(effects));
        }

        if self.state.consume_dirty() {
            println!();
            for line in render::render(&self.state.view()) {
                println!("{line}");
            }
            self.state.take_notices();
        }
    }

    fn interpret(&self, line: &str) -> LineAction {
        if self.state.pending_confirmation().is_some() {
            return LineAction::Dispatch(Msg::ConfirmationAnswered(cli::is_affirmative(line)));
        }
        match cli::parse_line(line) {
            Ok(Some(command)) => command_action(command),
            Ok(None) => LineAction::Nothing,
            Err(err) => {
                let _ = err.print();
                LineAction::Nothing
            }
        }
    }
}

fn command_action(command: ShellCommand) -> LineAction {
    let msg = match command {
        ShellCommand::Preview { url } => Msg::PreviewRequested(url),
        ShellCommand::Generate => Msg::GenerateRequested,
        ShellCommand::Recipes { page } => Msg::RecipesRequested { page },
        ShellCommand::Recipe { slug } => Msg::RecipeOpened { slug },
        ShellCommand::History { action } => match action {
            None => Msg::HistoryShown,
            Some(HistoryAction::Remove { slug }) => Msg::HistoryRemoveRequested { slug },
            Some(HistoryAction::Clear) => Msg::HistoryClearRequested,
        },
        ShellCommand::Library { action } => match action {
            None => Msg::LibraryShown,
            Some(LibraryAction::Generate { video_id }) => {
                Msg::LibraryGenerateRequested { video_id }
            }
            Some(LibraryAction::Delete { video_id }) => Msg::LibraryDeleteRequested { video_id },
        },
        ShellCommand::Home => Msg::HomeShown,
        ShellCommand::Account => Msg::AccountShown,
        ShellCommand::Login {
            email,
            password,
            remember,
        } => Msg::LoginSubmitted(LoginRequest {
            email,
            password,
            remember,
        }),
        ShellCommand::Register {
            name,
            email,
            password,
            password_confirmation,
        } => Msg::RegisterSubmitted(RegisterRequest {
            name,
            email,
            password,
            password_confirmation,
        }),
        ShellCommand::Logout => Msg::LogoutRequested,
        ShellCommand::ForgotPassword { email } => Msg::ForgotPasswordSubmitted { email },
        ShellCommand::ResetPassword {
            token,
            email,
            password,
            password_confirmation,
        } => Msg::PasswordResetSubmitted(PasswordResetRequest {
            token,
            email,
            password,
            password_confirmation,
        }),
        ShellCommand::Profile { name, email } => {
            Msg::ProfileSubmitted(ProfileUpdate { name, email })
        }
        ShellCommand::Password {
            current_password,
            password,
            password_confirmation,
        } => Msg::PasswordSubmitted(PasswordUpdate {
            current_password,
            password,
            password_confirmation,
        }),
        ShellCommand::Help => return LineAction::Help,
        ShellCommand::Quit => return LineAction::Quit,
    };
    LineAction::Dispatch(msg)
}

fn spawn_input_reader(app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if app_tx.send(AppEvent::Input(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    scout_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
        let _ = app_tx.send(AppEvent::InputClosed);
    });
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn shell_commands_map_to_messages() {
        assert_eq!(
            command_action(ShellCommand::History {
                action: Some(HistoryAction::Clear)
            }),
            LineAction::Dispatch(Msg::HistoryClearRequested)
        );
        assert_eq!(
            command_action(ShellCommand::Library {
                action: Some(LibraryAction::Generate {
                    video_id: "abc".to_string()
                })
            }),
            LineAction::Dispatch(Msg::LibraryGenerateRequested {
                video_id: "abc".to_string()
            })
        );
        assert_eq!(command_action(ShellCommand::Quit), LineAction::Quit);
        assert_eq!(command_action(ShellCommand::Help), LineAction::Help);
    }
}
