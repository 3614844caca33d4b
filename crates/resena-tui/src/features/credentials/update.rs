//! Credential form reducer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use resena_core::api::{ApiResult, LoginOutcome, ServiceMessage};
use resena_core::forms::{Credentials, Registration};
use resena_core::messages;

use super::{CredentialsState, Mode};
use crate::catalog;
use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::state::AppState;

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('r') if ctrl => {
            app.credentials.toggle_mode();
            vec![]
        }
        KeyCode::Enter => submit(app),
        KeyCode::Tab | KeyCode::Down => {
            app.credentials.focus_next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.credentials.focus_prev();
            vec![]
        }
        _ => {
            app.credentials.focused_mut().handle_key(&key);
            vec![]
        }
    }
}

pub fn handle_paste(app: &mut AppState, text: &str) {
    app.credentials.focused_mut().insert_str(text);
}

/// Validates the form and issues `POST /login` or `POST /register`.
pub fn submit(app: &mut AppState) -> Vec<UiEffect> {
    let form = &app.credentials;
    match form.mode {
        Mode::Login => match Credentials::parse(form.username.value(), form.password.value()) {
            Ok(credentials) => {
                let (task, mut effects) = app.begin_task(TaskKind::Login);
                effects.push(UiEffect::Login { task, credentials });
                effects
            }
            Err(err) => {
                app.status.error(err.to_string());
                vec![]
            }
        },
        Mode::Register => match Registration::parse(
            form.username.value(),
            form.password.value(),
            form.email.value(),
        ) {
            Ok(registration) => {
                let (task, mut effects) = app.begin_task(TaskKind::Register);
                effects.push(UiEffect::Register { task, registration });
                effects
            }
            Err(err) => {
                app.status.error(err.to_string());
                vec![]
            }
        },
    }
}

/// On success the session is populated and the catalog loads its movies.
pub fn handle_login_result(
    app: &mut AppState,
    typed_username: String,
    result: ApiResult<LoginOutcome>,
) -> Vec<UiEffect> {
    match result {
        Ok(outcome) => {
            let username = outcome.username.unwrap_or(typed_username);
            tracing::info!(%username, "logged in");
            app.session.on_login(outcome.token, username);
            app.credentials.password.clear();
            app.status.success(messages::LOGIN_OK);
            catalog::start_fetch_movies(app)
        }
        Err(err) => {
            tracing::debug!(kind = %err.kind(), error = %err, "login failed");
            app.status.error(err.user_message(messages::LOGIN_FAILED));
            vec![]
        }
    }
}

/// On success the form goes back to login mode, emptied.
pub fn handle_register_result(app: &mut AppState, result: ApiResult<ServiceMessage>) {
    match result {
        Ok(message) => {
            app.status.success(message.or(messages::REGISTER_OK));
            app.credentials = CredentialsState::default();
        }
        Err(err) => {
            tracing::debug!(kind = %err.kind(), error = %err, "registration failed");
            app.status.error(err.user_message(messages::REGISTER_FAILED));
        }
    }
}

#[cfg(test)]
mod tests {
    use resena_core::api::ApiError;
    use resena_core::session::Token;

    use super::*;
    use crate::state::View;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            handle_key(app, press(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn test_submit_login_emits_request() {
        let mut app = AppState::default();
        type_text(&mut app, "ana");
        handle_key(&mut app, press(KeyCode::Tab));
        type_text(&mut app, "pw");

        let effects = handle_key(&mut app, press(KeyCode::Enter));
        match effects.as_slice() {
            [UiEffect::Login { task, credentials }] => {
                assert_eq!(credentials.username, "ana");
                assert_eq!(credentials.password, "pw");
                assert_eq!(app.tasks.login.active, Some(*task));
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn test_submit_without_password_is_local_error() {
        let mut app = AppState::default();
        type_text(&mut app, "ana");

        let effects = submit(&mut app);
        assert!(effects.is_empty());
        assert!(!app.tasks.login.is_running());
        assert!(app.status.text().is_some_and(|t| t.contains("contraseña")));
    }

    #[test]
    fn test_register_requires_valid_email() {
        let mut app = AppState::default();
        app.credentials.toggle_mode();
        app.credentials.username.set("ana");
        app.credentials.password.set("pw");
        app.credentials.email.set("ana-at-example");

        assert!(submit(&mut app).is_empty());
        assert!(app.status.text().is_some());

        app.credentials.email.set("ana@example.com");
        let effects = submit(&mut app);
        assert!(matches!(effects.as_slice(), [UiEffect::Register { .. }]));
    }

    #[test]
    fn test_login_success_prefers_echoed_username() {
        let mut app = AppState::default();
        let effects = handle_login_result(
            &mut app,
            "typed".to_string(),
            Ok(LoginOutcome {
                token: Token::new("T").unwrap(),
                username: Some("echoed".to_string()),
            }),
        );

        assert_eq!(app.view(), View::Catalog);
        assert_eq!(app.session.username(), Some("echoed"));
        assert_eq!(app.status.text(), Some(messages::LOGIN_OK));
        assert!(matches!(effects.as_slice(), [UiEffect::FetchMovies { .. }]));
    }

    #[test]
    fn test_login_failure_without_message_uses_generic_text() {
        let mut app = AppState::default();
        let effects = handle_login_result(
            &mut app,
            "ana".to_string(),
            Err(ApiError::Service {
                status: 500,
                message: None,
            }),
        );
        assert!(effects.is_empty());
        assert_eq!(app.view(), View::Credentials);
        assert_eq!(app.status.text(), Some(messages::LOGIN_FAILED));
    }

    #[test]
    fn test_register_success_returns_to_login_mode() {
        let mut app = AppState::default();
        app.credentials.toggle_mode();
        app.credentials.username.set("ana");
        app.credentials.email.set("ana@example.com");

        handle_register_result(
            &mut app,
            Ok(ServiceMessage {
                msg: Some("User created".to_string()),
            }),
        );
        assert_eq!(app.credentials.mode, Mode::Login);
        assert!(app.credentials.username.is_empty());
        assert_eq!(app.status.text(), Some("User created"));
    }

    #[test]
    fn test_ctrl_r_toggles_mode() {
        let mut app = AppState::default();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
        );
        assert_eq!(app.credentials.mode, Mode::Register);
    }

    #[test]
    fn test_esc_quits() {
        let mut app = AppState::default();
        let effects = handle_key(&mut app, press(KeyCode::Esc));
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
    }
}
