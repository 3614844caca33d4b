//! Credential form state.

use crate::common::TextField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Login,
    Register,
}

impl Mode {
    pub fn title(self) -> &'static str {
        match self {
            Mode::Login => "Iniciar sesión",
            Mode::Register => "Registro",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialField {
    #[default]
    Username,
    Password,
    Email,
}

impl CredentialField {
    pub fn label(self) -> &'static str {
        match self {
            CredentialField::Username => "Usuario",
            CredentialField::Password => "Contraseña",
            CredentialField::Email => "Email",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CredentialsState {
    pub mode: Mode,
    pub focus: CredentialField,
    pub username: TextField,
    pub password: TextField,
    pub email: TextField,
}

impl CredentialsState {
    /// Fields shown in the current mode, top to bottom.
    pub fn fields(&self) -> &'static [CredentialField] {
        match self.mode {
            Mode::Login => &[CredentialField::Username, CredentialField::Password],
            Mode::Register => &[
                CredentialField::Username,
                CredentialField::Password,
                CredentialField::Email,
            ],
        }
    }

    pub fn field(&self, field: CredentialField) -> &TextField {
        match field {
            CredentialField::Username => &self.username,
            CredentialField::Password => &self.password,
            CredentialField::Email => &self.email,
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            CredentialField::Username => &mut self.username,
            CredentialField::Password => &mut self.password,
            CredentialField::Email => &mut self.email,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = step(self.fields(), self.focus, 1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = step(self.fields(), self.focus, -1);
    }

    /// Switches login ↔ register, keeping the typed username.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Login => Mode::Register,
            Mode::Register => Mode::Login,
        };
        self.password.clear();
        self.email.clear();
        self.focus = CredentialField::Username;
    }
}

fn step(fields: &[CredentialField], current: CredentialField, delta: isize) -> CredentialField {
    let len = fields.len() as isize;
    let idx = fields.iter().position(|f| *f == current).unwrap_or(0) as isize;
    let next = (idx + delta).rem_euclid(len) as usize;
    fields[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_wraps_within_mode() {
        let mut form = CredentialsState::default();
        form.focus_next();
        assert_eq!(form.focus, CredentialField::Password);
        form.focus_next();
        assert_eq!(form.focus, CredentialField::Username);
        form.focus_prev();
        assert_eq!(form.focus, CredentialField::Password);
    }

    #[test]
    fn test_register_mode_reaches_email() {
        let mut form = CredentialsState::default();
        form.toggle_mode();
        form.focus_prev();
        assert_eq!(form.focus, CredentialField::Email);
    }

    #[test]
    fn test_toggle_keeps_username_only() {
        let mut form = CredentialsState::default();
        form.username.set("ana");
        form.password.set("secreto");
        form.focus = CredentialField::Password;

        form.toggle_mode();
        assert_eq!(form.mode, Mode::Register);
        assert_eq!(form.username.value(), "ana");
        assert!(form.password.is_empty());
        assert_eq!(form.focus, CredentialField::Username);
    }

    #[test]
    fn test_email_focus_falls_back_after_toggle_to_login() {
        let mut form = CredentialsState::default();
        form.toggle_mode();
        form.focus = CredentialField::Email;
        form.toggle_mode();
        form.focus_next();
        assert_eq!(form.focus, CredentialField::Password);
    }
}
