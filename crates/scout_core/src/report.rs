use crate::ValidationErrors;

/// Coarse error taxonomy shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// HTTP 422 with field-keyed messages.
    Validation,
    /// HTTP 401/419.
    Unauthorized,
    /// HTTP 5xx.
    Server,
    /// Transport failures, timeouts, undecodable bodies and anything else.
    Network,
}

/// A failed request, reduced to what the UI needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
    pub fields: ValidationErrors,
}

impl ErrorReport {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            fields: ValidationErrors::new(),
        }
    }

    pub fn validation(message: impl Into<String>, fields: ValidationErrors) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
            fields,
        }
    }
}

/// Which user action a failed request belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Session,
    Preview,
    Generate,
    Recipes,
    Recipe,
    Library,
    LibraryGenerate,
    LibraryDelete,
    Login,
    Register,
    Logout,
    ForgotPassword,
    ResetPassword,
    Profile,
    Password,
}

impl RequestKind {
    /// Requests whose validation errors are rendered inline next to form fields.
    pub fn is_form(self) -> bool {
        matches!(
            self,
            RequestKind::Login
                | RequestKind::Register
                | RequestKind::ForgotPassword
                | RequestKind::ResetPassword
                | RequestKind::Profile
                | RequestKind::Password
        )
    }

    /// Fallback text when the server gave no message.
    pub fn failure_text(self) -> &'static str {
        match self {
            RequestKind::Session => "Could not load the current user",
            RequestKind::Preview => "Failed to fetch video information",
            RequestKind::Generate | RequestKind::LibraryGenerate => "Failed to start generation",
            RequestKind::Recipes => "Failed to load recipes",
            RequestKind::Recipe => "Failed to load the recipe",
            RequestKind::Library => "Failed to load your library",
            RequestKind::LibraryDelete => "Failed to delete the video",
            RequestKind::Login => "Login failed",
            RequestKind::Register => "Registration failed",
            RequestKind::Logout => "Logout failed",
            RequestKind::ForgotPassword => "Could not send the reset link",
            RequestKind::ResetPassword => {
                "Password reset failed; the link may have expired"
            }
            RequestKind::Profile => "Failed to update the profile",
            RequestKind::Password => "Failed to update the password",
        }
    }
}
