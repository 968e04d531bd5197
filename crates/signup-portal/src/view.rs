//! The presentation surface the controller drives.
//!
//! The controller never touches widgets directly. A terminal front-end, a
//! web page binding or a test recorder all plug in through these traits.

use std::fmt;

/// The three panels of the signup screen. Exactly one is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Welcome,
    Login,
    Register,
}

/// Named input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    RegisterName,
    RegisterNationalId,
    RegisterProgram,
    RegisterPhone,
    RegisterEmail,
    RegisterPassword,
    LoginEmail,
    LoginPassword,
}

impl Field {
    pub const REGISTER: [Field; 6] = [
        Field::RegisterName,
        Field::RegisterNationalId,
        Field::RegisterProgram,
        Field::RegisterPhone,
        Field::RegisterEmail,
        Field::RegisterPassword,
    ];

    pub const LOGIN: [Field; 2] = [Field::LoginEmail, Field::LoginPassword];

    pub fn label(&self) -> &'static str {
        match self {
            Field::RegisterName => "Full name",
            Field::RegisterNationalId => "National ID",
            Field::RegisterProgram => "Program",
            Field::RegisterPhone => "Phone",
            Field::RegisterEmail | Field::LoginEmail => "Email",
            Field::RegisterPassword | Field::LoginPassword => "Password",
        }
    }

    /// Secret fields should not be echoed.
    pub fn is_secret(&self) -> bool {
        matches!(self, Field::RegisterPassword | Field::LoginPassword)
    }
}

/// Places a status line can be written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusSlot {
    Register,
    Login,
    /// Inline error next to the national ID field.
    NationalId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn color(&self) -> &'static str {
        match self {
            StatusKind::Success => "green",
            StatusKind::Error => "red",
        }
    }

    pub fn background(&self) -> &'static str {
        match self {
            StatusKind::Success => "#ddffdd",
            StatusKind::Error => "#ffdddd",
        }
    }
}

/// A status message and how to color it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Read inputs and render feedback.
pub trait View: Send + Sync {
    /// Raw value of a field, untrimmed.
    fn read_field(&self, field: Field) -> String;

    fn set_status(&self, slot: StatusSlot, status: Status);

    /// Reset a status slot to empty with no color.
    fn clear_status(&self, slot: StatusSlot);

    /// Make `panel` the only visible panel.
    fn show_panel(&self, panel: Panel);
}

/// Where the user currently is and where to send them next.
pub trait Navigator: Send + Sync {
    /// Fragment of the current location, including the leading `#` if any.
    fn fragment(&self) -> String;

    fn redirect(&self, location: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        assert_eq!(Status::error("x").kind.color(), "red");
        assert_eq!(Status::error("x").kind.background(), "#ffdddd");
        assert_eq!(Status::success("x").kind.color(), "green");
        assert_eq!(Status::success("x").kind.background(), "#ddffdd");
    }

    #[test]
    fn test_secret_fields() {
        assert!(Field::LoginPassword.is_secret());
        assert!(!Field::RegisterNationalId.is_secret());
        assert_eq!(Field::REGISTER.iter().filter(|f| f.is_secret()).count(), 1);
    }
}
