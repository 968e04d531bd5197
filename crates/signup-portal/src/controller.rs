//! Form controller: reads the view, validates, calls the gateway, renders the outcome.

use crate::config::PortalConfig;
use crate::view::{Field, Navigator, Panel, Status, StatusSlot, View};
use account_gateway::{AccountGateway, OperationResult, SessionStore};
use form_validation::{FormError, LoginForm, RegistrationForm};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// What happened to a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Refused by client-side validation; the service was not called.
    Rejected(FormError),
    /// Sent to the gateway, which answered with this result.
    Completed(OperationResult),
}

impl Submission {
    pub fn succeeded(&self) -> bool {
        matches!(self, Submission::Completed(result) if result.success)
    }
}

/// Navigation settings for the controller.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub post_login_location: String,
    pub redirect_delay: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        PortalConfig::default().into()
    }
}

impl From<PortalConfig> for ControllerSettings {
    fn from(config: PortalConfig) -> Self {
        Self {
            post_login_location: config.post_login_location,
            redirect_delay: config.redirect_delay,
        }
    }
}

/// Drives the welcome, login and register panels.
///
/// Every failure is rendered into the view; nothing propagates out.
/// Submissions are not serialized against each other: a second submit
/// while one is in flight runs alongside it.
pub struct FormController {
    gateway: AccountGateway,
    sessions: SessionStore,
    view: Arc<dyn View>,
    navigator: Arc<dyn Navigator>,
    settings: ControllerSettings,
}

impl FormController {
    pub fn new(
        gateway: AccountGateway,
        sessions: SessionStore,
        view: Arc<dyn View>,
        navigator: Arc<dyn Navigator>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            gateway,
            sessions,
            view,
            navigator,
            settings,
        }
    }

    pub fn show_welcome(&self) {
        self.view.show_panel(Panel::Welcome);
    }

    pub fn show_login(&self) {
        self.view.show_panel(Panel::Login);
    }

    pub fn show_register(&self) {
        self.view.show_panel(Panel::Register);
    }

    /// Page load: adopt redirect tokens if present, then show the welcome panel.
    ///
    /// A fragment carrying an access token always leads to the post-login
    /// location, even when the session could not be established.
    #[instrument(skip(self))]
    pub async fn init(&self) {
        let fragment = self.navigator.fragment();

        match self.gateway.restore_session_from_redirect(&fragment).await {
            Some(result) => {
                if !result.success {
                    warn!("Redirect tokens not usable: {}", result.message);
                }
                self.navigator.redirect(&self.settings.post_login_location);
            }
            None => debug!("No redirect tokens"),
        }

        self.show_welcome();
    }

    /// Submit the registration panel.
    #[instrument(skip(self))]
    pub async fn register(&self) -> Submission {
        self.view.clear_status(StatusSlot::Register);
        self.view.clear_status(StatusSlot::NationalId);

        let form = RegistrationForm {
            name: self.view.read_field(Field::RegisterName),
            national_id: self.view.read_field(Field::RegisterNationalId),
            program: self.view.read_field(Field::RegisterProgram),
            phone: self.view.read_field(Field::RegisterPhone),
            email: self.view.read_field(Field::RegisterEmail),
            password: self.view.read_field(Field::RegisterPassword),
        };

        let input = match form.validate() {
            Ok(input) => input,
            Err(e) => {
                debug!("Registration rejected: {}", e);
                match &e {
                    // Inline under the field; empty text for a check digit mismatch.
                    FormError::NationalId(_) => self.view.set_status(
                        StatusSlot::NationalId,
                        Status::error(e.user_message().unwrap_or_default()),
                    ),
                    _ => self.view.set_status(
                        StatusSlot::Register,
                        Status::error(e.user_message().unwrap_or_default()),
                    ),
                }
                return Submission::Rejected(e);
            }
        };

        let result = self.gateway.register(&input).await;
        self.render(StatusSlot::Register, &result);
        Submission::Completed(result)
    }

    /// Submit the login panel.
    ///
    /// On success the profile is written to the session marker and, after
    /// the configured delay, the user is sent to the post-login location.
    #[instrument(skip(self))]
    pub async fn login(&self) -> Submission {
        self.view.clear_status(StatusSlot::Login);

        let form = LoginForm {
            email: self.view.read_field(Field::LoginEmail),
            password: self.view.read_field(Field::LoginPassword),
        };

        let input = match form.validate() {
            Ok(input) => input,
            Err(e) => {
                self.view
                    .set_status(StatusSlot::Login, Status::error(e.to_string()));
                return Submission::Rejected(e);
            }
        };

        let result = self.gateway.login(&input).await;

        let profile = match result.profile.clone() {
            Some(profile) if result.success => profile,
            _ => {
                self.render(StatusSlot::Login, &result);
                return Submission::Completed(result);
            }
        };

        if let Err(e) = self.sessions.save_profile(&profile).await {
            warn!("Failed to record session marker: {}", e);
        }

        self.view.set_status(
            StatusSlot::Login,
            Status::success(format!("Welcome, {}", profile.name)),
        );
        info!("Redirecting to {}", self.settings.post_login_location);

        tokio::time::sleep(self.settings.redirect_delay).await;
        self.navigator.redirect(&self.settings.post_login_location);

        Submission::Completed(result)
    }

    fn render(&self, slot: StatusSlot, result: &OperationResult) {
        let status = if result.success {
            Status::success(&result.message)
        } else {
            Status::error(&result.message)
        };
        self.view.set_status(slot, status);
    }
}
