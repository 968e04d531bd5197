//! Signup portal - registration and login forms over a hosted identity service.
//!
//! The controller reads raw input through the [`View`] trait, validates it
//! with `form-validation`, hands valid submissions to the account gateway
//! and writes the outcome back to the view. Navigation goes through
//! [`Navigator`].

pub mod config;
pub mod controller;
pub mod error;
pub mod view;

pub use config::Config;
pub use controller::{ControllerSettings, FormController, Submission};
pub use error::{AppError, AppResult};
pub use view::{Field, Navigator, Panel, Status, StatusKind, StatusSlot, View};
