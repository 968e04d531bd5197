//! Terminal front-end: prompts for fields on stdin and prints status lines.

use signup_portal::{Field, Navigator, Panel, Status, StatusKind, StatusSlot, View};
use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use tracing::debug;

pub struct ConsoleView;

impl View for ConsoleView {
    fn read_field(&self, field: Field) -> String {
        print!("{}: ", field.label());
        if let Err(e) = io::stdout().flush() {
            debug!("Failed to flush prompt: {}", e);
        }

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return String::new();
        }
        line.trim_end_matches(['\r', '\n']).to_string()
    }

    fn set_status(&self, slot: StatusSlot, status: Status) {
        if status.text.is_empty() {
            return;
        }
        let tag = match status.kind {
            StatusKind::Success => "ok",
            StatusKind::Error => "error",
        };
        match slot {
            StatusSlot::NationalId => println!("  national ID [{}]: {}", tag, status),
            StatusSlot::Register | StatusSlot::Login => println!("[{}] {}", tag, status),
        }
    }

    fn clear_status(&self, _slot: StatusSlot) {}

    fn show_panel(&self, panel: Panel) {
        let title = match panel {
            Panel::Welcome => "Welcome. Commands: login, register, quit",
            Panel::Login => "Sign in",
            Panel::Register => "Create an account",
        };
        println!("\n== {} ==", title);
    }
}

/// Navigator for a single terminal session.
///
/// The fragment comes from the command line; a redirect is recorded so the
/// main loop can stop.
pub struct ConsoleNavigator {
    fragment: String,
    redirected_to: Mutex<Option<String>>,
}

impl ConsoleNavigator {
    pub fn new(fragment: Option<String>) -> Self {
        Self {
            fragment: fragment.unwrap_or_default(),
            redirected_to: Mutex::new(None),
        }
    }

    pub fn redirected_to(&self) -> Option<String> {
        self.redirected_to
            .lock()
            .map(|location| location.clone())
            .unwrap_or(None)
    }
}

impl Navigator for ConsoleNavigator {
    fn fragment(&self) -> String {
        self.fragment.clone()
    }

    fn redirect(&self, location: &str) {
        println!("-> {}", location);
        if let Ok(mut slot) = self.redirected_to.lock() {
            *slot = Some(location.to_string());
        }
    }
}
