//! Common test utilities for controller tests.

#![allow(dead_code)]

use account_gateway::{AccountGateway, IdentityService, SessionStore};
use async_trait::async_trait;
use identity_client::IdentityError;
use signup_portal::{
    ControllerSettings, Field, FormController, Navigator, Panel, Status, StatusSlot, View,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Barrier;

/// View that serves canned field values and records everything rendered.
#[derive(Default)]
pub struct RecordingView {
    fields: Mutex<HashMap<Field, String>>,
    statuses: Mutex<HashMap<StatusSlot, Status>>,
    panels: Mutex<Vec<Panel>>,
}

impl RecordingView {
    pub fn set_field(&self, field: Field, value: &str) {
        self.fields.lock().unwrap().insert(field, value.to_string());
    }

    pub fn status(&self, slot: StatusSlot) -> Option<Status> {
        self.statuses.lock().unwrap().get(&slot).cloned()
    }

    pub fn panels(&self) -> Vec<Panel> {
        self.panels.lock().unwrap().clone()
    }

    pub fn fill_registration(&self) {
        self.set_field(Field::RegisterName, "Ana Rojas");
        self.set_field(Field::RegisterNationalId, "12.345.678-5");
        self.set_field(Field::RegisterProgram, "Civil Engineering");
        self.set_field(Field::RegisterPhone, "+56912345678");
        self.set_field(Field::RegisterEmail, "ana@example.com");
        self.set_field(Field::RegisterPassword, "hunter22");
    }

    pub fn fill_login(&self, email: &str) {
        self.set_field(Field::LoginEmail, email);
        self.set_field(Field::LoginPassword, "hunter22");
    }
}

impl View for RecordingView {
    fn read_field(&self, field: Field) -> String {
        self.fields
            .lock()
            .unwrap()
            .get(&field)
            .cloned()
            .unwrap_or_default()
    }

    fn set_status(&self, slot: StatusSlot, status: Status) {
        self.statuses.lock().unwrap().insert(slot, status);
    }

    fn clear_status(&self, slot: StatusSlot) {
        self.statuses.lock().unwrap().remove(&slot);
    }

    fn show_panel(&self, panel: Panel) {
        self.panels.lock().unwrap().push(panel);
    }
}

/// Navigator with a fixed fragment that records redirects.
#[derive(Default)]
pub struct RecordingNavigator {
    pub fragment: String,
    redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn with_fragment(fragment: &str) -> Self {
        Self {
            fragment: fragment.to_string(),
            redirects: Mutex::new(Vec::new()),
        }
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn fragment(&self) -> String {
        self.fragment.clone()
    }

    fn redirect(&self, location: &str) {
        self.redirects.lock().unwrap().push(location.to_string());
    }
}

/// Identity service fake that counts calls and answers from a script.
#[derive(Default)]
pub struct FakeService {
    pub calls: AtomicUsize,
    pub fail_sign_up: Option<String>,
    pub fail_insert: Option<String>,
    pub fail_sign_in: bool,
    pub missing_profile: bool,
    pub fail_session: bool,
    /// Holds each sign-in until this many are in flight.
    pub sign_in_barrier: Option<Arc<Barrier>>,
    pub inserted: Mutex<Vec<serde_json::Value>>,
}

impl FakeService {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn api_error(status: u16, message: &str) -> IdentityError {
    IdentityError::Api {
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl IdentityService for FakeService {
    async fn create_identity(&self, _email: &str, _password: &str) -> Result<(), IdentityError> {
        self.hit();
        match &self.fail_sign_up {
            Some(msg) => Err(api_error(422, msg)),
            None => Ok(()),
        }
    }

    async fn authenticate(&self, _email: &str, _password: &str) -> Result<(), IdentityError> {
        self.hit();
        if let Some(barrier) = &self.sign_in_barrier {
            barrier.wait().await;
        }
        if self.fail_sign_in {
            Err(api_error(400, "Invalid login credentials"))
        } else {
            Ok(())
        }
    }

    async fn establish_session(
        &self,
        _access_token: &str,
        _refresh_token: &str,
    ) -> Result<(), IdentityError> {
        self.hit();
        if self.fail_session {
            Err(api_error(401, "invalid JWT"))
        } else {
            Ok(())
        }
    }

    async fn insert_row(&self, _table: &str, record: serde_json::Value) -> Result<(), IdentityError> {
        self.hit();
        if let Some(msg) = &self.fail_insert {
            return Err(api_error(409, msg));
        }
        self.inserted.lock().unwrap().push(record);
        Ok(())
    }

    async fn query_single_row(
        &self,
        _table: &str,
        _column: &str,
        value: &str,
    ) -> Result<serde_json::Value, IdentityError> {
        self.hit();
        if self.missing_profile {
            return Err(api_error(406, "JSON object requested, multiple (or no) rows returned"));
        }
        Ok(serde_json::json!({
            "name": "Ana Rojas",
            "national_id": "12345678-5",
            "program": "Civil Engineering",
            "phone": "+56912345678",
            "email": value
        }))
    }
}

/// Everything a controller test needs to inspect afterwards.
pub struct Harness {
    pub controller: FormController,
    pub view: Arc<RecordingView>,
    pub navigator: Arc<RecordingNavigator>,
    pub service: Arc<FakeService>,
    pub sessions: SessionStore,
}

pub fn harness(service: FakeService, navigator: RecordingNavigator) -> Harness {
    let service = Arc::new(service);
    let view = Arc::new(RecordingView::default());
    let navigator = Arc::new(navigator);
    let sessions = SessionStore::memory();

    let settings = ControllerSettings {
        post_login_location: "menu.html".into(),
        redirect_delay: Duration::ZERO,
    };

    let controller = FormController::new(
        AccountGateway::new(service.clone()),
        sessions.clone(),
        view.clone(),
        navigator.clone(),
        settings,
    );

    Harness {
        controller,
        view,
        navigator,
        service,
        sessions,
    }
}
