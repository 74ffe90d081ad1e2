use log::{debug, info, warn};
use std::cell::{Ref, RefCell};

use crate::client::dom::{Feedback, FieldSnapshot, FormView, Navigator};
use crate::client::record::{SubmissionRecord, SubmissionResult};
use crate::client::transport::Transport;
use crate::config::FormOptions;
use crate::errors::{FormError, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Submitting,
    Error(String),
    Success(String),
}

/// Owns validation, serialization and submission for one form.
///
/// The controller runs on a single cooperative thread; the `RefCell`s are
/// only borrowed between suspension points.
pub struct FormController<V, T, N> {
    view: RefCell<V>,
    transport: T,
    navigator: RefCell<N>,
    state: RefCell<UiState>,
    options: FormOptions,
}

impl<V, T, N> FormController<V, T, N>
where
    V: FormView,
    T: Transport,
    N: Navigator,
{
    pub fn attach(view: V, transport: T, navigator: N, options: FormOptions) -> Self {
        info!("Form controller attached, submitting to {}", options.endpoint);
        Self {
            view: RefCell::new(view),
            transport,
            navigator: RefCell::new(navigator),
            state: RefCell::new(UiState::Idle),
            options,
        }
    }

    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> Ref<'_, V> {
        self.view.borrow()
    }

    pub fn navigator(&self) -> Ref<'_, N> {
        self.navigator.borrow()
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Detaches the controller, handing back the form, transport and
    /// navigator in their final state.
    pub fn into_parts(self) -> (V, T, N) {
        (
            self.view.into_inner(),
            self.transport,
            self.navigator.into_inner(),
        )
    }

    /// Handles one submit action.
    ///
    /// Returns the successful result once navigation has happened. Validation
    /// failures and refused submits never reach the transport; server and
    /// transport failures leave the form idle and ready for a retry.
    pub async fn submit(&self) -> Result<SubmissionResult, FormError> {
        match &*self.state.borrow() {
            UiState::Submitting => {
                debug!("Submit ignored, a request is already in flight");
                return Err(FormError::InFlight);
            }
            UiState::Success(_) => {
                debug!("Submit ignored, the application was already accepted");
                return Err(FormError::AlreadySubmitted);
            }
            UiState::Idle | UiState::Error(_) => {}
        }
        self.state.replace(UiState::Submitting);

        let fields = {
            let mut view = self.view.borrow_mut();
            view.clear_feedback();
            view.set_loading(true);
            view.set_submit_enabled(false);
            view.fields()
        };

        if let Err(err) = self.check_fields(&fields) {
            warn!("Application rejected before sending: {:?}", err);
            let mut view = self.view.borrow_mut();
            view.alert(&err.to_string());
            view.set_loading(false);
            view.set_submit_enabled(true);
            self.state.replace(UiState::Idle);
            return Err(err.into());
        }

        let record = serialize_fields(&fields);
        let reply = self.transport.post_json(&self.options.endpoint, &record).await;

        let reply = match reply {
            Ok(reply) => reply,
            Err(err) => {
                warn!("Submission error: {}", err);
                let result = SubmissionResult::network_failure();
                self.fail(result.message());
                return Err(err);
            }
        };

        match SubmissionResult::from_reply(&reply, &self.options.redirect_fallback) {
            SubmissionResult::Success {
                message,
                redirect_url,
            } => {
                info!("Application accepted, redirecting to {}", redirect_url);
                {
                    let mut view = self.view.borrow_mut();
                    view.show_feedback(&Feedback::success(&message));
                    view.reset();
                    view.set_loading(false);
                }
                self.state.replace(UiState::Success(message.clone()));

                tokio::time::sleep(self.options.redirect_delay).await;
                self.navigator.borrow_mut().navigate(&redirect_url);

                Ok(SubmissionResult::Success {
                    message,
                    redirect_url,
                })
            }
            SubmissionResult::Failure { message } => {
                warn!("Application refused ({}): {}", reply.status, message);
                self.fail(&message);
                Err(FormError::Server {
                    status: reply.status,
                    message,
                })
            }
        }
    }

    fn fail(&self, message: &str) {
        let mut view = self.view.borrow_mut();
        view.show_feedback(&Feedback::error(message));
        view.set_loading(false);
        view.set_submit_enabled(true);
        self.state.replace(UiState::Error(message.to_string()));
    }

    fn check_fields(&self, fields: &[FieldSnapshot]) -> Result<(), ValidationError> {
        let mut view = self.view.borrow_mut();

        let mut missing = Vec::new();
        for field in fields.iter().filter(|f| f.required) {
            let empty = field.value.trim().is_empty();
            view.set_invalid(&field.name, empty);
            if empty {
                missing.push(field.name.clone());
            }
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingRequired { fields: missing });
        }

        if let Some(age) = fields.iter().find(|f| f.name == self.options.age_field) {
            let result = check_age(age, self.options.minimum_age);
            view.set_invalid(&age.name, result.is_err());
            result?;
        }
        Ok(())
    }
}

fn check_age(field: &FieldSnapshot, minimum: u32) -> Result<(), ValidationError> {
    let age = field
        .value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|age| age.is_finite())
        .ok_or_else(|| ValidationError::InvalidAge {
            field: field.name.clone(),
        })?;

    if age < f64::from(minimum) {
        return Err(ValidationError::Underage {
            field: field.name.clone(),
            minimum,
        });
    }
    Ok(())
}

/// Named fields only; unnamed controls are never sent.
pub fn serialize_fields(fields: &[FieldSnapshot]) -> SubmissionRecord {
    fields
        .iter()
        .filter(|f| !f.name.is_empty())
        .map(|f| (f.name.as_str(), f.value.as_str()))
        .collect()
}
