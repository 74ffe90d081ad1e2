use actix_web::{http::StatusCode, post, web, HttpResponse, ResponseError};
use async_trait::async_trait;
use log::{info, warn};
use std::time::Duration;

use crate::client::dom::{ApplicationForm, BrowserLocation};
use crate::client::record::{Reply, ReplyBody, SubmissionRecord, SubmissionResult};
use crate::client::{FormController, Transport};
use crate::config::{FormOptions, SiteConfig};
use crate::errors::{FormError, SiteError};
use crate::models::application::ApplicationValidator;
use crate::routes::pages::{render_index, Refresh};
use crate::routes::sendmail::accept_application;

/// Hands the record straight to the validator instead of going over HTTP.
pub struct LocalTransport<'a> {
    validator: &'a ApplicationValidator,
}

impl<'a> LocalTransport<'a> {
    pub fn new(validator: &'a ApplicationValidator) -> Self {
        Self { validator }
    }
}

#[async_trait(?Send)]
impl<'a> Transport for LocalTransport<'a> {
    async fn post_json(&self, path: &str, record: &SubmissionRecord) -> Result<Reply, FormError> {
        let payload =
            serde_json::to_value(record).map_err(|e| FormError::Transport(e.to_string()))?;

        let reply = match accept_application(self.validator, payload) {
            Ok(accepted) => Reply {
                status: StatusCode::OK.as_u16(),
                body: ReplyBody {
                    message: Some(accepted.message),
                    redirect: accepted.redirect,
                },
            },
            Err(err) => Reply {
                status: err.status_code().as_u16(),
                body: ReplyBody {
                    message: Some(err.to_string()),
                    redirect: None,
                },
            },
        };
        info!("{} answered {} in process", path, reply.status);
        Ok(reply)
    }
}

/// Plain form post, used when the page runs without a script. Drives the
/// same controller as the scripted page and renders its final state.
#[post("/apply")]
pub async fn apply_handler(
    site: web::Data<SiteConfig>,
    validator: web::Data<ApplicationValidator>,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, SiteError> {
    let mut view = ApplicationForm::standard();
    for (name, value) in form.into_inner() {
        view.set_value(&name, value);
    }

    let defaults = FormOptions::default();
    let page_delay = defaults.redirect_delay;
    let options = FormOptions {
        // The page itself waits via meta refresh.
        redirect_delay: Duration::ZERO,
        ..defaults
    };

    let controller = FormController::attach(
        view,
        LocalTransport::new(&validator),
        BrowserLocation::new("/"),
        options,
    );
    let outcome = controller.submit().await;
    let (view, _, _) = controller.into_parts();

    let (status, refresh) = match outcome {
        Ok(SubmissionResult::Success { redirect_url, .. }) => (
            StatusCode::OK,
            Some(Refresh {
                url: redirect_url,
                delay: page_delay,
            }),
        ),
        Ok(SubmissionResult::Failure { .. }) => (StatusCode::BAD_REQUEST, None),
        Err(err) => {
            warn!("Form post not accepted: {}", err);
            (StatusCode::BAD_REQUEST, None)
        }
    };

    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(render_index(&site, &view, refresh)?))
}
