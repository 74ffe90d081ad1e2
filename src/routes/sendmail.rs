use actix_web::{post, web, HttpResponse};
use log::{debug, info};
use serde_json::Value;

use crate::config::THANK_YOU_PATH;
use crate::errors::SiteError;
use crate::models::application::ApplicationValidator;
use crate::models::response::ApiResponse;

/// Validates and records one application. Shared by the JSON endpoint and
/// the plain form post.
pub fn accept_application(
    validator: &ApplicationValidator,
    payload: Value,
) -> Result<ApiResponse, SiteError> {
    let application = validator.validate(payload)?;

    info!(
        "Application {} received at {} from {} <{}>",
        application.reference,
        application.received_at.to_rfc3339(),
        application.full_name(),
        application.field("email")
    );
    debug!("Application {}:\n{}", application.reference, application.summary());

    Ok(ApiResponse::success("Form sent successfully!", THANK_YOU_PATH))
}

/// Accepts an application posted by the form controller. The body is read
/// raw so malformed JSON gets the same error shape as validation failures.
#[post("/sendmail")]
pub async fn sendmail_handler(
    validator: web::Data<ApplicationValidator>,
    body: web::Bytes,
) -> Result<HttpResponse, SiteError> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|_| SiteError::InvalidPayload("Invalid JSON format".to_string()))?;

    let reply = accept_application(&validator, payload)?;
    Ok(HttpResponse::Ok().json(reply))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    fn application() -> Value {
        json!({
            "first-name": "Grace",
            "last-name": "Hopper",
            "email": "grace@example.com",
            "phone": "555 010 2030",
            "address": "1 Compiler Ct",
            "city-state": "Arlington, VA",
            "zipcode": "22201",
            "gender": "female",
            "age": "45",
            "bank-name": "Navy Federal",
            "bank-number": "987654321",
        })
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(ApplicationValidator::new(18).unwrap()))
                    .service(sendmail_handler),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn accepts_valid_application() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/sendmail")
            .set_json(application())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: ApiResponse = test::read_body_json(resp).await;
        assert_eq!(
            body,
            ApiResponse::success("Form sent successfully!", "/thank_you.html")
        );
    }

    #[actix_web::test]
    async fn missing_fields_are_listed() {
        let app = app!();
        let mut payload = application();
        payload["first-name"] = json!("");
        payload["zipcode"] = json!(null);
        let req = test::TestRequest::post()
            .uri("/sendmail")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ApiResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, "error");
        assert_eq!(body.message, "First Name is required. | Zipcode is required.");
        assert_eq!(body.redirect, None);
    }

    #[actix_web::test]
    async fn underage_applicant_is_refused() {
        let app = app!();
        let mut payload = application();
        payload["age"] = json!("16");
        let req = test::TestRequest::post()
            .uri("/sendmail")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ApiResponse = test::read_body_json(resp).await;
        assert_eq!(body.message, "You must be at least 18.");
    }

    #[actix_web::test]
    async fn malformed_json_is_refused() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/sendmail")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ApiResponse = test::read_body_json(resp).await;
        assert_eq!(body.message, "Invalid JSON format");
    }
}
