use actix_web::{get, web, HttpResponse};
use askama::Template;
use std::time::Duration;

use crate::client::dom::{ApplicationForm, Feedback, FORM_ID, HIDDEN_CLASS};
use crate::components::navbar::Navbar;
use crate::config::{FormOptions, SiteConfig};
use crate::errors::SiteError;
use crate::models::application::APPLICATION_FIELDS;

const GENDER_CHOICES: [(&str, &str); 3] =
    [("female", "Female"), ("male", "Male"), ("other", "Other")];

struct ChoiceView {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

struct FieldView {
    name: &'static str,
    label: &'static str,
    input_type: &'static str,
    required: bool,
    value: String,
    invalid: bool,
    choices: Vec<ChoiceView>,
}

struct RefreshView {
    seconds: String,
    url: String,
}

struct NoticeView {
    text: String,
    color: String,
    background: String,
}

/// `<meta http-equiv="refresh">` target after an accepted application.
pub struct Refresh {
    pub url: String,
    pub delay: Duration,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    site: &'a SiteConfig,
    navbar: String,
    form_id: &'static str,
    endpoint: &'a str,
    fields: Vec<FieldView>,
    notice: Option<NoticeView>,
    submit_text: &'a str,
    submit_disabled: bool,
    spinner_hidden: bool,
    refresh: Option<RefreshView>,
}

/// Renders the landing page with the application form in the given state.
pub fn render_index(
    site: &SiteConfig,
    form: &ApplicationForm,
    refresh: Option<Refresh>,
) -> Result<String, SiteError> {
    let options = FormOptions::default();
    let fields = APPLICATION_FIELDS
        .iter()
        .map(|spec| {
            let (value, invalid) = form
                .field(spec.name)
                .map(|f| (f.value.clone(), f.is_invalid()))
                .unwrap_or_default();
            let choices = if spec.input_type == "select" {
                GENDER_CHOICES
                    .iter()
                    .map(|&(choice, label)| ChoiceView {
                        value: choice,
                        label,
                        selected: value == choice,
                    })
                    .collect()
            } else {
                Vec::new()
            };
            FieldView {
                name: spec.name,
                label: spec.label,
                input_type: spec.input_type,
                required: spec.required,
                value,
                invalid,
                choices,
            }
        })
        .collect();

    // A failed local check leaves the message box empty and raises an alert.
    let notice = match form.message_box().filter(|m| !m.text.is_empty()) {
        Some(message_box) => Some(NoticeView {
            text: message_box.text.clone(),
            color: message_box.color.clone(),
            background: message_box.background.clone(),
        }),
        None => form.alerts.last().map(|alert| {
            let feedback = Feedback::error(alert);
            NoticeView {
                color: feedback.color().to_string(),
                background: feedback.background().to_string(),
                text: feedback.text,
            }
        }),
    };

    let template = IndexTemplate {
        site,
        navbar: Navbar::new(&site.navbar).render()?,
        form_id: FORM_ID,
        endpoint: &options.endpoint,
        fields,
        notice,
        submit_text: &form.submit_text,
        submit_disabled: form.submit_disabled,
        spinner_hidden: form.spinner_classes.contains(HIDDEN_CLASS),
        refresh: refresh.map(|r| RefreshView {
            seconds: r.delay.as_secs_f64().to_string(),
            url: r.url,
        }),
    };
    Ok(template.render()?)
}

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactTemplate<'a> {
    site: &'a SiteConfig,
    navbar: String,
}

#[derive(Template)]
#[template(path = "thank_you.html")]
struct ThankYouTemplate<'a> {
    site: &'a SiteConfig,
    navbar: String,
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

#[get("/")]
pub async fn index_handler(site: web::Data<SiteConfig>) -> Result<HttpResponse, SiteError> {
    Ok(html(render_index(&site, &ApplicationForm::standard(), None)?))
}

#[get("/contact.html")]
pub async fn contact_handler(site: web::Data<SiteConfig>) -> Result<HttpResponse, SiteError> {
    let template = ContactTemplate {
        site: &site,
        navbar: Navbar::new(&site.navbar).render()?,
    };
    Ok(html(template.render()?))
}

#[get("/thank_you.html")]
pub async fn thank_you_handler(site: web::Data<SiteConfig>) -> Result<HttpResponse, SiteError> {
    let template = ThankYouTemplate {
        site: &site,
        navbar: Navbar::new(&site.navbar).render()?,
    };
    Ok(html(template.render()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::dom::FormView;
    use actix_web::{http::StatusCode, test, App};

    async fn get(uri: &str) -> (StatusCode, String) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(SiteConfig::default()))
                .service(index_handler)
                .service(contact_handler)
                .service(thank_you_handler),
        )
        .await;
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[actix_web::test]
    async fn index_carries_form_contract() {
        let (status, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<custom-navbar>"));
        assert!(body.contains("id=\"application-form\""));
        assert!(body.contains("id=\"spinner\""));
        assert!(body.contains("id=\"submit-text\""));
        assert!(body.contains("type=\"submit\""));
        assert!(body.contains("id=\"age\""));
        assert!(body.contains("animate-fade-in"));
        assert!(body.contains("id=\"apply\""));
    }

    #[actix_web::test]
    async fn index_marks_required_fields() {
        let (_, body) = get("/").await;
        assert!(body.contains("name=\"bank-number\" type=\"text\" value=\"\" required"));
        assert!(!body.contains("name=\"occupation\" type=\"text\" value=\"\" required"));
    }

    #[actix_web::test]
    async fn form_posts_without_a_script() {
        let (_, body) = get("/").await;
        assert!(body.contains("method=\"post\" action=\"/apply\""));
        assert!(!body.contains("novalidate"));
        assert!(!body.contains("http-equiv=\"refresh\""));
        assert!(body.contains("class=\"spinner hidden\""));
    }

    #[actix_web::test]
    async fn page_fields_match_the_form_model() {
        let (_, body) = get("/").await;
        let form = &body[body.find("<form").unwrap()..];
        let rendered: Vec<&str> = form
            .split("name=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .collect();

        let expected: Vec<String> = ApplicationForm::standard()
            .fields()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(rendered, expected);

        let required: Vec<String> = ApplicationForm::standard()
            .fields()
            .into_iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();
        for name in &required {
            let tag = &form[form.find(&format!("name=\"{}\"", name)).unwrap()..];
            let tag = &tag[..tag.find('>').unwrap()];
            assert!(tag.ends_with("required"), "{} should be required", name);
        }
        assert_eq!(required.len(), 11);
    }

    #[::core::prelude::v1::test]
    fn fade_in_content_is_visible_by_default() {
        let css = include_str!("../../static/css/site.css");
        let start = css.find(".animate-fade-in {").unwrap();
        let rule = &css[start..start + css[start..].find('}').unwrap()];
        assert!(rule.contains("opacity: 1"));
        // Hiding only happens inside the scroll-driven animation.
        let hidden = css.find("opacity: 0").unwrap();
        assert!(hidden > css.find("@keyframes fade-in").unwrap());
    }

    #[actix_web::test]
    async fn thank_you_page_renders() {
        let (status, body) = get("/thank_you.html").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Thank you"));
        assert!(body.contains("<custom-navbar>"));
    }

    #[actix_web::test]
    async fn contact_page_lists_email() {
        let (status, body) = get("/contact.html").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("support@secretshopperexpress.com"));
    }
}
