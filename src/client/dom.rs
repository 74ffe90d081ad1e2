//! The page surface the form controller works against.
//!
//! [`FormView`] and [`Navigator`] are the seams a browser binding implements.
//! [`ApplicationForm`] and [`BrowserLocation`] are in-memory versions that
//! follow the page's DOM contract: the `application-form` element, its submit
//! button, the `spinner` and `submit-text` elements and a lazily created
//! message box.

use std::collections::BTreeSet;

use crate::models::application::APPLICATION_FIELDS;

pub const FORM_ID: &str = "application-form";
pub const INVALID_CLASS: &str = "border-red-500";
pub const HIDDEN_CLASS: &str = "hidden";
pub const SUBMIT_LABEL: &str = "Submit Application";
pub const PROCESSING_LABEL: &str = "Processing...";

/// One form control as read at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSnapshot {
    pub name: String,
    pub value: String,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Text and colors for the message box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub text: String,
}

impl Feedback {
    pub fn success(message: &str) -> Self {
        Self {
            kind: FeedbackKind::Success,
            text: format!("✅ {}", message),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            kind: FeedbackKind::Error,
            text: format!("❌ {}", message),
        }
    }

    pub fn color(&self) -> &'static str {
        match self.kind {
            FeedbackKind::Success => "#16a34a",
            FeedbackKind::Error => "#dc2626",
        }
    }

    pub fn background(&self) -> &'static str {
        match self.kind {
            FeedbackKind::Success => "#dcfce7",
            FeedbackKind::Error => "#fee2e2",
        }
    }
}

pub trait FormView {
    fn fields(&self) -> Vec<FieldSnapshot>;
    fn set_invalid(&mut self, name: &str, invalid: bool);
    /// Spinner visibility and submit label.
    fn set_loading(&mut self, loading: bool);
    fn set_submit_enabled(&mut self, enabled: bool);
    fn clear_feedback(&mut self);
    fn show_feedback(&mut self, feedback: &Feedback);
    fn alert(&mut self, message: &str);
    fn reset(&mut self);
}

pub trait Navigator {
    fn navigate(&mut self, url: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
    pub default_value: String,
    pub required: bool,
    pub classes: BTreeSet<String>,
}

impl FormField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            default_value: String::new(),
            required: false,
            classes: BTreeSet::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets both the current and the reset value.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self.value = self.default_value.clone();
        self
    }

    pub fn is_invalid(&self) -> bool {
        self.classes.contains(INVALID_CLASS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBox {
    pub text: String,
    pub color: String,
    pub background: String,
}

#[derive(Debug, Clone)]
pub struct ApplicationForm {
    fields: Vec<FormField>,
    pub submit_disabled: bool,
    pub submit_text: String,
    pub spinner_classes: BTreeSet<String>,
    message_box: Option<MessageBox>,
    message_boxes_created: usize,
    pub alerts: Vec<String>,
}

impl ApplicationForm {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            submit_disabled: false,
            submit_text: SUBMIT_LABEL.to_string(),
            spinner_classes: BTreeSet::from([HIDDEN_CLASS.to_string()]),
            message_box: None,
            message_boxes_created: 0,
            alerts: Vec::new(),
        }
    }

    /// The fields of the site's application form, all empty.
    pub fn standard() -> Self {
        let fields = APPLICATION_FIELDS
            .iter()
            .map(|spec| {
                let field = FormField::new(spec.name);
                if spec.required {
                    field.required()
                } else {
                    field
                }
            })
            .collect();
        Self::new(fields)
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        for field in self.fields.iter_mut().filter(|f| f.name == name) {
            field.value = value.clone();
        }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn spinner_visible(&self) -> bool {
        !self.spinner_classes.contains(HIDDEN_CLASS)
    }

    pub fn message_box(&self) -> Option<&MessageBox> {
        self.message_box.as_ref()
    }

    pub fn message_boxes_created(&self) -> usize {
        self.message_boxes_created
    }

    fn message_box_mut(&mut self) -> &mut MessageBox {
        if self.message_box.is_none() {
            self.message_boxes_created += 1;
        }
        self.message_box.get_or_insert_with(|| MessageBox {
            text: String::new(),
            color: String::new(),
            background: String::new(),
        })
    }
}

impl FormView for ApplicationForm {
    fn fields(&self) -> Vec<FieldSnapshot> {
        self.fields
            .iter()
            .map(|f| FieldSnapshot {
                name: f.name.clone(),
                value: f.value.clone(),
                required: f.required,
            })
            .collect()
    }

    fn set_invalid(&mut self, name: &str, invalid: bool) {
        for field in self.fields.iter_mut().filter(|f| f.name == name) {
            if invalid {
                field.classes.insert(INVALID_CLASS.to_string());
            } else {
                field.classes.remove(INVALID_CLASS);
            }
        }
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            self.spinner_classes.remove(HIDDEN_CLASS);
            self.submit_text = PROCESSING_LABEL.to_string();
        } else {
            self.spinner_classes.insert(HIDDEN_CLASS.to_string());
            self.submit_text = SUBMIT_LABEL.to_string();
        }
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_disabled = !enabled;
    }

    fn clear_feedback(&mut self) {
        self.message_box_mut().text.clear();
    }

    fn show_feedback(&mut self, feedback: &Feedback) {
        let message_box = self.message_box_mut();
        message_box.text = feedback.text.clone();
        message_box.color = feedback.color().to_string();
        message_box.background = feedback.background().to_string();
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.default_value.clone();
        }
    }
}

/// Records navigations instead of leaving the page.
#[derive(Debug, Clone, Default)]
pub struct BrowserLocation {
    pub href: String,
    pub visited: Vec<String>,
}

impl BrowserLocation {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            visited: Vec::new(),
        }
    }
}

impl Navigator for BrowserLocation {
    fn navigate(&mut self, url: &str) {
        self.visited.push(url.to_string());
        self.href = url.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_box_is_created_once() {
        let mut form = ApplicationForm::standard();
        assert!(form.message_box().is_none());

        form.clear_feedback();
        form.show_feedback(&Feedback::error("bad data"));
        form.clear_feedback();
        form.show_feedback(&Feedback::success("ok"));

        assert_eq!(form.message_boxes_created(), 1);
        let message_box = form.message_box().unwrap();
        assert_eq!(message_box.text, "✅ ok");
        assert_eq!(message_box.color, "#16a34a");
        assert_eq!(message_box.background, "#dcfce7");
    }

    #[test]
    fn loading_toggles_spinner_and_label() {
        let mut form = ApplicationForm::standard();
        assert!(!form.spinner_visible());

        form.set_loading(true);
        assert!(form.spinner_visible());
        assert_eq!(form.submit_text, PROCESSING_LABEL);

        form.set_loading(false);
        assert!(!form.spinner_visible());
        assert_eq!(form.submit_text, SUBMIT_LABEL);
    }

    #[test]
    fn reset_restores_default_values() {
        let mut form = ApplicationForm::new(vec![
            FormField::new("gender").with_default("female"),
            FormField::new("email").required(),
        ]);
        form.set_value("gender", "male");
        form.set_value("email", "ada@example.com");

        form.reset();
        assert_eq!(form.field("gender").unwrap().value, "female");
        assert_eq!(form.field("email").unwrap().value, "");
    }

    #[test]
    fn invalid_marking_is_reversible() {
        let mut form = ApplicationForm::standard();
        form.set_invalid("age", true);
        assert!(form.field("age").unwrap().is_invalid());
        form.set_invalid("age", false);
        assert!(!form.field("age").unwrap().is_invalid());
    }
}
