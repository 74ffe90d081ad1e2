use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

/// Field name to value pairs collected from the form at submit time,
/// in document order. A repeated name keeps its first position and takes
/// the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionRecord {
    entries: Vec<(String, String)>,
}

impl SubmissionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SubmissionRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = SubmissionRecord::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

impl Serialize for SubmissionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// JSON body the endpoint answers with. Both fields are optional on the
/// wire; the status code decides how they are read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReplyBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
}

/// A decoded HTTP reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: ReplyBody,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub const FALLBACK_FAILURE_MESSAGE: &str = "Submission failed. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success {
        message: String,
        redirect_url: String,
    },
    Failure {
        message: String,
    },
}

impl SubmissionResult {
    /// Interprets a reply. A success without `redirect` uses
    /// `redirect_fallback`.
    pub fn from_reply(reply: &Reply, redirect_fallback: &str) -> Self {
        if reply.is_success() {
            SubmissionResult::Success {
                message: reply.body.message.clone().unwrap_or_default(),
                redirect_url: reply
                    .body
                    .redirect
                    .clone()
                    .filter(|url| !url.is_empty())
                    .unwrap_or_else(|| redirect_fallback.to_string()),
            }
        } else {
            SubmissionResult::Failure {
                message: reply
                    .body
                    .message
                    .clone()
                    .filter(|msg| !msg.is_empty())
                    .unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string()),
            }
        }
    }

    pub fn network_failure() -> Self {
        SubmissionResult::Failure {
            message: NETWORK_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SubmissionResult::Success { message, .. } | SubmissionResult::Failure { message } => {
                message
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, message: Option<&str>, redirect: Option<&str>) -> Reply {
        Reply {
            status,
            body: ReplyBody {
                message: message.map(String::from),
                redirect: redirect.map(String::from),
            },
        }
    }

    #[test]
    fn record_serializes_in_field_order() {
        let record: SubmissionRecord = vec![
            ("first-name", "Ada"),
            ("age", "36"),
            ("email", "ada@example.com"),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"first-name":"Ada","age":"36","email":"ada@example.com"}"#
        );
    }

    #[test]
    fn repeated_name_keeps_last_value() {
        let mut record = SubmissionRecord::new();
        record.insert("gender", "female");
        record.insert("age", "36");
        record.insert("gender", "other");

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("gender"), Some("other"));
        assert_eq!(
            record.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["gender", "age"]
        );
    }

    #[test]
    fn success_uses_supplied_redirect() {
        let result =
            SubmissionResult::from_reply(&reply(200, Some("ok"), Some("/x")), "/thank_you.html");
        assert_eq!(
            result,
            SubmissionResult::Success {
                message: "ok".to_string(),
                redirect_url: "/x".to_string(),
            }
        );
    }

    #[test]
    fn success_without_redirect_falls_back() {
        let result =
            SubmissionResult::from_reply(&reply(201, Some("ok"), None), "/thank_you.html");
        match result {
            SubmissionResult::Success { redirect_url, .. } => {
                assert_eq!(redirect_url, "/thank_you.html")
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn non_2xx_is_failure_with_server_message() {
        let result =
            SubmissionResult::from_reply(&reply(400, Some("bad data"), None), "/thank_you.html");
        assert_eq!(result.message(), "bad data");
        assert!(matches!(result, SubmissionResult::Failure { .. }));
    }

    #[test]
    fn failure_without_message_gets_generic_text() {
        let result =
            SubmissionResult::from_reply(&reply(500, None, None), "/thank_you.html");
        assert_eq!(result.message(), FALLBACK_FAILURE_MESSAGE);
    }

    #[test]
    fn reply_body_tolerates_extra_fields() {
        let body: ReplyBody =
            serde_json::from_str(r#"{"status":"success","message":"ok"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("ok"));
        assert_eq!(body.redirect, None);
    }
}
