//! Content to share.

use serde_json::{Map, Value};

use crate::{Platform, ShareError};

const NOT_AN_OBJECT: &str = "Content to share must be a valid object";
const MISSING_PAYLOAD: &str = "At least one of URL and message is required";
const INVALID_TITLE: &str = "Invalid title: title should be a string.";

/// Content handed to the native share sheet.
///
/// Either a message or a URL, optionally with a title. Both may be set; iOS
/// shares them together, Android sends the message (or the URL when there is
/// no message) as the intent text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    /// Title of the message. Becomes the intent subject on Android.
    pub title: Option<String>,
    /// A message to share.
    pub message: Option<String>,
    /// A URL to share.
    pub url: Option<String>,
}

impl Content {
    /// Content carrying a text message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Content carrying a URL.
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Check that the content has something to share.
    ///
    /// # Errors
    /// Returns [`ShareError::InvalidArgument`] when neither a message nor a URL is set.
    pub fn validate(&self) -> Result<(), ShareError> {
        if self.message.is_none() && self.url.is_none() {
            return Err(ShareError::invalid(MISSING_PAYLOAD));
        }
        Ok(())
    }

    /// Parse loosely typed content, such as a value received over a script bridge.
    ///
    /// The value must be an object with a string `url` or `message`. On Android a
    /// `title` must be a string or falsy (`null`, `false`, `0`, `""`); elsewhere a
    /// non-string title is dropped.
    ///
    /// # Errors
    /// Returns [`ShareError::InvalidArgument`] when any of the above does not hold.
    pub fn from_value(value: &Value, platform: &Platform) -> Result<Self, ShareError> {
        ContentFields::parse(value)?.into_content(platform)
    }
}

/// The shape-checked fields of a loosely typed content object.
///
/// Splitting the parse lets the caller validate options between the shape check
/// and the platform-specific title check.
#[derive(Debug)]
pub(crate) struct ContentFields<'a> {
    object: &'a Map<String, Value>,
}

impl<'a> ContentFields<'a> {
    pub(crate) fn parse(value: &'a Value) -> Result<Self, ShareError> {
        let object = value
            .as_object()
            .ok_or_else(|| ShareError::invalid(NOT_AN_OBJECT))?;

        let has_payload = ["url", "message"]
            .iter()
            .any(|key| object.get(*key).is_some_and(Value::is_string));
        if !has_payload {
            return Err(ShareError::invalid(MISSING_PAYLOAD));
        }

        Ok(Self { object })
    }

    pub(crate) fn into_content(self, platform: &Platform) -> Result<Content, ShareError> {
        let title = match self.object.get("title") {
            None => None,
            Some(Value::String(title)) => Some(title.clone()),
            Some(value) if is_falsy(value) => None,
            Some(_) if *platform == Platform::Android => {
                return Err(ShareError::invalid(INVALID_TITLE));
            }
            Some(_) => None,
        };

        Ok(Content {
            title,
            message: self.string("message"),
            url: self.string("url"),
        })
    }

    fn string(&self, key: &str) -> Option<String> {
        self.object.get(key).and_then(Value::as_str).map(str::to_owned)
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invalid(message: &str) -> ShareError {
        ShareError::InvalidArgument(message.to_string())
    }

    #[test]
    fn builders_fill_fields() {
        let content = Content::url("https://example.com")
            .with_title("Example")
            .with_message("look");
        assert_eq!(content.url.as_deref(), Some("https://example.com"));
        assert_eq!(content.title.as_deref(), Some("Example"));
        assert_eq!(content.message.as_deref(), Some("look"));
        assert!(content.validate().is_ok());
    }

    #[test]
    fn empty_content_is_rejected() {
        assert_eq!(Content::default().validate(), Err(invalid(MISSING_PAYLOAD)));
        assert_eq!(
            Content::default().with_title("only a title").validate(),
            Err(invalid(MISSING_PAYLOAD))
        );
    }

    #[test]
    fn non_objects_are_rejected() {
        for value in [json!(null), json!(42), json!("hello"), json!(["message"])] {
            assert_eq!(
                Content::from_value(&value, &Platform::Ios),
                Err(invalid(NOT_AN_OBJECT)),
                "{value}"
            );
        }
    }

    #[test]
    fn payload_must_be_a_string() {
        for value in [json!({}), json!({"title": "t"}), json!({"message": 1, "url": null})] {
            assert_eq!(
                Content::from_value(&value, &Platform::Android),
                Err(invalid(MISSING_PAYLOAD)),
                "{value}"
            );
        }
    }

    #[test]
    fn wrong_typed_payload_field_is_dropped_when_the_other_is_valid() {
        let content =
            Content::from_value(&json!({"message": 7, "url": "https://a.b"}), &Platform::Ios)
                .unwrap();
        assert_eq!(content, Content::url("https://a.b"));
    }

    #[test]
    fn android_rejects_truthy_non_string_title() {
        for title in [json!(5), json!(true), json!({}), json!([])] {
            assert_eq!(
                Content::from_value(&json!({"message": "hi", "title": title}), &Platform::Android),
                Err(invalid(INVALID_TITLE)),
            );
        }
    }

    #[test]
    fn android_treats_falsy_title_as_absent() {
        for title in [json!(null), json!(false), json!(0)] {
            let content =
                Content::from_value(&json!({"message": "hi", "title": title}), &Platform::Android)
                    .unwrap();
            assert_eq!(content.title, None);
        }
    }

    #[test]
    fn other_platforms_drop_non_string_title() {
        let content =
            Content::from_value(&json!({"message": "hi", "title": 5}), &Platform::Ios).unwrap();
        assert_eq!(content, Content::message("hi"));
    }

    #[test]
    fn string_title_is_kept() {
        let content = Content::from_value(
            &json!({"url": "https://example.com", "title": "Example"}),
            &Platform::Android,
        )
        .unwrap();
        assert_eq!(content, Content::url("https://example.com").with_title("Example"));
    }
}
