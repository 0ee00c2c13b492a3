//! Cross-platform native share sheet.
//!
//! This crate asks the operating system to present its share UI for a message, a
//! title or a URL: `UIActivityViewController` on iOS and an `ACTION_SEND` chooser
//! on Android. Other platforms have no share sheet and report
//! [`ShareError::UnsupportedPlatform`].
//!
//! Input is validated synchronously, so [`share`] returns either an
//! [`ShareError::InvalidArgument`] straight away or a future that settles once the
//! user finishes with the share sheet.
//!
//! ```rust,no_run
//! use sharekit_share::{Content, ShareOptions};
//!
//! # async fn run() -> Result<(), sharekit_share::ShareError> {
//! let result = sharekit_share::share(
//!     Content::message("hello"),
//!     ShareOptions::new().with_dialog_title("Share via"),
//! )?
//! .await?;
//! println!("{}", result.action);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod content;
mod error;
mod options;
mod platform;
mod sharer;

/// Platform-specific implementations.
pub mod sys;

use std::fmt;

use serde::Serialize;

pub use content::Content;
pub use error::ShareError;
pub use options::{ShareOptions, TintColor};
pub use platform::Platform;
pub use sharer::{
    ActivityRequest, IntentRequest, NativeCompletion, NativeFuture, NativeOutcome, NativeRequest,
    NativeShare, PendingShare, Sharer,
};

#[cfg(target_os = "android")]
pub use sys::android::share_with_context;

/// The content was successfully shared.
pub const SHARED_ACTION: &str = "sharedAction";

/// The share sheet was dismissed without sharing.
pub const DISMISSED_ACTION: &str = "dismissedAction";

/// Outcome of a share request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShareAction {
    /// The content was successfully shared.
    #[serde(rename = "sharedAction")]
    Shared,
    /// The share sheet was dismissed. Only reported on iOS.
    #[serde(rename = "dismissedAction")]
    Dismissed,
}

impl ShareAction {
    /// The sentinel string for this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shared => SHARED_ACTION,
            Self::Dismissed => DISMISSED_ACTION,
        }
    }
}

impl fmt::Display for ShareAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result a share request resolves with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResult {
    /// What the user did.
    pub action: ShareAction,
    /// The iOS activity the content was shared through, e.g.
    /// `com.apple.UIKit.activity.Mail`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
}

impl ShareResult {
    /// A successful share with no activity type.
    #[must_use]
    pub const fn shared() -> Self {
        Self {
            action: ShareAction::Shared,
            activity_type: None,
        }
    }

    /// A dismissed share sheet.
    #[must_use]
    pub const fn dismissed() -> Self {
        Self {
            action: ShareAction::Dismissed,
            activity_type: None,
        }
    }
}

/// The sentinel reported when content was shared.
#[must_use]
pub const fn shared_action() -> &'static str {
    SHARED_ACTION
}

/// The sentinel reported when the share sheet was dismissed.
#[must_use]
pub const fn dismissed_action() -> &'static str {
    DISMISSED_ACTION
}

/// Open the native share sheet on the current platform.
///
/// Validation happens before this returns; the returned future settles once the
/// user completes or dismisses the share sheet.
///
/// # Errors
/// Returns [`ShareError::InvalidArgument`] if the content has neither a message nor
/// a URL. The future fails with [`ShareError::UnsupportedPlatform`] on platforms
/// without a share sheet, and with [`ShareError::PlatformError`] if the native
/// layer fails.
pub fn share(content: Content, options: ShareOptions) -> Result<PendingShare, ShareError> {
    Sharer::system().share(content, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_stable() {
        assert_eq!(shared_action(), "sharedAction");
        assert_eq!(dismissed_action(), "dismissedAction");
        assert_eq!(ShareAction::Shared.as_str(), shared_action());
        assert_eq!(ShareAction::Dismissed.to_string(), dismissed_action());
    }

    #[test]
    fn result_serializes_with_camel_case_keys() {
        let shared = ShareResult {
            action: ShareAction::Shared,
            activity_type: Some("com.apple.UIKit.activity.Mail".into()),
        };
        assert_eq!(
            serde_json::to_value(&shared).unwrap(),
            serde_json::json!({
                "action": "sharedAction",
                "activityType": "com.apple.UIKit.activity.Mail",
            })
        );
        assert_eq!(
            serde_json::to_value(ShareResult::dismissed()).unwrap(),
            serde_json::json!({"action": "dismissedAction"})
        );
    }

    #[test]
    fn empty_content_fails_before_any_future_exists() {
        assert!(matches!(
            share(Content::default(), ShareOptions::new()),
            Err(ShareError::InvalidArgument(_))
        ));
    }

    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    #[tokio::test]
    async fn system_share_is_unsupported_on_desktop() {
        let pending = share(Content::message("hi"), ShareOptions::new()).unwrap();
        assert_eq!(
            pending.await,
            Err(ShareError::UnsupportedPlatform(std::env::consts::OS.to_string()))
        );
    }
}
