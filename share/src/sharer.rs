//! Validation, platform dispatch and result normalization.

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::{self, BoxFuture};
use serde_json::Value;

use crate::content::ContentFields;
use crate::sys::SystemShare;
use crate::{Content, Platform, ShareError, ShareOptions, ShareResult, TintColor};

/// A share request that has passed validation and is waiting on the native UI.
pub type PendingShare = BoxFuture<'static, Result<ShareResult, ShareError>>;

/// What a [`NativeShare`] backend hands back while its UI is up.
pub type NativeFuture = BoxFuture<'static, Result<NativeOutcome, ShareError>>;

/// Data for the Android `ACTION_SEND` chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentRequest {
    /// `EXTRA_TEXT`: the message, or the URL when there is no message.
    pub text: String,
    /// `EXTRA_SUBJECT`.
    pub title: Option<String>,
    /// Chooser heading.
    pub dialog_title: Option<String>,
}

impl IntentRequest {
    /// Build the intent data for validated content.
    #[must_use]
    pub fn new(content: Content, options: ShareOptions) -> Self {
        Self {
            text: content.message.or(content.url).unwrap_or_default(),
            title: content.title,
            dialog_title: options.dialog_title,
        }
    }
}

/// Data for the iOS `UIActivityViewController`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRequest {
    /// Message activity item.
    pub message: Option<String>,
    /// URL activity item.
    pub url: Option<String>,
    /// Title of the shared content.
    pub title: Option<String>,
    /// E-mail subject.
    pub subject: Option<String>,
    /// Activity types hidden from the sheet.
    pub excluded_activity_types: Vec<String>,
    /// Tint of the sheet.
    pub tint_color: Option<TintColor>,
}

impl ActivityRequest {
    /// Build the activity view data for validated content.
    #[must_use]
    pub fn new(content: Content, options: ShareOptions) -> Self {
        Self {
            message: content.message,
            url: content.url,
            title: content.title,
            subject: options.subject,
            excluded_activity_types: options.excluded_activity_types,
            tint_color: options.tint_color,
        }
    }
}

/// A request for a native share facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeRequest {
    /// Android share intent.
    Intent(IntentRequest),
    /// iOS activity view.
    ActivityView(ActivityRequest),
}

/// What the native share UI reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeOutcome {
    /// The user picked a target and the share completed.
    Completed {
        /// The chosen activity, when the platform reports one.
        activity_type: Option<String>,
    },
    /// The user closed the UI without sharing.
    Dismissed,
}

/// A native share facility.
///
/// The compiled-in implementation is [`SystemShare`]; hosts that drive the native
/// UI themselves, and tests, supply their own.
pub trait NativeShare: Send + Sync {
    /// Present the native UI for `request`.
    ///
    /// The returned future resolves once the UI reports completion.
    fn present(&self, request: NativeRequest) -> NativeFuture;
}

impl<T: NativeShare + ?Sized> NativeShare for &T {
    fn present(&self, request: NativeRequest) -> NativeFuture {
        (**self).present(request)
    }
}

/// The sending half of a native completion.
///
/// Resolves its paired future exactly once. Dropping it unresolved fails the
/// future with a [`ShareError::PlatformError`] instead of leaving it pending.
#[derive(Debug)]
pub struct NativeCompletion {
    sender: oneshot::Sender<Result<NativeOutcome, ShareError>>,
}

impl NativeCompletion {
    /// Create a completion and the future it resolves.
    #[must_use]
    pub fn channel() -> (Self, NativeFuture) {
        let (sender, receiver) = oneshot::channel();
        let outcome = receiver
            .map(|received| {
                received.unwrap_or_else(|_| {
                    Err(ShareError::PlatformError(
                        "share sheet closed without reporting a result".into(),
                    ))
                })
            })
            .boxed();
        (Self { sender }, outcome)
    }

    /// Report a completed share.
    pub fn completed(self, activity_type: Option<String>) {
        self.finish(Ok(NativeOutcome::Completed { activity_type }));
    }

    /// Report a dismissed share sheet.
    pub fn dismissed(self) {
        self.finish(Ok(NativeOutcome::Dismissed));
    }

    /// Report a native failure.
    pub fn failed(self, message: impl Into<String>) {
        self.finish(Err(ShareError::PlatformError(message.into())));
    }

    fn finish(self, outcome: Result<NativeOutcome, ShareError>) {
        // The receiver is gone if the caller dropped the pending share.
        let _ = self.sender.send(outcome);
    }
}

/// Presents share requests through a native facility on a given platform.
#[derive(Debug, Clone)]
pub struct Sharer<N = SystemShare> {
    platform: Platform,
    native: N,
}

impl Sharer {
    /// A sharer for the current platform using the compiled-in backend.
    #[must_use]
    pub fn system() -> Self {
        Self::new(Platform::current(), SystemShare::default())
    }
}

impl<N: NativeShare> Sharer<N> {
    /// A sharer dispatching on `platform` through `native`.
    pub const fn new(platform: Platform, native: N) -> Self {
        Self { platform, native }
    }

    /// The platform requests are dispatched on.
    pub const fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Open the share sheet.
    ///
    /// On Android the future always resolves with [`ShareAction::Shared`], since
    /// the chooser does not report dismissal. On iOS it resolves with
    /// [`ShareAction::Shared`] and the chosen activity type, or with
    /// [`ShareAction::Dismissed`].
    ///
    /// # Errors
    /// Returns [`ShareError::InvalidArgument`] if the content has neither a message
    /// nor a URL. The future fails with [`ShareError::UnsupportedPlatform`] on any
    /// platform other than iOS and Android.
    ///
    /// [`ShareAction::Shared`]: crate::ShareAction::Shared
    /// [`ShareAction::Dismissed`]: crate::ShareAction::Dismissed
    pub fn share(
        &self,
        content: Content,
        options: ShareOptions,
    ) -> Result<PendingShare, ShareError> {
        content.validate()?;

        let request = match &self.platform {
            Platform::Android => NativeRequest::Intent(IntentRequest::new(content, options)),
            Platform::Ios => NativeRequest::ActivityView(ActivityRequest::new(content, options)),
            Platform::Other(os) => {
                log::debug!("no share sheet on {os}");
                let error = ShareError::UnsupportedPlatform(os.clone());
                return Ok(future::ready(Err(error)).boxed());
            }
        };

        log::debug!("presenting share sheet on {}", self.platform);
        let platform = self.platform.clone();
        let outcome = self.native.present(request);

        Ok(async move { outcome.await.map(|outcome| normalize(&platform, outcome)) }.boxed())
    }

    /// Open the share sheet for loosely typed content and options.
    ///
    /// Checks run in order: content is an object, content has a string `url` or
    /// `message`, options are an object, and on Android the title is a string.
    ///
    /// # Errors
    /// Returns [`ShareError::InvalidArgument`] for the first check that fails; see
    /// [`Sharer::share`] for the errors of the returned future.
    pub fn share_value(
        &self,
        content: &Value,
        options: &Value,
    ) -> Result<PendingShare, ShareError> {
        let fields = ContentFields::parse(content)?;
        let options = ShareOptions::from_value(options)?;
        let content = fields.into_content(&self.platform)?;
        self.share(content, options)
    }
}

fn normalize(platform: &Platform, outcome: NativeOutcome) -> ShareResult {
    match (platform, outcome) {
        (Platform::Android, NativeOutcome::Dismissed) => {
            log::warn!("android share backend reported a dismissal; reporting as shared");
            ShareResult::shared()
        }
        (Platform::Android, NativeOutcome::Completed { .. }) => ShareResult::shared(),
        (_, NativeOutcome::Completed { activity_type }) => ShareResult {
            activity_type,
            ..ShareResult::shared()
        },
        (_, NativeOutcome::Dismissed) => ShareResult::dismissed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShareAction;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    struct RecordingShare {
        requests: Arc<Mutex<Vec<NativeRequest>>>,
        outcome: Result<NativeOutcome, ShareError>,
    }

    impl RecordingShare {
        fn new(outcome: Result<NativeOutcome, ShareError>) -> Self {
            Self {
                requests: Arc::default(),
                outcome,
            }
        }

        fn requests(&self) -> Vec<NativeRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl NativeShare for RecordingShare {
        fn present(&self, request: NativeRequest) -> NativeFuture {
            self.requests.lock().unwrap().push(request);
            future::ready(self.outcome.clone()).boxed()
        }
    }

    fn completed(activity_type: &str) -> Result<NativeOutcome, ShareError> {
        Ok(NativeOutcome::Completed {
            activity_type: Some(activity_type.to_string()),
        })
    }

    #[tokio::test]
    async fn android_always_resolves_shared() {
        for outcome in [completed("ignored"), Ok(NativeOutcome::Dismissed)] {
            let native = RecordingShare::new(outcome);
            let sharer = Sharer::new(Platform::Android, &native);

            let result = sharer
                .share(Content::message("hello"), ShareOptions::new())
                .unwrap()
                .await
                .unwrap();

            assert_eq!(result, ShareResult::shared());
        }
    }

    #[tokio::test]
    async fn android_builds_an_intent() {
        let native = RecordingShare::new(completed("x"));
        let sharer = Sharer::new(Platform::Android, &native);

        sharer
            .share(
                Content::message("hello").with_title("Greeting"),
                ShareOptions::new()
                    .with_dialog_title("Share via")
                    .with_subject("ignored on android"),
            )
            .unwrap()
            .await
            .unwrap();

        assert_eq!(
            native.requests(),
            vec![NativeRequest::Intent(IntentRequest {
                text: "hello".into(),
                title: Some("Greeting".into()),
                dialog_title: Some("Share via".into()),
            })]
        );
    }

    #[tokio::test]
    async fn android_falls_back_to_url_text() {
        let native = RecordingShare::new(completed("x"));
        let sharer = Sharer::new(Platform::Android, &native);

        sharer
            .share(Content::url("https://example.com"), ShareOptions::new())
            .unwrap()
            .await
            .unwrap();

        assert!(matches!(
            native.requests().as_slice(),
            [NativeRequest::Intent(IntentRequest { text, .. })] if text == "https://example.com"
        ));
    }

    #[tokio::test]
    async fn ios_reports_activity_type() {
        let native = RecordingShare::new(completed("com.apple.UIKit.activity.Mail"));
        let sharer = Sharer::new(Platform::Ios, &native);

        let result = sharer
            .share(
                Content::url("https://example.com").with_title("Example"),
                ShareOptions::new().with_subject("Check this out"),
            )
            .unwrap()
            .await
            .unwrap();

        assert_eq!(result.action, ShareAction::Shared);
        assert_eq!(result.activity_type.as_deref(), Some("com.apple.UIKit.activity.Mail"));
        assert_eq!(
            native.requests(),
            vec![NativeRequest::ActivityView(ActivityRequest {
                message: None,
                url: Some("https://example.com".into()),
                title: Some("Example".into()),
                subject: Some("Check this out".into()),
                excluded_activity_types: Vec::new(),
                tint_color: None,
            })]
        );
    }

    #[tokio::test]
    async fn ios_reports_dismissal() {
        let native = RecordingShare::new(Ok(NativeOutcome::Dismissed));
        let sharer = Sharer::new(Platform::Ios, &native);

        let result = sharer
            .share(Content::message("hi"), ShareOptions::new())
            .unwrap()
            .await
            .unwrap();

        assert_eq!(result, ShareResult::dismissed());
    }

    #[tokio::test]
    async fn native_failures_propagate_unmodified() {
        let error = ShareError::PlatformError("activity view unavailable".into());
        let native = RecordingShare::new(Err(error.clone()));
        let sharer = Sharer::new(Platform::Ios, &native);

        let result = sharer
            .share(Content::message("hi"), ShareOptions::new())
            .unwrap()
            .await;

        assert_eq!(result, Err(error));
    }

    #[tokio::test]
    async fn unknown_platform_rejects_without_presenting() {
        let native = RecordingShare::new(completed("x"));
        let sharer = Sharer::new(Platform::from("web"), &native);

        let pending = sharer.share(Content::message("hi"), ShareOptions::new()).unwrap();
        let error = pending.await.unwrap_err();

        assert_eq!(error, ShareError::UnsupportedPlatform("web".into()));
        assert!(error.to_string().contains("Unsupported platform"));
        assert!(native.requests().is_empty());
    }

    #[test]
    fn missing_payload_fails_synchronously_on_every_platform() {
        let native = RecordingShare::new(completed("x"));
        for platform in [Platform::Ios, Platform::Android, Platform::from("linux")] {
            let sharer = Sharer::new(platform, &native);
            assert!(matches!(
                sharer.share(Content::default().with_title("t"), ShareOptions::new()),
                Err(ShareError::InvalidArgument(_))
            ));
            assert!(matches!(
                sharer.share_value(&json!({}), &json!({})),
                Err(ShareError::InvalidArgument(_))
            ));
        }
        assert!(native.requests().is_empty());
    }

    #[test]
    fn share_value_checks_in_order() {
        let native = RecordingShare::new(completed("x"));
        let sharer = Sharer::new(Platform::Android, &native);

        let message = |content: Value, options: Value| {
            match sharer.share_value(&content, &options) {
                Err(ShareError::InvalidArgument(message)) => message,
                Err(other) => panic!("unexpected error {other}"),
                Ok(_) => panic!("expected a validation error"),
            }
        };

        assert_eq!(
            message(json!(null), json!(null)),
            "Content to share must be a valid object"
        );
        assert_eq!(
            message(json!({"title": 5}), json!(null)),
            "At least one of URL and message is required"
        );
        assert_eq!(
            message(json!({"message": "hi", "title": 5}), json!(null)),
            "Options must be a valid object"
        );
        assert_eq!(
            message(json!({"message": "hi", "title": 5}), json!({})),
            "Invalid title: title should be a string."
        );
    }

    #[tokio::test]
    async fn share_value_forwards_parsed_options_on_ios() {
        let native = RecordingShare::new(Ok(NativeOutcome::Dismissed));
        let sharer = Sharer::new(Platform::Ios, &native);

        sharer
            .share_value(
                &json!({"message": "hi", "title": 5}),
                &json!({"excludedActivityTypes": ["print"], "tintColor": "#ff0000"}),
            )
            .unwrap()
            .await
            .unwrap();

        assert_eq!(
            native.requests(),
            vec![NativeRequest::ActivityView(ActivityRequest {
                message: Some("hi".into()),
                url: None,
                title: None,
                subject: None,
                excluded_activity_types: vec!["print".into()],
                tint_color: Some(TintColor::rgb(255, 0, 0)),
            })]
        );
    }

    #[tokio::test]
    async fn completion_resolves_once() {
        let (completion, outcome) = NativeCompletion::channel();
        completion.completed(Some("com.apple.UIKit.activity.Message".into()));
        assert_eq!(
            outcome.await,
            completed("com.apple.UIKit.activity.Message")
        );

        let (completion, outcome) = NativeCompletion::channel();
        completion.failed("boom");
        assert_eq!(outcome.await, Err(ShareError::PlatformError("boom".into())));
    }

    #[tokio::test]
    async fn dropped_completion_does_not_hang() {
        let (completion, outcome) = NativeCompletion::channel();
        drop(completion);
        assert!(matches!(outcome.await, Err(ShareError::PlatformError(_))));
    }

    #[tokio::test]
    async fn concurrent_shares_are_independent() {
        struct Deferred(Mutex<Vec<NativeCompletion>>);

        impl NativeShare for Deferred {
            fn present(&self, _: NativeRequest) -> NativeFuture {
                let (completion, outcome) = NativeCompletion::channel();
                self.0.lock().unwrap().push(completion);
                outcome
            }
        }

        let native = Deferred(Mutex::new(Vec::new()));
        let sharer = Sharer::new(Platform::Ios, &native);

        let first = sharer.share(Content::message("one"), ShareOptions::new()).unwrap();
        let second = sharer.share(Content::message("two"), ShareOptions::new()).unwrap();

        let mut completions = native.0.lock().unwrap().drain(..).collect::<Vec<_>>();
        completions.pop().unwrap().dismissed();
        completions.pop().unwrap().completed(None);

        assert_eq!(first.await, Ok(ShareResult::shared()));
        assert_eq!(second.await, Ok(ShareResult::dismissed()));
    }
}
