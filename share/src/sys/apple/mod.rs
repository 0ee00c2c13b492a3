//! iOS share sheet implementation using swift-bridge.

use futures::FutureExt;
use futures::future;

use crate::{
    ActivityRequest, NativeCompletion, NativeFuture, NativeRequest, NativeShare, ShareError,
};

#[allow(clippy::too_many_arguments)]
#[swift_bridge::bridge]
mod ffi {
    extern "Rust" {
        type ShareCallback;
        fn on_completed(self, activity_type: Option<String>);
        fn on_dismissed(self);
        fn on_error(self, message: String);
    }

    extern "Swift" {
        fn share_sheet_present(
            message: Option<String>,
            url: Option<String>,
            title: Option<String>,
            subject: Option<String>,
            excluded_activity_types: String,
            has_tint_color: bool,
            tint_rgba: u32,
            callback: ShareCallback,
        );
    }
}

/// Receives the activity view's completion handler.
#[derive(Debug)]
pub struct ShareCallback {
    completion: NativeCompletion,
}

impl ShareCallback {
    fn on_completed(self, activity_type: Option<String>) {
        self.completion.completed(activity_type);
    }

    fn on_dismissed(self) {
        self.completion.dismissed();
    }

    fn on_error(self, message: String) {
        log::error!("share sheet failed: {message}");
        self.completion.failed(message);
    }
}

/// Presents `UIActivityViewController` from the key window's top view controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShare;

impl NativeShare for SystemShare {
    fn present(&self, request: NativeRequest) -> NativeFuture {
        match request {
            NativeRequest::ActivityView(request) => present_activity_view(request),
            NativeRequest::Intent(_) => future::ready(Err(ShareError::PlatformError(
                "share intents are only available on Android".into(),
            )))
            .boxed(),
        }
    }
}

fn present_activity_view(request: ActivityRequest) -> NativeFuture {
    let (completion, outcome) = NativeCompletion::channel();
    let tint = request.tint_color.map(crate::TintColor::to_rgba_u32);

    // Activity type identifiers never contain newlines.
    let excluded = request.excluded_activity_types.join("\n");

    ffi::share_sheet_present(
        request.message,
        request.url,
        request.title,
        request.subject,
        excluded,
        tint.is_some(),
        tint.unwrap_or_default(),
        ShareCallback { completion },
    );

    outcome
}
