//! Fallback for platforms without a native share sheet.

use futures::FutureExt;
use futures::future;

use crate::{NativeFuture, NativeRequest, NativeShare, ShareError};

/// Share backend for platforms without a share sheet. Every request fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShare;

impl NativeShare for SystemShare {
    fn present(&self, _request: NativeRequest) -> NativeFuture {
        let os = std::env::consts::OS.to_string();
        future::ready(Err(ShareError::UnsupportedPlatform(os))).boxed()
    }
}
