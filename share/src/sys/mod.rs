//! Platform-specific share backends.
//!
//! Each backend exports a `SystemShare` type implementing
//! [`NativeShare`](crate::NativeShare).

#[cfg(target_os = "ios")]
/// iOS backend (`UIActivityViewController` through swift-bridge).
pub mod apple;
#[cfg(target_os = "ios")]
pub use apple::SystemShare;

#[cfg(target_os = "android")]
/// Android backend (`ACTION_SEND` chooser through JNI).
pub mod android;
#[cfg(target_os = "android")]
pub use android::SystemShare;

#[cfg(any(target_os = "android", test))]
mod dex;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
mod stub;
#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub use stub::SystemShare;
