//! # Sharekit
//!
//! Access to the operating system's native share sheet for WaterUI applications.
//!
//! The share sheet is presented by `UIActivityViewController` on iOS and by an
//! `ACTION_SEND` chooser on Android. Other platforms have no native share sheet and
//! report an unsupported-platform error.
//!
//! ## Features
//!
//! - `share` (default): the share API, re-exported as [`share`].
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! sharekit = { version = "0.1", features = ["share"] }
//! ```
//!
//! ```rust,no_run
//! use sharekit::share::{self, Content, ShareAction, ShareOptions};
//!
//! async fn share_link() {
//!     let content = Content::url("https://example.com").with_title("Example");
//!     let options = ShareOptions::new().with_subject("Check this out");
//!
//!     let Ok(pending) = share::share(content, options) else {
//!         return;
//!     };
//!     if let Ok(result) = pending.await {
//!         if result.action == ShareAction::Shared {
//!             println!("Shared via {:?}", result.activity_type);
//!         }
//!     }
//! }
//! ```

#[cfg(feature = "share")]
pub use sharekit_share as share;
