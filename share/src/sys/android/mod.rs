//! Android share sheet implementation using JNI.
//!
//! The `ACTION_SEND` chooser is started by `ShareHelper`, a Kotlin class shipped
//! as embedded DEX bytecode and loaded through a `DexClassLoader`.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use futures::FutureExt;
use futures::future;
use jni::objects::{GlobalRef, JClass, JObject, JValue};
use jni::{JNIEnv, JavaVM};

use crate::{
    Content, IntentRequest, NativeFuture, NativeOutcome, NativeRequest, NativeShare, ShareError,
    ShareOptions, ShareResult,
};

/// Embedded DEX bytecode containing the ShareHelper class.
static DEX_BYTES: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/classes.dex"));

/// Cached class loader for the embedded DEX.
static CLASS_LOADER: OnceLock<GlobalRef> = OnceLock::new();

const HELPER_CLASS: &str = "sharekit.share.ShareHelper";

fn jni_error(what: &str) -> impl FnOnce(jni::errors::Error) -> ShareError + '_ {
    move |e| {
        log::error!("JNI error {what}: {e}");
        ShareError::PlatformError(format!("JNI error {what}: {e}"))
    }
}

/// Clear a Java exception left pending by a failed call so the thread can keep
/// making JNI calls.
fn clear_pending_exception(env: &mut JNIEnv) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
}

/// Initialize the DEX class loader. Must be called with a valid Context.
///
/// # Errors
/// Returns [`ShareError::PlatformError`] if the DEX cannot be written or loaded.
pub fn init_with_context(env: &mut JNIEnv, context: &JObject) -> Result<(), ShareError> {
    if CLASS_LOADER.get().is_some() {
        return Ok(());
    }

    let cache_dir = env
        .call_method(context, "getCacheDir", "()Ljava/io/File;", &[])
        .and_then(|v| v.l())
        .map_err(jni_error("getCacheDir"))?;

    let cache_path = env
        .call_method(&cache_dir, "getAbsolutePath", "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
        .map_err(jni_error("getAbsolutePath"))?;

    let cache_path_str: String = env
        .get_string((&cache_path).into())
        .map_err(jni_error("get_string"))?
        .into();
    let dex_path = format!("{cache_path_str}/sharekit_share.dex");

    super::dex::write_read_only(Path::new(&dex_path), DEX_BYTES)?;

    let dex_path_jstring = env.new_string(&dex_path).map_err(jni_error("new_string"))?;

    let parent_loader = env
        .call_method(context, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
        .and_then(|v| v.l())
        .map_err(jni_error("getClassLoader"))?;

    let dex_class_loader_class = env
        .find_class("dalvik/system/DexClassLoader")
        .map_err(jni_error("find_class"))?;

    let class_loader = env
        .new_object(
            dex_class_loader_class,
            "(Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;Ljava/lang/ClassLoader;)V",
            &[
                JValue::Object(&dex_path_jstring),
                JValue::Object(&cache_path),
                JValue::Object(&JObject::null()),
                JValue::Object(&parent_loader),
            ],
        )
        .map_err(|e| {
            clear_pending_exception(env);
            jni_error("new DexClassLoader")(e)
        })?;

    let global_ref = env
        .new_global_ref(class_loader)
        .map_err(jni_error("new_global_ref"))?;

    let _ = CLASS_LOADER.set(global_ref);
    log::info!("Share helper class loader ready");
    Ok(())
}

fn get_helper_class<'a>(env: &mut JNIEnv<'a>) -> Result<JClass<'a>, ShareError> {
    let class_loader = CLASS_LOADER
        .get()
        .ok_or_else(|| ShareError::PlatformError("Class loader not initialized".into()))?;

    let helper_class_name = env
        .new_string(HELPER_CLASS)
        .map_err(jni_error("new_string name"))?;

    let helper_class = env
        .call_method(
            class_loader.as_obj(),
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&helper_class_name)],
        )
        .and_then(|v| v.l())
        .map_err(|e| {
            clear_pending_exception(env);
            jni_error("loadClass")(e)
        })?;

    Ok(helper_class.into())
}

fn optional_string<'a>(
    env: &mut JNIEnv<'a>,
    value: Option<&str>,
) -> Result<JObject<'a>, ShareError> {
    match value {
        Some(value) => env
            .new_string(value)
            .map(JObject::from)
            .map_err(jni_error("new_string")),
        None => Ok(JObject::null()),
    }
}

/// Start the share chooser for an intent request.
///
/// # Errors
/// Returns [`ShareError::PlatformError`] if any JNI call fails.
pub fn share_intent_with_context(
    env: &mut JNIEnv,
    context: &JObject,
    request: &IntentRequest,
) -> Result<(), ShareError> {
    init_with_context(env, context)?;
    let helper_class = get_helper_class(env)?;

    let text = env.new_string(&request.text).map_err(jni_error("new_string text"))?;
    let title = optional_string(env, request.title.as_deref())?;
    let dialog_title = optional_string(env, request.dialog_title.as_deref())?;

    env.call_static_method(
        helper_class,
        "share",
        "(Landroid/content/Context;Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;)V",
        &[
            JValue::Object(context),
            JValue::Object(&text),
            JValue::Object(&title),
            JValue::Object(&dialog_title),
        ],
    )
    .map_err(|e| {
        clear_pending_exception(env);
        jni_error("share")(e)
    })?;

    Ok(())
}

/// Validate `content` and open the share chooser with the given Context.
///
/// Resolves with [`ShareAction::Shared`](crate::ShareAction::Shared) once the
/// chooser has been started; Android does not report dismissal.
///
/// # Errors
/// Returns [`ShareError::InvalidArgument`] for content without a message or URL,
/// and [`ShareError::PlatformError`] if a JNI call fails.
pub fn share_with_context(
    env: &mut JNIEnv,
    context: &JObject,
    content: Content,
    options: ShareOptions,
) -> Result<ShareResult, ShareError> {
    content.validate()?;
    share_intent_with_context(env, context, &IntentRequest::new(content, options))?;
    Ok(ShareResult::shared())
}

#[derive(Debug)]
struct AndroidHost {
    vm: JavaVM,
    context: GlobalRef,
}

/// Starts the Android share chooser.
///
/// The default value has no Context and fails every request; build one with
/// [`SystemShare::from_context`] to share from async code.
#[derive(Debug, Clone, Default)]
pub struct SystemShare {
    host: Option<Arc<AndroidHost>>,
}

impl SystemShare {
    /// Capture the Java VM and a global reference to `context`.
    ///
    /// # Errors
    /// Returns [`ShareError::PlatformError`] if the references cannot be created.
    pub fn from_context(env: &mut JNIEnv, context: &JObject) -> Result<Self, ShareError> {
        let vm = env.get_java_vm().map_err(jni_error("get_java_vm"))?;
        let context = env.new_global_ref(context).map_err(jni_error("new_global_ref"))?;
        Ok(Self {
            host: Some(Arc::new(AndroidHost { vm, context })),
        })
    }

    fn start(&self, request: &IntentRequest) -> Result<NativeOutcome, ShareError> {
        let host = self.host.as_ref().ok_or_else(|| {
            ShareError::PlatformError(
                "Android: use SystemShare::from_context() or share_with_context() \
                 with JNIEnv and Context"
                    .into(),
            )
        })?;

        let mut env = host
            .vm
            .attach_current_thread()
            .map_err(jni_error("attach_current_thread"))?;
        share_intent_with_context(&mut env, host.context.as_obj(), request)?;

        Ok(NativeOutcome::Completed { activity_type: None })
    }
}

impl NativeShare for SystemShare {
    fn present(&self, request: NativeRequest) -> NativeFuture {
        let outcome = match request {
            NativeRequest::Intent(request) => self.start(&request),
            NativeRequest::ActivityView(_) => Err(ShareError::PlatformError(
                "activity views are only available on iOS".into(),
            )),
        };
        future::ready(outcome).boxed()
    }
}
