//! Panic containment for table rendering

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::panic::UnwindSafe;
use std::panic::catch_unwind;

/// Title shown when a table failed to render.
pub const BOUNDARY_TITLE: &str = "حدث خطأ في جدول البيانات";
/// Body text shown when a table failed to render.
pub const BOUNDARY_MESSAGE: &str =
    "عذراً، حدث خطأ غير متوقع أثناء عرض البيانات. يرجى المحاولة مرة أخرى أو إعادة تحميل الصفحة.";
/// Label of the retry affordance.
pub const BOUNDARY_RETRY: &str = "إعادة المحاولة";

/// Outcome of a guarded render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundary<V> {
    Rendered(V),
    Failed(BoundaryFailure),
}

/// The fallback view of a failed render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryFailure {
    pub title: String,
    pub message: String,
    pub retry_hint: String,
    /// The panic message, only in debug builds.
    pub detail: Option<String>,
}

impl BoundaryFailure {
    fn from_panic(panic: &Box<dyn Any + Send>) -> Self {
        let raw = extract_panic_message(panic);
        log::error!("table render panicked: {}", raw);
        Self {
            title: BOUNDARY_TITLE.to_string(),
            message: BOUNDARY_MESSAGE.to_string(),
            retry_hint: BOUNDARY_RETRY.to_string(),
            detail: cfg!(debug_assertions).then_some(raw),
        }
    }
}

impl<V> Boundary<V> {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn rendered(self) -> Option<V> {
        match self {
            Self::Rendered(value) => Some(value),
            Self::Failed(_) => None,
        }
    }
}

/// Catches panics raised while rendering a table and turns them into a
/// fallback view. Retrying is simply rendering again.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorBoundary;

impl ErrorBoundary {
    pub fn render<V, F>(f: F) -> Boundary<V>
    where
        F: FnOnce() -> V + UnwindSafe,
    {
        match catch_unwind(f) {
            Ok(value) => Boundary::Rendered(value),
            Err(panic) => Boundary::Failed(BoundaryFailure::from_panic(&panic)),
        }
    }

    /// Like [`ErrorBoundary::render`] for closures that borrow mutable or
    /// interior-mutable state. The caller accepts that such state may be
    /// left half-updated after a panic.
    pub fn render_mut<V, F>(f: F) -> Boundary<V>
    where
        F: FnOnce() -> V,
    {
        Self::render(AssertUnwindSafe(f))
    }
}

/// Extract a human-readable message from a panic payload.
///
/// Panics can contain either `&str` or `String` payloads. This function
/// attempts to extract either, falling back to a generic message.
pub fn extract_panic_message(panic: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
