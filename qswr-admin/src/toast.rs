//! Toast notifications.
//!
//! Commands raise toasts instead of printing status lines themselves; the
//! binary prints each one on stderr as it is raised.

use std::fmt;
use std::sync::Arc;
use std::sync::RwLock;
use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

/// How long a toast stays up unless given its own duration.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(5);

/// Toast notification kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    /// Marker printed in front of the title.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Info => "[i]",
            Self::Success => "[✓]",
            Self::Warning => "[!]",
            Self::Error => "[✗]",
        }
    }
}

/// A toast notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    /// Single line title.
    pub title: String,
    /// Optional body text.
    pub message: Option<String>,
    pub duration: Duration,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            message: None,
            duration: DEFAULT_TOAST_DURATION,
            created_at: Utc::now(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// `true` once the toast has been up for its whole duration.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let shown = now.signed_duration_since(self.created_at);
        shown.to_std().is_ok_and(|shown| shown >= self.duration)
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.marker(), self.title)?;
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

type Listener = dyn Fn(&Toast) + Send + Sync;

/// Shared queue of active toasts.
#[derive(Clone, Default)]
pub struct Toaster {
    toasts: Arc<RwLock<Vec<Toast>>>,
    listener: Option<Arc<Listener>>,
}

impl std::fmt::Debug for Toaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toaster")
            .field("toasts", &self.active())
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// A toaster that hands every toast to `listener` as it is raised.
    pub fn with_listener(listener: impl Fn(&Toast) + Send + Sync + 'static) -> Self {
        Self {
            toasts: Arc::default(),
            listener: Some(Arc::new(listener)),
        }
    }

    /// Queues a toast and returns its id.
    pub fn push(&self, toast: Toast) -> Uuid {
        let id = toast.id;
        match toast.kind {
            ToastKind::Error => log::error!("toast: {}", toast),
            ToastKind::Warning => log::warn!("toast: {}", toast),
            _ => log::info!("toast: {}", toast),
        }
        if let Some(listener) = &self.listener {
            listener(&toast);
        }
        if let Ok(mut toasts) = self.toasts.write() {
            toasts.push(toast);
        }
        id
    }

    pub fn info(&self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.push(Toast::new(ToastKind::Info, title).with_message(message))
    }

    pub fn success(&self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.push(Toast::new(ToastKind::Success, title).with_message(message))
    }

    pub fn warning(&self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.push(Toast::new(ToastKind::Warning, title).with_message(message))
    }

    pub fn error(&self, title: impl Into<String>, message: impl Into<String>) -> Uuid {
        self.push(Toast::new(ToastKind::Error, title).with_message(message))
    }

    /// Dismisses one toast. Returns `false` if it was already gone.
    pub fn remove(&self, id: Uuid) -> bool {
        let Ok(mut toasts) = self.toasts.write() else {
            return false;
        };
        let before = toasts.len();
        toasts.retain(|toast| toast.id != id);
        toasts.len() != before
    }

    pub fn clear(&self) {
        if let Ok(mut toasts) = self.toasts.write() {
            toasts.clear();
        }
    }

    /// Drops every toast whose duration has passed at `now`.
    pub fn prune_expired(&self, now: DateTime<Utc>) -> usize {
        let Ok(mut toasts) = self.toasts.write() else {
            return 0;
        };
        let before = toasts.len();
        toasts.retain(|toast| !toast.is_expired(now));
        before - toasts.len()
    }

    /// Toasts currently up, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        self.toasts
            .read()
            .map(|toasts| toasts.clone())
            .unwrap_or_default()
    }

    /// Removes and returns every queued toast.
    pub fn drain(&self) -> Vec<Toast> {
        self.toasts
            .write()
            .map(|mut toasts| std::mem::take(&mut *toasts))
            .unwrap_or_default()
    }

    pub fn has_errors(&self) -> bool {
        self.active().iter().any(|toast| toast.kind == ToastKind::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_and_remove() {
        let toaster = Toaster::new();
        let first = toaster.success("تم حذف المشروع بنجاح", "WO-1");
        toaster.error("خطأ في الصلاحيات", "لا تملك صلاحية الحذف");

        assert_eq!(toaster.active().len(), 2);
        assert!(toaster.has_errors());
        assert!(toaster.remove(first));
        assert!(!toaster.remove(first));
        assert_eq!(toaster.active()[0].kind, ToastKind::Error);

        toaster.clear();
        assert!(toaster.active().is_empty());
    }

    #[test]
    fn test_expiry() {
        let toaster = Toaster::new();
        toaster.info("a", "default duration");
        toaster.push(Toast::new(ToastKind::Warning, "b").with_duration(Duration::from_secs(30)));
        let created = toaster.active()[0].created_at;

        assert_eq!(toaster.prune_expired(created + chrono::Duration::seconds(4)), 0);
        assert_eq!(toaster.prune_expired(created + chrono::Duration::seconds(6)), 1);
        assert_eq!(toaster.active()[0].title, "b");
        assert_eq!(toaster.prune_expired(created + chrono::Duration::minutes(1)), 1);
    }

    #[test]
    fn test_display_and_drain() {
        let toaster = Toaster::new();
        toaster.success("تم تسجيل الدخول بنجاح", "ahmed@qswr.sa");
        let drained = toaster.drain();
        assert_eq!(drained[0].to_string(), "[✓] تم تسجيل الدخول بنجاح: ahmed@qswr.sa");
        assert!(toaster.active().is_empty());
    }

    #[test]
    fn test_listener_sees_each_toast() {
        let seen = Arc::new(RwLock::new(Vec::new()));
        let sink = seen.clone();
        let toaster = Toaster::with_listener(move |toast| {
            sink.write().unwrap().push(toast.to_string());
        });
        toaster.error("خطأ في الصلاحيات", "WO-1");
        toaster.info("a", "b");
        assert_eq!(
            *seen.read().unwrap(),
            vec!["[✗] خطأ في الصلاحيات: WO-1", "[i] a: b"]
        );
        assert_eq!(toaster.active().len(), 2);
    }

    #[test]
    fn test_clones_share_queue() {
        let toaster = Toaster::new();
        let handle = toaster.clone();
        handle.warning("w", "m");
        assert_eq!(toaster.active().len(), 1);
    }
}
