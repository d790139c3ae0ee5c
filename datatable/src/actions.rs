//! Bulk and per-row actions

use std::fmt;
use std::sync::Arc;

use crate::Key;

/// Visual weight of an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionVariant {
    Primary,
    #[default]
    Secondary,
    Success,
    Danger,
}

type BulkFn<T, R> = dyn Fn(&[&T], &[Key]) -> R + Send + Sync;
type BulkPredicate<T> = dyn Fn(&[&T]) -> bool + Send + Sync;

/// An operation over all selected rows, e.g. bulk delete.
///
/// `R` is whatever the action hands back to the caller, such as the names
/// of documents to delete.
pub struct BulkAction<T, R = ()> {
    pub key: String,
    pub label: String,
    pub variant: ActionVariant,
    run: Arc<BulkFn<T, R>>,
    disabled: Option<Arc<BulkPredicate<T>>>,
}

impl<T, R> BulkAction<T, R> {
    pub fn new<F>(key: impl Into<String>, label: impl Into<String>, run: F) -> Self
    where
        F: Fn(&[&T], &[Key]) -> R + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            label: label.into(),
            variant: ActionVariant::default(),
            run: Arc::new(run),
            disabled: None,
        }
    }

    pub fn variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Disables the action for some selections.
    pub fn disabled_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&[&T]) -> bool + Send + Sync + 'static,
    {
        self.disabled = Some(Arc::new(predicate));
        self
    }

    pub fn is_disabled(&self, rows: &[&T]) -> bool {
        self.disabled.as_ref().is_some_and(|predicate| predicate(rows))
    }

    pub(crate) fn invoke(&self, rows: &[&T], keys: &[Key]) -> R {
        (self.run)(rows, keys)
    }
}

impl<T, R> fmt::Debug for BulkAction<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkAction")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("variant", &self.variant)
            .finish()
    }
}

type RowFn<T, R> = dyn Fn(&T, usize) -> R + Send + Sync;
type RowPredicate<T> = dyn Fn(&T) -> bool + Send + Sync;

/// An operation on one row, e.g. view, edit or delete.
pub struct RowAction<T, R = ()> {
    pub key: String,
    pub label: String,
    pub variant: ActionVariant,
    run: Arc<RowFn<T, R>>,
    disabled: Option<Arc<RowPredicate<T>>>,
    hidden: Option<Arc<RowPredicate<T>>>,
}

impl<T, R> RowAction<T, R> {
    pub fn new<F>(key: impl Into<String>, label: impl Into<String>, run: F) -> Self
    where
        F: Fn(&T, usize) -> R + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            label: label.into(),
            variant: ActionVariant::default(),
            run: Arc::new(run),
            disabled: None,
            hidden: None,
        }
    }

    pub fn variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn disabled_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.disabled = Some(Arc::new(predicate));
        self
    }

    pub fn hidden_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.hidden = Some(Arc::new(predicate));
        self
    }

    pub fn is_disabled(&self, row: &T) -> bool {
        self.disabled.as_ref().is_some_and(|predicate| predicate(row))
    }

    pub fn is_hidden(&self, row: &T) -> bool {
        self.hidden.as_ref().is_some_and(|predicate| predicate(row))
    }

    /// Runs the action unless it is hidden or disabled for `row`.
    pub fn run(&self, row: &T, index: usize) -> Option<R> {
        if self.is_hidden(row) || self.is_disabled(row) {
            return None;
        }
        Some((self.run)(row, index))
    }
}

impl<T, R> fmt::Debug for RowAction<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowAction")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("variant", &self.variant)
            .finish()
    }
}

/// The actions that should be shown for `row`.
pub fn visible_actions<'a, T, R>(actions: &'a [RowAction<T, R>], row: &T) -> Vec<&'a RowAction<T, R>> {
    actions.iter().filter(|action| !action.is_hidden(row)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Order {
        name: &'static str,
        locked: bool,
    }

    #[test]
    fn test_row_action_guards() {
        let delete = RowAction::new("delete", "حذف", |order: &Order, _| order.name.to_string())
            .variant(ActionVariant::Danger)
            .disabled_when(|order| order.locked);
        let edit = RowAction::new("edit", "تعديل", |order: &Order, _| order.name.to_string())
            .hidden_when(|order| order.locked);

        let open = Order { name: "WO-1", locked: false };
        let locked = Order { name: "WO-2", locked: true };

        assert_eq!(delete.run(&open, 0).as_deref(), Some("WO-1"));
        assert_eq!(delete.run(&locked, 1), None);
        assert_eq!(edit.run(&locked, 1), None);

        let actions = vec![delete, edit];
        let shown: Vec<&str> = visible_actions(&actions, &locked).iter().map(|a| a.key.as_str()).collect();
        assert_eq!(shown, vec!["delete"]);
    }

    #[test]
    fn test_bulk_action_disabled_predicate() {
        let action = BulkAction::new("bulk-delete", "حذف المحدد", |rows: &[&Order], _: &[Key]| rows.len())
            .disabled_when(|rows| rows.iter().any(|o| o.locked));
        let a = Order { name: "a", locked: false };
        let b = Order { name: "b", locked: true };
        assert!(!action.is_disabled(&[&a]));
        assert!(action.is_disabled(&[&a, &b]));
        assert_eq!(action.invoke(&[&a], &[Key::from("a")]), 1);
    }
}
