use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::chart::ChartHandle;
use crate::core::SeriesIndex;

/// Chart lifecycle points a callback can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartHook {
    /// Fired after the chart's dataset was replaced.
    SetData,
    /// Fired after a series' display options changed.
    SetSeries,
}

/// Display options carried by a `SetSeries` notification.
///
/// A present `focus` marks a hover/focus-only change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeriesChange {
    #[serde(default)]
    pub show: Option<bool>,
    #[serde(default)]
    pub focus: Option<bool>,
}

impl SeriesChange {
    #[must_use]
    pub fn show(show: bool) -> Self {
        Self {
            show: Some(show),
            focus: None,
        }
    }

    #[must_use]
    pub fn focus(focus: bool) -> Self {
        Self {
            show: None,
            focus: Some(focus),
        }
    }

    #[must_use]
    pub fn is_focus_change(self) -> bool {
        self.focus.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HookEvent {
    SetData,
    SetSeries {
        index: SeriesIndex,
        change: SeriesChange,
    },
}

impl HookEvent {
    #[must_use]
    pub fn hook(self) -> ChartHook {
        match self {
            Self::SetData => ChartHook::SetData,
            Self::SetSeries { .. } => ChartHook::SetSeries,
        }
    }
}

pub type HookCallback = Rc<dyn Fn(&mut dyn ChartHandle, HookEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

struct HookEntry {
    hook: ChartHook,
    callback: HookCallback,
}

#[derive(Default)]
struct HookTable {
    next_id: u64,
    entries: IndexMap<HookId, HookEntry>,
}

/// Callback table owned by a chart.
///
/// Clones share the same table, so a registry also serves as the chart's
/// identity: two handles are the same chart when their registries are.
/// Callbacks fire in registration order and may re-enter the chart, which can
/// dispatch again while an outer dispatch is still running.
#[derive(Clone, Default)]
pub struct HookRegistry {
    table: Rc<RefCell<HookTable>>,
}

impl HookRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for `hook`. The callback stays registered until
    /// the returned disposer is disposed or dropped.
    #[must_use = "dropping the disposer unregisters the hook immediately"]
    pub fn add<F>(&self, hook: ChartHook, callback: F) -> HookDisposer
    where
        F: Fn(&mut dyn ChartHandle, HookEvent) + 'static,
    {
        let mut table = self.table.borrow_mut();
        let id = HookId(table.next_id);
        table.next_id += 1;
        table.entries.insert(
            id,
            HookEntry {
                hook,
                callback: Rc::new(callback),
            },
        );
        HookDisposer {
            table: Rc::downgrade(&self.table),
            id: Some(id),
        }
    }

    /// Invokes every callback registered for the event's hook and returns how
    /// many ran.
    ///
    /// The table is snapshotted before invocation, so callbacks may register,
    /// dispose or trigger nested dispatches.
    pub fn dispatch(&self, chart: &mut dyn ChartHandle, event: HookEvent) -> usize {
        let hook = event.hook();
        let callbacks: SmallVec<[HookCallback; 4]> = self
            .table
            .borrow()
            .entries
            .values()
            .filter(|entry| entry.hook == hook)
            .map(|entry| Rc::clone(&entry.callback))
            .collect();
        for callback in &callbacks {
            callback(&mut *chart, event);
        }
        callbacks.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn count(&self, hook: ChartHook) -> usize {
        self.table
            .borrow()
            .entries
            .values()
            .filter(|entry| entry.hook == hook)
            .count()
    }

    #[must_use]
    pub fn same_registry(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.table, &other.table)
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("registered", &self.len())
            .finish()
    }
}

/// Unregisters one hook when disposed or dropped.
///
/// Holds only a weak reference, so it never keeps a dropped chart alive.
#[derive(Debug)]
pub struct HookDisposer {
    table: Weak<RefCell<HookTable>>,
    id: Option<HookId>,
}

impl HookDisposer {
    #[must_use]
    pub fn id(&self) -> Option<HookId> {
        self.id
    }

    /// Whether this disposer belongs to `registry`.
    #[must_use]
    pub fn is_registered_with(&self, registry: &HookRegistry) -> bool {
        Weak::ptr_eq(&self.table, &Rc::downgrade(&registry.table))
    }

    pub fn dispose(mut self) {
        self.unregister();
    }

    fn unregister(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(table) = self.table.upgrade() {
            table.borrow_mut().entries.shift_remove(&id);
        }
    }
}

impl Drop for HookDisposer {
    fn drop(&mut self) {
        self.unregister();
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartHook, HookRegistry, SeriesChange};

    #[test]
    fn disposer_removes_only_its_own_entry() {
        let registry = HookRegistry::new();
        let first = registry.add(ChartHook::SetData, |_, _| {});
        let second = registry.add(ChartHook::SetSeries, |_, _| {});
        assert_eq!(registry.len(), 2);

        first.dispose();
        assert_eq!(registry.count(ChartHook::SetData), 0);
        assert_eq!(registry.count(ChartHook::SetSeries), 1);

        drop(second);
        assert!(registry.is_empty());
    }

    #[test]
    fn disposer_outliving_registry_is_harmless() {
        let registry = HookRegistry::new();
        let disposer = registry.add(ChartHook::SetData, |_, _| {});
        drop(registry);
        disposer.dispose();
    }

    #[test]
    fn registry_identity_follows_clones() {
        let registry = HookRegistry::new();
        let clone = registry.clone();
        let other = HookRegistry::new();
        let disposer = registry.add(ChartHook::SetData, |_, _| {});

        assert!(registry.same_registry(&clone));
        assert!(!registry.same_registry(&other));
        assert!(disposer.is_registered_with(&clone));
        assert!(!disposer.is_registered_with(&other));
    }

    #[test]
    fn focus_flag_presence_marks_focus_change() {
        assert!(SeriesChange::focus(false).is_focus_change());
        assert!(!SeriesChange::show(false).is_focus_change());
    }
}
