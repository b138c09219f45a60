//! Per-category subscriber lists.
//!
//! Lists are mutated from arbitrary threads while the hook thread dispatches.
//! A dispatch works on a snapshot taken under the read lock, so callbacks may
//! subscribe or unsubscribe from inside a callback without deadlocking.

use crate::event::{
    EventCategory, HookEvent, KeyboardHookEvent, MouseHookEvent, MouseWheelHookEvent,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// A subscriber callback for events of type `T`.
pub type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Token returned by a subscribe call; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    category: EventCategory,
    id: u64,
}

impl Subscription {
    pub fn category(&self) -> EventCategory {
        self.category
    }
}

/// Insertion-ordered callbacks for one category.
pub(crate) struct Subscribers<T> {
    entries: RwLock<Vec<(u64, Callback<T>)>>,
}

impl<T> Subscribers<T> {
    fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    fn push(&self, id: u64, callback: Callback<T>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, callback));
    }

    fn remove(&self, id: u64) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    /// Callbacks registered right now, in registration order.
    ///
    /// An empty list does not allocate.
    pub(crate) fn snapshot(&self) -> Vec<Callback<T>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// All subscriber lists of one hook.
pub struct SubscriberRegistry {
    next_id: AtomicU64,
    pub(crate) hook_enabled: Subscribers<HookEvent>,
    pub(crate) hook_disabled: Subscribers<HookEvent>,
    pub(crate) key_typed: Subscribers<KeyboardHookEvent>,
    pub(crate) key_pressed: Subscribers<KeyboardHookEvent>,
    pub(crate) key_released: Subscribers<KeyboardHookEvent>,
    pub(crate) mouse_clicked: Subscribers<MouseHookEvent>,
    pub(crate) mouse_pressed: Subscribers<MouseHookEvent>,
    pub(crate) mouse_released: Subscribers<MouseHookEvent>,
    pub(crate) mouse_moved: Subscribers<MouseHookEvent>,
    pub(crate) mouse_dragged: Subscribers<MouseHookEvent>,
    pub(crate) mouse_wheel: Subscribers<MouseWheelHookEvent>,
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            hook_enabled: Subscribers::new(),
            hook_disabled: Subscribers::new(),
            key_typed: Subscribers::new(),
            key_pressed: Subscribers::new(),
            key_released: Subscribers::new(),
            mouse_clicked: Subscribers::new(),
            mouse_pressed: Subscribers::new(),
            mouse_released: Subscribers::new(),
            mouse_moved: Subscribers::new(),
            mouse_dragged: Subscribers::new(),
            mouse_wheel: Subscribers::new(),
        }
    }

    fn add<T>(
        &self,
        list: &Subscribers<T>,
        category: EventCategory,
        callback: Callback<T>,
    ) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        list.push(id, callback);
        debug!(%category, id, "Subscriber added");
        Subscription { category, id }
    }

    pub fn on_hook_enabled<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&HookEvent) + Send + Sync + 'static,
    {
        self.add(&self.hook_enabled, EventCategory::HookEnabled, Arc::new(callback))
    }

    pub fn on_hook_disabled<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&HookEvent) + Send + Sync + 'static,
    {
        self.add(&self.hook_disabled, EventCategory::HookDisabled, Arc::new(callback))
    }

    pub fn on_key_typed<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&KeyboardHookEvent) + Send + Sync + 'static,
    {
        self.add(&self.key_typed, EventCategory::KeyTyped, Arc::new(callback))
    }

    pub fn on_key_pressed<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&KeyboardHookEvent) + Send + Sync + 'static,
    {
        self.add(&self.key_pressed, EventCategory::KeyPressed, Arc::new(callback))
    }

    pub fn on_key_released<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&KeyboardHookEvent) + Send + Sync + 'static,
    {
        self.add(&self.key_released, EventCategory::KeyReleased, Arc::new(callback))
    }

    pub fn on_mouse_clicked<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&MouseHookEvent) + Send + Sync + 'static,
    {
        self.add(&self.mouse_clicked, EventCategory::MouseClicked, Arc::new(callback))
    }

    pub fn on_mouse_pressed<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&MouseHookEvent) + Send + Sync + 'static,
    {
        self.add(&self.mouse_pressed, EventCategory::MousePressed, Arc::new(callback))
    }

    pub fn on_mouse_released<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&MouseHookEvent) + Send + Sync + 'static,
    {
        self.add(&self.mouse_released, EventCategory::MouseReleased, Arc::new(callback))
    }

    pub fn on_mouse_moved<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&MouseHookEvent) + Send + Sync + 'static,
    {
        self.add(&self.mouse_moved, EventCategory::MouseMoved, Arc::new(callback))
    }

    pub fn on_mouse_dragged<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&MouseHookEvent) + Send + Sync + 'static,
    {
        self.add(&self.mouse_dragged, EventCategory::MouseDragged, Arc::new(callback))
    }

    pub fn on_mouse_wheel<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&MouseWheelHookEvent) + Send + Sync + 'static,
    {
        self.add(&self.mouse_wheel, EventCategory::MouseWheel, Arc::new(callback))
    }

    /// Remove a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let id = subscription.id;
        let removed = match subscription.category {
            EventCategory::HookEnabled => self.hook_enabled.remove(id),
            EventCategory::HookDisabled => self.hook_disabled.remove(id),
            EventCategory::KeyTyped => self.key_typed.remove(id),
            EventCategory::KeyPressed => self.key_pressed.remove(id),
            EventCategory::KeyReleased => self.key_released.remove(id),
            EventCategory::MouseClicked => self.mouse_clicked.remove(id),
            EventCategory::MousePressed => self.mouse_pressed.remove(id),
            EventCategory::MouseReleased => self.mouse_released.remove(id),
            EventCategory::MouseMoved => self.mouse_moved.remove(id),
            EventCategory::MouseDragged => self.mouse_dragged.remove(id),
            EventCategory::MouseWheel => self.mouse_wheel.remove(id),
        };
        debug!(category = %subscription.category, id, removed, "Subscriber removed");
        removed
    }

    /// Number of subscribers currently registered for `category`.
    pub fn subscriber_count(&self, category: EventCategory) -> usize {
        match category {
            EventCategory::HookEnabled => self.hook_enabled.len(),
            EventCategory::HookDisabled => self.hook_disabled.len(),
            EventCategory::KeyTyped => self.key_typed.len(),
            EventCategory::KeyPressed => self.key_pressed.len(),
            EventCategory::KeyReleased => self.key_released.len(),
            EventCategory::MouseClicked => self.mouse_clicked.len(),
            EventCategory::MousePressed => self.mouse_pressed.len(),
            EventCategory::MouseReleased => self.mouse_released.len(),
            EventCategory::MouseMoved => self.mouse_moved.len(),
            EventCategory::MouseDragged => self.mouse_dragged.len(),
            EventCategory::MouseWheel => self.mouse_wheel.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_snapshot_keeps_registration_order() {
        let registry = SubscriberRegistry::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for n in 0..3 {
            let order = order.clone();
            registry.on_mouse_moved(move |_: &MouseHookEvent| order.lock().unwrap().push(n));
        }

        let event = MouseHookEvent {
            time: 0,
            mask: Default::default(),
            button: Default::default(),
            clicks: 0,
            x: 1,
            y: 2,
        };
        for callback in registry.mouse_moved.snapshot() {
            callback(&event);
        }
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unsubscribe_only_touches_its_category() {
        let registry = SubscriberRegistry::new();
        let pressed = registry.on_key_pressed(|_: &KeyboardHookEvent| {});
        let released = registry.on_key_released(|_: &KeyboardHookEvent| {});

        assert_eq!(registry.subscriber_count(EventCategory::KeyPressed), 1);
        assert!(registry.unsubscribe(pressed));
        assert!(!registry.unsubscribe(pressed));
        assert_eq!(registry.subscriber_count(EventCategory::KeyPressed), 0);
        assert_eq!(registry.subscriber_count(EventCategory::KeyReleased), 1);
        assert_eq!(released.category(), EventCategory::KeyReleased);
    }

    #[test]
    fn test_removal_after_snapshot_does_not_affect_it() {
        let registry = SubscriberRegistry::new();
        let sub = registry.on_hook_enabled(|_: &HookEvent| {});
        let snapshot = registry.hook_enabled.snapshot();
        registry.unsubscribe(sub);
        assert_eq!(snapshot.len(), 1);
        assert!(registry.hook_enabled.snapshot().is_empty());
    }
}
