//! Notification sink
//!
//! The engine decides what changed; an observer decides what player
//! command that means.

use crate::types::{Notification, PropertyChange};

/// Receives property change notifications from the engine
pub trait GestureObserver {
    fn on_property_change(&mut self, change: PropertyChange, value: f32);
}

impl<F> GestureObserver for F
where
    F: FnMut(PropertyChange, f32),
{
    fn on_property_change(&mut self, change: PropertyChange, value: f32) {
        self(change, value)
    }
}

/// Observer that records every notification in order
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    notifications: Vec<Notification>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Notification kinds in order
    pub fn kinds(&self) -> Vec<PropertyChange> {
        self.notifications.iter().map(|n| n.kind).collect()
    }

    /// Sum of values for one notification kind
    pub fn total(&self, kind: PropertyChange) -> f32 {
        self.notifications
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.value)
            .sum()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Drain everything recorded so far
    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl GestureObserver for NotificationLog {
    fn on_property_change(&mut self, change: PropertyChange, value: f32) {
        self.notifications.push(Notification::new(change, value));
    }
}
