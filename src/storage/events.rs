//! Change notifications for the log store
//!
//! Views that show store data subscribe once and re-query when told which
//! collection changed. Events carry no payload beyond the collection.

use std::fmt;

use crate::storage::{DAILY_STEPS_KEY, GLUCOSE_LOGS_KEY, MEAL_LOGS_KEY, WEIGHT_LOGS_KEY};

/// The four independent collections owned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Glucose,
    Weight,
    Meals,
    Steps,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Glucose,
        Collection::Weight,
        Collection::Meals,
        Collection::Steps,
    ];

    /// Key the collection is persisted under
    pub fn storage_key(&self) -> &'static str {
        match self {
            Collection::Glucose => GLUCOSE_LOGS_KEY,
            Collection::Weight => WEIGHT_LOGS_KEY,
            Collection::Meals => MEAL_LOGS_KEY,
            Collection::Steps => DAILY_STEPS_KEY,
        }
    }

    /// What one record is called in user-facing messages
    pub fn item_label(&self) -> &'static str {
        match self {
            Collection::Glucose => "glucose log",
            Collection::Weight => "weight log",
            Collection::Meals => "logged item",
            Collection::Steps => "steps",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_key())
    }
}

/// Fired after a successful mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub collection: Collection,
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&ChangeEvent) + Send>;

/// Registered listeners, called in subscription order
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub_id, _)| *sub_id != id);
        self.listeners.len() != before
    }

    pub(crate) fn notify(&self, collection: Collection) {
        let event = ChangeEvent { collection };
        for (_, listener) in &self.listeners {
            listener(&event);
        }
    }
}
