//! The log store: four independent collections over a key-value backend
//!
//! Every mutation is a read-modify-write of the whole collection document.
//! Plain reads never fail: unreadable or corrupt data is logged and treated
//! as an empty collection, and a single entry that doesn't decode is skipped
//! without hiding its neighbours. Mutations are stricter. If the current
//! document can't be parsed as a list, or the new one can't be written, the
//! call fails with a "could not save" error and the stored document stays as
//! it was. Entries that don't decode are written back untouched.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::domain::validate::ensure_step_count;
use crate::domain::{
    DailySteps, GlucoseLog, Identified, LogId, LoggedItem, NewLoggedItem, WeightLog, WeightUnit,
};
use crate::storage::events::Observers;
use crate::storage::{ChangeEvent, Collection, KeyValueBackend, StorageError, SubscriptionId};

/// Local health-data store
pub struct LogStore {
    backend: Box<dyn KeyValueBackend>,
    clock: Box<dyn Clock>,
    observers: Observers,
}

impl LogStore {
    /// Create a store over `backend` using the system clock
    pub fn new<B: KeyValueBackend + 'static>(backend: B) -> Self {
        Self::with_clock(backend, SystemClock)
    }

    /// Create a store with an explicit clock
    pub fn with_clock<B, C>(backend: B, clock: C) -> Self
    where
        B: KeyValueBackend + 'static,
        C: Clock + 'static,
    {
        Self {
            backend: Box::new(backend),
            clock: Box::new(clock),
            observers: Observers::default(),
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Register a listener called after every successful mutation
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&ChangeEvent) + Send + 'static,
    {
        self.observers.subscribe(Box::new(listener))
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // Glucose logs

    /// All glucose readings, newest first
    pub fn glucose_logs(&self) -> Vec<GlucoseLog> {
        self.load_list(Collection::Glucose)
    }

    /// Record a reading taken now; its status is classified here, once
    pub fn add_glucose_log(&self, value: f64) -> Result<GlucoseLog, StorageError> {
        let log = GlucoseLog::new(value, self.clock.now().with_timezone(&Utc))?;
        let log = self.prepend(Collection::Glucose, log)?;
        debug!("Logged glucose {} mg/dL ({}) as {}", log.value, log.status, log.id);
        Ok(log)
    }

    pub fn delete_glucose_log(&self, id: &LogId) -> Result<bool, StorageError> {
        self.remove_by_id::<GlucoseLog>(Collection::Glucose, id)
    }

    /// The most recent reading, if any
    pub fn latest_glucose_log(&self) -> Option<GlucoseLog> {
        self.glucose_logs().into_iter().next()
    }

    // Weight logs

    /// All weight entries, newest first
    pub fn weight_logs(&self) -> Vec<WeightLog> {
        self.load_list(Collection::Weight)
    }

    pub fn add_weight_log(&self, value: f64, unit: WeightUnit) -> Result<WeightLog, StorageError> {
        let log = WeightLog::new(value, unit, self.clock.now().with_timezone(&Utc))?;
        let log = self.prepend(Collection::Weight, log)?;
        debug!("Logged weight {} {} as {}", log.value, log.unit, log.id);
        Ok(log)
    }

    pub fn delete_weight_log(&self, id: &LogId) -> Result<bool, StorageError> {
        self.remove_by_id::<WeightLog>(Collection::Weight, id)
    }

    pub fn latest_weight_log(&self) -> Option<WeightLog> {
        self.weight_logs().into_iter().next()
    }

    // Meal logs

    /// All logged meals and foods, newest first
    pub fn logged_items(&self) -> Vec<LoggedItem> {
        self.load_list(Collection::Meals)
    }

    pub fn add_logged_item(&self, item: NewLoggedItem) -> Result<LoggedItem, StorageError> {
        let item = LoggedItem::new(item, self.clock.now().with_timezone(&Utc))?;
        let item = self.prepend(Collection::Meals, item)?;
        debug!("Logged item '{}' ({} kcal) as {}", item.name, item.calories, item.id);
        Ok(item)
    }

    pub fn delete_logged_item(&self, id: &LogId) -> Result<bool, StorageError> {
        self.remove_by_id::<LoggedItem>(Collection::Meals, id)
    }

    // Daily steps

    /// Steps counted today
    ///
    /// A stored record from an earlier day is discarded on read and counts as
    /// zero.
    pub fn todays_steps(&self) -> u32 {
        let key = Collection::Steps.storage_key();
        let today = self.clock.today();

        let record = match self.read_document::<DailySteps>(key) {
            Ok(record) => record,
            Err(e) => {
                warn!("Failed to read today's steps, treating as 0: {}", e);
                return 0;
            }
        };

        match record {
            Some(record) if record.date == today => record.steps,
            Some(stale) => {
                debug!("Step record for {} is stale on {}, resetting", stale.date, today);
                if let Err(e) = self.backend.remove(key) {
                    warn!("Failed to clear stale step record: {}", e);
                }
                0
            }
            None => 0,
        }
    }

    /// Add steps to today's total and return the new total
    pub fn add_steps(&self, steps: u32) -> Result<u32, StorageError> {
        let steps = ensure_step_count(u64::from(steps))?;
        let today = self.clock.today();

        let record = DailySteps::new(today, self.todays_steps()).add(today, steps);
        self.write_document(Collection::Steps.storage_key(), &record)
            .map_err(|e| StorageError::save(Collection::Steps.item_label(), e))?;

        debug!("Added {} steps, total for {} is {}", steps, today, record.steps);
        self.observers.notify(Collection::Steps);
        Ok(record.steps)
    }

    // Whole-store operations

    /// Remove every collection from storage
    pub fn reset_all(&self) -> Result<(), StorageError> {
        for collection in Collection::ALL {
            self.backend
                .remove(collection.storage_key())
                .map_err(|e| StorageError::Reset {
                    source: Box::new(e),
                })?;
        }

        tracing::info!("All health logs removed");
        for collection in Collection::ALL {
            self.observers.notify(collection);
        }
        Ok(())
    }

    /// Whether anything has ever been stored for `collection`
    pub fn has_collection(&self, collection: Collection) -> Result<bool, StorageError> {
        Ok(self.backend.get(collection.storage_key())?.is_some())
    }

    /// Overwrite a whole list collection (used by the seeder)
    pub(crate) fn replace_collection<T: Serialize>(
        &self,
        collection: Collection,
        items: &[T],
    ) -> Result<(), StorageError> {
        self.write_document(collection.storage_key(), items)
            .map_err(|e| StorageError::save(collection.item_label(), e))?;
        self.observers.notify(collection);
        Ok(())
    }

    // Helpers

    fn read_document<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn write_document<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        self.backend.set(key, &json)
    }

    /// The collection as raw JSON entries; fails only when the document itself is unreadable
    fn read_entries(&self, collection: Collection) -> Result<Vec<Value>, StorageError> {
        Ok(self
            .read_document::<Vec<Value>>(collection.storage_key())?
            .unwrap_or_default())
    }

    /// Lenient read for display paths
    fn load_list<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        let entries = match self.read_entries(collection) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to read {}, treating as empty: {}", collection, e);
                return Vec::new();
            }
        };

        entries
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| match T::deserialize(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(
                        "Skipping unreadable {} at position {} in {}: {}",
                        collection.item_label(),
                        position,
                        collection,
                        e
                    );
                    None
                }
            })
            .collect()
    }

    fn prepend<T: Serialize>(&self, collection: Collection, entry: T) -> Result<T, StorageError> {
        let label = collection.item_label();
        let mut entries = self
            .read_entries(collection)
            .map_err(|e| StorageError::save(label, e))?;

        let value = serde_json::to_value(&entry).map_err(|e| StorageError::save(label, e.into()))?;
        entries.insert(0, value);
        self.write_document(collection.storage_key(), &entries)
            .map_err(|e| StorageError::save(label, e))?;

        self.observers.notify(collection);
        Ok(entry)
    }

    /// Remove the entry with `id`; returns whether one was found
    ///
    /// Entries that don't decode as `T` can't match and are kept.
    fn remove_by_id<T>(&self, collection: Collection, id: &LogId) -> Result<bool, StorageError>
    where
        T: DeserializeOwned + Identified,
    {
        let label = collection.item_label();
        let mut entries = self
            .read_entries(collection)
            .map_err(|e| StorageError::delete(label, e))?;

        let before = entries.len();
        entries.retain(|entry| !matches!(T::deserialize(entry), Ok(item) if item.log_id() == id));
        if entries.len() == before {
            debug!("No {} with id {}, nothing to delete", label, id);
            return Ok(false);
        }

        self.write_document(collection.storage_key(), &entries)
            .map_err(|e| StorageError::delete(label, e))?;

        debug!("Deleted {} {}", label, id);
        self.observers.notify(collection);
        Ok(true)
    }
}
