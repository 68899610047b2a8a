//! Calorie ledger: meals and workouts against a daily limit.
//!
//! [`CalorieTracker`] owns the in-memory copy of everything the store holds
//! and writes every change straight through to it. After construction the
//! store is never read again.

use crate::errors::StoreError;
use crate::models::{Record, RecordKind};
use crate::storage::{Store, StoreKey};
use tracing::{debug, warn};
use uuid::Uuid;

pub const DEFAULT_CALORIE_LIMIT: i64 = 2000;

#[derive(Debug)]
pub struct CalorieTracker<S> {
    store: S,
    calorie_limit: i64,
    total_calories: i64,
    meals: Vec<Record>,
    workouts: Vec<Record>,
}

impl<S: Store> CalorieTracker<S> {
    /// Loads limit, total and both collections from `store`.
    ///
    /// A stored total that disagrees with the stored collections is replaced
    /// by the recomputed one.
    pub fn new(store: S) -> Self {
        let calorie_limit = store.get_number(StoreKey::CalorieLimit, DEFAULT_CALORIE_LIMIT);
        let stored_total = store.get_number(StoreKey::TotalCalories, 0);
        let meals = store.get_records(StoreKey::Meals);
        let workouts = store.get_records(StoreKey::Workouts);

        let total_calories = sum_calories(&meals).saturating_sub(sum_calories(&workouts));
        if total_calories != stored_total {
            warn!(stored_total, total_calories, "stored total out of step, recomputed");
        }
        debug!(
            calorie_limit,
            total_calories,
            meals = meals.len(),
            workouts = workouts.len(),
            "loaded tracker"
        );

        Self {
            store,
            calorie_limit,
            total_calories,
            meals,
            workouts,
        }
    }

    pub fn add_meal(&mut self, meal: Record) -> Result<(), StoreError> {
        self.add(RecordKind::Meal, meal)
    }

    pub fn add_workout(&mut self, workout: Record) -> Result<(), StoreError> {
        self.add(RecordKind::Workout, workout)
    }

    /// Removes the meal with `id`. An unknown id changes nothing and returns
    /// `Ok(None)`.
    pub fn remove_meal(&mut self, id: Uuid) -> Result<Option<Record>, StoreError> {
        self.remove(RecordKind::Meal, id)
    }

    pub fn remove_workout(&mut self, id: Uuid) -> Result<Option<Record>, StoreError> {
        self.remove(RecordKind::Workout, id)
    }

    /// Replaces the daily limit. Range checks belong to the caller.
    pub fn set_limit(&mut self, calorie_limit: i64) -> Result<(), StoreError> {
        debug!(calorie_limit, "set limit");
        self.calorie_limit = calorie_limit;
        self.store.set_number(StoreKey::CalorieLimit, calorie_limit)
    }

    /// Drops every meal and workout and zeroes the total. The limit stays.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        debug!("reset tracker");
        self.total_calories = 0;
        self.meals.clear();
        self.workouts.clear();
        self.store.clear_keys(&[
            StoreKey::TotalCalories,
            StoreKey::Meals,
            StoreKey::Workouts,
        ])
    }

    pub fn calorie_limit(&self) -> i64 {
        self.calorie_limit
    }

    pub fn total_calories(&self) -> i64 {
        self.total_calories
    }

    pub fn meals(&self) -> &[Record] {
        &self.meals
    }

    pub fn workouts(&self) -> &[Record] {
        &self.workouts
    }

    pub fn records(&self, kind: RecordKind) -> &[Record] {
        match kind {
            RecordKind::Meal => &self.meals,
            RecordKind::Workout => &self.workouts,
        }
    }

    /// Records of `kind` whose name contains `query`, ignoring case. An empty
    /// query matches everything.
    pub fn filter(&self, kind: RecordKind, query: &str) -> Vec<&Record> {
        self.records(kind)
            .iter()
            .filter(|record| record.matches(query))
            .collect()
    }

    pub fn consumed(&self) -> i64 {
        sum_calories(&self.meals)
    }

    pub fn burned(&self) -> i64 {
        sum_calories(&self.workouts)
    }

    pub fn remaining(&self) -> i64 {
        self.calorie_limit.saturating_sub(self.total_calories)
    }

    pub fn is_over_limit(&self) -> bool {
        self.remaining() <= 0
    }

    /// Share of the limit used so far, never above `1.0`.
    ///
    /// A limit of zero or less counts as already saturated.
    pub fn progress_fraction(&self) -> f64 {
        if self.calorie_limit <= 0 {
            return 1.0;
        }
        (self.total_calories as f64 / self.calorie_limit as f64).min(1.0)
    }

    fn add(&mut self, kind: RecordKind, record: Record) -> Result<(), StoreError> {
        debug!(kind = kind.label(), id = %record.id, calories = record.calories, "add record");
        self.total_calories = self
            .total_calories
            .saturating_add(kind.sign() * i64::from(record.calories));
        self.records_mut(kind).push(record.clone());
        self.store
            .set_number(StoreKey::TotalCalories, self.total_calories)?;
        self.store.append_record(StoreKey::records(kind), &record)
    }

    fn remove(&mut self, kind: RecordKind, id: Uuid) -> Result<Option<Record>, StoreError> {
        let Some(index) = self.records(kind).iter().position(|record| record.id == id) else {
            debug!(kind = kind.label(), %id, "remove skipped, no such record");
            return Ok(None);
        };

        let record = self.records_mut(kind).remove(index);
        debug!(kind = kind.label(), %id, calories = record.calories, "remove record");
        self.total_calories = self
            .total_calories
            .saturating_sub(kind.sign() * i64::from(record.calories));
        self.store
            .set_number(StoreKey::TotalCalories, self.total_calories)?;
        self.store.remove_record(StoreKey::records(kind), id)?;
        Ok(Some(record))
    }

    fn records_mut(&mut self, kind: RecordKind) -> &mut Vec<Record> {
        match kind {
            RecordKind::Meal => &mut self.meals,
            RecordKind::Workout => &mut self.workouts,
        }
    }
}

fn sum_calories(records: &[Record]) -> i64 {
    records
        .iter()
        .fold(0i64, |sum, record| sum.saturating_add(i64::from(record.calories)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn tracker() -> CalorieTracker<MemoryStore> {
        CalorieTracker::new(MemoryStore::new())
    }

    /// Reads through to memory; writes fail once `fail_writes` is set.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: bool,
    }

    impl FlakyStore {
        fn check(&self) -> Result<(), StoreError> {
            if self.fail_writes {
                return Err(StoreError::Io(std::io::Error::other("disk full")));
            }
            Ok(())
        }
    }

    impl Store for FlakyStore {
        fn get_number(&self, key: StoreKey, default: i64) -> i64 {
            self.inner.get_number(key, default)
        }

        fn set_number(&mut self, key: StoreKey, value: i64) -> Result<(), StoreError> {
            self.check()?;
            self.inner.set_number(key, value)
        }

        fn get_records(&self, key: StoreKey) -> Vec<Record> {
            self.inner.get_records(key)
        }

        fn append_record(&mut self, key: StoreKey, record: &Record) -> Result<(), StoreError> {
            self.check()?;
            self.inner.append_record(key, record)
        }

        fn remove_record(&mut self, key: StoreKey, id: Uuid) -> Result<(), StoreError> {
            self.check()?;
            self.inner.remove_record(key, id)
        }

        fn clear_keys(&mut self, keys: &[StoreKey]) -> Result<(), StoreError> {
            self.check()?;
            self.inner.clear_keys(keys)
        }
    }

    fn assert_balanced(tracker: &CalorieTracker<MemoryStore>) {
        assert_eq!(
            tracker.total_calories(),
            tracker.consumed() - tracker.burned()
        );
    }

    #[test]
    fn empty_store_uses_defaults() {
        let tracker = tracker();
        assert_eq!(tracker.calorie_limit(), 2000);
        assert_eq!(tracker.total_calories(), 0);
        assert!(tracker.meals().is_empty());
        assert!(tracker.workouts().is_empty());
    }

    #[test]
    fn stale_stored_total_is_recomputed() {
        let mut store = MemoryStore::new();
        store.set_number(StoreKey::TotalCalories, 999).unwrap();
        store
            .append_record(StoreKey::Meals, &Record::new("Soup", 180))
            .unwrap();

        let tracker = CalorieTracker::new(store);
        assert_eq!(tracker.total_calories(), 180);
    }

    #[test]
    fn failed_write_is_reported_and_memory_stays_balanced() {
        let mut tracker = CalorieTracker::new(FlakyStore::default());
        let oats = Record::new("Oats", 150);
        tracker.add_meal(oats.clone()).unwrap();
        tracker.store.fail_writes = true;

        let err = tracker.add_meal(Record::new("Eggs", 300)).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert_eq!(tracker.meals().len(), 2);
        assert_eq!(tracker.total_calories(), 450);
        assert_eq!(tracker.total_calories(), tracker.consumed() - tracker.burned());

        assert!(tracker.remove_meal(oats.id).is_err());
        assert_eq!(tracker.total_calories(), 300);
        assert_eq!(tracker.total_calories(), tracker.consumed() - tracker.burned());

        assert!(tracker.reset().is_err());
        assert_eq!(tracker.total_calories(), 0);
        assert!(tracker.meals().is_empty());
    }

    #[test]
    fn huge_stored_limit_does_not_overflow() {
        let mut store = MemoryStore::new();
        store.set_number(StoreKey::CalorieLimit, i64::MAX).unwrap();
        let mut tracker = CalorieTracker::new(store);
        tracker.add_workout(Record::new("Run", 1)).unwrap();

        assert_eq!(tracker.remaining(), i64::MAX);
        assert!(!tracker.is_over_limit());

        tracker.set_limit(i64::MIN).unwrap();
        tracker.add_meal(Record::new("Cake", 10)).unwrap();
        assert_eq!(tracker.remaining(), i64::MIN);
        assert!(tracker.is_over_limit());
    }

    #[test]
    fn meal_and_workout_totals() {
        let mut tracker = tracker();
        tracker.add_meal(Record::new("Eggs", 300)).unwrap();
        tracker.add_workout(Record::new("Run", 250)).unwrap();

        assert_eq!(tracker.consumed(), 300);
        assert_eq!(tracker.burned(), 250);
        assert_eq!(tracker.total_calories(), 50);
        assert_eq!(tracker.remaining(), tracker.calorie_limit() - 50);
    }

    #[test]
    fn total_stays_balanced_through_adds_and_removes() {
        let mut tracker = tracker();
        let breakfast = Record::new("Breakfast", 450);
        let lunch = Record::new("Lunch", 700);
        let swim = Record::new("Swim", 320);

        tracker.add_meal(breakfast.clone()).unwrap();
        assert_balanced(&tracker);
        tracker.add_workout(swim.clone()).unwrap();
        assert_balanced(&tracker);
        tracker.add_meal(lunch).unwrap();
        assert_balanced(&tracker);
        tracker.remove_meal(breakfast.id).unwrap();
        assert_balanced(&tracker);
        tracker.remove_workout(swim.id).unwrap();
        assert_balanced(&tracker);

        assert_eq!(tracker.total_calories(), 700);
    }

    #[test]
    fn total_does_not_depend_on_order() {
        let mut first = tracker();
        first.add_meal(Record::new("A", 300)).unwrap();
        first.add_workout(Record::new("B", 100)).unwrap();

        let mut second = tracker();
        second.add_workout(Record::new("B", 100)).unwrap();
        second.add_meal(Record::new("A", 300)).unwrap();

        assert_eq!(first.total_calories(), 200);
        assert_eq!(second.total_calories(), 200);
    }

    #[test]
    fn removing_twice_is_the_same_as_once() {
        let mut tracker = tracker();
        let meal = Record::new("Eggs", 300);
        tracker.add_meal(meal.clone()).unwrap();
        tracker.add_meal(Record::new("Toast", 120)).unwrap();

        assert_eq!(tracker.remove_meal(meal.id).unwrap(), Some(meal.clone()));
        assert_eq!(tracker.remove_meal(meal.id).unwrap(), None);
        assert_eq!(tracker.total_calories(), 120);
        assert_eq!(tracker.meals().len(), 1);
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut tracker = tracker();
        tracker.add_workout(Record::new("Row", 200)).unwrap();

        assert_eq!(tracker.remove_workout(Uuid::new_v4()).unwrap(), None);
        assert_eq!(tracker.total_calories(), -200);
        assert_eq!(tracker.workouts().len(), 1);
    }

    #[test]
    fn meal_id_does_not_remove_workout() {
        let mut tracker = tracker();
        let run = Record::new("Run", 250);
        tracker.add_workout(run.clone()).unwrap();

        assert_eq!(tracker.remove_meal(run.id).unwrap(), None);
        assert_eq!(tracker.workouts(), &[run]);
    }

    #[test]
    fn reset_keeps_limit() {
        let mut tracker = tracker();
        tracker.set_limit(1800).unwrap();
        tracker.add_meal(Record::new("Pasta", 900)).unwrap();
        tracker.add_workout(Record::new("Bike", 400)).unwrap();

        tracker.reset().unwrap();

        assert_eq!(tracker.calorie_limit(), 1800);
        assert_eq!(tracker.total_calories(), 0);
        assert!(tracker.meals().is_empty());
        assert!(tracker.workouts().is_empty());
    }

    #[test]
    fn reset_clears_store_but_not_limit() {
        let mut tracker = tracker();
        tracker.set_limit(1800).unwrap();
        tracker.add_meal(Record::new("Pasta", 900)).unwrap();
        tracker.reset().unwrap();

        let reloaded = CalorieTracker::new(tracker.store.clone());
        assert_eq!(reloaded.calorie_limit(), 1800);
        assert_eq!(reloaded.total_calories(), 0);
        assert!(reloaded.meals().is_empty());
        assert!(!tracker.store.contains(StoreKey::TotalCalories));
    }

    #[test]
    fn mutations_write_through() {
        let mut tracker = tracker();
        let eggs = Record::new("Eggs", 300);
        let toast = Record::new("Toast", 120);
        tracker.add_meal(eggs.clone()).unwrap();
        tracker.add_meal(toast.clone()).unwrap();
        tracker.add_workout(Record::new("Walk", 80)).unwrap();
        tracker.remove_meal(eggs.id).unwrap();
        tracker.set_limit(2200).unwrap();

        let reloaded = CalorieTracker::new(tracker.store.clone());
        assert_eq!(reloaded.calorie_limit(), 2200);
        assert_eq!(reloaded.total_calories(), 40);
        assert_eq!(reloaded.meals(), &[toast]);
        assert_eq!(reloaded.workouts().len(), 1);
    }

    #[test]
    fn remaining_goes_negative_over_limit() {
        let mut tracker = tracker();
        tracker.set_limit(2000).unwrap();
        tracker.add_meal(Record::new("Feast", 2500)).unwrap();

        assert_eq!(tracker.remaining(), -500);
        assert!(tracker.is_over_limit());
    }

    #[test]
    fn exactly_at_limit_counts_as_over() {
        let mut tracker = tracker();
        tracker.add_meal(Record::new("Day", 2000)).unwrap();
        assert_eq!(tracker.remaining(), 0);
        assert!(tracker.is_over_limit());
    }

    #[test]
    fn progress_is_capped() {
        let mut tracker = tracker();
        tracker.add_meal(Record::new("Lunch", 500)).unwrap();
        assert!((tracker.progress_fraction() - 0.25).abs() < f64::EPSILON);

        tracker.add_meal(Record::new("Everything", 100_000)).unwrap();
        assert_eq!(tracker.progress_fraction(), 1.0);
    }

    #[test]
    fn zero_limit_is_saturated() {
        let mut tracker = tracker();
        tracker.set_limit(0).unwrap();
        assert_eq!(tracker.progress_fraction(), 1.0);
        assert_eq!(tracker.remaining(), 0);
    }

    #[test]
    fn insertion_order_is_display_order() {
        let mut tracker = tracker();
        for name in ["Oats", "Salad", "Curry"] {
            tracker.add_meal(Record::new(name, 100)).unwrap();
        }
        let names: Vec<_> = tracker.meals().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Oats", "Salad", "Curry"]);
    }

    #[test]
    fn filter_is_case_insensitive() {
        let mut tracker = tracker();
        tracker.add_meal(Record::new("Chicken Salad", 350)).unwrap();
        tracker.add_meal(Record::new("Pizza", 800)).unwrap();
        tracker.add_meal(Record::new("salad bowl", 200)).unwrap();

        let names: Vec<_> = tracker
            .filter(RecordKind::Meal, "SALAD")
            .into_iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, ["Chicken Salad", "salad bowl"]);
        assert_eq!(tracker.filter(RecordKind::Meal, "").len(), 3);
        assert!(tracker.filter(RecordKind::Workout, "salad").is_empty());
    }
}
