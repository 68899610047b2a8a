use crate::ledger::CalorieTracker;
use crate::storage::Store;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type BoxedStore = Box<dyn Store + Send>;

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Mutex<CalorieTracker<BoxedStore>>>,
}

impl AppState {
    pub fn new(store: impl Store + Send + 'static) -> Self {
        let store: BoxedStore = Box::new(store);
        Self {
            tracker: Arc::new(Mutex::new(CalorieTracker::new(store))),
        }
    }
}
