use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A logged meal or workout. Which one it is depends on the collection it
/// lives in, never on the record itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: Uuid,
    pub name: String,
    pub calories: u32,
}

impl Record {
    /// Builds a record with a freshly generated id.
    pub fn new(name: impl Into<String>, calories: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            calories,
        }
    }

    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Meal,
    Workout,
}

impl RecordKind {
    /// Signed contribution of one calorie of this kind to the running total.
    pub fn sign(self) -> i64 {
        match self {
            RecordKind::Meal => 1,
            RecordKind::Workout => -1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Meal => "meal",
            RecordKind::Workout => "workout",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordRequest {
    #[serde(default)]
    pub name: String,
    /// Number or numeric string, as a form field would send it.
    #[serde(default)]
    pub calories: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct LimitRequest {
    #[serde(default)]
    pub limit: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub q: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub date: String,
    pub calorie_limit: i64,
    pub total_calories: i64,
    pub consumed: i64,
    pub burned: i64,
    pub remaining: i64,
    pub progress: f64,
    pub progress_percent: f64,
    pub over_limit: bool,
}

#[derive(Debug, Serialize)]
pub struct RecordListResponse {
    pub kind: RecordKind,
    pub items: Vec<Record>,
}
