//! Task and micro-step types.
//!
//! A [`Task`] owns an ordered list of [`MicroStep`]s; steps have no lifecycle
//! of their own and disappear with their parent. Serialized shapes use the
//! camelCase field names of the hosted API.

pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use store::{TaskEvent, TaskStore};

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" | "med" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// Energy level a task is suited for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

impl Default for EnergyLevel {
    fn default() -> Self {
        EnergyLevel::Medium
    }
}

impl std::str::FromStr for EnergyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(EnergyLevel::Low),
            "medium" | "med" => Ok(EnergyLevel::Medium),
            "high" => Ok(EnergyLevel::High),
            other => Err(format!("unknown energy level: {other}")),
        }
    }
}

/// A small sub-task, independently completable, owned by its parent task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroStep {
    pub id: String,
    pub title: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,
}

impl MicroStep {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            completed: false,
            estimated_minutes: None,
        }
    }

    pub fn with_estimate(mut self, minutes: u32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }
}

/// A user task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub completed: bool,
    pub micro_steps: Vec<MicroStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "energyLevel", skip_serializing_if = "Option::is_none")]
    pub energy: Option<EnergyLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Build a new task with a fresh identifier. The title is stored as
    /// given; emptiness checks belong to the store.
    pub fn new(title: impl Into<String>, priority: Priority, micro_steps: Vec<MicroStep>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            priority,
            completed: false,
            micro_steps,
            category: None,
            energy: None,
            completed_at: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_energy(mut self, energy: EnergyLevel) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn step(&self, step_id: &str) -> Option<&MicroStep> {
        self.micro_steps.iter().find(|s| s.id == step_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_open_with_fresh_id() {
        let a = Task::new("Write report", Priority::High, Vec::new());
        let b = Task::new("Write report", Priority::High, Vec::new());
        assert!(!a.completed);
        assert!(a.completed_at.is_none());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serialized_shape_uses_api_field_names() {
        let task = Task::new("Plan sprint", Priority::Medium, vec![MicroStep::new("Outline")])
            .with_category("project")
            .with_energy(EnergyLevel::High);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["priority"], "Medium");
        assert_eq!(json["energyLevel"], "High");
        assert!(json["microSteps"].is_array());
        assert!(json.get("completedAt").is_none());
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("med".parse::<Priority>().unwrap(), Priority::Medium);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
