//! In-memory task store.
//!
//! The store is the single owner of all task state for one app instance.
//! Mutators return `Option<TaskEvent>` describing what changed; the caller
//! maps events to celebrations and telemetry. Nothing here is persisted --
//! state lives and dies with the process.

use chrono::Utc;

use super::{EnergyLevel, MicroStep, Priority, Task};
use crate::celebration::CelebrationKind;
use crate::events::{EventKind, TelemetryEvent};
use crate::session::EngagementSession;

/// What a store mutation did.
///
/// Completion events carry the titles the telemetry payloads need, so the
/// caller never has to re-query the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    Created {
        task_id: String,
        title: String,
    },
    Completed {
        task_id: String,
        title: String,
    },
    Reopened {
        task_id: String,
    },
    StepCompleted {
        task_id: String,
        task_title: String,
        step_id: String,
        step_title: String,
    },
    StepReopened {
        task_id: String,
        step_id: String,
    },
    StepsAdded {
        task_id: String,
        count: usize,
    },
    Deleted {
        task_id: String,
        title: String,
    },
}

impl TaskEvent {
    /// Which celebration, if any, this change triggers. Only transitions
    /// *to* completed celebrate; reopening stays quiet.
    pub fn celebration(&self) -> Option<CelebrationKind> {
        match self {
            TaskEvent::Completed { .. } => Some(CelebrationKind::Task),
            TaskEvent::StepCompleted { .. } => Some(CelebrationKind::MicroStep),
            _ => None,
        }
    }

    /// The telemetry event this change emits, stamped with the session id.
    pub fn telemetry(&self, session: &EngagementSession) -> Option<TelemetryEvent> {
        match self {
            TaskEvent::Created { task_id, title } => Some(
                session
                    .event(EventKind::TaskCreated)
                    .with("taskId", task_id.as_str())
                    .with("title", title.as_str()),
            ),
            TaskEvent::Completed { task_id, title } => Some(
                session
                    .event(EventKind::TaskCompleted)
                    .with("taskId", task_id.as_str())
                    .with("title", title.as_str()),
            ),
            TaskEvent::StepCompleted {
                task_id,
                task_title,
                step_id,
                step_title,
            } => Some(
                session
                    .event(EventKind::MicrostepCompleted)
                    .with("taskId", task_id.as_str())
                    .with("stepId", step_id.as_str())
                    .with("taskTitle", task_title.as_str())
                    .with("stepTitle", step_title.as_str()),
            ),
            TaskEvent::Deleted { task_id, title } => Some(
                session
                    .event(EventKind::TaskDeleted)
                    .with("taskId", task_id.as_str())
                    .with("title", title.as_str()),
            ),
            TaskEvent::Reopened { .. }
            | TaskEvent::StepReopened { .. }
            | TaskEvent::StepsAdded { .. } => None,
        }
    }
}

/// Ordered, in-memory list of tasks.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Append a new task. A title that is empty after trimming is silently
    /// rejected (`None`) -- no error is surfaced.
    pub fn add_task(
        &mut self,
        title: &str,
        priority: Priority,
        micro_steps: Vec<MicroStep>,
    ) -> Option<TaskEvent> {
        self.add_task_detailed(title, priority, micro_steps, None, None)
    }

    /// `add_task` with the optional category and energy fields set.
    pub fn add_task_detailed(
        &mut self,
        title: &str,
        priority: Priority,
        micro_steps: Vec<MicroStep>,
        category: Option<String>,
        energy: Option<EnergyLevel>,
    ) -> Option<TaskEvent> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let mut task = Task::new(title, priority, micro_steps);
        task.category = category;
        task.energy = energy;
        let event = TaskEvent::Created {
            task_id: task.id.clone(),
            title: task.title.clone(),
        };
        self.tasks.push(task);
        Some(event)
    }

    /// Flip a task's completed flag. Completing stamps `completed_at`;
    /// reopening clears it. `None` if the id is unknown.
    pub fn toggle_task(&mut self, task_id: &str) -> Option<TaskEvent> {
        let task = self.tasks.iter_mut().find(|t| t.id == task_id)?;
        task.completed = !task.completed;
        if task.completed {
            task.completed_at = Some(Utc::now());
            Some(TaskEvent::Completed {
                task_id: task.id.clone(),
                title: task.title.clone(),
            })
        } else {
            task.completed_at = None;
            Some(TaskEvent::Reopened {
                task_id: task.id.clone(),
            })
        }
    }

    /// Flip one micro-step's completed flag. Sibling steps and the parent's
    /// own completed flag are left untouched.
    pub fn toggle_micro_step(&mut self, task_id: &str, step_id: &str) -> Option<TaskEvent> {
        let task = self.tasks.iter_mut().find(|t| t.id == task_id)?;
        let task_id = task.id.clone();
        let task_title = task.title.clone();
        let step = task.micro_steps.iter_mut().find(|s| s.id == step_id)?;
        step.completed = !step.completed;
        if step.completed {
            Some(TaskEvent::StepCompleted {
                task_id,
                task_title,
                step_id: step.id.clone(),
                step_title: step.title.clone(),
            })
        } else {
            Some(TaskEvent::StepReopened {
                task_id,
                step_id: step.id.clone(),
            })
        }
    }

    /// Append micro-steps built from suggestion titles. Titles empty after
    /// trimming are skipped. `None` if the id is unknown.
    pub fn add_micro_steps<I>(&mut self, task_id: &str, titles: I) -> Option<TaskEvent>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let task = self.tasks.iter_mut().find(|t| t.id == task_id)?;
        let mut count = 0;
        for title in titles {
            let title = title.as_ref().trim();
            if title.is_empty() {
                continue;
            }
            task.micro_steps.push(MicroStep::new(title));
            count += 1;
        }
        Some(TaskEvent::StepsAdded {
            task_id: task.id.clone(),
            count,
        })
    }

    /// Remove a task and all its micro-steps in one pass. Idempotent: a
    /// second call with the same id is a no-op (`None`).
    pub fn delete_task(&mut self, task_id: &str) -> Option<TaskEvent> {
        let task = self.tasks.iter().find(|t| t.id == task_id)?;
        let event = TaskEvent::Deleted {
            task_id: task.id.clone(),
            title: task.title.clone(),
        };
        self.tasks.retain(|t| t.id != task_id);
        Some(event)
    }
}
