//! # FlowBoost Core Library
//!
//! Core business logic for FlowBoost, a to-do/focus-timer app. The CLI
//! binary is a thin front end over this crate; task and timer state are
//! memory-resident and live exactly as long as one app instance.
//!
//! ## Architecture
//!
//! - **Timer**: a caller-driven focus/break countdown; the caller invokes
//!   `tick()` once per second and reacts to the events it returns
//! - **Task store**: ordered in-memory tasks with owned micro-steps;
//!   mutators return events the caller maps to celebrations and telemetry
//! - **Suggestions**: deterministic category templates, or the hosted
//!   text-generation endpoint with numbered-list parsing
//! - **Notifications**: preference-gated sound/visual delivery behind a
//!   sink trait, with a permission state machine
//! - **Telemetry**: fire-and-forget events to the track-event endpoint,
//!   bracketed by an engagement session
//! - **Preferences**: TOML on disk, mirrored by the hosted preferences
//!   endpoint with whole-object semantics

pub mod api;
pub mod celebration;
pub mod error;
pub mod events;
pub mod notify;
pub mod session;
pub mod storage;
pub mod suggest;
pub mod task;
pub mod timer;

pub use api::ApiClient;
pub use celebration::{Celebration, CelebrationKind, CelebrationState};
pub use error::{ApiError, ConfigError, CoreError};
pub use events::{EventKind, TelemetryEvent};
pub use notify::{NotificationDispatcher, NotificationSink, Permission};
pub use session::EngagementSession;
pub use storage::Config;
pub use task::{EnergyLevel, MicroStep, Priority, Task, TaskEvent, TaskStore};
pub use timer::{FocusTimer, SessionMode, StreakTracker, TimerEvent, TimerPhase};
