//! Interactive focus session.
//!
//! One invocation is one app instance: tasks, the timer, celebrations and
//! the engagement session live in memory and end with the process. The loop
//! multiplexes a one-second tick (driving the countdown) with stdin
//! commands; telemetry is spawned fire-and-forget.

use std::io::Write;

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};

use flowboost_core::celebration::pick_encouragement;
use flowboost_core::notify::NotificationSink;
use flowboost_core::suggest::suggest_breakdown;
use flowboost_core::{
    ApiClient, CelebrationKind, CelebrationState, Config, EngagementSession, EnergyLevel,
    EventKind, FocusTimer, NotificationDispatcher, Permission, Priority, SessionMode, StreakTracker,
    Task, TaskEvent, TaskStore, TelemetryEvent, TimerEvent,
};

/// Sound and visual notifications delivered through the terminal.
struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn play_sound(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut err = std::io::stderr();
        err.write_all(b"\x07")?;
        err.flush()?;
        Ok(())
    }

    fn request_permission(&self) -> Permission {
        // The terminal is ours; showing a banner needs no user consent.
        Permission::Granted
    }

    fn show(&self, title: &str, body: &str) -> Result<(), Box<dyn std::error::Error>> {
        println!("\n[{title}] {body}");
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct App {
    config: Config,
    api: ApiClient,
    session: EngagementSession,
    store: TaskStore,
    timer: FocusTimer,
    celebrations: CelebrationState,
    dispatcher: NotificationDispatcher,
    streak: StreakTracker,
    last_streak: u32,
    sink: TerminalSink,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_session(config))
}

async fn run_session(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let api = ApiClient::from_config(&config)?;
    let (session, start_event) = EngagementSession::begin();
    api.track_event(&start_event).await;

    println!("FlowBoost -- Break Tasks Down, Build Success Up");
    println!("{}", pick_encouragement());
    println!("Type 'help' for commands.\n");

    let timer = FocusTimer::from_minutes(config.session.focus_minutes, config.session.break_minutes);
    let mut app = App {
        config,
        api,
        session,
        store: TaskStore::new(),
        timer,
        celebrations: CelebrationState::new(),
        dispatcher: NotificationDispatcher::new(),
        streak: StreakTracker::new(),
        last_streak: 0,
        sink: TerminalSink,
    };

    let mut ticks = tokio::time::interval(std::time::Duration::from_secs(1));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = ticks.tick() => app.on_tick(),
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if app.handle_line(line.trim()) == Flow::Quit {
                            break;
                        }
                    }
                    None => break, // stdin closed
                }
            }
        }
    }

    let end_event = app.session.end();
    app.api.track_event(&end_event).await;
    println!(
        "session over -- {}m focused, {} tasks and {} micro-steps completed",
        app.session.focus_seconds / 60,
        app.session.tasks_completed,
        app.session.microsteps_completed
    );
    Ok(())
}

impl App {
    // ── Timer-driven path ────────────────────────────────────────────

    fn on_tick(&mut self) {
        if let Some(TimerEvent::SegmentCompleted {
            completed,
            completed_duration_secs,
            at,
            ..
        }) = self.timer.tick()
        {
            self.dispatcher
                .notify(&self.sink, &self.config.notifications, completed, at);
            match completed {
                SessionMode::Focus => {
                    self.session.record_focus(completed_duration_secs);
                    let streak = self.streak.record(at);
                    let (kind, message) = if streak > self.last_streak && streak >= 2 {
                        (CelebrationKind::Streak, None)
                    } else {
                        (
                            CelebrationKind::Session,
                            Some("Focus session completed! Time for a refreshing break!".to_string()),
                        )
                    };
                    self.last_streak = streak;
                    self.show_celebration(kind, message);

                    let event = self
                        .session
                        .event(EventKind::FocusSessionCompleted)
                        .with("durationSecs", completed_duration_secs)
                        .with("completedTasks", self.store.completed_count() as u64)
                        .with("totalTasks", self.store.len() as u64);
                    self.track(event);
                    println!("'start' begins your break ({})", clock(self.timer.time_left_secs()));
                }
                SessionMode::Break => {
                    println!("break's over -- 'start' begins the next focus segment");
                }
            }
        }
        self.celebrations.clear_expired(Utc::now());
    }

    // ── Command path ─────────────────────────────────────────────────

    fn handle_line(&mut self, line: &str) -> Flow {
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        match verb {
            "" => {}
            "help" => print_help(),
            "quit" | "exit" => return Flow::Quit,
            "add" => self.cmd_add(rest),
            "list" => self.cmd_list(),
            "done" => self.cmd_done(rest),
            "step" => self.cmd_step(rest),
            "del" => self.cmd_del(rest),
            "suggest" => self.cmd_suggest(rest),
            "start" => self.cmd_start(),
            "pause" => self.cmd_pause(),
            "reset" => self.cmd_reset(),
            "away" => self.cmd_away(),
            "back" => self.cmd_back(),
            "status" => self.cmd_status(),
            other => println!("unknown command: {other} (try 'help')"),
        }
        Flow::Continue
    }

    /// `add <title> [!priority] [@category] [~energy]`
    fn cmd_add(&mut self, rest: &str) {
        let mut priority = Priority::Medium;
        let mut category: Option<String> = None;
        let mut energy: Option<EnergyLevel> = None;
        let mut words: Vec<&str> = Vec::new();

        for token in rest.split_whitespace() {
            if let Some(p) = token.strip_prefix('!').and_then(|p| p.parse().ok()) {
                priority = p;
            } else if let Some(e) = token.strip_prefix('~').and_then(|e| e.parse().ok()) {
                energy = Some(e);
            } else if let Some(c) = token.strip_prefix('@').filter(|c| !c.is_empty()) {
                category = Some(c.to_string());
            } else {
                words.push(token);
            }
        }

        let title = words.join(" ");
        // An empty title is a silent no-op, like an empty add form.
        if let Some(event) = self
            .store
            .add_task_detailed(&title, priority, Vec::new(), category, energy)
        {
            if let TaskEvent::Created { title, .. } = &event {
                println!("added: {title}");
            }
            self.apply_task_event(event);
        }
    }

    fn cmd_list(&self) {
        if self.store.is_empty() {
            println!("no tasks yet -- 'add <title>' creates one");
            return;
        }
        for (i, task) in self.store.tasks().iter().enumerate() {
            println!("{:>2}. {}", i + 1, describe(task));
            for (j, step) in task.micro_steps.iter().enumerate() {
                let mark = if step.completed { "x" } else { " " };
                println!("      {}) [{mark}] {}", j + 1, step.title);
            }
        }
    }

    fn cmd_done(&mut self, rest: &str) {
        let Some(id) = self.task_id_at(rest) else {
            println!("usage: done <task#>");
            return;
        };
        if let Some(event) = self.store.toggle_task(&id) {
            self.apply_task_event(event);
        }
    }

    fn cmd_step(&mut self, rest: &str) {
        let mut parts = rest.split_whitespace();
        let ids = (|| {
            let task = self.task_at(parts.next()?)?;
            let step_n: usize = parts.next()?.parse().ok()?;
            let step = task.micro_steps.get(step_n.checked_sub(1)?)?;
            Some((task.id.clone(), step.id.clone()))
        })();
        let Some((task_id, step_id)) = ids else {
            println!("usage: step <task#> <step#>");
            return;
        };
        if let Some(event) = self.store.toggle_micro_step(&task_id, &step_id) {
            self.apply_task_event(event);
        }
    }

    fn cmd_del(&mut self, rest: &str) {
        let Some(id) = self.task_id_at(rest) else {
            println!("usage: del <task#>");
            return;
        };
        if let Some(event) = self.store.delete_task(&id) {
            if let TaskEvent::Deleted { title, .. } = &event {
                println!("deleted: {title}");
            }
            self.apply_task_event(event);
        }
    }

    /// `suggest <task#> [category]` -- attach template micro-steps.
    fn cmd_suggest(&mut self, rest: &str) {
        let mut parts = rest.split_whitespace();
        let Some(task) = parts.next().and_then(|n| self.task_at(n)) else {
            println!("usage: suggest <task#> [category]");
            return;
        };
        let category = parts
            .next()
            .map(|c| c.to_string())
            .or_else(|| task.category.clone())
            .unwrap_or_else(|| "general".to_string());
        let task_id = task.id.clone();
        let steps = suggest_breakdown(&task.title, &category);
        for (i, step) in steps.iter().enumerate() {
            println!("{}. {step}", i + 1);
        }
        if let Some(event) = self.store.add_micro_steps(&task_id, &steps) {
            if let TaskEvent::StepsAdded { count, .. } = &event {
                println!("attached {count} micro-steps");
            }
            self.apply_task_event(event);
        }
    }

    fn cmd_start(&mut self) {
        match self.timer.start() {
            Some(TimerEvent::Started {
                mode,
                time_left_secs,
                ..
            }) => {
                println!("{} -- {} remaining", mode.label(), clock(time_left_secs));
                let event = self
                    .session
                    .event(EventKind::TimerStart)
                    .with("isBreak", mode == SessionMode::Break);
                self.track(event);
            }
            _ => println!("already running"),
        }
    }

    fn cmd_pause(&mut self) {
        match self.timer.pause() {
            Some(TimerEvent::Paused {
                mode,
                time_left_secs,
                ..
            }) => {
                println!("paused at {}", clock(time_left_secs));
                let event = self
                    .session
                    .event(EventKind::TimerPause)
                    .with("isBreak", mode == SessionMode::Break);
                self.track(event);
            }
            _ => println!("not running"),
        }
    }

    fn cmd_reset(&mut self) {
        if let Some(TimerEvent::Reset {
            mode,
            time_left_secs,
            ..
        }) = self.timer.reset()
        {
            println!("{} re-armed at {}", mode.label(), clock(time_left_secs));
        }
    }

    fn cmd_away(&mut self) {
        match self.session.pause() {
            Some(event) => {
                println!("stepping away -- see you soon");
                self.track(event);
            }
            None => println!("already away"),
        }
    }

    fn cmd_back(&mut self) {
        match self.session.resume() {
            Some(event) => {
                println!("welcome back");
                self.track(event);
            }
            None => println!("you're already here"),
        }
    }

    fn cmd_status(&mut self) {
        let running = if self.timer.is_running() {
            "running"
        } else {
            "idle"
        };
        println!(
            "{} ({running}) -- {} remaining",
            self.timer.mode().label(),
            clock(self.timer.time_left_secs())
        );
        println!(
            "streak: {} day(s) | focused {}m | {} tasks, {} micro-steps completed",
            self.streak.current(Utc::now().date_naive()),
            self.session.focus_seconds / 60,
            self.session.tasks_completed,
            self.session.microsteps_completed
        );
        if let Some(celebration) = self.celebrations.current() {
            println!("{} {}", celebration.kind.title(), celebration.message);
        }
        if !self.api.is_authenticated() {
            println!("(signed out: telemetry off -- 'flowboost auth login' to sync)");
        }
    }

    // ── Shared plumbing ──────────────────────────────────────────────

    /// Map a store event to its celebration, counters, and telemetry.
    fn apply_task_event(&mut self, event: TaskEvent) {
        if let Some(kind) = event.celebration() {
            let message = match kind {
                CelebrationKind::Task => {
                    self.session.record_task_completed();
                    Some("Task completed! Keep up the great work!".to_string())
                }
                CelebrationKind::MicroStep => {
                    self.session.record_microstep_completed();
                    Some("Micro-step completed! Progress feels good!".to_string())
                }
                _ => None,
            };
            self.show_celebration(kind, message);
        }
        if let Some(telemetry) = event.telemetry(&self.session) {
            self.track(telemetry);
        }
    }

    fn show_celebration(&mut self, kind: CelebrationKind, message: Option<String>) {
        let celebration = self.celebrations.trigger(kind, message, Utc::now());
        println!("*** {} {}", celebration.kind.title(), celebration.message);
    }

    /// Fire-and-forget telemetry; failures are logged inside the client.
    fn track(&self, event: TelemetryEvent) {
        let api = self.api.clone();
        tokio::spawn(async move { api.track_event(&event).await });
    }

    fn task_at(&self, index: &str) -> Option<&Task> {
        let n: usize = index.parse().ok()?;
        self.store.tasks().get(n.checked_sub(1)?)
    }

    fn task_id_at(&self, rest: &str) -> Option<String> {
        self.task_at(rest.split_whitespace().next()?)
            .map(|t| t.id.clone())
    }
}

fn describe(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!("[{mark}] {} ({})", task.title, task.priority.as_str());
    if let Some(category) = &task.category {
        line.push_str(&format!(" @{category}"));
    }
    line
}

fn clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn print_help() {
    println!(
        "commands:
  add <title> [!high|!low] [@category] [~low|~high]   create a task
  list                                                show tasks and steps
  done <task#>                                        toggle task completion
  step <task#> <step#>                                toggle a micro-step
  del <task#>                                         delete a task
  suggest <task#> [category]                          attach template micro-steps
  start | pause | reset                               control the timer
  away | back                                         mark yourself away/present
  status                                              timer, streak and counters
  quit                                                end the session"
    );
}
