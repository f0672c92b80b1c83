//! Static task-breakdown templates.
//!
//! A category keyword maps to a fixed, ordered list of five suggestion
//! strings. Unknown categories fall back to "general". Lookup is pure and
//! deterministic.

pub const CATEGORIES: [&str; 6] = ["general", "writing", "project", "study", "email", "meeting"];

const GENERAL: [&str; 5] = [
    "Break the task into smaller parts",
    "Identify the first small step",
    "Set a specific time to start",
    "Gather necessary resources",
    "Create a simple checklist",
];

const WRITING: [&str; 5] = [
    "Create an outline with main points",
    "Write a rough draft of the introduction",
    "Develop each main point in separate sections",
    "Draft a conclusion",
    "Review and revise for clarity",
];

const PROJECT: [&str; 5] = [
    "Define the project scope and goals",
    "Break down into major components",
    "Identify first small step for each component",
    "Set up tracking system",
    "Schedule focused time for first step",
];

const STUDY: [&str; 5] = [
    "Review learning objectives",
    "Skim material to get an overview",
    "Read in detail and take notes",
    "Create practice questions",
    "Test your understanding",
];

const EMAIL: [&str; 5] = [
    "Identify the main purpose of the email",
    "List key points to include",
    "Write a clear subject line",
    "Draft the email body",
    "Review before sending",
];

const MEETING: [&str; 5] = [
    "Define meeting objectives",
    "Create a simple agenda",
    "Prepare any necessary materials",
    "Set a specific timeframe",
    "Identify action items to discuss",
];

fn template_for(category: &str) -> &'static [&'static str; 5] {
    match category.trim().to_ascii_lowercase().as_str() {
        "writing" => &WRITING,
        "project" => &PROJECT,
        "study" => &STUDY,
        "email" => &EMAIL,
        "meeting" => &MEETING,
        _ => &GENERAL,
    }
}

/// Suggest micro-steps for a task from the category's template. The task
/// title does not influence template output.
pub fn suggest_breakdown(_task_title: &str, category: &str) -> Vec<String> {
    template_for(category).iter().map(|s| s.to_string()).collect()
}
