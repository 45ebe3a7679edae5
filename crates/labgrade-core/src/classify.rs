//! Keyword classification of event messages.
//!
//! Both lookups are ordered rule tables evaluated top to bottom against the
//! lowercased message; the first matching rule wins. Reordering a table
//! changes which lab or task a message lands in.

use crate::model::LabCategory;

/// Domain string used by the repository lab's sample repositories.
pub const REPO_DOMAIN: &str = "example.com";

/// Category rules: a message belongs to the first category with any keyword present.
const CATEGORY_RULES: &[(LabCategory, &[&str])] = &[
    (
        LabCategory::UserManagement,
        &["user", "sally", "eric", "file collection"],
    ),
    (
        LabCategory::NfsConfiguration,
        &["nfs", "mount", "shares", "usershare"],
    ),
    (
        LabCategory::PackageManagement,
        &["yum", "dnf", "repository", "repo", REPO_DOMAIN],
    ),
    (
        LabCategory::NetworkServices,
        &["network", "service", "daemon"],
    ),
    (
        LabCategory::FileSystem,
        &["file", "directory", "permission"],
    ),
];

/// What a matching task rule names the task.
#[derive(Debug, Clone, Copy)]
enum TaskLabel {
    Fixed(&'static str),
    /// Synthesized end-of-lab results, named after the lab they close.
    LabComplete,
}

type Predicate = fn(&str) -> bool;

const TASK_RULES: &[(Predicate, TaskLabel)] = &[
    (
        |m| m.contains("user") && m.contains("exists"),
        TaskLabel::Fixed("User Creation"),
    ),
    (
        |m| m.contains("user") && m.contains("home"),
        TaskLabel::Fixed("User Home Directory"),
    ),
    (
        |m| m.contains("files") && (m.contains("owned") || m.contains("collection")),
        TaskLabel::Fixed("File Ownership"),
    ),
    (
        |m| m.contains("mount") && (m.contains("nfs") || m.contains("shares")),
        TaskLabel::Fixed("NFS Mount"),
    ),
    (|m| m.contains("fstab"), TaskLabel::Fixed("FSTAB Configuration")),
    (
        |m| (m.contains("repository") || m.contains("repo")) && m.contains(REPO_DOMAIN),
        TaskLabel::Fixed("Repository Configuration"),
    ),
    (
        |m| m.contains("dnf") && (m.contains("command") || m.contains("usage")),
        TaskLabel::Fixed("DNF Command Usage"),
    ),
    (
        |m| m.contains("verification passed"),
        TaskLabel::LabComplete,
    ),
    (
        |m| m.contains("verification failed"),
        TaskLabel::LabComplete,
    ),
];

/// Lab category of a message.
pub fn lab_category(message: &str) -> LabCategory {
    let lower = message.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(LabCategory::General)
}

/// Task name of a message.
///
/// Falls back to the title-cased first three words of the message, which can
/// merge unrelated messages that happen to start the same way.
pub fn task_name(message: &str) -> String {
    let lower = message.to_lowercase();
    let label = TASK_RULES
        .iter()
        .find(|(matches, _)| matches(&lower))
        .map(|(_, label)| *label);

    match label {
        Some(TaskLabel::Fixed(name)) => name.to_string(),
        Some(TaskLabel::LabComplete) => lab_complete_name(&lower).to_string(),
        None => fallback_task_name(message),
    }
}

/// Classify a message into its `(category, task name)` pair.
pub fn classify(message: &str) -> (LabCategory, String) {
    (lab_category(message), task_name(message))
}

fn lab_complete_name(lower: &str) -> &'static str {
    if lower.contains("nfs") {
        "NFS Lab Complete"
    } else if lower.contains("repo") || lower.contains("yum") {
        "Repository Lab Complete"
    } else {
        "User Lab Complete"
    }
}

fn fallback_task_name(message: &str) -> String {
    let leading: Vec<&str> = message.split_whitespace().take(3).collect();
    title_case(&leading.join(" "))
}

/// Upper-case the first letter of every run of cased letters, lower-case the rest.
///
/// Uncased characters, letters without case included, end a run.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_lowercase() || c.is_uppercase() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
