//! Plain-text and JSON rendering for the CLI.

use crate::jobs::status::StatusStyle;
use crate::models::job::Job;
use serde::Serialize;

pub struct Output {
    pub json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Prints `value` as pretty JSON in JSON mode, otherwise runs `text`.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce(&T)) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            text(value);
        }
        Ok(())
    }

    pub fn success(&self, message: &str) {
        if self.json {
            println!("{}", serde_json::json!({ "ok": true, "message": message }));
        } else {
            println!("  [OK] {}", message);
        }
    }

    pub fn warning(&self, message: &str) {
        eprintln!("  [WARN] {}", message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("  [ERROR] {}", message);
    }

    pub fn jobs(&self, jobs: &[Job]) -> anyhow::Result<()> {
        self.emit(&jobs, |jobs| {
            if jobs.is_empty() {
                println!("  (no jobs)");
            }
            for job in jobs.iter() {
                println!("{}", job_line(job));
            }
        })
    }
}

pub fn job_line(job: &Job) -> String {
    let style: StatusStyle = job.status.style();
    let budget = job
        .budget
        .map(|b| format!("₹{}", b))
        .unwrap_or_else(|| "-".to_string());
    let actions: Vec<&str> = job.status.actions().iter().map(|a| a.label()).collect();
    format!(
        "  #{:<5} {:<12} {:<30} {:>10}  {}{}",
        job.id,
        style.label,
        job.title,
        budget,
        job.address.as_deref().unwrap_or(""),
        if actions.is_empty() {
            String::new()
        } else {
            format!("  [{}]", actions.join(" | "))
        }
    )
}
