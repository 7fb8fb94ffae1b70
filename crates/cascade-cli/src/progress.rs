use std::sync::OnceLock;
use std::time::Duration;

use cascade_core::responses::{ItemReport, ItemStatus};
use cascade_sync::SyncObserver;
use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

pub struct Progress {
    bar: Option<ProgressBar>,
}

fn bar_template() -> &'static str {
    match ui::prefs().term_width {
        Some(cols) if cols >= 110 => "{bar:40.cyan/blue} {pos}/{len} {msg}",
        Some(cols) if cols >= 80 => "{wide_bar:.cyan/blue} {pos}/{len} {msg}",
        _ => "{wide_bar:.cyan/blue} {percent}% {msg}",
    }
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    #[must_use]
    pub fn bar(total: u64, message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template(bar_template())
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    pub fn inc(&self, delta: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(delta);
        }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}

/// Spinner while the schema and items load, then a bar over the items.
pub struct SyncProgress {
    loading: Progress,
    items: OnceLock<Progress>,
}

impl SyncProgress {
    #[must_use]
    pub fn start(project: &str) -> Self {
        Self {
            loading: Progress::spinner(&format!("loading {project}")),
            items: OnceLock::new(),
        }
    }

    pub fn finish(&self) {
        self.loading.finish_clear();
        if let Some(items) = self.items.get() {
            items.finish_clear();
        }
    }

    pub fn fail(&self, message: &str) {
        self.loading.finish_clear();
        if let Some(items) = self.items.get() {
            items.finish_err(message);
        }
    }
}

impl SyncObserver for SyncProgress {
    fn items_loaded(&self, total: usize) {
        self.loading.finish_clear();
        let total = u64::try_from(total).unwrap_or(u64::MAX);
        let _ = self.items.set(Progress::bar(total, "syncing items"));
    }

    fn item_finished(&self, report: &ItemReport) {
        if let Some(items) = self.items.get() {
            let marker = match report.status {
                ItemStatus::Synced => "synced",
                ItemStatus::Skipped => "skipped",
            };
            items.set_message(&format!("{} {marker}", report.item_id));
            items.inc(1);
        }
    }
}
