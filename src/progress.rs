//! Progress reporting for the collection steps. Listing totals are unknown up
//! front, so bars are spinners with an item counter.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// A small wrapper around an `indicatif` spinner. Disabled scopes are no-ops.
pub struct ProgressScope {
    pb: Option<ProgressBar>,
}

impl ProgressScope {
    pub fn spinner<T: Into<String>>(label: T, enabled: bool) -> Self {
        if !enabled {
            return Self { pb: None };
        }
        let pb = ProgressBar::new_spinner();
        // template is a literal; a parse failure falls back to the default style
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg} {pos} items  elapsed: {elapsed_precise}") {
            pb.set_style(style);
        }
        pb.set_message(label.into());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb: Some(pb) }
    }

    pub fn disabled() -> Self {
        Self { pb: None }
    }

    #[inline]
    pub fn inc_items(&self, delta: u64) {
        if let Some(pb) = &self.pb {
            pb.inc(delta);
        }
    }

    pub fn finish<T: Into<String>>(&self, msg: T) {
        if let Some(pb) = &self.pb {
            pb.finish_with_message(msg.into());
        }
    }
}
