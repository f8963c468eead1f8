use std::collections::HashSet;
use std::time::Instant;
use tracing::info;

use crate::domain::ContributionRecord;
use crate::stats::ClassificationResult;

/// Sort main-namespace contributions into created and edited pages.
///
/// Every title counts once. A page created anywhere in the list counts only as
/// created, however often it was also edited.
pub fn classify(contributions: &[ContributionRecord]) -> ClassificationResult {
    let start_time = Instant::now();

    let mut created_titles = HashSet::new();
    let mut edited_titles = HashSet::new();
    let mut skipped = 0usize;

    for record in contributions {
        if !record.is_main_namespace() {
            skipped += 1;
            continue;
        }
        if record.is_creation() {
            created_titles.insert(record.title.clone());
        } else {
            edited_titles.insert(record.title.clone());
        }
    }

    edited_titles.retain(|title| !created_titles.contains(title));

    info!(
        action = "complete",
        component = "classification",
        created = created_titles.len(),
        edited = edited_titles.len(),
        skipped_other_namespaces = skipped,
        duration_ms = start_time.elapsed().as_millis(),
        "Classification completed"
    );

    ClassificationResult {
        created_titles,
        edited_titles,
    }
}
