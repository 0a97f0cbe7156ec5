use std::collections::HashSet;

use downwatch_model::{DownloadTask, HistoryID, HistoryRecord};

/// A grabbed ledger record paired with the failed client task it matched.
#[derive(Debug, Clone, Copy)]
pub struct FailedMatch<'a> {
    pub record: &'a HistoryRecord,
    pub task: &'a DownloadTask,
}

/// Match failed client tasks against grabbed ledger records and drop the
/// failures the ledger already knows about.
///
/// For each grabbed record, in input order, find a failed task whose
/// (client, task id) identity equals the record's correlation key. Records
/// without the key fields, or without a matching task, are skipped
/// silently; not every grab corresponds to a currently-failed task. A
/// record whose id appears in `known_failed` is skipped too, which is what
/// makes repeated passes publish each failure at most once.
///
/// Several grabbed records may match the same task (a multi-episode grab
/// surfaces one client task per pass but one ledger record per episode);
/// each produces its own match. Output order is `grabbed` input order.
pub fn correlate<'a>(
    failed_tasks: &'a [DownloadTask],
    grabbed: &'a [HistoryRecord],
    known_failed: &[HistoryRecord],
) -> Vec<FailedMatch<'a>> {
    let known: HashSet<HistoryID> =
        known_failed.iter().map(|record| record.id).collect();

    let mut matches = Vec::new();
    for record in grabbed {
        let Some(task) = failed_tasks
            .iter()
            .find(|task| record.matches_task(&task.client, &task.id))
        else {
            continue;
        };

        if known.contains(&record.id) {
            continue;
        }

        matches.push(FailedMatch { record, task });
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use downwatch_model::{
        EpisodeID, HistoryEventKind, SeriesID, TaskStatus,
    };

    fn failed_task(id: &str, client: &str) -> DownloadTask {
        DownloadTask::new(id, client, "Some.Show.S01E01.720p", TaskStatus::Failed)
    }

    fn grabbed(client: &str, task_id: &str) -> HistoryRecord {
        HistoryRecord::new(
            HistoryEventKind::Grabbed,
            EpisodeID::new(),
            SeriesID::new(),
            "Some.Show.S01E01.720p",
        )
        .with_download_client(client, task_id)
    }

    #[test]
    fn no_key_fields_means_no_match() {
        let tasks = vec![failed_task("7", "sabnzbd")];
        let bare = vec![HistoryRecord::new(
            HistoryEventKind::Grabbed,
            EpisodeID::new(),
            SeriesID::new(),
            "Some.Show.S01E01.720p",
        )];

        assert!(correlate(&tasks, &bare, &[]).is_empty());
    }

    #[test]
    fn key_must_match_both_fields() {
        let tasks = vec![failed_task("7", "sabnzbd")];
        let wrong_id = vec![grabbed("sabnzbd", "8")];
        let wrong_client = vec![grabbed("nzbget", "7")];

        assert!(correlate(&tasks, &wrong_id, &[]).is_empty());
        assert!(correlate(&tasks, &wrong_client, &[]).is_empty());
    }

    #[test]
    fn known_failed_record_is_skipped() {
        let tasks = vec![failed_task("7", "sabnzbd")];
        let records = vec![grabbed("sabnzbd", "7")];

        let matches = correlate(&tasks, &records, &records.clone());
        assert!(matches.is_empty());
    }

    #[test]
    fn new_failure_is_matched_once() {
        let tasks = vec![failed_task("7", "sabnzbd")];
        let records = vec![grabbed("sabnzbd", "7")];

        let matches = correlate(&tasks, &records, &[]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].record.id, records[0].id);
        assert_eq!(matches[0].task.id, "7");
    }

    #[test]
    fn one_task_can_match_several_records_in_input_order() {
        let tasks = vec![failed_task("7", "sabnzbd")];
        let records =
            vec![grabbed("sabnzbd", "7"), grabbed("sabnzbd", "7")];

        let matches = correlate(&tasks, &records, &[]);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].record.id, records[0].id);
        assert_eq!(matches[1].record.id, records[1].id);
    }

    #[test]
    fn dedup_is_per_record_not_per_task() {
        let tasks = vec![failed_task("7", "sabnzbd")];
        let records =
            vec![grabbed("sabnzbd", "7"), grabbed("sabnzbd", "7")];
        let known = vec![records[0].clone()];

        let matches = correlate(&tasks, &records, &known);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].record.id, records[1].id);
    }
}
