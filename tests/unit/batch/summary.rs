//! Tests for batch outcome accounting

#[cfg(test)]
mod tests {
    use gridtile::TilingError;
    use gridtile::batch::summary::{BatchSummary, ItemOutcome, StageSummary};
    use std::path::{Path, PathBuf};

    // Tests each outcome kind lands in its own counter
    #[test]
    fn test_record_classifies_outcomes() {
        let mut summary = StageSummary::new("split");
        summary.record(Path::new("a.png"), &Ok(ItemOutcome::Completed));
        summary.record(
            Path::new("b.png"),
            &Ok(ItemOutcome::Skipped {
                reason: "exists".to_string(),
            }),
        );
        summary.record(
            Path::new("notes.txt"),
            &Err(TilingError::TileNameDecode {
                name: "notes.txt".to_string(),
            }),
        );
        summary.record(
            Path::new("empty"),
            &Err(TilingError::EmptyResult {
                path: PathBuf::from("empty"),
            }),
        );
        summary.record(
            Path::new("c.png"),
            &Err(TilingError::InvalidSourceData {
                reason: "no pixels".to_string(),
            }),
        );

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.failed(), 1);

        let failure = summary.failures.first().unwrap();
        assert_eq!(failure.path, PathBuf::from("c.png"));
        assert!(failure.message.contains("no pixels"));
    }

    #[test]
    fn test_stage_display() {
        let mut summary = StageSummary::new("reassemble");
        summary.record_success();
        summary.record_success();
        summary.record_skip();

        assert_eq!(
            summary.to_string(),
            "reassemble: 2 succeeded, 1 skipped, 0 failed"
        );
    }

    // Tests totals sum across stages and any failure makes the run unclean
    #[test]
    fn test_batch_totals() {
        let mut split = StageSummary::new("split");
        split.record_success();
        split.record_skip();

        let mut reassemble = StageSummary::new("reassemble");
        reassemble.record_success();
        reassemble.record_failure(
            Path::new("tiles/a"),
            &TilingError::BatchIncomplete { failed: 1 },
        );

        let mut batch = BatchSummary::from(split);
        assert!(batch.is_clean());

        batch.push(reassemble);
        assert_eq!(batch.stages.len(), 2);
        assert_eq!(batch.succeeded(), 2);
        assert_eq!(batch.skipped(), 1);
        assert_eq!(batch.failed(), 1);
        assert!(!batch.is_clean());
        batch.log_report();
    }

    #[test]
    fn test_empty_batch_is_clean() {
        let batch = BatchSummary::default();
        assert!(batch.is_clean());
        assert_eq!(batch.succeeded(), 0);
    }
}
