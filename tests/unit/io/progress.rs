//! Tests for stage progress bars

#[cfg(test)]
mod tests {
    use gridtile::io::progress::{LogWriter, ProgressManager};
    use std::io::Write;

    // Tests a full stage lifecycle, including advancing past the item count
    #[test]
    fn test_stage_lifecycle() {
        let mut pm = ProgressManager::new();
        pm.start_stage("split", 2);
        pm.advance("a.png");
        pm.advance("b.png");
        pm.advance("extra.png");
        pm.finish_stage();

        pm.start_stage("reassemble", 1);
        pm.advance("a");
        pm.finish_stage();
        pm.finish();
    }

    // Tests calls before any stage starts are ignored
    #[test]
    fn test_without_stage() {
        let pm = ProgressManager::default();
        pm.advance("orphan.png");
        pm.finish_stage();
        pm.finish();
    }

    #[test]
    fn test_empty_stage() {
        let mut pm = ProgressManager::new();
        pm.start_stage("transform", 0);
        pm.finish_stage();
        pm.finish();
    }

    // Tests log output written while a bar is active passes through whole
    #[test]
    fn test_log_writer_with_active_stage() {
        let mut pm = ProgressManager::new();
        pm.start_stage("split", 3);
        pm.advance("a.png");

        let mut writer = LogWriter;
        let line = b"[INFO] split a.png\n";
        assert_eq!(writer.write(line).unwrap(), line.len());
        writer.write_all(line).unwrap();
        writer.flush().unwrap();

        pm.finish_stage();
        pm.finish();
    }
}
