//! Tests for the collapsed-cell progress display

#[cfg(test)]
mod tests {
    use wavetile::io::progress::ProgressManager;

    // Tests the bar length is the number of cells
    // Verified by leaving the hidden bar without a length
    #[test]
    fn test_length() {
        let progress = ProgressManager::hidden(16);
        assert_eq!(progress.length(), Some(16));
        assert_eq!(progress.position(), 0);
    }

    // Tests updates move the bar to the collapsed count
    // Verified by incrementing instead of setting the position
    #[test]
    fn test_update() {
        let progress = ProgressManager::hidden(9);
        progress.update(4);
        progress.update(6);
        assert_eq!(progress.position(), 6);
        progress.finish();
    }

    // Tests a visible bar can be created and abandoned
    // Verified by panicking on an invalid template
    #[test]
    fn test_visible_bar_abandon() {
        let progress = ProgressManager::new(4, "rules.csv");
        progress.update(1);
        progress.abandon("failed");
        assert_eq!(progress.position(), 1);
    }
}
