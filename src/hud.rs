//! Title bar and score text

/// Window title that stretches with the score: "Longcat is looooong!"
pub fn title_for_score(score: f64) -> String {
    // Truncated, and at least zero, like a repeat count
    let extra = if score.is_finite() && score > 0.0 {
        score as usize
    } else {
        0
    };
    format!("Longcat is lo{}ng!", "o".repeat(extra))
}

/// Score with one decimal place
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Remembers the last title so the page is only touched on change
/// (rewriting an identical title flickers on some mobile browsers)
#[derive(Debug, Default)]
pub struct TitleCache {
    current: String,
}

impl TitleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// New title for `score`, or `None` if it is unchanged
    pub fn refresh(&mut self, score: f64) -> Option<&str> {
        let title = title_for_score(score);
        if title == self.current {
            return None;
        }
        self.current = title;
        Some(self.current.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_grows_with_score() {
        assert_eq!(title_for_score(0.0), "Longcat is long!");
        assert_eq!(title_for_score(2.9), "Longcat is looong!");
        assert_eq!(title_for_score(5.0), "Longcat is loooooong!");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(7.84), "7.8");
        assert_eq!(format_score(215.0), "215.0");
    }

    #[test]
    fn test_title_cache_only_reports_changes() {
        let mut cache = TitleCache::new();
        assert_eq!(cache.refresh(0.0), Some("Longcat is long!"));
        assert_eq!(cache.refresh(0.5), None);
        assert_eq!(cache.refresh(1.2), Some("Longcat is loong!"));
        assert_eq!(cache.refresh(1.9), None);
    }
}
