use crate::recognition::domain::recognition_result::RecognitionResult;
use crate::shared::constants::NO_FACE_PLACEHOLDER;

/// One line of the textual result summary.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryEntry {
    pub name: String,
    pub confidence: f64,
    pub unknown: bool,
}

impl SummaryEntry {
    /// Confidence as a one-decimal percentage, e.g. `0.873` becomes `"87.3%"`.
    pub fn confidence_label(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}

/// Textual counterpart of one recognition response.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Summary {
    #[default]
    NoFaces,
    Entries(Vec<SummaryEntry>),
}

impl Summary {
    pub fn of(results: &[RecognitionResult]) -> Self {
        if results.is_empty() {
            return Summary::NoFaces;
        }
        Summary::Entries(
            results
                .iter()
                .map(|r| SummaryEntry {
                    name: r.name.clone(),
                    confidence: r.confidence,
                    unknown: r.is_unknown(),
                })
                .collect(),
        )
    }

    /// Display lines, one per result; a single placeholder when empty.
    /// Unmatched faces are marked so they read differently from known ones.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Summary::NoFaces => vec![NO_FACE_PLACEHOLDER.to_string()],
            Summary::Entries(entries) => entries
                .iter()
                .map(|e| {
                    if e.unknown {
                        format!("{}  {}  (no match)", e.name, e.confidence_label())
                    } else {
                        format!("{}  {}", e.name, e.confidence_label())
                    }
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::face_box::FaceBox;
    use rstest::rstest;

    fn result(name: &str, confidence: f64) -> RecognitionResult {
        RecognitionResult::new(name, confidence, FaceBox::new(0, 0, 10, 10))
    }

    #[test]
    fn test_empty_results_render_placeholder() {
        let summary = Summary::of(&[]);
        assert_eq!(summary, Summary::NoFaces);
        assert_eq!(summary.lines(), vec![NO_FACE_PLACEHOLDER.to_string()]);
    }

    #[rstest]
    #[case(0.873, "87.3%")]
    #[case(0.92, "92.0%")]
    #[case(1.0, "100.0%")]
    #[case(0.0, "0.0%")]
    #[case(0.005, "0.5%")]
    fn test_confidence_one_decimal(#[case] confidence: f64, #[case] expected: &str) {
        let entry = SummaryEntry {
            name: "Alice".to_string(),
            confidence,
            unknown: false,
        };
        assert_eq!(entry.confidence_label(), expected);
    }

    #[test]
    fn test_one_line_per_result_in_order() {
        let summary = Summary::of(&[
            result("Alice", 0.92),
            result("Unknown", 0.31),
            result("Bob", 0.78),
        ]);
        let lines = summary.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Alice  92.0%");
        assert_eq!(lines[1], "Unknown  31.0%  (no match)");
        assert_eq!(lines[2], "Bob  78.0%");
    }

    #[test]
    fn test_unknown_entries_flagged() {
        let Summary::Entries(entries) = Summary::of(&[result("Unknown", 0.4)]) else {
            panic!("expected entries");
        };
        assert!(entries[0].unknown);
    }
}
