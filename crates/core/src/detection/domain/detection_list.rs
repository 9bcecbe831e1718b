use crate::detection::domain::detection::Detection;

pub const EMPTY_LIST_MESSAGE: &str = "No detections yet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowVariant {
    Known,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionRow {
    pub label: String,
    pub time: String,
    pub variant: RowVariant,
}

impl From<&Detection> for DetectionRow {
    fn from(detection: &Detection) -> Self {
        let (label, variant) = if detection.is_unknown() {
            ("\u{2753} Unknown Person".to_string(), RowVariant::Unknown)
        } else {
            (format!("\u{2705} {}", detection.name), RowVariant::Known)
        };
        Self {
            label,
            time: detection.time.clone(),
            variant,
        }
    }
}

/// Display-ready form of the latest detection snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetectionList {
    #[default]
    Empty,
    /// Most recent first.
    Rows(Vec<DetectionRow>),
}

impl DetectionList {
    /// Builds the list from a backend snapshot (oldest first).
    pub fn render(detections: &[Detection]) -> Self {
        if detections.is_empty() {
            return DetectionList::Empty;
        }
        DetectionList::Rows(detections.iter().rev().map(DetectionRow::from).collect())
    }

    pub fn rows(&self) -> &[DetectionRow] {
        match self {
            DetectionList::Empty => &[],
            DetectionList::Rows(rows) => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_renders_placeholder() {
        assert_eq!(DetectionList::render(&[]), DetectionList::Empty);
        assert!(DetectionList::default().is_empty());
    }

    #[test]
    fn test_rows_are_reversed() {
        let detections = vec![
            Detection::new("Alice", "2024-05-01 12:00:00"),
            Detection::new("Unknown", "2024-05-01 12:00:01"),
            Detection::new("Bob", "2024-05-01 12:00:02"),
        ];
        let list = DetectionList::render(&detections);
        let times: Vec<_> = list.rows().iter().map(|r| r.time.as_str()).collect();
        assert_eq!(
            times,
            ["2024-05-01 12:00:02", "2024-05-01 12:00:01", "2024-05-01 12:00:00"]
        );
    }

    #[test]
    fn test_one_row_per_detection_including_duplicates() {
        let detections = vec![
            Detection::new("Alice", "2024-05-01 12:00:00"),
            Detection::new("Alice", "2024-05-01 12:00:00"),
        ];
        assert_eq!(DetectionList::render(&detections).rows().len(), 2);
    }

    #[test]
    fn test_unknown_and_known_variants() {
        let list = DetectionList::render(&[
            Detection::new("Unknown", "t1"),
            Detection::new("Carol", "t2"),
        ]);
        let rows = list.rows();
        assert_eq!(rows[0].variant, RowVariant::Known);
        assert_eq!(rows[0].label, "\u{2705} Carol");
        assert_eq!(rows[1].variant, RowVariant::Unknown);
        assert_eq!(rows[1].label, "\u{2753} Unknown Person");
    }
}
