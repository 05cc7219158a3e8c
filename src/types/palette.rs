use serde::Serialize;

/// Fixed set of marker colors an activity can be drawn with.
#[derive(Debug, Clone, Serialize)]
pub struct Palette {
    pub colors: &'static [&'static str],
}

const UPLOAD_COLORS: &[&str] = &[
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#F7DC6F", "#BB8FCE", "#85C1E9", "#F8C471", "#82E0AA",
];

const ATHLETE_COLORS: &[&str] = &[
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#F7DC6F", "#BB8FCE", "#85C1E9", "#F8C471", "#82E0AA",
    "#E74C3C", "#3498DB", "#9B59B6", "#F39C12", "#E67E22", "#1ABC9C", "#2ECC71", "#34495E",
    "#E91E63", "#9C27B0", "#673AB7", "#3F51B5", "#2196F3", "#00BCD4", "#009688", "#4CAF50",
    "#8BC34A", "#CDDC39", "#FFEB3B", "#FFC107", "#FF9800", "#FF5722", "#795548", "#607D8B",
];

impl Palette {
    /// Colors handed out to file uploads.
    pub fn upload() -> Self {
        Self {
            colors: UPLOAD_COLORS,
        }
    }

    /// Colors keyed by remote athlete id.
    pub fn athlete() -> Self {
        Self {
            colors: ATHLETE_COLORS,
        }
    }

    /// Wraps around, so any id maps to a color.
    pub fn pick(&self, key: u64) -> &'static str {
        if self.colors.is_empty() {
            return "#FFFFFF";
        }
        self.colors[(key % self.colors.len() as u64) as usize]
    }

    pub fn pick_random(&self) -> &'static str {
        let id = uuid::Uuid::new_v4();
        let key = u64::from_le_bytes(id.as_bytes()[..8].try_into().unwrap_or([0; 8]));
        self.pick(key)
    }
}
