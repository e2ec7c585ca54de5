use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Water,
    Fertilizer,
    Warning,
    Harvest,
    Info,
}

impl InsightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::Water => "Water",
            InsightCategory::Fertilizer => "Fertilizer",
            InsightCategory::Warning => "Warning",
            InsightCategory::Harvest => "Harvest",
            InsightCategory::Info => "Info",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            InsightCategory::Water => Color::Blue,
            InsightCategory::Fertilizer => Color::Green,
            InsightCategory::Warning => Color::Yellow,
            InsightCategory::Harvest => Color::LightRed,
            InsightCategory::Info => Color::Gray,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            InsightCategory::Water => "≈",
            InsightCategory::Fertilizer => "+",
            InsightCategory::Warning => "⚠",
            InsightCategory::Harvest => "✂",
            InsightCategory::Info => "ℹ",
        }
    }
}

impl std::fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recommendation about one crop, rebuilt on every evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub body: String,
    pub category: InsightCategory,
}

impl Insight {
    pub fn new(
        category: InsightCategory,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            category,
        }
    }
}
