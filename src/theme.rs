/// Fixed set of 5-color heatmap palettes. Index i is the fill for value i,
/// so every palette runs from "no activity" to the strongest intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Github,
    Ocean,
    Sunset,
    Forest,
    Purple,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Github,
        Theme::Ocean,
        Theme::Sunset,
        Theme::Forest,
        Theme::Purple,
    ];

    /// Look up a theme by its persisted key. Unknown keys fall back to the
    /// default palette rather than erroring.
    pub fn from_key(key: &str) -> Self {
        match key {
            "ocean" => Theme::Ocean,
            "sunset" => Theme::Sunset,
            "forest" => Theme::Forest,
            "purple" => Theme::Purple,
            _ => Theme::Github,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Theme::Github => "github",
            Theme::Ocean => "ocean",
            Theme::Sunset => "sunset",
            Theme::Forest => "forest",
            Theme::Purple => "purple",
        }
    }

    pub fn colors(self) -> [&'static str; 5] {
        match self {
            Theme::Github => ["#161b22", "#0e4429", "#006d32", "#26a641", "#39d353"],
            Theme::Ocean => ["#0d1b2a", "#16425b", "#2c7da0", "#61a5c2", "#a9d6e5"],
            Theme::Sunset => ["#1f1014", "#7f2d3a", "#c4543c", "#e8803a", "#ffc15e"],
            Theme::Forest => ["#101810", "#2d4a22", "#3f6d2e", "#5f9e3f", "#8fce5f"],
            Theme::Purple => ["#160f1f", "#3c1361", "#52307c", "#7b4397", "#b589d6"],
        }
    }
}
