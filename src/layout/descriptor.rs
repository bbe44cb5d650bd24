use serde::{Deserialize, Serialize};
use std::fmt;

/// Label size selector.
///
/// Anything outside the four physical formats is kept verbatim in
/// [`LabelSize::Unknown`] and lays out like [`LabelSize::DEFAULT`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LabelSize {
    Small,
    Medium,
    Large,
    Dymo5xl,
    Unknown(String),
}

impl LabelSize {
    pub const DEFAULT: LabelSize = LabelSize::Medium;

    /// Every known format, in table order
    pub const KNOWN: [LabelSize; 4] = [
        LabelSize::Small,
        LabelSize::Medium,
        LabelSize::Large,
        LabelSize::Dymo5xl,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw {
            "small" => LabelSize::Small,
            "medium" => LabelSize::Medium,
            "large" => LabelSize::Large,
            "dymo5xl" => LabelSize::Dymo5xl,
            other => LabelSize::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LabelSize::Small => "small",
            LabelSize::Medium => "medium",
            LabelSize::Large => "large",
            LabelSize::Dymo5xl => "dymo5xl",
            LabelSize::Unknown(raw) => raw,
        }
    }

    /// The known format this selector lays out as
    pub fn effective(&self) -> LabelSize {
        match self {
            LabelSize::Unknown(_) => LabelSize::DEFAULT,
            known => known.clone(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, LabelSize::Unknown(_))
    }

    pub fn descriptor(&self) -> LayoutDescriptor {
        match self {
            LabelSize::Small => LayoutDescriptor {
                width_in: 2.0,
                height_in: 1.0,
                grid_cols: 3,
                grid_rows: 10,
                gap_in: 0.05,
                qr_pixel_size: 110,
                font_sizes: FontSizes { title: 11, text: 9, price: 14 },
            },
            LabelSize::Medium | LabelSize::Unknown(_) => LayoutDescriptor {
                width_in: 2.25,
                height_in: 1.25,
                grid_cols: 3,
                grid_rows: 8,
                gap_in: 0.05,
                qr_pixel_size: 130,
                font_sizes: FontSizes { title: 13, text: 11, price: 16 },
            },
            LabelSize::Large => LayoutDescriptor {
                width_in: 3.0,
                height_in: 2.0,
                grid_cols: 2,
                grid_rows: 5,
                gap_in: 0.1,
                qr_pixel_size: 160,
                font_sizes: FontSizes { title: 16, text: 13, price: 22 },
            },
            LabelSize::Dymo5xl => LayoutDescriptor {
                width_in: 1.5,
                height_in: 1.5,
                grid_cols: 4,
                grid_rows: 4,
                gap_in: 0.0,
                qr_pixel_size: 120,
                font_sizes: FontSizes { title: 12, text: 10, price: 16 },
            },
        }
    }
}

impl From<&str> for LabelSize {
    fn from(raw: &str) -> Self {
        LabelSize::parse(raw)
    }
}

impl fmt::Display for LabelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font sizes in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSizes {
    pub title: u32,
    pub text: u32,
    pub price: u32,
}

/// Geometry and typography for one physical label format.
///
/// `grid_rows` is how many rows fit on a printed sheet. It is a hint for
/// pagination, never a cap on how many labels a job may hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDescriptor {
    pub width_in: f64,
    pub height_in: f64,
    pub grid_cols: u32,
    pub grid_rows: u32,
    pub gap_in: f64,
    pub qr_pixel_size: u32,
    pub font_sizes: FontSizes,
}

impl LayoutDescriptor {
    /// Rows needed to hold `label_count` labels
    pub fn rows_for(&self, label_count: usize) -> usize {
        label_count.div_ceil(self.grid_cols as usize)
    }
}

/// Resolve a free-form size selector to its layout.
///
/// Never fails: unrecognised selectors get the `medium` layout.
pub fn resolve(label_size: &str) -> LayoutDescriptor {
    LabelSize::parse(label_size).descriptor()
}
