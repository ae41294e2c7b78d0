use core::str::FromStr;

use serde::{Deserialize, Serialize};

use atelier_core::{DomainError, Money, PartId};

/// Parts with `qty` at or below this are flagged for reorder attention.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Part category (closed set; free text at the boundary maps to a variant).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Unspecified,
    Fabric,
    Hardware,
    Zipper,
    Interfacing,
    Thread,
    Webbing,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Unspecified,
        Category::Fabric,
        Category::Hardware,
        Category::Zipper,
        Category::Interfacing,
        Category::Thread,
        Category::Webbing,
    ];

    /// Human/storage label; `Unspecified` round-trips as the empty string.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Unspecified => "",
            Category::Fabric => "Fabric",
            Category::Hardware => "Hardware",
            Category::Zipper => "Zipper",
            Category::Interfacing => "Interfacing",
            Category::Thread => "Thread",
            Category::Webbing => "Webbing",
        }
    }

    /// Lenient mapping for labels already persisted by older data: anything
    /// unknown becomes `Unspecified` instead of failing the read.
    pub fn from_label_lossy(label: &str) -> Self {
        label.parse().unwrap_or(Category::Unspecified)
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Category::Unspecified),
            "Fabric" => Ok(Category::Fabric),
            "Hardware" => Ok(Category::Hardware),
            "Zipper" => Ok(Category::Zipper),
            "Interfacing" => Ok(Category::Interfacing),
            "Thread" => Ok(Category::Thread),
            "Webbing" => Ok(Category::Webbing),
            other => Err(DomainError::validation(format!("unknown category: {other:?}"))),
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Color/finish of a part (closed set).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Unspecified,
    Nickel,
    AntiqueBrass,
    Gold,
    RoseGold,
    Black,
    Rainbow,
    Natural,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Unspecified,
        Color::Nickel,
        Color::AntiqueBrass,
        Color::Gold,
        Color::RoseGold,
        Color::Black,
        Color::Rainbow,
        Color::Natural,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Color::Unspecified => "",
            Color::Nickel => "Nickel",
            Color::AntiqueBrass => "Antique Brass",
            Color::Gold => "Gold",
            Color::RoseGold => "Rose Gold",
            Color::Black => "Black",
            Color::Rainbow => "Rainbow",
            Color::Natural => "Natural",
        }
    }

    pub fn from_label_lossy(label: &str) -> Self {
        label.parse().unwrap_or(Color::Unspecified)
    }
}

impl FromStr for Color {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Color::Unspecified),
            "Nickel" => Ok(Color::Nickel),
            "Antique Brass" => Ok(Color::AntiqueBrass),
            "Gold" => Ok(Color::Gold),
            "Rose Gold" => Ok(Color::RoseGold),
            "Black" => Ok(Color::Black),
            "Rainbow" => Ok(Color::Rainbow),
            "Natural" => Ok(Color::Natural),
            other => Err(DomainError::validation(format!("unknown color: {other:?}"))),
        }
    }
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// A persisted part row.
///
/// `qty` is signed: over-deduction during finalize may push it negative and
/// the store does not guard against that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub part_number: String,
    pub name: String,
    pub category: Category,
    pub color: Color,
    pub qty: i64,
    pub cost: Money,
    pub price: Money,
}

impl Part {
    pub fn is_low_stock(&self) -> bool {
        self.qty <= LOW_STOCK_THRESHOLD
    }
}

/// Fields for a part that has not been assigned an id yet.
///
/// No uniqueness is enforced on `part_number`; duplicate SKUs are accepted
/// silently (open question left as observed behavior).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPart {
    pub part_number: String,
    pub name: String,
    pub category: Category,
    pub color: Color,
    pub qty: i64,
    pub cost: Money,
    pub price: Money,
}
