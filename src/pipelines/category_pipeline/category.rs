use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five relief-aid categories a text can be assigned to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReliefCategory {
    #[default]
    Food,
    Medical,
    Shelter,
    Cash,
    Transportation,
}

impl ReliefCategory {
    /// All categories in keyword-table definition order.
    pub const ALL: [ReliefCategory; 5] = [
        ReliefCategory::Food,
        ReliefCategory::Medical,
        ReliefCategory::Shelter,
        ReliefCategory::Cash,
        ReliefCategory::Transportation,
    ];

    /// Wire tag, e.g. `FOOD`.
    pub fn tag(&self) -> &'static str {
        match self {
            ReliefCategory::Food => "FOOD",
            ReliefCategory::Medical => "MEDICAL",
            ReliefCategory::Shelter => "SHELTER",
            ReliefCategory::Cash => "CASH",
            ReliefCategory::Transportation => "TRANSPORTATION",
        }
    }

    /// Bilingual (English + Vietnamese) display string.
    pub fn display_name(&self) -> &'static str {
        match self {
            ReliefCategory::Food => "Food assistance (cấp phát thực phẩm)",
            ReliefCategory::Medical => "Medical aid (trợ cấp y tế)",
            ReliefCategory::Shelter => "Shelter and housing (nơi trú ẩn và nhà ở)",
            ReliefCategory::Cash => "Cash assistance (hỗ trợ tiền mặt)",
            ReliefCategory::Transportation => {
                "Transportation and logistics (vận chuyển và hậu cần)"
            }
        }
    }
}

impl fmt::Display for ReliefCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a string is not one of the five category tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown relief category {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for ReliefCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReliefCategory::ALL
            .into_iter()
            .find(|c| c.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Display string for a raw tag. Unknown tags resolve to FOOD's name.
pub fn display_name_for_tag(tag: &str) -> &'static str {
    tag.parse::<ReliefCategory>()
        .unwrap_or_default()
        .display_name()
}
