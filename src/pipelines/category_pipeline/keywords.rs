use super::category::ReliefCategory;
use crate::core::{ClassifierError, Result};
use once_cell::sync::Lazy;

/// Keyword set and weight for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryKeywords {
    keywords: Vec<String>,
    weight: f32,
}

impl CategoryKeywords {
    /// Keywords are lower-cased and de-duplicated, keeping first-seen order.
    pub fn new<I, S>(keywords: I, weight: f32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().to_lowercase();
            if !keyword.is_empty() && !unique.contains(&keyword) {
                unique.push(keyword);
            }
        }
        Self {
            keywords: unique,
            weight,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }
}

/// Ordered category → keywords mapping. Order decides ties.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryKeywordTable {
    entries: Vec<(ReliefCategory, CategoryKeywords)>,
}

impl CategoryKeywordTable {
    /// Build a table, rejecting empty keyword sets, non-positive weights and
    /// repeated categories.
    pub fn new(entries: Vec<(ReliefCategory, CategoryKeywords)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(ClassifierError::Config(
                "keyword table has no categories".to_string(),
            ));
        }
        for (i, (category, keywords)) in entries.iter().enumerate() {
            if keywords.keywords.is_empty() {
                return Err(ClassifierError::Config(format!(
                    "category {category} has no keywords"
                )));
            }
            if !(keywords.weight.is_finite() && keywords.weight > 0.0) {
                return Err(ClassifierError::Config(format!(
                    "category {category} has non-positive weight {}",
                    keywords.weight
                )));
            }
            if entries[..i].iter().any(|(c, _)| c == category) {
                return Err(ClassifierError::Config(format!(
                    "category {category} listed twice"
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(ReliefCategory, CategoryKeywords)] {
        &self.entries
    }
}

static DEFAULT_TABLE: Lazy<CategoryKeywordTable> = Lazy::new(|| CategoryKeywordTable {
    entries: vec![
        (
            ReliefCategory::Food,
            CategoryKeywords::new(
                [
                    "food", "rice", "water", "meal", "eat", "hungry", "grain", "bread",
                    "nutrition", "lương thực", "cơm", "nước", "ăn", "đói", "thức ăn",
                    "ngũ cốc", "bánh",
                ],
                1.0,
            ),
        ),
        (
            ReliefCategory::Medical,
            CategoryKeywords::new(
                [
                    "medical", "health", "doctor", "hospital", "medicine", "vaccine",
                    "treatment", "nurse", "ambulance", "y tế", "bác sĩ", "bệnh viện", "thuốc",
                    "điều trị", "tiêm chủng", "y sĩ",
                ],
                1.0,
            ),
        ),
        (
            ReliefCategory::Shelter,
            CategoryKeywords::new(
                [
                    "shelter", "house", "home", "housing", "accommodation", "tent", "roof",
                    "displaced", "refugee", "nhà", "nơi ở", "tạm trú", "lều", "mái",
                    "nơi trú ẩn", "người sơ tán",
                ],
                1.0,
            ),
        ),
        (
            ReliefCategory::Cash,
            CategoryKeywords::new(
                [
                    "cash", "money", "financial", "subsidy", "funds", "grant", "allowance",
                    "economic", "tiền", "hỗ trợ tiền", "tài chính", "trợ cấp", "quỹ",
                ],
                1.0,
            ),
        ),
        (
            ReliefCategory::Transportation,
            CategoryKeywords::new(
                [
                    "transport", "vehicle", "car", "bus", "truck", "travel", "road", "access",
                    "communication", "mobility", "vận chuyển", "xe", "ô tô", "xe buýt",
                    "đi lại", "đường", "giao thông",
                ],
                1.0,
            ),
        ),
    ],
});

/// The built-in English + Vietnamese keyword table.
pub fn default_table() -> &'static CategoryKeywordTable {
    &DEFAULT_TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_every_category_in_order() {
        let table = default_table();
        let order: Vec<_> = table.entries().iter().map(|(c, _)| *c).collect();
        assert_eq!(order, ReliefCategory::ALL.to_vec());

        // Revalidating the built-in table must succeed.
        assert!(CategoryKeywordTable::new(table.entries().to_vec()).is_ok());
    }

    #[test]
    fn keywords_are_lowercased_and_deduplicated() {
        let kw = CategoryKeywords::new(["Food", "food", "NƯỚC", ""], 1.0);
        assert_eq!(kw.keywords(), &["food".to_string(), "nước".to_string()]);
    }

    #[test]
    fn rejects_invalid_tables() {
        let empty = vec![(ReliefCategory::Food, CategoryKeywords::new(Vec::<&str>::new(), 1.0))];
        assert!(CategoryKeywordTable::new(empty).is_err());

        let zero_weight = vec![(ReliefCategory::Food, CategoryKeywords::new(["food"], 0.0))];
        assert!(CategoryKeywordTable::new(zero_weight).is_err());

        let nan_weight = vec![(ReliefCategory::Food, CategoryKeywords::new(["food"], f32::NAN))];
        assert!(CategoryKeywordTable::new(nan_weight).is_err());

        let repeated = vec![
            (ReliefCategory::Cash, CategoryKeywords::new(["cash"], 1.0)),
            (ReliefCategory::Cash, CategoryKeywords::new(["money"], 1.0)),
        ];
        assert!(CategoryKeywordTable::new(repeated).is_err());

        assert!(CategoryKeywordTable::new(Vec::new()).is_err());
    }
}
