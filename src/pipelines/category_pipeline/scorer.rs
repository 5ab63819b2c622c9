use super::category::ReliefCategory;
use super::keywords::{default_table, CategoryKeywordTable};
use crate::pipelines::utils::is_blank;
use serde::Serialize;

/// Identifies the scoring method in every scored result.
pub const KEYWORD_METHOD: &str = "keyword-based (instant Vietnamese support)";

/// Name reported for the category "model" by the introspection endpoints.
pub const CATEGORY_MODEL_NAME: &str =
    "Hybrid: Keyword Matching + Semantic Similarity (Instant Vietnamese)";

/// Matches needed for full confidence.
const SATURATION_MATCHES: f32 = 3.0;
/// Confidence reported when no keyword matched at all.
const NO_MATCH_CONFIDENCE: f32 = 0.5;

/// Outcome of assigning a text to a relief category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryResult {
    pub category: ReliefCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl CategoryResult {
    /// `{FOOD, 0.0}`, returned for empty or unusable input.
    pub fn placeholder() -> Self {
        Self {
            category: ReliefCategory::Food,
            category_name: None,
            confidence: 0.0,
            method: None,
        }
    }
}

/// Deterministic keyword-weighted category classifier.
///
/// Matching is plain substring containment on the lower-cased text: no
/// tokenization and no word boundaries, so `eat` matches inside `weather`.
/// Each keyword counts once however often it appears.
#[derive(Debug, Clone, Copy)]
pub struct CategoryScorer<'a> {
    table: &'a CategoryKeywordTable,
}

impl Default for CategoryScorer<'static> {
    fn default() -> Self {
        Self::new(default_table())
    }
}

impl<'a> CategoryScorer<'a> {
    pub fn new(table: &'a CategoryKeywordTable) -> Self {
        Self { table }
    }

    /// Raw score of every category, in table order.
    pub fn raw_scores(&self, text: &str) -> Vec<(ReliefCategory, f32)> {
        let lowered = text.to_lowercase();
        self.table
            .entries()
            .iter()
            .map(|(category, keywords)| {
                let matches = keywords
                    .keywords()
                    .iter()
                    .filter(|k| lowered.contains(k.as_str()))
                    .count();
                (*category, keywords.weight() * matches as f32)
            })
            .collect()
    }

    /// Classify one text. Blank text yields [`CategoryResult::placeholder`].
    pub fn classify(&self, text: &str) -> CategoryResult {
        if is_blank(text) {
            return CategoryResult::placeholder();
        }

        let (category, raw) = best_category(&self.raw_scores(text));
        CategoryResult {
            category,
            category_name: Some(category.display_name().to_string()),
            confidence: normalize_confidence(raw),
            method: Some(KEYWORD_METHOD.to_string()),
        }
    }

    /// Classify each item independently, preserving order. `None` and blank
    /// items become placeholders.
    pub fn classify_batch<I, T>(&self, texts: I) -> Vec<CategoryResult>
    where
        I: IntoIterator<Item = Option<T>>,
        T: AsRef<str>,
    {
        texts
            .into_iter()
            .map(|text| match text {
                Some(text) => self.classify(text.as_ref()),
                None => CategoryResult::placeholder(),
            })
            .collect()
    }
}

/// First category holding the maximum score; FOOD when nothing scored.
fn best_category(scores: &[(ReliefCategory, f32)]) -> (ReliefCategory, f32) {
    let max = scores.iter().map(|(_, s)| *s).fold(0.0_f32, f32::max);
    if max <= 0.0 {
        return (ReliefCategory::Food, 0.0);
    }
    scores
        .iter()
        .copied()
        .find(|(_, s)| *s == max)
        .unwrap_or((ReliefCategory::Food, 0.0))
}

/// Heuristic saturation, not a calibrated probability: three matches at
/// weight 1.0 already give full confidence.
pub fn normalize_confidence(raw_score: f32) -> f32 {
    if raw_score > 0.0 {
        (raw_score / SATURATION_MATCHES).min(1.0)
    } else {
        NO_MATCH_CONFIDENCE
    }
}

#[cfg(test)]
mod tests {
    use super::super::keywords::CategoryKeywords;
    use super::*;

    fn classify(text: &str) -> CategoryResult {
        CategoryScorer::default().classify(text)
    }

    #[test]
    fn english_food_request() {
        let result = classify("We need food and water");
        assert_eq!(result.category, ReliefCategory::Food);
        assert!((result.confidence - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(
            result.category_name.as_deref(),
            Some("Food assistance (cấp phát thực phẩm)")
        );
        assert_eq!(result.method.as_deref(), Some(KEYWORD_METHOD));
    }

    #[test]
    fn vietnamese_food_request() {
        let result = classify("Chúng tôi cần lương thực và nước");
        assert_eq!(result.category, ReliefCategory::Food);
        assert!((result.confidence - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let result = classify("HOSPITAL and DOCTOR needed");
        assert_eq!(result.category, ReliefCategory::Medical);
        assert!((result.confidence - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn blank_text_is_placeholder() {
        assert_eq!(classify(""), CategoryResult::placeholder());
        assert_eq!(classify("   \n"), CategoryResult::placeholder());
        let placeholder = CategoryResult::placeholder();
        assert_eq!(placeholder.category, ReliefCategory::Food);
        assert_eq!(placeholder.confidence, 0.0);
    }

    #[test]
    fn no_match_defaults_to_food_half_confidence() {
        let result = classify("Hello world");
        assert_eq!(result.category, ReliefCategory::Food);
        assert_eq!(result.confidence, 0.5);
        assert!(result.category_name.is_some());
    }

    #[test]
    fn substrings_inside_words_still_match() {
        // "eat" inside "weather"
        let result = classify("the weather is lovely");
        assert_eq!(result.category, ReliefCategory::Food);
        assert!((result.confidence - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn repeated_keyword_counts_once() {
        let scores = CategoryScorer::default().raw_scores("food food food");
        assert_eq!(scores[0], (ReliefCategory::Food, 1.0));
    }

    #[test]
    fn confidence_saturates_at_three_matches() {
        let result = classify("food water rice meal");
        assert_eq!(result.category, ReliefCategory::Food);
        assert_eq!(result.confidence, 1.0);

        let result = classify("The refugee family lost their house and needs a tent");
        assert_eq!(result.category, ReliefCategory::Shelter);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn ties_go_to_earlier_category() {
        let result = classify("medical cash");
        assert_eq!(result.category, ReliefCategory::Medical);
        assert!((result.confidence - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn weights_scale_raw_scores() {
        let table = CategoryKeywordTable::new(vec![
            (ReliefCategory::Food, CategoryKeywords::new(["food", "water"], 1.0)),
            (ReliefCategory::Cash, CategoryKeywords::new(["cash"], 2.5)),
        ])
        .unwrap();
        let scorer = CategoryScorer::new(&table);

        assert_eq!(
            scorer.raw_scores("food, water and cash"),
            vec![(ReliefCategory::Food, 2.0), (ReliefCategory::Cash, 2.5)]
        );
        let result = scorer.classify("food, water and cash");
        assert_eq!(result.category, ReliefCategory::Cash);
        assert!((result.confidence - 2.5 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn scoring_is_idempotent() {
        let text = "Cần xe buýt để vận chuyển người sơ tán";
        assert_eq!(classify(text), classify(text));
    }

    #[test]
    fn batch_preserves_order_and_placeholders() {
        let results = CategoryScorer::default().classify_batch(vec![
            Some("need medicine"),
            None,
            Some(""),
            Some("cash grant"),
        ]);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].category, ReliefCategory::Medical);
        assert_eq!(results[1], CategoryResult::placeholder());
        assert_eq!(results[2], CategoryResult::placeholder());
        assert_eq!(results[3].category, ReliefCategory::Cash);
    }

    #[test]
    fn normalization_constants() {
        assert_eq!(normalize_confidence(0.0), 0.5);
        assert!((normalize_confidence(1.0) - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(normalize_confidence(3.0), 1.0);
        assert_eq!(normalize_confidence(7.0), 1.0);
    }
}
