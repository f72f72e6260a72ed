//! Hand-off from the correlation query to the synthesis model.
//!
//! [`InsightContext::build`] gathers everything the model needs to explain a pattern
//! (top correlated ingredients, their nutrients, how often the symptom was logged)
//! and [`InsightContext::prompt`] renders it. The model call itself lives outside this
//! crate.

use serde::Serialize;
use std::fmt::Write;

use crate::graph::{GraphStore, IngredientCount};

/// How much data backs a set of correlations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// `High` at a top count of 5+ across 3+ ingredients, `Medium` at a top count of
    /// 3+ or 2+ ingredients, otherwise `Low`. Expects `correlations` ranked.
    pub fn estimate(correlations: &[IngredientCount]) -> Self {
        let Some(top) = correlations.first() else {
            return Self::Low;
        };
        let items = correlations.len();
        if top.count >= 5 && items >= 3 {
            Self::High
        } else if top.count >= 3 || items >= 2 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// A correlated ingredient plus the nutrients the graph knows for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelatedIngredient {
    pub ingredient: String,
    pub count: usize,
    pub nutrients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightContext {
    pub symptom: String,
    /// Number of logs that experienced the symptom.
    pub frequency: usize,
    pub correlated: Vec<CorrelatedIngredient>,
    pub confidence: Confidence,
}

impl InsightContext {
    pub fn build(graph: &GraphStore, symptom: &str, top_n: usize) -> Self {
        let ranked = graph.query_ingredients_for_symptom(symptom);
        let confidence = Confidence::estimate(&ranked);
        let correlated = ranked
            .into_iter()
            .take(top_n)
            .map(|c| CorrelatedIngredient {
                nutrients: graph.nutrients_for_ingredient(&c.ingredient),
                ingredient: c.ingredient,
                count: c.count,
            })
            .collect();

        Self {
            symptom: symptom.trim().to_string(),
            frequency: graph.symptom_frequency(symptom),
            correlated,
            confidence,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.correlated.is_empty()
    }

    /// Message shown instead of calling the model when nothing correlates yet.
    pub fn no_data_message(&self) -> String {
        format!(
            "No data yet for '{}'. Log more meals and symptoms to see patterns!",
            self.symptom
        )
    }

    /// Prompt for the synthesis model, or `None` when there is nothing to explain.
    pub fn prompt(&self) -> Option<String> {
        if !self.has_data() {
            return None;
        }

        let mut data = String::new();
        for c in &self.correlated {
            let _ = write!(data, "- {}: seen {} time(s)", c.ingredient, c.count);
            if !c.nutrients.is_empty() {
                let _ = write!(data, " (nutrients: {})", c.nutrients.join(", "));
            }
            data.push('\n');
        }

        Some(format!(
            "You are a health insights agent analyzing a personal food and symptom log.\n\
             \n\
             User query: \"What foods seem to give me {symptom}?\"\n\
             The user logged {symptom} {frequency} time(s).\n\
             \n\
             Correlated ingredients (from graph analysis):\n\
             {data}\
             \n\
             Generate a 2-3 sentence response that:\n\
             1. Identifies the pattern\n\
             2. Explains why, based on the nutritional properties\n\
             3. Sounds natural and friendly\n\
             \n\
             Keep it concise and actionable.",
            symptom = self.symptom,
            frequency = self.frequency,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Sentiment;
    use chrono::{TimeDelta, TimeZone, Utc};
    use std::collections::HashMap;

    fn counts(values: &[usize]) -> Vec<IngredientCount> {
        values
            .iter()
            .enumerate()
            .map(|(i, &count)| IngredientCount {
                ingredient: format!("i{i}"),
                count,
            })
            .collect()
    }

    #[test]
    fn confidence_thresholds() {
        assert_eq!(Confidence::estimate(&[]), Confidence::Low);
        assert_eq!(Confidence::estimate(&counts(&[1])), Confidence::Low);
        assert_eq!(Confidence::estimate(&counts(&[1, 1])), Confidence::Medium);
        assert_eq!(Confidence::estimate(&counts(&[3])), Confidence::Medium);
        assert_eq!(Confidence::estimate(&counts(&[5, 2])), Confidence::Medium);
        assert_eq!(Confidence::estimate(&counts(&[5, 2, 1])), Confidence::High);
    }

    #[test]
    fn empty_context_has_no_prompt() {
        let ctx = InsightContext::build(&GraphStore::default(), "Nausea", 5);
        assert!(!ctx.has_data());
        assert!(ctx.prompt().is_none());
        assert!(ctx.no_data_message().contains("Nausea"));
    }

    #[test]
    fn prompt_lists_top_ingredients_with_nutrients() {
        let mut g = GraphStore::default();
        let t0 = Utc.with_ymd_and_hms(2025, 10, 4, 12, 0, 0).unwrap();
        let mut nutrients = HashMap::new();
        nutrients.insert("Avocado".to_string(), vec!["Healthy Fats".to_string()]);
        g.add_meal(&["Avocado", "Tomato", "Cucumber"], &nutrients, t0, None).unwrap();
        g.add_symptom_log(&["High Energy"], Sentiment::Positive, t0 + TimeDelta::hours(1), None)
            .unwrap();

        let ctx = InsightContext::build(&g, "high energy", 2);
        assert_eq!(ctx.frequency, 1);
        assert_eq!(ctx.correlated.len(), 2);
        assert_eq!(ctx.correlated[0].ingredient, "Avocado");
        assert_eq!(ctx.correlated[0].nutrients, vec!["Healthy Fats"]);
        assert_eq!(ctx.confidence, Confidence::Medium);

        let prompt = ctx.prompt().unwrap();
        assert!(prompt.contains("- Avocado: seen 1 time(s) (nutrients: Healthy Fats)"));
        assert!(prompt.contains("- Cucumber: seen 1 time(s)"));
        assert!(!prompt.contains("Tomato"));
    }
}
