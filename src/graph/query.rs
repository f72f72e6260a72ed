//! Read path — correlation query and symptom lookups.
//!
//! The correlation query is a fixed traversal:
//! `Symptom <-EXPERIENCED- UserLog <-LOGGED_NEAR- Meal -CONTAINS-> Ingredient`,
//! counting each ingredient once per qualifying (log, meal) pair. Unknown names are
//! not errors; they yield empty results.

use serde::Serialize;
use std::collections::HashMap;

use super::store::GraphStore;
use super::types::{EdgeKind, NodeData, NodeId, NodeKind};

/// An ingredient and how often it preceded the queried symptom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientCount {
    pub ingredient: String,
    pub count: usize,
}

/// A symptom and how many logs experienced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomFrequency {
    pub name: String,
    pub frequency: usize,
}

/// A symptom and how often it was logged close to the queried one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomCount {
    pub symptom: String,
    pub count: usize,
}

impl GraphStore {
    /// Rank ingredients by how often they appear in meals linked to logs of `symptom`.
    ///
    /// Ordered by count descending, then ingredient name ascending.
    pub fn query_ingredients_for_symptom(&self, symptom: &str) -> Vec<IngredientCount> {
        let Some(symptom_id) = self.lookup(NodeKind::Symptom, symptom) else {
            return Vec::new();
        };

        let mut counts: HashMap<NodeId, usize> = HashMap::new();
        for log_id in self.predecessors(symptom_id, EdgeKind::Experienced) {
            for meal_id in self.predecessors(log_id, EdgeKind::LoggedNear) {
                for ingredient_id in self.successors(meal_id, EdgeKind::Contains) {
                    *counts.entry(ingredient_id).or_default() += 1;
                }
            }
        }

        let mut ranked: Vec<IngredientCount> = counts
            .into_iter()
            .map(|(id, count)| IngredientCount {
                ingredient: self.display_name(id),
                count,
            })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.ingredient.cmp(&b.ingredient)));
        ranked
    }

    /// Number of logs that experienced `symptom`; 0 if it was never logged.
    pub fn symptom_frequency(&self, symptom: &str) -> usize {
        self.lookup(NodeKind::Symptom, symptom)
            .map(|id| self.predecessors(id, EdgeKind::Experienced).count())
            .unwrap_or(0)
    }

    /// Every known symptom with its log count, most frequent first.
    pub fn symptoms(&self) -> Vec<SymptomFrequency> {
        let mut all: Vec<SymptomFrequency> = self
            .iter_nodes()
            .filter_map(|(id, data)| match data {
                NodeData::Symptom(s) => Some(SymptomFrequency {
                    name: s.name.clone(),
                    frequency: self.predecessors(id, EdgeKind::Experienced).count(),
                }),
                _ => None,
            })
            .collect();
        all.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.name.cmp(&b.name)));
        all
    }

    /// Symptoms logged within the co-occurrence window of any log of `symptom`.
    ///
    /// Every (log of `symptom`, other log) pair within the window contributes one count
    /// to the other log's symptom; `symptom` itself is never reported.
    pub fn co_occurring_symptoms(&self, symptom: &str) -> Vec<SymptomCount> {
        let Some(symptom_id) = self.lookup(NodeKind::Symptom, symptom) else {
            return Vec::new();
        };
        let window = self.settings().co_occurrence_window;

        let mut counts: HashMap<NodeId, usize> = HashMap::new();
        for log_id in self.predecessors(symptom_id, EdgeKind::Experienced) {
            let Some(log_time) = self.node(log_id).and_then(NodeData::timestamp) else {
                continue;
            };
            for &other_id in self.log_ids() {
                if other_id == log_id {
                    continue;
                }
                let Some(other_time) = self.node(other_id).and_then(NodeData::timestamp) else {
                    continue;
                };
                if (log_time - other_time).abs() > window {
                    continue;
                }
                for other_symptom in self.successors(other_id, EdgeKind::Experienced) {
                    if other_symptom != symptom_id {
                        *counts.entry(other_symptom).or_default() += 1;
                    }
                }
            }
        }

        let mut ranked: Vec<SymptomCount> = counts
            .into_iter()
            .map(|(id, count)| SymptomCount {
                symptom: self.display_name(id),
                count,
            })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.symptom.cmp(&b.symptom)));
        ranked
    }

    /// Nutrients recorded for `ingredient`, sorted by name.
    pub fn nutrients_for_ingredient(&self, ingredient: &str) -> Vec<String> {
        let Some(id) = self.lookup(NodeKind::Ingredient, ingredient) else {
            return Vec::new();
        };
        let mut names: Vec<String> = self
            .successors(id, EdgeKind::HasNutrient)
            .map(|n| self.display_name(n))
            .collect();
        names.sort();
        names
    }

    fn display_name(&self, id: NodeId) -> String {
        self.node(id)
            .and_then(NodeData::name)
            .unwrap_or_default()
            .to_string()
    }
}
