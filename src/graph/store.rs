//! Write path — validation, identity reuse, edge creation, and window linking.
//!
//! [`GraphStore`] owns every node and edge. Nodes live in a flat arena indexed by
//! [`NodeId`]; edges live in a second arena with per-node outgoing/incoming index
//! lists. Ingredient, nutrient, and symptom nodes are deduplicated through one
//! `normalized name -> NodeId` map per kind.
//!
//! Every mutation validates its whole input before touching the arenas, so a rejected
//! call leaves the graph exactly as it was.

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::{HashMap, HashSet};

use super::error::GraphError;
use super::types::{
    display_name, normalize_name, Edge, EdgeKind, Ingredient, Meal, NodeData, NodeId, NodeKind,
    Nutrient, Sentiment, Severity, Symptom, UserLog,
};

/// Default LOGGED_NEAR window: a log up to three hours after a meal is linked to it.
pub const DEFAULT_MEAL_WINDOW_MINUTES: i64 = 180;
/// Default window for two logs to count as co-occurring.
pub const DEFAULT_CO_OCCURRENCE_WINDOW_MINUTES: i64 = 60;

/// Time windows used when linking and querying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphSettings {
    /// Maximum elapsed time from a meal to a log for a LOGGED_NEAR edge.
    pub meal_window: TimeDelta,
    /// Maximum absolute time difference between two co-occurring logs.
    pub co_occurrence_window: TimeDelta,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            meal_window: TimeDelta::minutes(DEFAULT_MEAL_WINDOW_MINUTES),
            co_occurrence_window: TimeDelta::minutes(DEFAULT_CO_OCCURRENCE_WINDOW_MINUTES),
        }
    }
}

impl GraphSettings {
    pub fn with_meal_window(mut self, window: TimeDelta) -> Self {
        self.meal_window = window;
        self
    }

    pub fn with_co_occurrence_window(mut self, window: TimeDelta) -> Self {
        self.co_occurrence_window = window;
        self
    }
}

/// The node kinds whose identity is their normalized name.
#[derive(Debug, Clone, Copy)]
enum NamedKind {
    Ingredient,
    Nutrient,
    Symptom,
}

impl NamedKind {
    fn from_node_kind(kind: NodeKind) -> Option<Self> {
        match kind {
            NodeKind::Ingredient => Some(Self::Ingredient),
            NodeKind::Nutrient => Some(Self::Nutrient),
            NodeKind::Symptom => Some(Self::Symptom),
            NodeKind::Meal | NodeKind::UserLog => None,
        }
    }

    fn make(self, name: String) -> NodeData {
        match self {
            Self::Ingredient => NodeData::Ingredient(Ingredient { name }),
            Self::Nutrient => NodeData::Nutrient(Nutrient { name }),
            Self::Symptom => NodeData::Symptom(Symptom { name }),
        }
    }
}

/// A validated name: dedup key plus the spelling stored on a newly created node.
#[derive(Debug)]
struct CleanName {
    key: String,
    display: String,
}

fn clean_name(raw: &str, what: &str) -> Result<CleanName, GraphError> {
    let key = normalize_name(raw);
    if key.is_empty() {
        return Err(GraphError::invalid(format!("{what} name must not be empty")));
    }
    Ok(CleanName {
        key,
        display: display_name(raw),
    })
}

/// In-memory meal/symptom knowledge graph.
#[derive(Debug, Default)]
pub struct GraphStore {
    settings: GraphSettings,
    nodes: Vec<NodeData>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
    edge_set: HashSet<Edge>,
    ingredients: HashMap<String, NodeId>,
    nutrients: HashMap<String, NodeId>,
    symptoms: HashMap<String, NodeId>,
    meals: Vec<NodeId>,
    logs: Vec<NodeId>,
}

impl GraphStore {
    pub fn new(settings: GraphSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    /// Record a meal with its ingredients and their nutrients.
    ///
    /// Ingredient names are normalized before lookup, so `"Avocado"` and `"avocado "`
    /// resolve to one node. `nutrients_by_ingredient` keys are normalized the same way;
    /// ingredients without an entry simply get no HAS_NUTRIENT edges, and entries for
    /// ingredients not in this meal are ignored. Existing symptom logs that fall inside
    /// the window after `timestamp` are linked to the new meal.
    pub fn add_meal<S: AsRef<str>>(
        &mut self,
        ingredients: &[S],
        nutrients_by_ingredient: &HashMap<String, Vec<String>>,
        timestamp: DateTime<Utc>,
        photo_ref: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        // 1. Validate everything up front
        let mut nutrient_lists: HashMap<String, Vec<&String>> = HashMap::new();
        for (ingredient, nutrients) in nutrients_by_ingredient {
            nutrient_lists
                .entry(normalize_name(ingredient))
                .or_default()
                .extend(nutrients);
        }

        let mut plan = Vec::with_capacity(ingredients.len());
        for raw in ingredients {
            let ingredient = clean_name(raw.as_ref(), "ingredient")?;
            let nutrients = nutrient_lists
                .get(&ingredient.key)
                .map(|list| {
                    list.iter()
                        .map(|n| clean_name(n, "nutrient"))
                        .collect::<Result<Vec<_>, _>>()
                })
                .transpose()?
                .unwrap_or_default();
            plan.push((ingredient, nutrients));
        }

        let photo_ref = photo_ref
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        // 2. Meal node
        let meal_id = self.push_node(NodeData::Meal(Meal {
            timestamp,
            photo_ref,
        }));
        self.meals.push(meal_id);

        // 3. Ingredients and nutrients
        for (ingredient, nutrients) in plan {
            let ingredient_id = self.intern(NamedKind::Ingredient, ingredient);
            self.link(meal_id, ingredient_id, EdgeKind::Contains);
            for nutrient in nutrients {
                let nutrient_id = self.intern(NamedKind::Nutrient, nutrient);
                self.link(ingredient_id, nutrient_id, EdgeKind::HasNutrient);
            }
        }

        // 4. Logs recorded after this meal (backfilled meal photos)
        let mut linked = 0usize;
        for i in 0..self.logs.len() {
            let log_id = self.logs[i];
            let Some(log_time) = self.nodes[log_id.index()].timestamp() else {
                continue;
            };
            if self.within_meal_window(timestamp, log_time) && self.link(meal_id, log_id, EdgeKind::LoggedNear) {
                linked += 1;
            }
        }

        tracing::info!(
            meal_id = %meal_id,
            ingredients = ingredients.len(),
            linked_logs = linked,
            "meal added"
        );

        Ok(meal_id)
    }

    /// Record one symptom log per entry of `symptoms`, all sharing `sentiment`,
    /// `timestamp`, and `severity`.
    ///
    /// Each log gets an EXPERIENCED edge to its (created or reused) symptom node and a
    /// LOGGED_NEAR edge from every meal eaten within the window before `timestamp`.
    /// Returns the new log ids in input order; an empty input is a no-op.
    pub fn add_symptom_log<S: AsRef<str>>(
        &mut self,
        symptoms: &[S],
        sentiment: Sentiment,
        timestamp: DateTime<Utc>,
        severity: Option<Severity>,
    ) -> Result<Vec<NodeId>, GraphError> {
        let names = symptoms
            .iter()
            .map(|raw| clean_name(raw.as_ref(), "symptom"))
            .collect::<Result<Vec<_>, _>>()?;

        let mut log_ids = Vec::with_capacity(names.len());
        for name in names {
            let symptom_id = self.intern(NamedKind::Symptom, name);
            let symptom = self.nodes[symptom_id.index()]
                .name()
                .unwrap_or_default()
                .to_string();

            let log_id = self.push_node(NodeData::UserLog(UserLog {
                timestamp,
                sentiment,
                severity,
                symptom,
            }));
            self.logs.push(log_id);
            self.link(log_id, symptom_id, EdgeKind::Experienced);

            let mut linked = 0usize;
            for i in 0..self.meals.len() {
                let meal_id = self.meals[i];
                let Some(meal_time) = self.nodes[meal_id.index()].timestamp() else {
                    continue;
                };
                if self.within_meal_window(meal_time, timestamp) && self.link(meal_id, log_id, EdgeKind::LoggedNear) {
                    linked += 1;
                }
            }

            tracing::debug!(log_id = %log_id, symptom_id = %symptom_id, linked_meals = linked, "symptom log linked");
            log_ids.push(log_id);
        }

        tracing::info!(
            logs = log_ids.len(),
            sentiment = %sentiment,
            "symptom logs added"
        );

        Ok(log_ids)
    }

    /// `0 <= log_time - meal_time <= meal_window`.
    pub fn within_meal_window(&self, meal_time: DateTime<Utc>, log_time: DateTime<Utc>) -> bool {
        let elapsed = log_time - meal_time;
        elapsed >= TimeDelta::zero() && elapsed <= self.settings.meal_window
    }

    /// Look up a deduplicated node (ingredient, nutrient, symptom) by raw name.
    ///
    /// Always `None` for meals and logs, which have no name identity.
    pub fn lookup(&self, kind: NodeKind, name: &str) -> Option<NodeId> {
        let named = NamedKind::from_node_kind(kind)?;
        self.name_index(named).get(&normalize_name(name)).copied()
    }

    /// Read-only access to a node's attributes.
    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.index())
    }

    /// Targets of `id`'s outgoing edges of `kind`.
    pub fn successors(&self, id: NodeId, kind: EdgeKind) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing
            .get(id.index())
            .into_iter()
            .flatten()
            .map(|&e| self.edges[e])
            .filter(move |edge| edge.kind == kind)
            .map(|edge| edge.target)
    }

    /// Sources of `id`'s incoming edges of `kind`.
    pub fn predecessors(&self, id: NodeId, kind: EdgeKind) -> impl Iterator<Item = NodeId> + '_ {
        self.incoming
            .get(id.index())
            .into_iter()
            .flatten()
            .map(|&e| self.edges[e])
            .filter(move |edge| edge.kind == kind)
            .map(|edge| edge.source)
    }

    pub fn has_edge(&self, source: NodeId, target: NodeId, kind: EdgeKind) -> bool {
        self.edge_set.contains(&Edge { source, target, kind })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, data)| (NodeId(i as u64), data))
    }

    pub(crate) fn iter_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    pub(crate) fn log_ids(&self) -> &[NodeId] {
        &self.logs
    }

    fn push_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(data);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    /// Return the node for `name`, creating it on first sight.
    fn intern(&mut self, kind: NamedKind, name: CleanName) -> NodeId {
        if let Some(&id) = self.name_index(kind).get(&name.key) {
            return id;
        }
        let id = self.push_node(kind.make(name.display));
        self.name_index_mut(kind).insert(name.key, id);
        id
    }

    /// Add an edge unless the identical edge already exists. Returns `true` if added.
    fn link(&mut self, source: NodeId, target: NodeId, kind: EdgeKind) -> bool {
        debug_assert_ne!(source, target, "self-loop");
        debug_assert_eq!(
            (self.nodes[source.index()].kind(), self.nodes[target.index()].kind()),
            kind.endpoints(),
            "edge {kind} between wrong node kinds"
        );

        let edge = Edge { source, target, kind };
        if !self.edge_set.insert(edge) {
            return false;
        }
        let idx = self.edges.len();
        self.edges.push(edge);
        self.outgoing[source.index()].push(idx);
        self.incoming[target.index()].push(idx);
        true
    }

    fn name_index(&self, kind: NamedKind) -> &HashMap<String, NodeId> {
        match kind {
            NamedKind::Ingredient => &self.ingredients,
            NamedKind::Nutrient => &self.nutrients,
            NamedKind::Symptom => &self.symptoms,
        }
    }

    fn name_index_mut(&mut self, kind: NamedKind) -> &mut HashMap<String, NodeId> {
        match kind {
            NamedKind::Ingredient => &mut self.ingredients,
            NamedKind::Nutrient => &mut self.nutrients,
            NamedKind::Symptom => &mut self.symptoms,
        }
    }
}
