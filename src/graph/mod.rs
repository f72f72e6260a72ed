//! Meal/symptom knowledge graph.
//!
//! Five node kinds (meal, ingredient, nutrient, user log, symptom) and four directed
//! edge kinds (CONTAINS, HAS_NUTRIENT, EXPERIENCED, LOGGED_NEAR). [`GraphStore`] owns
//! everything; [`SharedGraph`] is the handle the server and CLI pass around.

pub mod error;
pub mod export;
pub mod query;
pub mod stats;
pub mod store;
pub mod types;

pub use error::GraphError;
pub use export::GraphSnapshot;
pub use query::{IngredientCount, SymptomCount, SymptomFrequency};
pub use stats::GraphStats;
pub use store::{GraphSettings, GraphStore};
pub use types::{
    normalize_name, parse_timestamp, Edge, EdgeKind, Node, NodeData, NodeId, NodeKind, Sentiment,
    Severity,
};

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable handle to one [`GraphStore`].
///
/// Mutations take the write lock for their whole duration, so a symptom log's scan
/// over existing meals never interleaves with a concurrent meal insert. Readers share
/// the read lock and always see a graph between mutations.
#[derive(Debug, Clone, Default)]
pub struct SharedGraph {
    inner: Arc<RwLock<GraphStore>>,
}

impl SharedGraph {
    pub fn new(store: GraphStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, GraphStore>, GraphError> {
        self.inner
            .read()
            .map_err(|e| GraphError::LockPoisoned(e.to_string()))
    }

    pub fn write(&self) -> Result<RwLockWriteGuard<'_, GraphStore>, GraphError> {
        self.inner
            .write()
            .map_err(|e| GraphError::LockPoisoned(e.to_string()))
    }
}
