use std::collections::HashMap;
use std::sync::RwLock;

use super::super::domain::{AssessmentItem, ItemId};

pub const DEFAULT_RELIABILITY_DECAY: f64 = 0.005;
pub const DEFAULT_RELIABILITY_FLOOR: f64 = 0.5;

/// Supplies the per-item quality multiplier applied to every weighted response.
pub trait ItemReliabilityProvider: Send + Sync {
    fn multiplier(&self, item: &AssessmentItem) -> f64;
}

/// Heuristic that discounts later items: `max(floor, 1 - decay * (id - 1))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdDecayReliability {
    pub decay: f64,
    pub floor: f64,
}

impl Default for IdDecayReliability {
    fn default() -> Self {
        Self {
            decay: DEFAULT_RELIABILITY_DECAY,
            floor: DEFAULT_RELIABILITY_FLOOR,
        }
    }
}

impl ItemReliabilityProvider for IdDecayReliability {
    fn multiplier(&self, item: &AssessmentItem) -> f64 {
        let offset = item.id().saturating_sub(1) as f64;
        (1.0 - self.decay * offset).max(self.floor)
    }
}

/// Every item counts equally.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformReliability;

impl ItemReliabilityProvider for UniformReliability {
    fn multiplier(&self, _item: &AssessmentItem) -> f64 {
        1.0
    }
}

/// Empirically derived multipliers; items missing from the table use `fallback`.
#[derive(Debug, Clone, Default)]
pub struct TableReliability {
    multipliers: HashMap<ItemId, f64>,
    fallback: f64,
}

impl TableReliability {
    pub fn new(multipliers: HashMap<ItemId, f64>, fallback: f64) -> Self {
        Self {
            multipliers,
            fallback,
        }
    }
}

impl ItemReliabilityProvider for TableReliability {
    fn multiplier(&self, item: &AssessmentItem) -> f64 {
        self.multipliers
            .get(&item.id())
            .copied()
            .unwrap_or(self.fallback)
    }
}

/// Memoizes another provider per item id. Safe to share between concurrent scoring calls.
pub struct CachedReliability<P> {
    inner: P,
    cache: RwLock<HashMap<ItemId, f64>>,
}

impl<P: ItemReliabilityProvider> CachedReliability<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn cached_items(&self) -> usize {
        self.cache.read().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl<P: ItemReliabilityProvider> ItemReliabilityProvider for CachedReliability<P> {
    fn multiplier(&self, item: &AssessmentItem) -> f64 {
        if let Ok(guard) = self.cache.read() {
            if let Some(value) = guard.get(&item.id()) {
                return *value;
            }
        }

        let value = self.inner.multiplier(item);
        if let Ok(mut guard) = self.cache.write() {
            guard.entry(item.id()).or_insert(value);
        }
        value
    }
}
