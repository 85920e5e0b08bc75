use crate::source::SourceHandle;
use std::collections::HashMap;

/// Find the installed source behind a numeric id.
pub trait SourceResolver: Send + Sync {
    fn get(&self, id: i64) -> Option<SourceHandle>;
}

/// A plain map of installed sources.
#[derive(Default, Clone)]
pub struct SourceRegistry {
    sources: HashMap<i64, SourceHandle>,
}
impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a source, replacing any previous one with the same id.
    pub fn register(&mut self, source: SourceHandle) -> Option<SourceHandle> {
        self.sources.insert(source.id(), source)
    }

    pub fn with(mut self, source: SourceHandle) -> Self {
        self.register(source);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
impl SourceResolver for SourceRegistry {
    fn get(&self, id: i64) -> Option<SourceHandle> {
        self.sources.get(&id).cloned()
    }
}
impl FromIterator<SourceHandle> for SourceRegistry {
    fn from_iter<T: IntoIterator<Item = SourceHandle>>(iter: T) -> Self {
        let mut registry = Self::new();
        for source in iter {
            registry.register(source);
        }
        registry
    }
}
impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.sources.keys().collect();
        ids.sort();
        f.debug_struct("SourceRegistry").field("sources", &ids).finish()
    }
}
