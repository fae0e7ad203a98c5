use core::fmt;
use std::collections::BTreeMap;

/// Opaque handle to a backend resource.
///
/// Ids are unique per [`ResourceRegistry`]; `0` is never handed out.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ResourceId(u64);

impl ResourceId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a registered resource is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ResourceKind {
    Mesh,
    Texture,
    Surface,
    Shader,
    Material,
}

/// Live-resource bookkeeping owned by a backend.
///
/// Backends register every resource they create and drain the registry on
/// shutdown to release whatever the application never disposed of.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    next: u64,
    live: BTreeMap<ResourceId, ResourceKind>,
}

impl ResourceRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh id and tracks it as live.
    pub fn register(&mut self, kind: ResourceKind) -> ResourceId {
        self.next += 1;
        let id = ResourceId(self.next);
        self.live.insert(id, kind);
        log::trace!("registered {kind:?} {id}");
        id
    }

    /// Stops tracking `id`. Returns its kind, or `None` if it was not live
    /// (double release is harmless).
    pub fn release(&mut self, id: ResourceId) -> Option<ResourceKind> {
        self.live.remove(&id)
    }

    #[inline]
    pub fn kind(&self, id: ResourceId) -> Option<ResourceKind> {
        self.live.get(&id).copied()
    }

    #[inline]
    pub fn contains(&self, id: ResourceId) -> bool {
        self.live.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Live resources in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, ResourceKind)> + '_ {
        self.live.iter().map(|(&id, &kind)| (id, kind))
    }

    /// Removes every live resource, returned in creation order.
    pub fn drain(&mut self) -> Vec<(ResourceId, ResourceKind)> {
        let drained: Vec<_> = std::mem::take(&mut self.live).into_iter().collect();
        if !drained.is_empty() {
            log::debug!("released {} live resources", drained.len());
        }
        drained
    }
}
