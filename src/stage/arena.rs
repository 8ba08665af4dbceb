use crate::foundation::error::UnveilResult;
use crate::observe::backend::IntersectionEntry;
use crate::reveal::animator::{RevealAnimator, RevealEvent};

/// Index of a region inside a [`RevealStage`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RegionId(pub usize);

/// Arena of guarded regions, one [`RevealAnimator`] per slot.
///
/// Removed slots stay empty so ids are never reused.
#[derive(Debug, Default)]
pub struct RevealStage {
    regions: Vec<Option<RevealAnimator>>,
}

impl RevealStage {
    /// Empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region and return its id.
    pub fn insert(&mut self, animator: RevealAnimator) -> RegionId {
        let id = RegionId(self.regions.len());
        self.regions.push(Some(animator));
        id
    }

    /// Region `id`, if still present.
    pub fn get(&self, id: RegionId) -> Option<&RevealAnimator> {
        self.regions.get(id.0).and_then(Option::as_ref)
    }

    /// Mutable region `id`, if still present.
    pub fn get_mut(&mut self, id: RegionId) -> Option<&mut RevealAnimator> {
        self.regions.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Remove region `id`. Dropping the animator releases its observation.
    pub fn remove(&mut self, id: RegionId) -> Option<RevealAnimator> {
        self.regions.get_mut(id.0).and_then(Option::take)
    }

    /// Number of live regions.
    pub fn len(&self) -> usize {
        self.regions.iter().flatten().count()
    }

    /// Return `true` when no region is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live regions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &RevealAnimator)> {
        self.regions
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.as_ref().map(|a| (RegionId(i), a)))
    }

    /// Route a host batch to every region and collect the flips, in insertion order.
    ///
    /// Each region sees only entries for its own target. A configuration error in one
    /// region aborts the batch.
    #[tracing::instrument(skip_all, fields(entries = entries.len()))]
    pub fn deliver(
        &mut self,
        entries: &[IntersectionEntry],
    ) -> UnveilResult<Vec<(RegionId, RevealEvent)>> {
        let mut out = Vec::new();
        for (i, slot) in self.regions.iter_mut().enumerate() {
            let Some(animator) = slot.as_mut() else {
                continue;
            };
            let Some(target) = animator.observer().target() else {
                continue;
            };
            if !entries.iter().any(|e| e.target == target) {
                continue;
            }
            if let Some(event) = animator.deliver(entries)? {
                out.push((RegionId(i), event));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/arena.rs"]
mod tests;
