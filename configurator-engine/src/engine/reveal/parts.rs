use bevy::prelude::*;

/// One addressable sub-object of the loaded model. The index is the stable
/// integer id assigned at ingestion from the asset's sortable name tags.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Part {
    pub index: usize,
}

/// Immutable base position captured exactly once at ingestion, before the
/// first group is shown. Animation targets always refer back to this.
#[derive(Component, Debug, Clone, Copy)]
pub struct BaseSnapshot {
    pub position: Vec3,
}

/// The part's own material instances, one per mesh in its subtree, each
/// paired with the base colour captured at ingestion. Ingestion clones the
/// glTF materials per part so a highlight never bleeds across parts sharing
/// a source material, and a multi-mesh part highlights as one unit.
#[derive(Component, Debug, Clone, Default)]
pub struct PartPaint {
    pub coats: Vec<(Handle<StandardMaterial>, Color)>,
}

/// Part entities by index; position in the vec equals the part index, which
/// ingestion validated as contiguous 0..N-1.
#[derive(Resource, Debug, Default)]
pub struct PartRegistry {
    pub parts: Vec<Entity>,
}

impl PartRegistry {
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }
}
