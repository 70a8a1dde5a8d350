use bevy::prelude::*;
use thiserror::Error;

use crate::engine::{
    core::app_state::AppState,
    loading::progress::LoadingProgress,
    reveal::{
        animation::{IntroWiggle, PartAnimations, WigglePivot},
        apply::notify_group_changed,
        groups::GroupTable,
        navigation::Navigation,
        parts::{BaseSnapshot, Part, PartPaint, PartRegistry},
        transition::TransitionPlan,
    },
};
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("model has no numerically tagged sub-objects")]
    NoParts,
    #[error("part name tags are not contiguous: expected {expected}, found {found}")]
    NonContiguousTags { expected: usize, found: usize },
}

/// Assign stable part ids from the asset's sortable name tags. Tags must
/// cover 0..N-1 without gaps; anything else is a broken export.
pub fn assign_part_indices<T>(mut tagged: Vec<(usize, T)>) -> Result<Vec<T>, IngestError> {
    if tagged.is_empty() {
        return Err(IngestError::NoParts);
    }
    tagged.sort_by_key(|(tag, _)| *tag);
    for (expected, (tag, _)) in tagged.iter().enumerate() {
        if *tag != expected {
            return Err(IngestError::NonContiguousTags {
                expected,
                found: *tag,
            });
        }
    }
    Ok(tagged.into_iter().map(|(_, value)| value).collect())
}

/// Walk the spawned glTF hierarchy, turn numerically named sub-objects into
/// parts, capture their base snapshots and show the initial group.
///
/// Base snapshots are taken exactly once, here, before any transition runs.
pub fn ingest_model_parts(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
    groups: Option<Res<GroupTable>>,
    mut navigation: ResMut<Navigation>,
    mut rpc: ResMut<WebRpcInterface>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    pivots: Query<Entity, With<WigglePivot>>,
    children: Query<&Children>,
    candidates: Query<(&Name, &Transform)>,
    mesh_materials: Query<&MeshMaterial3d<StandardMaterial>>,
) {
    if !loading_progress.scene_spawned || loading_progress.parts_ingested {
        return;
    }
    let Some(groups) = groups else {
        return;
    };
    let Ok(pivot) = pivots.single() else {
        return;
    };

    // The glTF scene instantiates asynchronously; wait for its hierarchy.
    if children.get(pivot).map_or(0, |c| c.len()) == 0 {
        return;
    }

    let mut tagged = Vec::new();
    for entity in descendants(pivot, &children) {
        if let Ok((name, transform)) = candidates.get(entity) {
            if let Ok(tag) = name.as_str().trim().parse::<usize>() {
                tagged.push((tag, (entity, *transform)));
            }
        }
    }

    let ordered = match assign_part_indices(tagged) {
        Ok(ordered) => ordered,
        Err(error) => {
            error!("✗ Part ingestion failed: {}", error);
            next_state.set(AppState::LoadFailed);
            return;
        }
    };
    let part_count = ordered.len();

    if let Err(error) = groups.validate_against(part_count) {
        error!("✗ Group table rejected: {}", error);
        next_state.set(AppState::LoadFailed);
        return;
    }

    // Initial show: snap to membership of group 0, no animation, no recolour.
    let Some(initial_group) = groups.get(0) else {
        return;
    };
    let plan = TransitionPlan::initial(initial_group, part_count);

    let mut registry = PartRegistry::default();
    for (index, (entity, transform)) in ordered.into_iter().enumerate() {
        let paint =
            clone_part_materials(entity, &children, &mesh_materials, &mut materials, &mut commands);

        commands.entity(entity).insert((
            Part { index },
            BaseSnapshot {
                position: transform.translation,
            },
            paint,
            PartAnimations::default(),
            if plan.visible[index] {
                Visibility::Visible
            } else {
                Visibility::Hidden
            },
        ));
        registry.parts.push(entity);
    }

    navigation.commit(plan.next_visible(), Default::default());
    commands.insert_resource(registry);
    commands.entity(pivot).insert(IntroWiggle::timeline());

    notify_group_changed(&mut rpc, 0, groups.len(), initial_group);
    info!("✓ Ingested {} parts", part_count);
    loading_progress.parts_ingested = true;
    next_state.set(AppState::Running);
}

/// Give every mesh in the part's subtree its own material instance so a
/// highlight never bleeds across parts sharing a glTF source material, and
/// a multi-mesh part recolours as one unit. The base colour of each
/// instance is captured here, before any transition runs.
fn clone_part_materials(
    part: Entity,
    children: &Query<&Children>,
    mesh_materials: &Query<&MeshMaterial3d<StandardMaterial>>,
    materials: &mut Assets<StandardMaterial>,
    commands: &mut Commands,
) -> PartPaint {
    let mut paint = PartPaint::default();
    for entity in std::iter::once(part).chain(descendants(part, children)) {
        let Ok(source) = mesh_materials.get(entity) else {
            continue;
        };
        let cloned = materials.get(&source.0).cloned().unwrap_or_default();
        let colour = cloned.base_color;
        let owned = materials.add(cloned);
        commands.entity(entity).insert(MeshMaterial3d(owned.clone()));
        paint.coats.push((owned, colour));
    }

    if paint.coats.is_empty() {
        warn!("Part entity {:?} carries no meshes; it cannot be recoloured", part);
    }
    paint
}

fn descendants(root: Entity, children: &Query<&Children>) -> Vec<Entity> {
    let mut stack = vec![root];
    let mut collected = Vec::new();
    while let Some(entity) = stack.pop() {
        if let Ok(direct) = children.get(entity) {
            for child in direct.iter() {
                collected.push(child);
                stack.push(child);
            }
        }
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_sorted_into_index_order() {
        let ordered = assign_part_indices(vec![(2, "c"), (0, "a"), (1, "b")]).unwrap();
        assert_eq!(ordered, vec!["a", "b", "c"]);
    }

    #[test]
    fn gap_in_tags_fails_fast() {
        let error = assign_part_indices(vec![(0, "a"), (2, "c")]).unwrap_err();
        assert_eq!(error, IngestError::NonContiguousTags { expected: 1, found: 2 });
    }

    #[test]
    fn tags_not_starting_at_zero_fail() {
        let error = assign_part_indices(vec![(1, "b"), (2, "c")]).unwrap_err();
        assert_eq!(error, IngestError::NonContiguousTags { expected: 0, found: 1 });
    }

    #[test]
    fn empty_model_fails() {
        assert_eq!(assign_part_indices::<()>(Vec::new()).unwrap_err(), IngestError::NoParts);
    }

    #[test]
    fn duplicate_tags_fail() {
        let error = assign_part_indices(vec![(0, "a"), (0, "b")]).unwrap_err();
        assert_eq!(error, IngestError::NonContiguousTags { expected: 1, found: 0 });
    }
}
