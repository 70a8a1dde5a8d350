use bevy::prelude::*;

use constants::animation::{FLY_HEIGHT, HIGHLIGHT_COLOUR};

use crate::rpc::web_rpc::WebRpcInterface;

use super::{
    animation::{AnimationTask, PartAnimations},
    groups::{GroupTable, RevealGroup},
    navigation::{Navigation, NavigationCommand},
    parts::{BaseSnapshot, Part, PartPaint, PartRegistry},
    transition::TransitionPlan,
};

pub type PartQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Part,
        &'static BaseSnapshot,
        &'static PartPaint,
        &'static mut Transform,
        &'static mut Visibility,
        &'static mut PartAnimations,
    ),
>;

/// Arrow keys mirror the host page's previous/next buttons.
pub fn handle_navigation_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: EventWriter<NavigationCommand>,
) {
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        commands.write(NavigationCommand::Advance);
    }
    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        commands.write(NavigationCommand::Retreat);
    }
}

/// Consume navigation commands, diff the target group against the current
/// scene and apply the resulting plan. Boundary commands are no-ops.
pub fn apply_navigation(
    mut commands: EventReader<NavigationCommand>,
    mut navigation: ResMut<Navigation>,
    groups: Res<GroupTable>,
    registry: Res<PartRegistry>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rpc: ResMut<WebRpcInterface>,
    mut parts: PartQuery,
) {
    for command in commands.read() {
        let target = match command {
            NavigationCommand::Advance => navigation.advance(groups.len()),
            NavigationCommand::Retreat => navigation.retreat(),
        };
        let Some(target) = target else {
            continue;
        };
        let Some(group) = groups.get(target) else {
            continue;
        };

        let plan = TransitionPlan::between(
            group,
            navigation.previous_visible(),
            navigation.highlighted(),
            registry.part_count(),
        );
        let highlighted = plan.next_highlighted(navigation.highlighted());
        apply_plan(&plan, &registry, &mut materials, &mut parts);
        navigation.commit(plan.next_visible(), highlighted);

        notify_group_changed(&mut rpc, target, groups.len(), group);
    }
}

/// Mutate the scene according to one transition plan. Shared between the
/// initial snap (ingestion) and every later diffed transition.
pub fn apply_plan(
    plan: &TransitionPlan,
    registry: &PartRegistry,
    materials: &mut Assets<StandardMaterial>,
    parts: &mut PartQuery,
) {
    for &entity in &registry.parts {
        let Ok((part, snapshot, paint, mut transform, mut visibility, mut animations)) =
            parts.get_mut(entity)
        else {
            continue;
        };
        let index = part.index;

        if plan.snap {
            transform.translation = snapshot.position;
            transform.scale = Vec3::ONE;
            *visibility = if plan.visible[index] {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
            continue;
        }

        if plan.appearing.contains(&index) {
            *visibility = Visibility::Visible;
            transform.translation.y = snapshot.position.y + FLY_HEIGHT;
            animations.0.push(AnimationTask::fly_in(snapshot.position.y));
            animations.0.push(AnimationTask::scale_pulse());
            for (handle, _) in &paint.coats {
                if let Some(material) = materials.get_mut(handle) {
                    material.base_color = HIGHLIGHT_COLOUR;
                }
            }
        } else if plan.disappearing.contains(&index) {
            // Stays on screen for the fly-out; the task completion hides it.
            *visibility = Visibility::Visible;
            animations.0.push(AnimationTask::fly_out(snapshot.position.y));
        } else {
            *visibility = if plan.visible[index] {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
        }

        if plan.restore.contains(&index) {
            for (handle, base_colour) in &paint.coats {
                if let Some(material) = materials.get_mut(handle) {
                    material.base_color = *base_colour;
                }
            }
        }
    }
}

/// Report `(index, total)` for the host progress bar and the group labels
/// for its card. Write-only; the host owns the DOM.
pub fn notify_group_changed(
    rpc: &mut WebRpcInterface,
    index: usize,
    total: usize,
    group: &RevealGroup,
) {
    info!("→ Group {}/{}: '{}'", index + 1, total, group.name);
    rpc.send_notification(
        "reveal/groupChanged",
        serde_json::json!({
            "index": index,
            "total": total,
            "name": group.name,
            "icon": group.icon,
            "size": group.size,
        }),
    );
}
