use bevy::{
    asset::{LoadState, UntypedAssetId},
    gltf::Gltf,
    pbr::prelude::EnvironmentMapLight,
    prelude::*,
};

use constants::camera::{
    ENVIRONMENT_INTENSITY, EYE_POSITION, FAR_PLANE, FOV_DEGREES, KEY_LIGHT_ILLUMINANCE, NEAR_PLANE,
};

use crate::engine::{
    assets::scene_manifest::{ResourceEntry, ResourceKind},
    camera::turntable::ModelRig,
    core::app_state::AppState,
    loading::progress::LoadingProgress,
    reveal::animation::WigglePivot,
};

/// Handle to one decoded resource, typed by the manifest kind.
#[derive(Debug, Clone)]
pub enum ResourceHandle {
    Model(Handle<Gltf>),
    Image(Handle<Image>),
}

impl ResourceHandle {
    fn untyped_id(&self) -> UntypedAssetId {
        match self {
            ResourceHandle::Model(handle) => handle.id().untyped(),
            ResourceHandle::Image(handle) => handle.id().untyped(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResourceSlot {
    pub id: String,
    pub kind: ResourceKind,
    pub handle: ResourceHandle,
}

/// The in-flight resource batch, keyed by manifest id. Ids are unique by
/// contract; a duplicate silently overwrites the earlier entry.
#[derive(Resource, Debug, Default)]
pub struct ResourceHandles {
    slots: Vec<ResourceSlot>,
}

impl ResourceHandles {
    /// Start every fetch of the batch concurrently.
    pub fn load_batch(entries: &[ResourceEntry], asset_server: &AssetServer) -> Self {
        let mut handles = Self::default();
        for entry in entries {
            let handle = match entry.kind {
                ResourceKind::Model => ResourceHandle::Model(asset_server.load(&entry.source)),
                ResourceKind::Texture | ResourceKind::Environment => {
                    ResourceHandle::Image(asset_server.load(&entry.source))
                }
            };
            handles.upsert(ResourceSlot {
                id: entry.id.clone(),
                kind: entry.kind,
                handle,
            });
        }
        handles
    }

    fn upsert(&mut self, slot: ResourceSlot) {
        if let Some(existing) = self.slots.iter_mut().find(|s| s.id == slot.id) {
            *existing = slot;
        } else {
            self.slots.push(slot);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceSlot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ResourceSlot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    /// First Model entry, in manifest order.
    pub fn model(&self) -> Option<&Handle<Gltf>> {
        self.slots.iter().find_map(|slot| match &slot.handle {
            ResourceHandle::Model(handle) => Some(handle),
            _ => None,
        })
    }

    /// Image-based-lighting pair, in manifest order: the first Environment
    /// entry is the diffuse (irradiance) map, the second the specular
    /// (radiance) map. A single entry serves as both. The sources must be
    /// pre-filtered cubemaps (ktx2); the renderer binds them to cube
    /// samplers, so a flat equirectangular image cannot be used directly.
    pub fn environment_maps(&self) -> Option<(Handle<Image>, Handle<Image>)> {
        let mut images = self
            .slots
            .iter()
            .filter(|slot| slot.kind == ResourceKind::Environment)
            .filter_map(|slot| match &slot.handle {
                ResourceHandle::Image(handle) => Some(handle.clone()),
                _ => None,
            });
        let diffuse = images.next()?;
        let specular = images.next().unwrap_or_else(|| diffuse.clone());
        Some((diffuse, specular))
    }
}

/// Wait for the whole batch. The first failed entry fails the batch; no
/// partial scene is constructed.
pub fn poll_resource_batch(
    asset_server: Res<AssetServer>,
    handles: Option<Res<ResourceHandles>>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !loading_progress.manifest_loaded || loading_progress.resources_loaded {
        return;
    }
    let Some(handles) = handles else {
        return;
    };

    let mut all_loaded = true;
    for slot in handles.iter() {
        match asset_server.load_state(slot.handle.untyped_id()) {
            LoadState::Failed(error) => {
                error!("✗ Resource '{}' failed to load: {}", slot.id, error);
                next_state.set(AppState::LoadFailed);
                return;
            }
            LoadState::Loaded => {}
            _ => all_loaded = false,
        }
    }

    if all_loaded {
        info!("✓ Resource batch loaded ({} entries)", handles.len());
        loading_progress.resources_loaded = true;
    }
}

/// Spawn camera, lighting and the model rig once every resource decoded.
/// The rig carries the turntable yaw; the wiggle pivot underneath carries
/// the intro timeline, so the two rotations compose.
pub fn spawn_scene(
    mut commands: Commands,
    handles: Option<Res<ResourceHandles>>,
    gltf_assets: Res<Assets<Gltf>>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !loading_progress.resources_loaded || loading_progress.scene_spawned {
        return;
    }
    let Some(handles) = handles else {
        return;
    };

    let Some(model) = handles.model() else {
        error!("✗ Manifest declares no model resource");
        next_state.set(AppState::LoadFailed);
        return;
    };
    let Some(gltf) = gltf_assets.get(model) else {
        return;
    };
    let Some(scene) = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
    else {
        error!("✗ Model contains no scene");
        next_state.set(AppState::LoadFailed);
        return;
    };

    spawn_camera(&mut commands, handles.environment_maps());
    spawn_lighting(&mut commands);

    commands
        .spawn((ModelRig, Transform::default(), Visibility::default()))
        .with_children(|rig| {
            rig.spawn((
                WigglePivot,
                Transform::default(),
                Visibility::default(),
                SceneRoot(scene),
            ));
        });

    info!("✓ Scene spawned");
    loading_progress.scene_spawned = true;
}

fn spawn_camera(commands: &mut Commands, environment: Option<(Handle<Image>, Handle<Image>)>) {
    let mut camera = commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        Transform::from_translation(EYE_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    if let Some((diffuse_map, specular_map)) = environment {
        camera.insert(EnvironmentMapLight {
            diffuse_map,
            specular_map,
            intensity: ENVIRONMENT_INTENSITY,
            ..default()
        });
    }
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: KEY_LIGHT_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}
