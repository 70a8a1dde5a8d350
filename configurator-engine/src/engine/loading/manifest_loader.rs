use bevy::{asset::LoadState, prelude::*};

use constants::path::RELATIVE_MANIFEST_PATH;

use crate::engine::{
    assets::scene_manifest::SceneManifest, core::app_state::AppState,
    loading::progress::LoadingProgress, loading::resource_loader::ResourceHandles,
};

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<SceneManifest>>,
}

/// Start the loading process.
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    let manifest_path = format!("{}/manifest.json", RELATIVE_MANIFEST_PATH);
    info!("Loading scene manifest from: {}", manifest_path);
    manifest_loader.handle = Some(asset_server.load(&manifest_path));
}

/// Once the manifest asset decodes, validate the group table and kick off
/// the resource batch. A malformed manifest is terminal.
pub fn poll_manifest(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    manifests: Res<Assets<SceneManifest>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.manifest_loaded {
        return;
    }
    let Some(ref handle) = manifest_loader.handle else {
        return;
    };

    if let LoadState::Failed(error) = asset_server.load_state(handle.id()) {
        error!("✗ Scene manifest failed to load: {}", error);
        next_state.set(AppState::LoadFailed);
        return;
    }

    let Some(manifest) = manifests.get(handle) else {
        return;
    };

    match manifest.group_table() {
        Ok(table) => {
            info!(
                "✓ Manifest loaded: {} resources, {} groups",
                manifest.resources.len(),
                table.len()
            );
            commands.insert_resource(ResourceHandles::load_batch(
                &manifest.resources,
                &asset_server,
            ));
            commands.insert_resource(table);
            loading_progress.manifest_loaded = true;
        }
        Err(error) => {
            error!("✗ Invalid group table: {}", error);
            next_state.set(AppState::LoadFailed);
        }
    }
}
