// Standard library and external crates
use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

// Crate engine modules
use crate::engine::{
    assets::scene_manifest::SceneManifest,
    camera::turntable::{TurntableCamera, responsive_framing, turntable_update},
    core::app_state::{AppState, report_load_failure},
    core::window_config::create_window_config,
    input::drag::{DragActiveChanged, DragController, drag_input_system},
    loading::{
        manifest_loader::{ManifestLoader, poll_manifest, start_loading},
        model_ingest::ingest_model_parts,
        progress::LoadingProgress,
        resource_loader::{poll_resource_batch, spawn_scene},
    },
    reveal::{
        animation::{advance_intro_wiggle, advance_part_animations},
        apply::{apply_navigation, handle_navigation_keys},
        navigation::{Navigation, NavigationCommand},
    },
    systems::fps_tracking::{fps_text_update_system, spawn_fps_overlay},
};
use crate::rpc::web_rpc::WebRpcPlugin;

/// Create the application: explicit context, no ambient globals. Everything
/// the configurator owns lives in resources registered here.
pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(JsonAssetPlugin::<SceneManifest>::new(&["json"]))
        .add_plugins(WebRpcPlugin);

    app.init_state::<AppState>()
        .init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<DragController>()
        .init_resource::<TurntableCamera>()
        .init_resource::<Navigation>()
        .add_event::<DragActiveChanged>()
        .add_event::<NavigationCommand>()
        .add_systems(Startup, (start_loading, spawn_fps_overlay))
        .add_systems(
            Update,
            (
                poll_manifest,
                poll_resource_batch,
                spawn_scene,
                ingest_model_parts,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnEnter(AppState::LoadFailed), report_load_failure)
        .add_systems(
            Update,
            (
                drag_input_system,
                turntable_update,
                handle_navigation_keys,
                apply_navigation,
                advance_part_animations,
                advance_intro_wiggle,
                responsive_framing,
                fps_text_update_system,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
