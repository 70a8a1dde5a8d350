use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    pub resources_loaded: bool,
    pub scene_spawned: bool,
    pub parts_ingested: bool,
}
