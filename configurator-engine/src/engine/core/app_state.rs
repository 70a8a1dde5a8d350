use bevy::prelude::*;

use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Manifest, resource batch, scene spawn and part ingestion in flight.
    #[default]
    Loading,
    /// Scene constructed, reveal interactive.
    Running,
    /// Terminal: some part of the batch or configuration failed. No retry.
    LoadFailed,
}

/// The host surfaces the failure to the user; this side only reports it.
pub fn report_load_failure(mut rpc: ResMut<WebRpcInterface>) {
    error!("✗ Loading failed; no scene was constructed");
    rpc.send_notification("scene/loadFailed", serde_json::json!({}));
}
