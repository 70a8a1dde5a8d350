/// Scene manifest location, relative to the Bevy asset root.
pub const RELATIVE_MANIFEST_PATH: &str = "configurator";

/// CSS selector of the host canvas on WASM builds.
pub const CANVAS_SELECTOR: &str = "#configurator";
