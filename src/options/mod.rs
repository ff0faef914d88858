//! Runtime options with TOML file support.
//!
//! All tweakable settings (window, camera, reflection probe, lighting,
//! terrain, particles, interaction, keybindings) are consolidated here.
//! Every section uses `#[serde(default)]`, so a file overriding only
//! `[lighting]` leaves everything else at its default.

mod camera;
mod keybindings;
mod lighting;
mod particles;
mod reflection;
mod scene;
mod terrain;
mod window;

use std::path::Path;

pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
pub use lighting::LightingOptions;
pub use particles::ParticleOptions;
pub use reflection::ReflectionOptions;
use schemars::JsonSchema;
pub use scene::SceneOptions;
use serde::{Deserialize, Serialize};
pub use terrain::TerrainOptions;
pub use window::WindowOptions;

use crate::error::MirrorballError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Window size and pacing.
    pub window: WindowOptions,
    /// Main camera projection and controls.
    pub camera: CameraOptions,
    /// Cube-map probe settings.
    pub reflection: ReflectionOptions,
    /// Light positions and colours.
    pub lighting: LightingOptions,
    /// Terrain grid and grass.
    pub terrain: TerrainOptions,
    /// Fire particles.
    pub particles: ParticleOptions,
    /// Interaction and timing.
    pub scene: SceneOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the options file.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorballError::Io`] if the file cannot be read and
    /// [`MirrorballError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, MirrorballError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorballError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, MirrorballError> {
        toml::from_str(content)
            .map_err(|e| MirrorballError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`MirrorballError::OptionsParse`] if serialisation fails and
    /// [`MirrorballError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), MirrorballError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MirrorballError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Write the JSON schema to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorballError::OptionsParse`] if serialisation fails and
    /// [`MirrorballError::Io`] if the file cannot be written.
    pub fn save_schema(path: &Path) -> Result<(), MirrorballError> {
        let content = serde_json::to_string_pretty(&Self::json_schema())
            .map_err(|e| MirrorballError::OptionsParse(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[reflection]
cube_map_size = 512

[particles]
count = 250
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.reflection.cube_map_size, 512);
        assert_eq!(opts.particles.count, 250);
        // Everything else should be default
        assert_eq!(opts.reflection.probe_zfar, 1000.0);
        assert_eq!(opts.particles.speed, ParticleOptions::default().speed);
        assert_eq!(opts.camera.start_position, [25.0, 2.0, -14.5]);
        assert_eq!(opts.window.width, 800);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Options::from_toml("[camera]\nznear = \"near\"").unwrap_err();
        assert!(matches!(err, MirrorballError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup("KeyW"), Some(KeyAction::MoveSphereUp));
        assert_eq!(opts.keybindings.lookup("Space"), Some(KeyAction::ResetSphere));
        assert_eq!(opts.keybindings.lookup("KeyT"), Some(KeyAction::ReportTiming));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn partial_keybindings_override_single_actions() {
        let toml_str = r#"
[keybindings.bindings]
toggle_pause = "Escape"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("Escape"), Some(KeyAction::TogglePause));
        assert_eq!(opts.keybindings.lookup("KeyP"), None);
        assert_eq!(opts.keybindings.lookup("KeyW"), Some(KeyAction::MoveSphereUp));
    }

    #[test]
    fn file_bindings_take_keys_from_the_defaults() {
        let toml_str = r#"
[keybindings.bindings]
toggle_pause = "KeyW"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("KeyW"), Some(KeyAction::TogglePause));
        assert_eq!(opts.keybindings.key_for(KeyAction::MoveSphereUp), None);
        assert_eq!(opts.keybindings.lookup("KeyP"), None);

        let reloaded = Options::from_toml(&toml::to_string_pretty(&opts).unwrap()).unwrap();
        assert_eq!(reloaded.keybindings.lookup("KeyW"), Some(KeyAction::TogglePause));
    }

    #[test]
    fn binding_a_taken_key_unbinds_its_previous_action() {
        let mut bindings = KeybindingOptions::default();
        bindings.bind(KeyAction::ReportTiming, "Space");
        assert_eq!(bindings.lookup("Space"), Some(KeyAction::ReportTiming));
        assert_eq!(bindings.key_for(KeyAction::ResetSphere), None);
    }

    #[test]
    fn rebinding_updates_the_reverse_map() {
        let mut bindings = KeybindingOptions::default();
        bindings.bind(KeyAction::ReportTiming, "F1");
        assert_eq!(bindings.lookup("F1"), Some(KeyAction::ReportTiming));
        assert_eq!(bindings.lookup("KeyT"), None);
        assert_eq!(bindings.key_for(KeyAction::ReportTiming), Some("F1"));
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let path = std::env::temp_dir().join("mirrorball-options-test.toml");
        let mut opts = Options::default();
        opts.terrain.rows = 64;
        opts.lighting.fire_flicker = 0.5;
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), opts);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        for section in
            ["window", "camera", "reflection", "lighting", "terrain", "particles", "scene"]
        {
            assert!(props.contains_key(section), "missing {section}");
        }
        assert!(!props.contains_key("keybindings"));

        let lighting = &props["lighting"]["properties"];
        assert!(lighting.get("fire_flicker").is_some());
        assert!(lighting.get("light1_vec").is_none());
    }
}
