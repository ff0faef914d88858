use std::{borrow::Cow, fmt};

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

/// A WGSL source file failed to register or compose.
#[derive(Debug)]
pub struct ShaderError {
    /// Shader file the failure was reported against.
    pub file_path: String,
    /// Composer diagnostic.
    pub message: String,
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.file_path, self.message)
    }
}

impl std::error::Error for ShaderError {}

/// Scene shaders, each composed against the shared modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneShader {
    /// Textured per-pixel lit models (bridge, tower, knight).
    PerPixelLighting,
    /// Skybox cube sampled by direction.
    SkyBox,
    /// Reflective sphere sampling the dynamic cube map.
    ReflectionMap,
    /// Wind-swayed grass terrain.
    Grass,
    /// Billboarded fire particles.
    Fire,
}

impl SceneShader {
    /// Every scene shader, in pipeline creation order.
    pub const ALL: [Self; 5] = [
        Self::PerPixelLighting,
        Self::SkyBox,
        Self::ReflectionMap,
        Self::Grass,
        Self::Fire,
    ];

    /// WGSL source embedded at compile time.
    pub fn source(self) -> &'static str {
        match self {
            Self::PerPixelLighting => include_str!(
                "../../assets/shaders/raster/per_pixel_lighting.wgsl"
            ),
            Self::SkyBox => {
                include_str!("../../assets/shaders/raster/sky_box.wgsl")
            }
            Self::ReflectionMap => {
                include_str!("../../assets/shaders/raster/reflection_map.wgsl")
            }
            Self::Grass => {
                include_str!("../../assets/shaders/raster/grass.wgsl")
            }
            Self::Fire => include_str!("../../assets/shaders/raster/fire.wgsl"),
        }
    }

    /// Path used in composer diagnostics.
    pub fn file_path(self) -> &'static str {
        match self {
            Self::PerPixelLighting => "raster/per_pixel_lighting.wgsl",
            Self::SkyBox => "raster/sky_box.wgsl",
            Self::ReflectionMap => "raster/reflection_map.wgsl",
            Self::Grass => "raster/grass.wgsl",
            Self::Fire => "raster/fire.wgsl",
        }
    }
}

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Shared WGSL modules are registered once at construction. Scene shaders
/// use `#import mirrorball::uniforms` and `#import mirrorball::lighting` and
/// are handed to wgpu as `naga::Module` IR.
pub struct ShaderComposer {
    composer: Composer,
}

struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

const MODULES: &[ModuleDef] = &[
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/lighting.wgsl"),
        file_path: "modules/lighting.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/uniforms.wgsl"),
        file_path: "modules/uniforms.wgsl",
    },
];

impl ShaderComposer {
    /// Register the shared modules in dependency order.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError`] if a shared module fails to parse.
    pub fn new() -> Result<Self, ShaderError> {
        let mut composer = Composer::default();

        for m in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| ShaderError {
                    file_path: m.file_path.to_owned(),
                    message: format!("{e:?}"),
                })?;
        }

        Ok(Self { composer })
    }

    /// Compose a scene shader into a `wgpu::ShaderModule`.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        shader: SceneShader,
    ) -> Result<wgpu::ShaderModule, ShaderError> {
        let naga_module =
            self.compose_naga(shader.source(), shader.file_path())?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(shader.file_path()),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader source into a `naga::Module` without a GPU device.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, ShaderError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| ShaderError {
                file_path: file_path.to_owned(),
                message: e.emit_to_string(&self.composer),
            })
    }
}

#[cfg(test)]
mod tests {
    use naga::valid::{Capabilities, ValidationFlags, Validator};

    use super::*;

    #[test]
    fn all_scene_shaders_compose_and_validate() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in SceneShader::ALL {
            let module = composer
                .compose_naga(shader.source(), shader.file_path())
                .unwrap_or_else(|e| panic!("{e}"));
            let _ = Validator::new(ValidationFlags::all(), Capabilities::all())
                .validate(&module)
                .unwrap_or_else(|e| {
                    panic!("'{}' failed validation: {e:?}", shader.file_path())
                });
        }
    }

    #[test]
    fn every_scene_shader_has_both_entry_points() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in SceneShader::ALL {
            let module = composer
                .compose_naga(shader.source(), shader.file_path())
                .unwrap();
            let names: Vec<&str> =
                module.entry_points.iter().map(|e| e.name.as_str()).collect();
            assert!(names.contains(&"vs_main"), "{}", shader.file_path());
            assert!(names.contains(&"fs_main"), "{}", shader.file_path());
        }
    }

    #[test]
    fn composed_object_uniform_matches_the_cpu_layout() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in SceneShader::ALL {
            let module = composer
                .compose_naga(shader.source(), shader.file_path())
                .unwrap_or_else(|e| panic!("{e}"));
            let (_, global) = module
                .global_variables
                .iter()
                .find(|(_, var)| {
                    var.name.as_deref().is_some_and(|name| name.contains("object_data"))
                })
                .unwrap();
            let mut layouter = naga::proc::Layouter::default();
            layouter.update(module.to_ctx()).unwrap();
            assert_eq!(
                u64::from(layouter[global.ty].size),
                crate::scene::ObjectUniform::SIZE,
                "{}",
                shader.file_path()
            );
        }
    }

    #[test]
    fn broken_source_reports_file() {
        let mut composer = ShaderComposer::new().unwrap();
        let err = composer
            .compose_naga("fn broken( {", "broken.wgsl")
            .unwrap_err();
        assert_eq!(err.file_path, "broken.wgsl");
    }
}
