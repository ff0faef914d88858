//! Texture loading with procedural stand-ins.
//!
//! Every texture the scene uses has a [`TextureRole`]. [`TextureSource`]
//! looks the role's file up under `<assets>/textures/`. When the file is
//! absent a procedural image is generated instead, so the scene always
//! renders. Files that exist but fail to decode are reported as errors.

mod procedural;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use rustc_hash::FxHashMap;

pub use procedural::cubemap_face_direction;

use crate::error::MirrorballError;

/// An RGBA8 image held on the CPU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rgba8Image {
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Tightly packed RGBA rows, top row first.
    pub pixels: Vec<u8>,
}

impl Rgba8Image {
    /// Build an image by evaluating `f(x, y)` for every texel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> [u8; 4],
    ) -> Self {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Texel at `(x, y)`, clamped to the image bounds.
    #[must_use]
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Bilinearly filtered texel at normalised `(u, v)` in `[0, 1]`, each
    /// channel scaled to `[0, 1]`.
    #[must_use]
    pub fn sample(&self, u: f32, v: f32) -> [f32; 4] {
        let fx = u.clamp(0.0, 1.0) * (self.width.saturating_sub(1)) as f32;
        let fy = v.clamp(0.0, 1.0) * (self.height.saturating_sub(1)) as f32;
        let (x0, y0) = (fx.floor() as u32, fy.floor() as u32);
        let (tx, ty) = (fx.fract(), fy.fract());

        let corners = [
            self.texel(x0, y0),
            self.texel(x0 + 1, y0),
            self.texel(x0, y0 + 1),
            self.texel(x0 + 1, y0 + 1),
        ];
        let mut out = [0.0; 4];
        for (c, value) in out.iter_mut().enumerate() {
            let top = lerp(f32::from(corners[0][c]), f32::from(corners[1][c]), tx);
            let bottom =
                lerp(f32::from(corners[2][c]), f32::from(corners[3][c]), tx);
            *value = lerp(top, bottom, ty) / 255.0;
        }
        out
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Six square cube faces in layer order +X, -X, +Y, -Y, +Z, -Z.
#[derive(Debug, Clone)]
pub struct CubeImages {
    /// Face images in layer order.
    pub faces: [Rgba8Image; 6],
}

impl CubeImages {
    /// Edge length of each face.
    #[must_use]
    pub fn edge(&self) -> u32 {
        self.faces[0].width
    }
}

/// File names of the skybox faces, in layer order.
pub const SKYBOX_FACE_FILES: [&str; 6] =
    ["px.png", "nx.png", "py.png", "ny.png", "pz.png", "nz.png"];

/// Every texture the scene samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureRole {
    /// Bridge diffuse.
    Brick,
    /// Tower diffuse.
    MossWall,
    /// Knight diffuse.
    Knight,
    /// Sphere diffuse.
    RustDiffuse,
    /// Sphere specular / reflectivity mask.
    RustSpecular,
    /// Terrain diffuse.
    Grass,
    /// Terrain height (red channel).
    Heightmap,
    /// Terrain normals (RGB encoded).
    NormalMap,
    /// Fire particle sprite.
    FireSprite,
}

impl TextureRole {
    /// File name looked up under `<assets>/textures/`.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Brick => "brick_DIFFUSE.jpg",
            Self::MossWall => "Moss wall.jpg",
            Self::Knight => "knight_orig.jpg",
            Self::RustDiffuse => "rustDiff2.jpg",
            Self::RustSpecular => "rustSpec2.jpg",
            Self::Grass => "grass.png",
            Self::Heightmap => "heightmap.bmp",
            Self::NormalMap => "normalmap.bmp",
            Self::FireSprite => "fire.png",
        }
    }

    /// Procedural image used when the file is missing.
    #[must_use]
    pub fn fallback(self) -> Rgba8Image {
        match self {
            Self::Brick => procedural::brick(256),
            Self::MossWall => procedural::moss(256),
            Self::Knight => procedural::flat(4, [150, 150, 158, 255]),
            Self::RustDiffuse => procedural::rust(256),
            Self::RustSpecular => procedural::rust_specular(256),
            Self::Grass => procedural::grass(256),
            Self::Heightmap => procedural::hills(128),
            Self::NormalMap => procedural::flat(4, [128, 255, 128, 255]),
            Self::FireSprite => procedural::fire_sprite(64),
        }
    }
}

/// Loads scene textures from an assets root, caching decoded images.
pub struct TextureSource {
    root: PathBuf,
    cache: FxHashMap<TextureRole, Arc<Rgba8Image>>,
}

impl TextureSource {
    /// Look textures up under `<root>/textures/`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: FxHashMap::default(),
        }
    }

    /// Assets root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the role's file exists on disk.
    #[must_use]
    pub fn has_file(&self, role: TextureRole) -> bool {
        self.path_of(role).is_file()
    }

    fn path_of(&self, role: TextureRole) -> PathBuf {
        self.root.join("textures").join(role.file_name())
    }

    /// Load the image for `role`, falling back to its procedural stand-in
    /// when the file is missing.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorballError::Asset`] if the file exists but cannot be
    /// decoded.
    pub fn load(
        &mut self,
        role: TextureRole,
    ) -> Result<Arc<Rgba8Image>, MirrorballError> {
        if let Some(image) = self.cache.get(&role) {
            return Ok(Arc::clone(image));
        }

        let path = self.path_of(role);
        let image = if path.is_file() {
            log::debug!("loading {}", path.display());
            decode(&path)?
        } else {
            log::warn!(
                "{} not found, using a procedural {role:?} texture",
                path.display()
            );
            role.fallback()
        };

        let image = Arc::new(image);
        let _ = self.cache.insert(role, Arc::clone(&image));
        Ok(image)
    }

    /// Load the skybox faces from `<root>/textures/skybox/`, or generate a
    /// grass-and-sky gradient cube if any face is missing.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorballError::Asset`] if a face fails to decode or the
    /// faces are not equally sized squares.
    pub fn load_skybox(&self) -> Result<CubeImages, MirrorballError> {
        let dir = self.root.join("textures").join("skybox");
        let paths = SKYBOX_FACE_FILES.map(|name| dir.join(name));

        if !paths.iter().all(|p| p.is_file()) {
            log::warn!(
                "skybox faces not found in {}, using a procedural sky",
                dir.display()
            );
            return Ok(procedural::sky_cube(256));
        }

        let mut faces = Vec::with_capacity(6);
        for path in &paths {
            faces.push(decode(path)?);
        }
        let edge = faces[0].width;
        if faces.iter().any(|f| f.width != edge || f.height != edge) {
            return Err(MirrorballError::Asset(format!(
                "skybox faces in {} must be equally sized squares",
                dir.display()
            )));
        }
        let faces: [Rgba8Image; 6] = faces.try_into().map_err(|_| {
            MirrorballError::Asset("expected six skybox faces".into())
        })?;
        Ok(CubeImages { faces })
    }
}

fn decode(path: &Path) -> Result<Rgba8Image, MirrorballError> {
    let decoded = image::open(path).map_err(|e| {
        MirrorballError::Asset(format!("{}: {e}", path.display()))
    })?;
    let rgba = decoded.to_rgba8();
    Ok(Rgba8Image {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}
