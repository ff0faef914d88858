use glam::Vec4;

/// Surface response shared between objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Specular colour; the alpha channel scales reflectivity on the
    /// sphere.
    pub specular: Vec4,
}

/// No specular highlight.
pub const MATT_WHITE: Material = Material {
    specular: Vec4::ZERO,
};

/// Full white highlight and full reflectivity.
pub const GLOSS_WHITE: Material = Material {
    specular: Vec4::ONE,
};
