use glam::{Vec3, Vec4};

use crate::options::LightingOptions;

/// One light as the shaders see it. `origin.w` is 1 for a position and 0
/// for a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Position or direction.
    pub origin: Vec4,
    /// Ambient colour.
    pub ambient: Vec4,
    /// Diffuse colour.
    pub diffuse: Vec4,
    /// Specular colour.
    pub specular: Vec4,
}

/// The key light and the fire light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lights {
    /// Distant key light.
    pub key: PointLight,
    /// Warm light sitting in the fire.
    pub fire: PointLight,
    flicker: f32,
}

impl Lights {
    /// Lights as configured, before any flicker is applied.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            key: PointLight {
                origin: Vec4::from_array(options.light1_vec),
                ambient: Vec4::from_array(options.light1_ambient),
                diffuse: Vec4::from_array(options.light1_diffuse),
                specular: Vec4::from_array(options.light1_specular),
            },
            fire: PointLight {
                origin: Vec4::from_array(options.light2_vec),
                ambient: Vec4::from_array(options.light2_ambient),
                diffuse: Vec4::from_array(options.light2_diffuse),
                specular: Vec4::from_array(options.light2_specular),
            },
            flicker: options.fire_flicker.clamp(0.0, 1.0),
        }
    }

    /// Copy with the fire's diffuse colour dimmed by its flicker at time
    /// `t`. Alpha is left alone.
    #[must_use]
    pub fn at_time(mut self, t: f32) -> Self {
        let scale = 1.0 - self.flicker * flicker_wave(t);
        let rgb = self.fire.diffuse.truncate() * scale;
        self.fire.diffuse = rgb.extend(self.fire.diffuse.w);
        self
    }

    /// Where the fire burns.
    #[must_use]
    pub fn fire_position(&self) -> Vec3 {
        self.fire.origin.truncate()
    }
}

/// Two beating sines mapped into `[0, 1]`.
fn flicker_wave(t: f32) -> f32 {
    0.5 * ((t * 11.0).sin() * (t * 7.3).sin() + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_lighting_options() {
        let lights = Lights::from_options(&LightingOptions::default());
        assert_eq!(lights.key.origin, Vec4::new(-250.0, 130.0, 145.0, 1.0));
        assert_eq!(lights.key.ambient.x, 0.3);
        assert_eq!(lights.key.diffuse.x, 0.8);
        assert_eq!(lights.fire_position(), Vec3::new(-2.5, 0.0, 2.0));
    }

    #[test]
    fn flicker_stays_within_its_depth() {
        let base = Lights::from_options(&LightingOptions::default());
        let base_r = base.fire.diffuse.x;
        for i in 0..500 {
            let lit = base.at_time(i as f32 * 0.037);
            let r = lit.fire.diffuse.x;
            assert!(r <= base_r + 1e-6);
            assert!(r >= base_r * 0.75 - 1e-6);
            assert_eq!(lit.fire.diffuse.w, base.fire.diffuse.w);
            assert_eq!(lit.key, base.key);
        }
    }

    #[test]
    fn flicker_is_a_pure_function_of_time() {
        let base = Lights::from_options(&LightingOptions::default());
        assert_eq!(base.at_time(4.2), base.at_time(4.2));
    }

    #[test]
    fn zero_flicker_leaves_the_fire_steady() {
        let options = LightingOptions {
            fire_flicker: 0.0,
            ..LightingOptions::default()
        };
        let base = Lights::from_options(&options);
        assert_eq!(base.at_time(1.7), base);
    }
}
