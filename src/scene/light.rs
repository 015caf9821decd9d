use glam::Vec3;

/// Shadow-map hints for the render surface.
#[derive(Debug, Clone)]
pub struct SpotShadow {
    /// Depth offset against shadow acne; negative pushes the comparison
    /// towards the light.
    pub bias: f32,
    /// Filter the shadow edge (PCF) instead of a hard lookup.
    pub soft: bool,
}

impl Default for SpotShadow {
    fn default() -> Self {
        Self { bias: 0.0, soft: true }
    }
}

/// Spotlight component. Position and orientation come from the owning node.
#[derive(Debug, Clone)]
pub struct SpotLight {
    pub color: Vec3,
    pub intensity: f32,
    /// Maximum reach; zero means unbounded.
    pub range: f32,
    /// Cone half-angle in radians.
    pub angle: f32,
    /// Fraction of the cone attenuated by the penumbra, `0..=1`.
    pub penumbra: f32,

    pub cast_shadows: bool,
    pub shadow: SpotShadow,
}

impl SpotLight {
    #[must_use]
    pub fn new(color: Vec3, intensity: f32, range: f32, angle: f32, penumbra: f32) -> Self {
        Self {
            color,
            intensity,
            range,
            angle,
            penumbra: penumbra.clamp(0.0, 1.0),
            cast_shadows: false,
            shadow: SpotShadow::default(),
        }
    }

    /// Inner cone angle implied by the penumbra.
    #[must_use]
    pub fn inner_cone(&self) -> f32 {
        self.angle * (1.0 - self.penumbra)
    }
}

/// Unpacks a `0xRRGGBB` color into `[0, 1]` RGB components.
#[must_use]
pub fn color_from_hex(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(r, g, b)
}
