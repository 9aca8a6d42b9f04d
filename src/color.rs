use macroquad::color::Color;

// Clearing the alpha LSB keeps the exponent below all-ones, so the float is never NaN.
const NAN_SAFE_MASK: u32 = 0xFEFF_FFFF;

/// RGBA packed into the bit pattern of one `f32` (ABGR8888, red in the low
/// byte), so a vertex carries its color in a single float slot.
#[derive(Debug, Clone, Copy)]
pub struct PackedColor(f32);

impl PackedColor {
    #[inline]
    fn from_bits(bits: u32) -> Self {
        PackedColor(f32::from_bits(bits & NAN_SAFE_MASK))
    }

    /// Packs four normalized channels; values outside [0, 1] are clamped.
    pub fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        let byte = |c: f32| (255.0 * c.clamp(0.0, 1.0)) as u32;
        Self::from_bits((byte(a) << 24) | (byte(b) << 16) | (byte(g) << 8) | byte(r))
    }

    pub fn from_color(c: Color) -> Self {
        Self::from_rgba(c.r, c.g, c.b, c.a)
    }

    /// Batch color with its alpha scaled by a layer's opacity.
    pub fn for_layer(batch_color: Color, opacity: f32) -> Self {
        Self::from_rgba(batch_color.r, batch_color.g, batch_color.b, batch_color.a * opacity)
    }

    /// Reinterprets a color slot read back from vertex data.
    #[inline]
    pub fn from_f32(packed: f32) -> Self {
        Self::from_bits(packed.to_bits())
    }

    #[inline]
    pub fn to_f32(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn bits(self) -> u32 {
        self.0.to_bits()
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_bytes(self) -> [u8; 4] {
        let [r, g, b, a] = self.bits().to_le_bytes();
        [r, g, b, a]
    }

    pub fn alpha(self) -> u8 {
        self.to_bytes()[3]
    }

    pub fn to_color(self) -> Color {
        let [r, g, b, a] = self.to_bytes();
        Color::from_rgba(r, g, b, a)
    }
}

impl PartialEq for PackedColor {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for PackedColor {}

impl From<Color> for PackedColor {
    fn from(c: Color) -> Self {
        PackedColor::from_color(c)
    }
}
