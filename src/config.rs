use crate::error::RenderError;
use macroquad::color::Color;
use serde::Deserialize;

/// Renderer settings, usually read from a small JSON file:
///
/// ```json
/// { "unit_scale": 0.03125, "batch_color": [1.0, 1.0, 1.0, 1.0] }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RendererConfig {
    /// Map pixels to world units
    #[serde(default = "one")]
    pub unit_scale: f32,
    /// RGBA tint every layer is drawn with
    #[serde(default = "white")]
    pub batch_color: [f32; 4],
}

fn one() -> f32 {
    1.0
}
fn white() -> [f32; 4] {
    [1.0; 4]
}

impl Default for RendererConfig {
    fn default() -> Self {
        RendererConfig {
            unit_scale: one(),
            batch_color: white(),
        }
    }
}

impl RendererConfig {
    pub fn from_json_str(json: &str) -> Result<Self, RenderError> {
        let cfg: RendererConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if !self.unit_scale.is_finite() || self.unit_scale <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "unit_scale must be a positive number, got {}",
                self.unit_scale
            )));
        }
        if let Some(c) = self.batch_color.iter().find(|c| !(0.0..=1.0).contains(*c)) {
            return Err(RenderError::InvalidConfig(format!(
                "batch_color channels must be within [0, 1], got {}",
                c
            )));
        }
        Ok(())
    }

    pub fn color(&self) -> Color {
        let [r, g, b, a] = self.batch_color;
        Color::new(r, g, b, a)
    }
}
