//! Physical wall geometry.
//!
//! All distances are centimetres. `x_space_cm` is the centre-to-centre distance between
//! letters in a row and `y_space_cm` between rows; the column budget handed to the line
//! packer is how many letter slots fit in `max_width_cm`.

use serde::{Deserialize, Serialize};

use crate::layout::error::LayoutError;

pub const DEFAULT_FONT_FAMILY: &str = "Arial";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallGeometry {
    pub x_space_cm: f32,
    pub y_space_cm: f32,
    /// Rendered font size.
    pub letter_size_cm: f32,
    pub max_width_cm: f32,
    pub font_family: String,
}

impl Default for WallGeometry {
    fn default() -> Self {
        default_geometry()
    }
}

/// 20 columns at 1 cm pitch, 1.5 cm row pitch, 0.8 cm letters.
pub fn default_geometry() -> WallGeometry {
    WallGeometry {
        x_space_cm: 1.0,
        y_space_cm: 1.5,
        letter_size_cm: 0.8,
        max_width_cm: 20.0,
        font_family: DEFAULT_FONT_FAMILY.to_string(),
    }
}

impl WallGeometry {
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (name, value) in [
            ("x_space_cm", self.x_space_cm),
            ("y_space_cm", self.y_space_cm),
            ("letter_size_cm", self.letter_size_cm),
            ("max_width_cm", self.max_width_cm),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidGeometry(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.max_width_cm < self.x_space_cm {
            return Err(LayoutError::InvalidGeometry(format!(
                "max_width_cm ({}) is narrower than one letter ({})",
                self.max_width_cm, self.x_space_cm
            )));
        }
        if self.font_family.trim().is_empty() {
            return Err(LayoutError::InvalidGeometry(
                "font_family cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Letter slots per row: `floor(max_width / x_space)`.
    pub fn columns(&self) -> Result<usize, LayoutError> {
        self.validate()?;
        Ok((self.max_width_cm / self.x_space_cm).floor() as usize)
    }
}
