use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::camera::Camera;
use crate::error::{ConfigError, RenderError};

/// Largest image `validate` accepts, in pixels.
pub const MAX_PIXELS: usize = 1 << 26;

/// Width over height. Parses from either `"16:9"` or `"1.7778"`.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "AspectRatioRepr")]
pub struct AspectRatio(f64);

impl AspectRatio {
    pub fn new(ratio: f64) -> Self {
        AspectRatio(ratio)
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio(16. / 9.)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AspectRatio {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ConfigError::AspectRatio(s.to_string());
        let s = s.trim();
        match s.split_once(':') {
            Some((w, h)) => {
                let w: f64 = w.trim().parse().map_err(|_| bad())?;
                let h: f64 = h.trim().parse().map_err(|_| bad())?;
                Ok(AspectRatio(w / h))
            }
            None => s.parse().map(AspectRatio).map_err(|_| bad()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AspectRatioRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<AspectRatioRepr> for AspectRatio {
    type Error = ConfigError;

    fn try_from(repr: AspectRatioRepr) -> Result<Self, Self::Error> {
        match repr {
            AspectRatioRepr::Number(r) => Ok(AspectRatio(r)),
            AspectRatioRepr::Text(s) => s.parse(),
        }
    }
}

/// Gradient endpoints as plain RGB triples.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub bottom: [f64; 3],
    pub top: [f64; 3],
}

impl Default for SkyConfig {
    fn default() -> Self {
        SkyConfig {
            bottom: [1.0, 1.0, 1.0],
            top: [0.5, 0.7, 1.0],
        }
    }
}

/// Everything that determines the rendered image. Missing keys take the
/// defaults, which reproduce the stock 400x225 sky gradient.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub image_width: usize,
    pub aspect_ratio: AspectRatio,
    pub focal_length: f64,
    pub viewport_height: f64,
    /// Render rows on the rayon thread pool. Output is the same either way.
    pub parallel: bool,
    pub sky: SkyConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            image_width: 400,
            aspect_ratio: AspectRatio::default(),
            focal_length: 1.0,
            viewport_height: 2.0,
            parallel: false,
            sky: SkyConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Loads a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::Io(e),
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Rejects settings the camera can't make sense of.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.image_width == 0 {
            return Err(RenderError::InvalidConfig(
                "image_width must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("aspect_ratio", self.aspect_ratio.get()),
            ("focal_length", self.focal_length),
            ("viewport_height", self.viewport_height),
        ] {
            if !(value.is_finite() && value > 0.) {
                return Err(RenderError::InvalidConfig(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }

        let height = Camera::image_height_for(self.image_width, self.aspect_ratio.get());
        match self.image_width.checked_mul(height) {
            Some(pixels) if pixels <= MAX_PIXELS => Ok(()),
            _ => Err(RenderError::InvalidConfig(format!(
                "{}x{} image exceeds the {} pixel limit",
                self.image_width, height, MAX_PIXELS
            ))),
        }
    }
}
