use std::path::{Path, PathBuf};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use crate::common::{CoordinateSpace, MappingPolicy, ModelConfig};
use crate::data::{DecodeConfig, FsAccess, PrepareConfig};

pub const CONFIG_FILE_NAME: &str = "pipeline.json";

/// Every knob of one frame pipeline, explicit rather than baked into code paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub model: ModelConfig,
    pub prepare: PrepareConfig,
    pub decode: DecodeConfig,
    pub space: CoordinateSpace,
    pub mapping: MappingPolicy,
    /// Image size used to scale `Normalized` outputs. `None` means the source frame size,
    /// or unit boxes when the mapping is `OrientationCorrecting`.
    pub decode_image_size: Option<(f32, f32)>,
    /// Surface size handed to the mapper. `None` means the source frame size.
    pub display_size: Option<(f32, f32)>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::direct_overlay()
    }
}

impl PipelineConfig {
    /// Rotate the frame, keep anchors above 0.03 and draw raw model-space boxes
    /// on a 640x640 overlay.
    pub fn direct_overlay() -> Self {
        Self {
            model: ModelConfig::default(),
            prepare: PrepareConfig::new().with_rotation(true),
            decode: DecodeConfig::new().with_threshold(0.03),
            space: CoordinateSpace::RawPixel,
            mapping: MappingPolicy::DirectOverlay,
            decode_image_size: None,
            display_size: None,
        }
    }

    /// Scale without rotating, keep anchors above 0.001 as unit-normalized boxes,
    /// then turn them into portrait frame coordinates.
    pub fn orientation_corrected() -> Self {
        Self {
            model: ModelConfig::default(),
            prepare: PrepareConfig::new().with_rotation(false),
            decode: DecodeConfig::new().with_threshold(0.001),
            space: CoordinateSpace::Normalized,
            mapping: MappingPolicy::OrientationCorrecting,
            decode_image_size: Some((1.0, 1.0)),
            display_size: None,
        }
    }

    pub fn with_model(mut self, model: ModelConfig) -> Self {
        self.model = model;
        self
    }

    pub fn with_threshold(mut self, x: f32) -> Self {
        self.decode.confidence_threshold = x;
        self
    }

    pub fn with_rotation(mut self, rotate_90_cw: bool) -> Self {
        self.prepare.rotate_90_cw = rotate_90_cw;
        self
    }

    pub fn with_space(mut self, space: CoordinateSpace) -> Self {
        self.space = space;
        self
    }

    pub fn with_mapping(mut self, mapping: MappingPolicy) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn with_display_size(mut self, width: f32, height: f32) -> Self {
        self.display_size = Some((width, height));
        self
    }

    pub fn with_decode_image_size(mut self, width: f32, height: f32) -> Self {
        self.decode_image_size = Some((width, height));
        self
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_json::from_str(json).context("failed to parse pipeline config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read pipeline config {}", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `~/.config/vb_detect/pipeline.json` (or the platform equivalent).
    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(FsAccess::Config.path()?.join(CONFIG_FILE_NAME))
    }

    /// Reads the config from the default location, falling back to
    /// [`PipelineConfig::direct_overlay`] when no file exists.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::info!("No pipeline config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_json_file(&path)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.prepare.target_width == 0 || self.prepare.target_height == 0 {
            anyhow::bail!("model input size must be non-zero, got {}x{}",
                self.prepare.target_width, self.prepare.target_height);
        }
        if self.prepare.output_format.bytes_per_pixel().is_none() {
            anyhow::bail!("model input format must be packed, got {}", self.prepare.output_format.as_str());
        }
        if self.decode.anchor_count == 0 {
            anyhow::bail!("anchor count must be non-zero");
        }
        if self.decode.channel_count < crate::data::DETECTION_CHANNELS {
            anyhow::bail!("channel count must be at least {}, got {}",
                crate::data::DETECTION_CHANNELS, self.decode.channel_count);
        }
        if !self.decode.confidence_threshold.is_finite() {
            anyhow::bail!("confidence threshold must be finite");
        }
        if self.mapping == MappingPolicy::OrientationCorrecting {
            if self.space != CoordinateSpace::Normalized {
                anyhow::bail!("{} mapping needs normalized model output, got {}",
                    self.mapping.as_str(), self.space.as_str());
            }
            if let Some((w, h)) = self.decode_image_size {
                if (w, h) != (1.0, 1.0) {
                    anyhow::bail!("{} mapping needs unit boxes, decode image size must be 1x1, got {}x{}",
                        self.mapping.as_str(), w, h);
                }
            }
        }
        Ok(())
    }

    pub fn summary(&self) -> String {
        format!("{}\n\
        Frame Rotation: {}\n\
        Output Format: {}\n\
        Detection Threshold: {}\n\
        Anchors: {}x{}\n\
        Coordinate Space: {}\n\
        Mapping Policy: {}",
                self.model.summary(), self.prepare.rotate_90_cw, self.prepare.output_format.as_str(),
                self.decode.confidence_threshold, self.decode.channel_count, self.decode.anchor_count,
                self.space.as_str(), self.mapping.as_str())
    }
}
