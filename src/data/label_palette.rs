use std::collections::HashMap;
use image::Rgba;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Fill alpha applied to every generated label colour.
const FILL_ALPHA: f32 = 0.5;

/// RGBA components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelColour(pub [f32; 4]);

impl LabelColour {
    pub fn to_rgba8(&self) -> Rgba<u8> {
        let [r, g, b, a] = self.0;
        Rgba([
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
            (a * 255.0).round() as u8,
        ])
    }
}

/// Label to colour table for one visualisation session.
///
/// Colours are random per session but stable for the session's lifetime.
/// Each overlay consumer owns its palette; nothing is shared process-wide.
#[derive(Debug, Clone)]
pub struct LabelPalette {
    colours: HashMap<String, LabelColour>,
    rng: StdRng,
}

impl LabelPalette {
    pub fn new(labels: &[&str]) -> Self {
        Self::from_rng(labels, StdRng::from_entropy())
    }

    /// Deterministic palette, handy for snapshots and tests.
    pub fn with_seed(labels: &[&str], seed: u64) -> Self {
        Self::from_rng(labels, StdRng::seed_from_u64(seed))
    }

    fn from_rng(labels: &[&str], rng: StdRng) -> Self {
        let mut palette = Self {
            colours: HashMap::with_capacity(labels.len()),
            rng,
        };
        for label in labels {
            palette.colour(label);
        }
        palette
    }

    /// Colour for `label`, assigning a fresh one the first time a label is seen.
    pub fn colour(&mut self, label: &str) -> LabelColour {
        if let Some(colour) = self.colours.get(label) {
            return *colour;
        }
        let colour = LabelColour([
            self.rng.gen_range(0.0..1.0),
            self.rng.gen_range(0.0..1.0),
            self.rng.gen_range(0.0..1.0),
            FILL_ALPHA,
        ]);
        self.colours.insert(label.to_string(), colour);
        colour
    }

    pub fn get(&self, label: &str) -> Option<LabelColour> {
        self.colours.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}
