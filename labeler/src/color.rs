use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies display colors, one per cluster.
pub trait ColorProvider {
    /// Called once at the start of every assignment pass.
    fn begin_pass(&mut self) {}

    /// Returns the next color as a non-empty string such as `#1f77b4`.
    fn next_color(&mut self) -> String;
}

/// Number of distinct `#rrggbb` colors.
const COLOR_SPACE: usize = 1 << 24;

/// Random `#rrggbb` colors. Within one pass no color is handed out twice.
pub struct RandomColor {
    rng: StdRng,
    issued: HashSet<String>,
}

impl RandomColor {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Creates a provider with a reproducible sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            issued: HashSet::new(),
        }
    }
}

impl Default for RandomColor {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorProvider for RandomColor {
    fn begin_pass(&mut self) {
        self.issued.clear();
    }

    fn next_color(&mut self) -> String {
        if self.issued.len() >= COLOR_SPACE {
            tracing::warn!("labeler: every color issued in this pass, reusing colors");
            self.issued.clear();
        }
        loop {
            let mut rgb = [0u8; 3];
            self.rng.fill(&mut rgb);
            let color = format!("#{}", hex::encode(rgb));
            if self.issued.insert(color.clone()) {
                return color;
            }
        }
    }
}

const DEFAULT_PALETTE: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Cycles through a fixed list of colors.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<String>,
    next: usize,
}

impl Palette {
    /// Creates a palette from `colors`. Empty entries are dropped; an empty
    /// list falls back to the default palette.
    pub fn new(colors: Vec<String>) -> Self {
        let colors: Vec<String> = colors.into_iter().filter(|c| !c.is_empty()).collect();
        if colors.is_empty() {
            return Self::default();
        }
        Self { colors, next: 0 }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            next: 0,
        }
    }
}

impl ColorProvider for Palette {
    fn next_color(&mut self) -> String {
        let color = self.colors[self.next % self.colors.len()].clone();
        self.next += 1;
        color
    }
}
