//! Child color palette and the random source that picks from it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::error::PaletteError;

const DEFAULT_COLORS: &[&str] = &[
	"#6aa84f", "#3d85c6", "#f1c232", "#cc0000", "#e69138", "#7A288A", "#87CEEB", "#FF69B4",
	"#032B44",
];

/// Non-empty list of CSS colors new nodes draw their `child_color` from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Palette {
	colors: Vec<String>,
}

impl Palette {
	/// Build a palette, trimming entries and dropping blank ones.
	pub fn new<I, S>(colors: I) -> Result<Self, PaletteError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let colors: Vec<String> = colors
			.into_iter()
			.map(|c| c.into().trim().to_string())
			.filter(|c| !c.is_empty())
			.collect();
		if colors.is_empty() {
			return Err(PaletteError::Empty);
		}
		Ok(Self { colors })
	}

	/// All colors in order.
	pub fn colors(&self) -> &[String] {
		&self.colors
	}

	/// Number of colors, never zero.
	pub fn len(&self) -> usize {
		self.colors.len()
	}

	/// Always `false`; a palette cannot be built empty.
	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	/// Color at `index`, wrapping around the palette.
	pub fn get(&self, index: usize) -> &str {
		&self.colors[index % self.colors.len()]
	}

	/// Whether `color` is one of the palette's entries.
	pub fn contains(&self, color: &str) -> bool {
		self.colors.iter().any(|c| c == color)
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
		}
	}
}

impl TryFrom<Vec<String>> for Palette {
	type Error = PaletteError;

	fn try_from(colors: Vec<String>) -> Result<Self, Self::Error> {
		Self::new(colors)
	}
}

impl From<Palette> for Vec<String> {
	fn from(palette: Palette) -> Self {
		palette.colors
	}
}

/// Source of `child_color` picks for newly created nodes.
pub trait ColorSource {
	/// One color from `palette`.
	fn pick(&mut self, palette: &Palette) -> String;
}

/// Uniform random picks.
#[derive(Clone, Debug)]
pub struct RandomColors {
	rng: StdRng,
}

impl RandomColors {
	/// Seeded from the platform's entropy source.
	pub fn from_entropy() -> Self {
		Self {
			rng: StdRng::from_entropy(),
		}
	}

	/// Reproducible picks for a fixed seed.
	pub fn seeded(seed: u64) -> Self {
		Self {
			rng: StdRng::seed_from_u64(seed),
		}
	}
}

impl Default for RandomColors {
	fn default() -> Self {
		Self::from_entropy()
	}
}

impl ColorSource for RandomColors {
	fn pick(&mut self, palette: &Palette) -> String {
		palette.get(self.rng.gen_range(0..palette.len())).to_string()
	}
}

/// Walks the palette in order, starting at `next`.
#[derive(Clone, Debug, Default)]
pub struct SequenceColors {
	next: usize,
}

impl SequenceColors {
	/// Sequence whose first pick is palette entry `next`.
	pub fn starting_at(next: usize) -> Self {
		Self { next }
	}
}

impl ColorSource for SequenceColors {
	fn pick(&mut self, palette: &Palette) -> String {
		let color = palette.get(self.next).to_string();
		self.next = self.next.wrapping_add(1);
		color
	}
}
