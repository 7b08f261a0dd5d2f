use crate::bbox::DEFAULT_MARGIN;
use crate::route::{Algorithm, Options};
use crate::weight::Mode;

use serde::*;

/// Routing parameters, loadable from YAML; every field is optional
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(default)]
pub struct Parameters {
	pub mode: Mode,
	pub algorithm: Algorithm,
	/// Bounding box margin in degrees
	pub margin: f64,
}

impl Default for Parameters {
	fn default() -> Self {
		Self {
			mode: Mode::default(),
			algorithm: Algorithm::default(),
			margin: DEFAULT_MARGIN,
		}
	}
}

impl Parameters {
	pub fn options(&self) -> Options {
		Options {
			mode: self.mode,
			algorithm: self.algorithm,
		}
	}
}
