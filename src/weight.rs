use std::fmt;

use noisy_float::prelude::*;
use serde::*;

/// Quietness factors of the known road classes; lower is quieter
pub const QUIETNESS: [(&str, f64); 8] = [
	("motorway", 5.0),
	("trunk", 4.0),
	("primary", 3.0),
	("secondary", 2.0),
	("residential", 1.0),
	("service", 1.0),
	("footway", 0.5),
	("cycleway", 0.5),
];

/// Factor for any road class missing from [`QUIETNESS`]
pub const DEFAULT_QUIETNESS: f64 = 3.0;

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	Distance,
	Quietness,
}

impl Default for Mode {
	fn default() -> Self {
		Mode::Distance
	}
}

impl Mode {
	/// Never fails: anything unrecognized routes by distance
	pub fn from_arg(s: &str) -> Self {
		match s.trim().to_ascii_lowercase().as_str() {
			"distance" => Mode::Distance,
			"quietness" => Mode::Quietness,
			other => {
				log::warn!("Unknown optimization mode {:?}, routing by distance", other);
				Mode::Distance
			}
		}
	}
	/// Smallest cost any meter of road can have in this mode
	pub fn min_factor(self) -> f64 {
		match self {
			Mode::Distance => 1.0,
			Mode::Quietness => QUIETNESS.iter().map(|(_, f)| *f).fold(DEFAULT_QUIETNESS, f64::min),
		}
	}
}

impl<'de> Deserialize<'de> for Mode {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		String::deserialize(deserializer).map(|s| Mode::from_arg(&s))
	}
}

impl fmt::Display for Mode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Mode::Distance => write!(f, "distance"),
			Mode::Quietness => write!(f, "quietness"),
		}
	}
}

pub fn quietness_factor(classification: &str) -> f64 {
	QUIETNESS.iter().find(|(c, _)| *c == classification).map_or(DEFAULT_QUIETNESS, |(_, f)| *f)
}

/// Cost of traversing `length` meters of a road of the given class
pub fn weight(classification: &str, length: f64, mode: Mode) -> N64 {
	match mode {
		Mode::Distance => n64(length),
		Mode::Quietness => n64(length * quietness_factor(classification)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn distance_ignores_classification() {
		assert_eq!(weight("motorway", 120.0, Mode::Distance), 120.0);
		assert_eq!(weight("footway", 120.0, Mode::Distance), 120.0);
	}

	#[test]
	fn quietness_scales_by_table() {
		assert_eq!(weight("motorway", 10.0, Mode::Quietness), 50.0);
		assert_eq!(weight("secondary", 10.0, Mode::Quietness), 20.0);
		assert_eq!(weight("residential", 10.0, Mode::Quietness), 10.0);
		assert_eq!(weight("cycleway", 10.0, Mode::Quietness), 5.0);
	}

	#[test]
	fn unknown_class_defaults_to_medium() {
		assert_eq!(quietness_factor("unknown_type"), 3.0);
		let w = weight("unknown_type", 37.5, Mode::Quietness);
		assert!((w.raw() - 37.5 * 3.0).abs() < 1e-9);
	}

	#[test]
	fn strictly_increasing_in_length() {
		for (class, _) in QUIETNESS.iter().chain(std::iter::once(&("track", 0.0))) {
			for mode in [Mode::Distance, Mode::Quietness].iter() {
				assert!(weight(class, 10.0, *mode) < weight(class, 10.5, *mode));
				assert!(weight(class, 0.0, *mode) >= 0.0);
			}
		}
	}

	#[test]
	fn non_decreasing_in_factor() {
		let mut classes: Vec<_> = QUIETNESS.iter().map(|(c, _)| *c).collect();
		classes.sort_by(|a, b| quietness_factor(a).partial_cmp(&quietness_factor(b)).unwrap());
		for pair in classes.windows(2) {
			assert!(weight(pair[0], 80.0, Mode::Quietness) <= weight(pair[1], 80.0, Mode::Quietness));
		}
	}

	#[test]
	fn lenient_mode_parsing() {
		assert_eq!(Mode::from_arg("quietness"), Mode::Quietness);
		assert_eq!(Mode::from_arg(" Distance "), Mode::Distance);
		assert_eq!(Mode::from_arg("scenic"), Mode::Distance);
		assert_eq!(Mode::from_arg(""), Mode::Distance);
		let m: Mode = serde_yaml::from_str("bogus").unwrap();
		assert_eq!(m, Mode::Distance);
	}

	#[test]
	fn min_factor_bounds_every_class() {
		for (class, _) in QUIETNESS.iter() {
			assert!(quietness_factor(class) >= Mode::Quietness.min_factor());
		}
		assert_eq!(Mode::Quietness.min_factor(), 0.5);
	}
}
