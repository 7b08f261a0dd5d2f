use std::{fs::File, io::BufReader};

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand, crate_version};

mod data;
mod graph;
mod weight;
mod network;
mod locate;
mod route;
mod bbox;
mod params;
mod gj;

pub type PointId = i64;
pub type WayId = i64;

/// Ways carrying this tag are streets; its value is the road class
pub const HIGHWAY_TAG: &str = "highway";

/// Finite degrees; `NaN` and infinities are rejected along with anything non-numeric
fn parse_degrees(name: &str, value: &str) -> Result<f64, String> {
	value.trim().parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(|| format!("{} must be a number, got {:?}", name, value))
}

fn coordinates(matches: &ArgMatches, lat: &str, lon: &str) -> data::Coordinates {
	let parse = |name: &str| parse_degrees(name, matches.value_of(name).unwrap_or_default()).unwrap_or_else(|e| clap::Error::with_description(&e, clap::ErrorKind::InvalidValue).exit());
	data::Coordinates::new(parse(lat), parse(lon))
}

fn load_params(matches: &ArgMatches) -> std::io::Result<params::Parameters> {
	Ok(match matches.value_of("params") {
		Some(path) => serde_yaml::from_reader(&File::open(path)?).expect("Parameters invalid YAML"),
		None => params::Parameters::default(),
	})
}

fn endpoint_args<'a, 'b>(cmd: App<'a, 'b>, first: u64) -> App<'a, 'b> {
	["start-lat", "start-lon", "end-lat", "end-lon"].iter().enumerate().fold(cmd, |cmd, (i, name)| {
		cmd.arg(Arg::with_name(*name)
			.takes_value(true)
			.required(true)
			.index(first + i as u64)
			.validator(|v| parse_degrees("coordinate", &v).map(|_| ()))
			.help("Endpoint coordinate in degrees"))
	})
}

fn params_arg<'a, 'b>() -> Arg<'a, 'b> {
	Arg::with_name("params")
		.long("params")
		.takes_value(true)
		.help("Routing parameters YAML")
}

const MAP_DATA_HELP: &str = "Map data is the JSON an Overpass API answers to the query printed by `bbox` (e.g. POST it as `data` to https://overpass-api.de/api/interpreter).";

fn cli<'a, 'b>() -> App<'a, 'b> {
	App::new("Quiet Route")
							.version(crate_version!())
							.about("Find short or quiet ways through the streets")
							.subcommand(endpoint_args(SubCommand::with_name("route")
								.about("Compute a route over OSM street data")
								.after_help(MAP_DATA_HELP)
								.setting(AppSettings::AllowNegativeNumbers)
								.arg(Arg::with_name("map-data")
										.takes_value(true)
										.required(true)
										.index(1)
										.help("Overpass JSON with the highways and their nodes"))
								.arg(Arg::with_name("output")
										.takes_value(true)
										.required(true)
										.index(6)
										.help("Output route JSON"))
								.arg(Arg::with_name("mode")
										.long("mode")
										.takes_value(true)
										.help("distance or quietness"))
								.arg(Arg::with_name("algorithm")
										.long("algorithm")
										.takes_value(true)
										.possible_values(&["dijkstra", "astar"])
										.help("Shortest path search"))
								.arg(params_arg()), 2)
							)
							.subcommand(SubCommand::with_name("geojson")
								.about("Convert a computed route into GeoJSON")
								.arg(Arg::with_name("route")
										.takes_value(true)
										.required(true)
										.index(1)
										.help("(Produced) Route JSON"))
								.arg(Arg::with_name("output")
										.takes_value(true)
										.required(true)
										.index(2)
										.help("Output GeoJSON"))
							)
							.subcommand(endpoint_args(SubCommand::with_name("bbox")
								.about("Print the area (and its Overpass query) to fetch map data for")
								.after_help(MAP_DATA_HELP)
								.setting(AppSettings::AllowNegativeNumbers)
								.arg(Arg::with_name("margin")
										.long("margin")
										.takes_value(true)
										.validator(|v| parse_degrees("margin", &v).map(|_| ()))
										.help("Degrees added on every side"))
								.arg(params_arg()), 1)
							)
}

fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"));
	let matches = cli().get_matches();
	if let Some(matches) = matches.subcommand_matches("route") {
		let mut params = load_params(matches)?;
		if let Some(mode) = matches.value_of("mode") {
			params.mode = weight::Mode::from_arg(mode);
		}
		if let Some(algorithm) = matches.value_of("algorithm") {
			params.algorithm = algorithm.parse().unwrap_or_default();
		}
		let start = coordinates(matches, "start-lat", "start-lon");
		let end = coordinates(matches, "end-lat", "end-lon");
		log::info!("Loading...");
		let map: data::MapData = serde_json::from_reader(BufReader::new(File::open(matches.value_of("map-data").unwrap())?)).expect("Map data invalid JSON");
		log::info!("Loaded {} map elements", map.elements.len());
		log::debug!("{:?}", params);
		let bb = bbox::BoundingBox::around(start, end, params.margin);
		if !map.points().any(|p| bb.contains(&p.coordinates)) {
			log::warn!("Map data has no points within {}, is it an export of the right area?", bb);
		}
		match route::plan(&map, start, end, params.options()) {
			Ok(r) => {
				serde_json::to_writer(&File::create(matches.value_of("output").unwrap())?, &r)?;
				log::info!("Wrote route");
			},
			Err(e) => {
				log::error!("{}", e);
				std::process::exit(1);
			},
		}
	} else if let Some(matches) = matches.subcommand_matches("geojson") {
		let r: data::Route = serde_json::from_reader(BufReader::new(File::open(matches.value_of("route").unwrap())?)).expect("Route invalid JSON");
		serde_json::to_writer(&File::create(matches.value_of("output").unwrap())?, &gj::route_to_geojson(&r))?;
		log::info!("Wrote GeoJSON with {} route points", r.path.len());
	} else if let Some(matches) = matches.subcommand_matches("bbox") {
		let params = load_params(matches)?;
		let margin = matches.value_of("margin").map_or(params.margin, |m| parse_degrees("margin", m).unwrap_or_else(|e| clap::Error::with_description(&e, clap::ErrorKind::InvalidValue).exit()));
		let bb = bbox::BoundingBox::around(coordinates(matches, "start-lat", "start-lon"), coordinates(matches, "end-lat", "end-lon"), margin);
		println!("{}", bb);
		print!("{}", bb.overpass_query());
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn route_args(start_lat: &str) -> Vec<&str> {
		vec!["quiet-route", "route", "map.json", start_lat, "-74.01", "40.75", "-73.98", "route.json"]
	}

	#[test]
	fn degrees_must_be_finite() {
		assert_eq!(parse_degrees("start-lat", "-74.01"), Ok(-74.01));
		assert_eq!(parse_degrees("start-lat", " 12 "), Ok(12.0));
		for bad in ["NaN", "nan", "inf", "-inf", "infinity", "", "north"].iter() {
			assert!(parse_degrees("start-lat", bad).is_err(), "{} accepted", bad);
		}
	}

	#[test]
	fn route_rejects_non_finite_coordinates() {
		let matches = cli().get_matches_from_safe(route_args("40.71")).unwrap();
		let c = coordinates(matches.subcommand_matches("route").unwrap(), "start-lat", "start-lon");
		assert_eq!(c, data::Coordinates::new(40.71, -74.01));
		for bad in ["NaN", "inf"].iter() {
			let err = cli().get_matches_from_safe(route_args(*bad)).unwrap_err();
			assert_eq!(err.kind, clap::ErrorKind::ValueValidation);
		}
	}

	#[test]
	fn bbox_rejects_non_finite_margin() {
		let err = cli().get_matches_from_safe(vec!["quiet-route", "bbox", "1", "2", "3", "4", "--margin", "NaN"]).unwrap_err();
		assert_eq!(err.kind, clap::ErrorKind::ValueValidation);
	}

	#[test]
	fn help_explains_map_data() {
		for cmd in ["route", "bbox"].iter() {
			let err = cli().get_matches_from_safe(vec!["quiet-route", *cmd, "--help"]).unwrap_err();
			assert_eq!(err.kind, clap::ErrorKind::HelpDisplayed);
			assert!(err.message.contains("overpass-api.de/api/interpreter"), "{}", err.message);
		}
	}
}
