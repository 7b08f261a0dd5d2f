use crate::*;
use crate::data::{Coordinates, Distance};

use noisy_float::prelude::*;

/// Point closest to `query` by great-circle distance; ties go to whichever comes first.
///
/// Linear in the number of candidates, which is fine as long as they come from a single bounded map query.
pub fn nearest<'a>(query: &Coordinates, table: impl IntoIterator<Item = (&'a PointId, &'a Coordinates)>) -> Option<PointId> {
	table.into_iter().min_by_key(|(_, c)| n64(query.distance(c))).map(|(id, _)| *id)
}
