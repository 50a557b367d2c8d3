//! Pure house layout logic for houseplan.
//!
//! Turns a house request (room types, plot size, story count) into a
//! multi-story floor layout: rooms on a per-floor grid, a corridor per floor,
//! one door per room and a single main entrance. Functions take plain data and
//! return results; randomness is injected, so layouts are reproducible from a
//! seed.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Standard room sizes (width, length, min area) |
//! | [`config`] | Engine settings: cell size, door widths, retry budgets |
//! | [`constants`] | Room type names, category predicates, physical constants |
//! | [`error`] | Request parsing errors |
//! | [`grid`] | Per-floor occupancy grid and grid rectangles |
//! | [`layout`] | Generation pipeline: stories → floors → doors → meters |
//! | [`model`] | Output model (rooms, doors, connections) and its JSON shape |
//! | [`placement`] | Footprints, placement strategies, per-floor placement |
//! | [`plot`] | Plot size in meters, Marla and Kanal |
//! | [`request`] | House request parsing and normalization |
//! | [`routing`] | Corridor strip, corridor doors, main entrance door |
//! | [`scale`] | Grid units to meters |
//! | [`stories`] | Assigning rooms to stories |
//! | [`validate`] | Layout validation (overlaps, doors, connectivity) |
//! | [`zones`] | Public / private / service / other quadrants |

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod layout;
pub mod model;
pub mod placement;
pub mod plot;
pub mod request;
pub mod routing;
pub mod scale;
pub mod stories;
pub mod validate;
pub mod zones;
