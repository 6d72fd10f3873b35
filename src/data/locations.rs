//! Fishing location presets
//!
//! Popular coastal fishing spots offered by the `--location` flag. Custom
//! coordinates are supported through [`Location::custom`].

use serde::Serialize;

/// A fishing location
///
/// Uses `&'static str` for string fields so the presets can be declared as a
/// static array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    /// Identifier accepted by `--location`
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Latitude coordinate
    pub latitude: f64,
    /// Longitude coordinate
    pub longitude: f64,
}

impl Location {
    /// Creates a location from user-supplied coordinates.
    pub fn custom(latitude: f64, longitude: f64) -> Self {
        Self {
            id: "custom",
            name: "Custom Location",
            latitude,
            longitude,
        }
    }

    /// Formats the coordinates with hemisphere letters, e.g. "25.76°N, 80.19°W".
    pub fn coordinates_label(&self) -> String {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        format!(
            "{:.2}\u{00B0}{}, {:.2}\u{00B0}{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

static LOCATIONS: [Location; 5] = [
    Location {
        id: "miami",
        name: "Miami, FL",
        latitude: 25.7617,
        longitude: -80.1918,
    },
    Location {
        id: "san-diego",
        name: "San Diego, CA",
        latitude: 32.7157,
        longitude: -117.1611,
    },
    Location {
        id: "key-west",
        name: "Key West, FL",
        latitude: 24.5551,
        longitude: -81.7800,
    },
    Location {
        id: "seattle",
        name: "Seattle, WA",
        latitude: 47.6062,
        longitude: -122.3321,
    },
    Location {
        id: "charleston",
        name: "Charleston, SC",
        latitude: 32.7765,
        longitude: -79.9311,
    },
];

/// Returns all preset locations.
pub fn all_locations() -> &'static [Location] {
    &LOCATIONS
}

/// Returns the location used when none is requested (Miami).
pub fn default_location() -> Location {
    LOCATIONS[0]
}

/// Looks up a preset by id, ignoring case and surrounding whitespace.
pub fn get_location_by_id(id: &str) -> Option<&'static Location> {
    let needle = id.trim().to_lowercase();
    LOCATIONS.iter().find(|loc| loc.id == needle)
}
