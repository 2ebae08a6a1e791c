//! Location type for addressing chains in the hierarchy

use crate::config::HierarchyConfig;
use crate::types::ADDRESS_LENGTH;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Hard upper bound on region coordinates
pub const MAX_REGIONS: u8 = 16;

/// Hard upper bound on zone coordinates within a region
pub const MAX_ZONES: u8 = 16;

/// Number of levels in the chain hierarchy
pub const HIERARCHY_DEPTH: usize = 3;

/// Level of a chain in the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HierarchyLevel {
    /// The single root chain
    Prime,
    /// One of the region chains
    Region,
    /// One of the zone chains inside a region
    Zone,
}

impl HierarchyLevel {
    /// All levels from the root down
    pub const ALL: [HierarchyLevel; HIERARCHY_DEPTH] =
        [HierarchyLevel::Prime, HierarchyLevel::Region, HierarchyLevel::Zone];

    /// Index into per-level header arrays
    pub const fn index(self) -> usize {
        match self {
            HierarchyLevel::Prime => 0,
            HierarchyLevel::Region => 1,
            HierarchyLevel::Zone => 2,
        }
    }
}

impl fmt::Display for HierarchyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HierarchyLevel::Prime => write!(f, "prime"),
            HierarchyLevel::Region => write!(f, "region"),
            HierarchyLevel::Zone => write!(f, "zone"),
        }
    }
}

/// Position of a chain in the hierarchy: no coordinates for prime, a region
/// coordinate for a region chain, region and zone coordinates for a zone chain.
///
/// Coordinates are bounds-checked on construction, so every `Location` value
/// is in range. Ordering is lexicographic over the coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    coords: [u8; 2],
    depth: u8,
}

impl Location {
    /// The prime location
    pub const fn prime() -> Self {
        Self {
            coords: [0, 0],
            depth: 0,
        }
    }

    /// A region location
    pub fn region(region: u8) -> Result<Self> {
        check_region(region)?;
        Ok(Self {
            coords: [region, 0],
            depth: 1,
        })
    }

    /// A zone location
    pub fn zone(region: u8, zone: u8) -> Result<Self> {
        check_region(region)?;
        check_zone(zone)?;
        Ok(Self {
            coords: [region, zone],
            depth: 2,
        })
    }

    /// Build from the wire form (zero, one or two coordinate bytes)
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        match *slice {
            [] => Ok(Self::prime()),
            [region] => Self::region(region),
            [region, zone] => Self::zone(region, zone),
            _ => Err(Error::invalid_location(format!(
                "expected at most 2 coordinates, got {}",
                slice.len()
            ))),
        }
    }

    /// Coordinates as a slice, in wire order
    pub fn as_slice(&self) -> &[u8] {
        &self.coords[..self.depth as usize]
    }

    /// Region coordinate, if any
    pub fn region_index(&self) -> Option<u8> {
        (self.depth >= 1).then_some(self.coords[0])
    }

    /// Zone coordinate, if any
    pub fn zone_index(&self) -> Option<u8> {
        (self.depth >= 2).then_some(self.coords[1])
    }

    /// Hierarchy level this location names
    pub fn context(&self) -> HierarchyLevel {
        match self.depth {
            0 => HierarchyLevel::Prime,
            1 => HierarchyLevel::Region,
            _ => HierarchyLevel::Zone,
        }
    }

    /// True when the address prefix byte names this zone
    /// (high nibble region, low nibble zone)
    pub fn contains_address(&self, address: &[u8; ADDRESS_LENGTH]) -> bool {
        match (self.region_index(), self.zone_index()) {
            (Some(region), Some(zone)) => {
                let prefix = address[0];
                prefix >> 4 == region && prefix & 0x0f == zone
            }
            _ => false,
        }
    }

    /// Check the location against the active hierarchy width
    pub fn validate_in(&self, hierarchy: &HierarchyConfig) -> Result<()> {
        if let Some(region) = self.region_index() {
            if region >= hierarchy.regions {
                return Err(Error::invalid_location(format!(
                    "region {} outside hierarchy of {} regions",
                    region, hierarchy.regions
                )));
            }
        }
        if let Some(zone) = self.zone_index() {
            if zone >= hierarchy.zones_per_region {
                return Err(Error::invalid_location(format!(
                    "zone {} outside hierarchy of {} zones per region",
                    zone, hierarchy.zones_per_region
                )));
            }
        }
        Ok(())
    }
}

fn check_region(region: u8) -> Result<()> {
    if region >= MAX_REGIONS {
        return Err(Error::invalid_location(format!(
            "region {} out of range 0..{}",
            region, MAX_REGIONS
        )));
    }
    Ok(())
}

fn check_zone(zone: u8) -> Result<()> {
    if zone >= MAX_ZONES {
        return Err(Error::invalid_location(format!(
            "zone {} out of range 0..{}",
            zone, MAX_ZONES
        )));
    }
    Ok(())
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({:?})", self.as_slice())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.region_index(), self.zone_index()) {
            (Some(region), Some(zone)) => write!(f, "zone-{}-{}", region, zone),
            (Some(region), None) => write!(f, "region-{}", region),
            _ => write!(f, "prime"),
        }
    }
}

/// Parses `prime`, `r` or `r,z`
impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("prime") {
            return Ok(Self::prime());
        }

        let coords = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<u8>()
                    .map_err(|e| Error::invalid_location(format!("{s}: {e}")))
            })
            .collect::<Result<Vec<u8>>>()?;
        Self::from_slice(&coords)
    }
}

impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let coords = Vec::<u8>::deserialize(deserializer)?;
        Location::from_slice(&coords).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_creation() {
        let loc = Location::zone(1, 2).unwrap();
        assert_eq!(loc.as_slice(), &[1, 2]);
        assert_eq!(loc.region_index(), Some(1));
        assert_eq!(loc.zone_index(), Some(2));
        assert_eq!(loc.context(), HierarchyLevel::Zone);

        assert_eq!(Location::region(3).unwrap().context(), HierarchyLevel::Region);
        assert_eq!(Location::prime().context(), HierarchyLevel::Prime);
        assert_eq!(Location::default(), Location::prime());
    }

    #[test]
    fn test_location_bounds() {
        assert!(Location::zone(MAX_REGIONS, 0).is_err());
        assert!(Location::zone(0, MAX_ZONES).is_err());
        assert!(Location::zone(MAX_REGIONS - 1, MAX_ZONES - 1).is_ok());
        assert!(Location::from_slice(&[0, 0, 0]).is_err());
    }

    #[test]
    fn test_location_ordering() {
        let mut locations = vec![
            Location::zone(1, 0).unwrap(),
            Location::prime(),
            Location::zone(0, 3).unwrap(),
            Location::region(0).unwrap(),
        ];
        locations.sort();
        assert_eq!(
            locations,
            vec![
                Location::prime(),
                Location::region(0).unwrap(),
                Location::zone(0, 3).unwrap(),
                Location::zone(1, 0).unwrap(),
            ]
        );
    }

    #[test]
    fn test_location_parse_and_display() {
        assert_eq!("2,3".parse::<Location>().unwrap(), Location::zone(2, 3).unwrap());
        assert_eq!("prime".parse::<Location>().unwrap(), Location::prime());
        assert_eq!("1".parse::<Location>().unwrap(), Location::region(1).unwrap());
        assert!("1,x".parse::<Location>().is_err());
        assert!("1,2,3".parse::<Location>().is_err());

        assert_eq!(Location::zone(2, 3).unwrap().to_string(), "zone-2-3");
        assert_eq!(Location::region(2).unwrap().to_string(), "region-2");
    }

    #[test]
    fn test_validate_in_hierarchy() {
        let hierarchy = HierarchyConfig {
            regions: 3,
            zones_per_region: 3,
        };
        assert!(Location::zone(2, 2).unwrap().validate_in(&hierarchy).is_ok());
        assert!(Location::zone(3, 0).unwrap().validate_in(&hierarchy).is_err());
        assert!(Location::zone(0, 3).unwrap().validate_in(&hierarchy).is_err());
        assert!(Location::prime().validate_in(&hierarchy).is_ok());
    }

    #[test]
    fn test_location_serde() {
        let loc = Location::zone(1, 3).unwrap();
        let json = serde_json::to_string(&loc).unwrap();
        assert_eq!(json, "[1,3]");
        let back: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(back, loc);
        assert!(serde_json::from_str::<Location>("[1,99]").is_err());
    }
}
