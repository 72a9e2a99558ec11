//! Coordinate reference system tags
//!
//! The conditioning core assumes vector and raster inputs share one CRS and
//! performs no transformation; this type only carries the raster's CRS
//! through reads and writes so it can be reported and preserved.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A coordinate reference system identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crs {
    epsg: Option<u32>,
    wkt: Option<String>,
}

impl Crs {
    pub fn from_epsg(code: u32) -> Self {
        Self {
            epsg: Some(code),
            wkt: None,
        }
    }

    pub fn from_wkt(wkt: impl Into<String>) -> Self {
        Self {
            epsg: None,
            wkt: Some(wkt.into()),
        }
    }

    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    pub fn wkt(&self) -> Option<&str> {
        self.wkt.as_deref()
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.epsg, &self.wkt) {
            (Some(code), _) => write!(f, "EPSG:{}", code),
            (None, Some(wkt)) => {
                // WKT strings run long; show the leading name only
                let head = wkt.split(',').next().unwrap_or(wkt);
                write!(f, "{}", head)
            }
            (None, None) => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefers_epsg() {
        assert_eq!(Crs::from_epsg(25832).to_string(), "EPSG:25832");
        assert_eq!(
            Crs::from_wkt("PROJCS[\"ETRS89 / UTM zone 32N\",more").to_string(),
            "PROJCS[\"ETRS89 / UTM zone 32N\""
        );
    }
}
