//! Built-in static per-parameter metadata table.
//!
//! Grounded on `original_source/tile_renderers/gfs_render/parameter_meta.py`'s
//! `PARAMETER_META` dict: description/units/notes keyed by parameter slug,
//! merged into the value dictionary a model returns to callers. Owned here
//! as a small built-in table rather than fetched from anywhere external,
//! since nothing in scope specifies an external metadata service.

use crate::colorize::{colormap_for_parameter, Colormap};

#[derive(Debug, Clone)]
pub struct ParameterCatalogEntry {
    pub slug: &'static str,
    pub raw_name: &'static str,
    pub units: &'static str,
    pub type_of_level: &'static str,
    pub description: &'static str,
    pub notes: &'static str,
}

impl ParameterCatalogEntry {
    pub fn colormap(&self) -> Colormap {
        colormap_for_parameter(self.slug)
    }
}

macro_rules! entry {
    ($slug:expr, $raw:expr, $units:expr, $level:expr, $desc:expr, $notes:expr) => {
        ParameterCatalogEntry {
            slug: $slug,
            raw_name: $raw,
            units: $units,
            type_of_level: $level,
            description: $desc,
            notes: $notes,
        }
    };
}

const GFS_ENTRIES: &[ParameterCatalogEntry] = &[
    entry!(
        "pressure-reduced-to-msl",
        "Pressure reduced to MSL",
        "Pa",
        "meanSea",
        "Mean sea level pressure commonly used for weather analysis and forecasting.",
        "Typically ranges from ~800 hPa to ~1100 hPa."
    ),
    entry!(
        "temperature",
        "Temperature",
        "K",
        "isobaricInhPa",
        "Atmospheric temperature in Kelvin at isobaric levels.",
        "Ranges from very cold (~150K) to very hot (~350K)."
    ),
    entry!(
        "2-metre-temperature",
        "2 metre temperature",
        "K",
        "heightAboveGround",
        "Air temperature at 2m above ground in Kelvin.",
        "Ranges from ~180K to ~330K."
    ),
    entry!(
        "2-metre-dewpoint-temperature",
        "2 metre dewpoint temperature",
        "K",
        "heightAboveGround",
        "Dewpoint temperature at 2m above ground (K).",
        "Cannot exceed actual temperature; ~330K is extremely high dewpoint."
    ),
    entry!(
        "2-metre-relative-humidity",
        "2 metre relative humidity",
        "%",
        "heightAboveGround",
        "Relative humidity at 2m above ground, in percent.",
        "0% = fully dry, 100% = saturated near surface."
    ),
    entry!(
        "relative-humidity",
        "Relative humidity",
        "%",
        "isobaricInhPa",
        "Ratio of water vapor partial pressure to saturation vapor pressure, in percent.",
        "0% = fully dry, 100% = fully saturated."
    ),
    entry!(
        "u-component-of-wind",
        "U-component of wind",
        "m s**-1",
        "isobaricInhPa",
        "Zonal (east-west) wind component in m/s.",
        "Negative = westward, positive = eastward."
    ),
    entry!(
        "v-component-of-wind",
        "V-component of wind",
        "m s**-1",
        "isobaricInhPa",
        "Meridional (north-south) wind component in m/s.",
        "Negative = southward, positive = northward."
    ),
    entry!(
        "10-metre-u-wind-component",
        "10 metre U wind component",
        "m s**-1",
        "heightAboveGround",
        "East-west wind at 10m above ground (m/s).",
        "Negative = westward, positive = eastward."
    ),
    entry!(
        "10-metre-v-wind-component",
        "10 metre V wind component",
        "m s**-1",
        "heightAboveGround",
        "North-south wind at 10m above ground (m/s).",
        "Negative = southward, positive = northward."
    ),
    entry!(
        "wind-speed-gust",
        "Wind speed (gust)",
        "m s**-1",
        "surface",
        "Surface gust wind speed in m/s.",
        "Can exceed 100 m/s in extreme storms (rare)."
    ),
    entry!(
        "geopotential-height",
        "Geopotential height",
        "gpm",
        "isobaricInhPa",
        "Height of a given pressure level in geopotential meters (≈ actual meters).",
        "Values can approach 30,000 gpm at very high altitudes."
    ),
    entry!(
        "precipitation-rate",
        "Precipitation rate",
        "kg m**-2 s**-1",
        "surface",
        "Rate of precipitation at the surface (kg m^-2 s^-1).",
        "0.1 is extremely heavy precipitation."
    ),
    entry!(
        "total-cloud-cover",
        "Total cloud cover",
        "%",
        "atmosphere",
        "Fraction of sky covered by cloud (0%-100%).",
        "0% = clear, 100% = fully overcast."
    ),
    entry!(
        "convective-available-potential-energy",
        "Convective available potential energy",
        "J kg**-1",
        "surface",
        "Energy available for convection, indicating thunderstorm potential.",
        "Values over 4000 J/kg can be extreme."
    ),
    entry!(
        "surface-pressure",
        "Surface pressure",
        "Pa",
        "surface",
        "Atmospheric pressure at the surface.",
        "Lower near high elevations, higher at sea level."
    ),
    entry!(
        "snow-depth",
        "Snow depth",
        "m",
        "surface",
        "Depth of snow on the ground in meters.",
        "Can exceed 10 m in heavy snowfall regions."
    ),
    entry!(
        "visibility",
        "Visibility",
        "m",
        "surface",
        "Horizontal visibility at the surface in meters.",
        "Typically up to 10-20 km in clear air; 100000 m ~ 100 km in some models."
    ),
];

const GFSWAVE_ENTRIES: &[ParameterCatalogEntry] = &[
    entry!(
        "wind-speed",
        "Wind speed",
        "m s**-1",
        "surface",
        "Wind speed at the surface.",
        "Values can range from calm conditions (~0 m/s) to hurricane-force winds (>30 m/s)."
    ),
    entry!(
        "wind-direction",
        "Wind direction",
        "Degree true",
        "surface",
        "Wind direction at the surface, indicating the direction from which the wind is blowing.",
        "0 deg indicates wind from the north, 90 from the east."
    ),
    entry!(
        "significant-height-of-combined-wind-waves-and-swell",
        "Significant height of combined wind waves and swell",
        "m",
        "surface",
        "Significant height of the combined wind waves and swell.",
        "Represents the average height of the highest one-third of waves."
    ),
    entry!(
        "primary-wave-mean-period",
        "Primary wave mean period",
        "s",
        "surface",
        "Mean period of the primary wave.",
        "Indicates the average time interval between consecutive wave crests."
    ),
    entry!(
        "primary-wave-direction",
        "Primary wave direction",
        "Degree true",
        "surface",
        "Direction from which the primary wave is coming.",
        "0 deg indicates waves coming from the north."
    ),
];

/// Look up the catalog entry for `(model, slug)`, if any. Callers that need
/// richer metadata than the catalog carries should fall back to a generic
/// entry derived from the raw GRIB parameter name.
pub fn lookup(model: &str, slug: &str) -> Option<&'static ParameterCatalogEntry> {
    let table = match model {
        "gfs" => GFS_ENTRIES,
        "gfswave" => GFSWAVE_ENTRIES,
        _ => return None,
    };
    table.iter().find(|e| e.slug == slug)
}

/// All catalog entries for a model, for the `/parameters` listing endpoint.
pub fn entries_for_model(model: &str) -> &'static [ParameterCatalogEntry] {
    match model {
        "gfs" => GFS_ENTRIES,
        "gfswave" => GFSWAVE_ENTRIES,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_gfs_parameter() {
        let entry = lookup("gfs", "temperature").expect("temperature should be cataloged");
        assert_eq!(entry.units, "K");
        assert_eq!(entry.colormap(), Colormap::Jet);
    }

    #[test]
    fn unknown_model_returns_empty_listing() {
        assert!(entries_for_model("nonexistent").is_empty());
        assert!(lookup("nonexistent", "temperature").is_none());
    }
}
