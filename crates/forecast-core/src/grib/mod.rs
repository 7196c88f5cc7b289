//! GRIB message iteration boundary.
//!
//! The rest of this crate treats a GRIB file as a list of typed message
//! descriptors plus a decode operation; it never parses sections itself.
//! This module is the thin adapter between that view and the workspace's
//! `grib2-parser`/`grib` crates.

pub mod selector;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, ForecastResult};
use crate::model::slugify;

/// Fallback sentinel for `GridMessage::missing_value` when a message's
/// Section 5 doesn't encode an explicit primary missing value (this parser
/// decodes grid templates 5.0/5.3 only, neither of which carries one).
/// Mirrors `getattr(g, "missingValue", 9999.0)` in the implementation this
/// crate was grounded on.
pub const DEFAULT_MISSING_VALUE: f32 = 9999.0;

/// Vertical level type, restricted to the handful the selection ladder
/// reasons about. `grib2-parser` exposes the raw GRIB2 code table 4.5
/// value; this maps the ones this crate cares about and keeps the rest as
/// `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelType {
    Surface,
    HeightAboveGround,
    IsobaricInhPa,
    MeanSeaLevel,
    /// "entire atmosphere as a single layer" (GRIB2 code 10), the closest
    /// analogue to pygrib's `atmosphere` typeOfLevel.
    Atmosphere,
    /// Generalized vertical coordinate levels (hybrid/sigma), the closest
    /// analogue to pygrib's `orderedSequenceData`.
    OrderedSequenceData,
    Other(u8),
}

impl LevelType {
    fn from_code(code: u8) -> Self {
        match code {
            1 => LevelType::Surface,
            100 => LevelType::IsobaricInhPa,
            101 => LevelType::MeanSeaLevel,
            103 => LevelType::HeightAboveGround,
            10 => LevelType::Atmosphere,
            150 => LevelType::OrderedSequenceData,
            other => LevelType::Other(other),
        }
    }

    /// pygrib-style `typeOfLevel` string, used both for cache-key building
    /// and for parsing a caller-supplied query parameter back into a
    /// `LevelType`.
    pub fn as_key_str(&self) -> String {
        match self {
            LevelType::Surface => "surface".to_string(),
            LevelType::IsobaricInhPa => "isobaricInhPa".to_string(),
            LevelType::MeanSeaLevel => "meanSea".to_string(),
            LevelType::HeightAboveGround => "heightAboveGround".to_string(),
            LevelType::Atmosphere => "atmosphere".to_string(),
            LevelType::OrderedSequenceData => "orderedSequenceData".to_string(),
            LevelType::Other(code) => format!("other{code}"),
        }
    }

    pub fn from_key_str(s: &str) -> Self {
        match s {
            "surface" => LevelType::Surface,
            "isobaricInhPa" => LevelType::IsobaricInhPa,
            "meanSea" => LevelType::MeanSeaLevel,
            "heightAboveGround" => LevelType::HeightAboveGround,
            "atmosphere" => LevelType::Atmosphere,
            "orderedSequenceData" => LevelType::OrderedSequenceData,
            other => other
                .strip_prefix("other")
                .and_then(|n| n.parse::<u8>().ok())
                .map(LevelType::Other)
                .unwrap_or(LevelType::Other(255)),
        }
    }
}

/// Whether a field is an instantaneous snapshot or a statistically
/// processed (time-averaged/accumulated) quantity.
///
/// `grib2-parser` does not currently expose the product definition template
/// number needed to distinguish these, so every message it produces is
/// reported as `Instant`. TODO: thread the PDT number through
/// `grib2_parser::sections::ProductDefinition` so accumulation/average
/// fields can be told apart from instantaneous ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepType {
    Instant,
    Avg,
    Accum,
}

impl StepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Instant => "instant",
            StepType::Avg => "avg",
            StepType::Accum => "accum",
        }
    }

    pub fn from_key_str(s: &str) -> Self {
        match s {
            "avg" => StepType::Avg,
            "accum" => StepType::Accum,
            _ => StepType::Instant,
        }
    }
}

/// Lightweight, selector-facing description of one message in a GRIB file.
#[derive(Debug, Clone)]
pub struct MessageMeta {
    pub index: usize,
    pub parameter_slug: String,
    pub raw_parameter_name: String,
    pub level_type: LevelType,
    pub level: u32,
    pub step_type: StepType,
    pub forecast_hour: u32,
}

/// A fully decoded grid, ready for interpolation or point lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridMessage {
    pub values: Vec<f32>,
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
    pub height: usize,
    pub width: usize,
    pub j_scans_positively: bool,
    pub minimum: f32,
    pub maximum: f32,
    pub missing_value: f32,
    pub reference_time: DateTime<Utc>,
    pub valid_time: DateTime<Utc>,
}

impl GridMessage {
    /// If the grid does not scan positively in j (GRIB2 flag table 3.4, bit
    /// `0x40` clear), reverse its rows so downstream consumers can assume
    /// row 0 is the northernmost row.
    ///
    /// This is a genuine axis reversal (row order swaps), distinct from
    /// `interp::builder::build`'s `lat_flip`, which only negates the
    /// latitude values before projection. The two are applied to different
    /// consumers — this one to the point-evaluator's native-grid cache, that
    /// one to the interpolator's projected point set — and must not be
    /// unified; see `DESIGN.md`.
    pub fn with_scan_direction_normalized(mut self) -> Self {
        if self.j_scans_positively || self.height <= 1 {
            return self;
        }
        let w = self.width;
        for row in 0..self.height / 2 {
            let other = self.height - 1 - row;
            for col in 0..w {
                self.values.swap(row * w + col, other * w + col);
                self.lats.swap(row * w + col, other * w + col);
                self.lons.swap(row * w + col, other * w + col);
            }
        }
        self.j_scans_positively = true;
        self
    }
}

/// A handle on an open GRIB file: its message catalog plus the ability to
/// fully decode one of them.
pub trait GribHandle: Send + Sync {
    fn messages(&self) -> &[MessageMeta];
    fn decode(&self, index: usize) -> ForecastResult<GridMessage>;
}

/// Opens GRIB files and hands back [`GribHandle`]s.
pub trait GribSource: Send + Sync {
    fn open(&self, path: &Path) -> ForecastResult<Box<dyn GribHandle>>;
}

/// Default [`GribSource`] backed by `grib2-parser` (which in turn delegates
/// value unpacking to the `grib` crate).
pub struct Grib2FileSource;

impl GribSource for Grib2FileSource {
    fn open(&self, path: &Path) -> ForecastResult<Box<dyn GribHandle>> {
        let bytes = std::fs::read(path)?;
        let mut reader = grib2_parser::Grib2Reader::new(bytes::Bytes::from(bytes));
        let mut messages = Vec::new();
        let mut raw = Vec::new();
        for result in reader.iter_messages() {
            let msg = result?;
            let meta = MessageMeta {
                index: raw.len(),
                parameter_slug: slugify(msg.parameter()),
                raw_parameter_name: msg.parameter().to_string(),
                level_type: LevelType::from_code(msg.product_definition.level_type),
                level: msg.product_definition.level_value,
                step_type: StepType::Instant,
                forecast_hour: msg.product_definition.forecast_hour,
            };
            messages.push(meta);
            raw.push(msg);
        }
        Ok(Box::new(OpenGrib2File { messages, raw }))
    }
}

struct OpenGrib2File {
    messages: Vec<MessageMeta>,
    raw: Vec<grib2_parser::Grib2Message>,
}

impl GribHandle for OpenGrib2File {
    fn messages(&self) -> &[MessageMeta] {
        &self.messages
    }

    fn decode(&self, index: usize) -> ForecastResult<GridMessage> {
        let msg = self
            .raw
            .get(index)
            .ok_or_else(|| ForecastError::GribDecodeError(format!("no message at index {index}")))?;

        let values = msg.unpack_data()?;
        let (h, w) = msg.grid_dims();
        let (h, w) = (h as usize, w as usize);
        if values.len() != h * w {
            return Err(ForecastError::GribDecodeError(format!(
                "decoded {} values, expected {}x{}={}",
                values.len(),
                h,
                w,
                h * w
            )));
        }

        let gd = &msg.grid_definition;
        let first_lat = gd.first_latitude_millidegrees as f64 / 1000.0;
        let last_lat = gd.last_latitude_millidegrees as f64 / 1000.0;
        let first_lon = gd.first_longitude_millidegrees as f64 / 1000.0;
        let lon_inc = gd.longitude_increment_millidegrees as f64 / 1000.0;

        let lat_step = if h > 1 {
            (last_lat - first_lat) / (h - 1) as f64
        } else {
            0.0
        };

        let mut lats = Vec::with_capacity(h * w);
        let mut lons = Vec::with_capacity(h * w);
        for row in 0..h {
            let lat = first_lat + lat_step * row as f64;
            for col in 0..w {
                lats.push(lat);
                lons.push(first_lon + lon_inc * col as f64);
            }
        }

        // GRIB2 flag table 3.4: bit value 0x40 set means rows scan in the
        // +j (increasing latitude) direction.
        let j_scans_positively = gd.scanning_mode & 0x40 != 0;

        let minimum = values.iter().cloned().fold(f32::INFINITY, f32::min);
        let maximum = values.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        Ok(GridMessage {
            values,
            lats,
            lons,
            height: h,
            width: w,
            j_scans_positively,
            minimum,
            maximum,
            missing_value: DEFAULT_MISSING_VALUE,
            reference_time: msg.identification.reference_time,
            valid_time: msg.valid_time(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(j_scans_positively: bool) -> GridMessage {
        GridMessage {
            values: vec![1.0, 2.0, 3.0, 4.0],
            lats: vec![1.0, 1.0, 0.0, 0.0],
            lons: vec![0.0, 1.0, 0.0, 1.0],
            height: 2,
            width: 2,
            j_scans_positively,
            minimum: 1.0,
            maximum: 4.0,
            missing_value: 9999.0,
            reference_time: Utc::now(),
            valid_time: Utc::now(),
        }
    }

    #[test]
    fn normalizing_already_positive_scan_is_a_no_op() {
        let g = grid(true).with_scan_direction_normalized();
        assert_eq!(g.values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn normalizing_negative_scan_reverses_rows() {
        let g = grid(false).with_scan_direction_normalized();
        assert_eq!(g.values, vec![3.0, 4.0, 1.0, 2.0]);
        assert_eq!(g.lats, vec![0.0, 0.0, 1.0, 1.0]);
        assert!(g.j_scans_positively);
    }
}
