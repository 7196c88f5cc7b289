//! Model registry, run-init/offset arithmetic, parameter slugs, and cache-key
//! bucketing.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Static description of a forecast model's file layout.
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    pub id: String,
    pub file_prefix: String,
    pub file_category: String,
    pub resolution: String,
    pub file_suffix: String,
}

/// Registry of known models, keyed by model id.
///
/// Defaults mirror the reference implementation's model map: `gfs` and
/// `gfswave`. Additional models can be registered at construction time.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: HashMap<String, ModelDescriptor>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        let mut models = HashMap::new();
        models.insert(
            "gfs".to_string(),
            ModelDescriptor {
                id: "gfs".to_string(),
                file_prefix: "gfs".to_string(),
                file_category: "pgrb2".to_string(),
                resolution: "0p25".to_string(),
                file_suffix: String::new(),
            },
        );
        models.insert(
            "gfswave".to_string(),
            ModelDescriptor {
                id: "gfswave".to_string(),
                file_prefix: "gfswave".to_string(),
                file_category: "global".to_string(),
                resolution: "0p25".to_string(),
                file_suffix: ".grib2".to_string(),
            },
        );
        Self { models }
    }

    pub fn register(&mut self, descriptor: ModelDescriptor) {
        self.models.insert(descriptor.id.clone(), descriptor);
    }

    pub fn get(&self, id: &str) -> Option<&ModelDescriptor> {
        self.models.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(|s| s.as_str())
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A model run initialization: a (date, run hour) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunInit {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub run_hour: u32,
}

impl RunInit {
    const RUN_HOURS: [u32; 4] = [0, 6, 12, 18];

    /// Candidate run-inits for the window `[today - days_back, today + 1]`,
    /// sorted newest-first. `today` is the caller's current UTC date so
    /// tests can pin it.
    pub fn candidates(today: DateTime<Utc>, days_back: i64) -> Vec<RunInit> {
        let mut out = Vec::new();
        for day_offset in -1..=days_back {
            let d = today - chrono::Duration::days(day_offset);
            for &hour in Self::RUN_HOURS.iter().rev() {
                out.push(RunInit {
                    year: d.year(),
                    month: d.month(),
                    day: d.day(),
                    run_hour: hour,
                });
            }
        }
        out
    }

    pub fn init_time(&self) -> Option<DateTime<Utc>> {
        chrono::NaiveDate::from_ymd_opt(self.year, self.month, self.day)?
            .and_hms_opt(self.run_hour, 0, 0)
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
    }

    pub fn yyyymmdd(&self) -> String {
        format!("{:04}{:02}{:02}", self.year, self.month, self.day)
    }

    pub fn hh(&self) -> String {
        format!("{:02}", self.run_hour)
    }
}

/// Snap a forecast-hour offset per the model's archive cadence: offsets
/// beyond 120 hours are only archived every 3 hours. Ties (a residue of
/// exactly 1 or 2 past the last multiple of 3) break toward zero: a residue
/// of 1 rounds down, a residue of 2 rounds up.
pub fn snap_offset(fhr: i32) -> i32 {
    if fhr <= 120 {
        return fhr;
    }
    match fhr % 3 {
        0 => fhr,
        1 => fhr - 1,
        2 => fhr + 1,
        _ => unreachable!(),
    }
}

/// Normalize a raw GRIB parameter name into a URL-safe slug: lowercase,
/// `/` becomes `_`, other non-word characters are stripped, spaces become
/// `-`.
pub fn slugify(raw_name: &str) -> String {
    let lower = raw_name.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    for ch in lower.chars() {
        if ch == '/' {
            out.push('_');
        } else if ch == ' ' {
            out.push('-');
        } else if ch.is_alphanumeric() || ch == '_' || ch == '-' {
            out.push(ch);
        }
    }
    out
}

/// The `DD:HH` time bucket used throughout the cache-key hierarchy.
///
/// This intentionally omits month and year: two calls twelve hours apart
/// that straddle a month boundary (e.g. 23:50 on the 31st and 00:10 on the
/// 1st) can collide on the same key. That collision risk is inherited
/// unchanged from the reference implementation this was ported from; widening
/// the key to include month/year would break compatibility with existing
/// cache entries for a marginal correctness gain, and the spec this was
/// built against asks that the tradeoff be recorded rather than silently
/// fixed. See DESIGN.md.
pub fn time_key(now: DateTime<Utc>) -> String {
    let rounded = if now.minute() >= 30 {
        now + chrono::Duration::minutes(60 - now.minute() as i64)
    } else {
        now
    };
    format!("{:02}:{:02}", rounded.day(), rounded.hour())
}
