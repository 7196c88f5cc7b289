//! Maps `(model, hour_offset)` to a file on disk by scanning plausible
//! model-run initializations newest-first.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{ForecastError, ForecastResult};
use crate::model::{snap_offset, ModelRegistry, RunInit};

/// How many days back to search for a run-init that produced the requested
/// forecast hour. Five days comfortably covers any model's retention window
/// without an unbounded filesystem scan.
const DAYS_BACK: i64 = 5;

const MAX_FORECAST_HOUR: i32 = 384;

pub struct FileResolver {
    base_dir: PathBuf,
    registry: ModelRegistry,
}

impl FileResolver {
    pub fn new(base_dir: impl Into<PathBuf>, registry: ModelRegistry) -> Self {
        Self {
            base_dir: base_dir.into(),
            registry,
        }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Resolve `(model, hour_offset)` against `now` to an existing file path
    /// and the forecast hour actually used (after snapping). Errors with
    /// `UnknownModel` if the model isn't registered, `FileNotFound` if no
    /// candidate run-init produced a file that exists on disk.
    pub fn resolve(&self, model: &str, hour_offset: i32, now: DateTime<Utc>) -> ForecastResult<(PathBuf, i32)> {
        let descriptor = self
            .registry
            .get(model)
            .ok_or_else(|| ForecastError::UnknownModel(model.to_string()))?;

        let target = now + chrono::Duration::hours(hour_offset as i64);

        for run in RunInit::candidates(now, DAYS_BACK) {
            let Some(init) = run.init_time() else {
                continue;
            };
            if init > now {
                continue;
            }
            let raw_fhr = (target - init).num_hours();
            if raw_fhr < 0 {
                continue;
            }
            let fhr = snap_offset(raw_fhr as i32);
            if fhr > MAX_FORECAST_HOUR {
                continue;
            }

            let path = self.build_path(&self.base_dir, descriptor, &run, fhr);
            if path.exists() {
                return Ok((path, fhr));
            }
        }

        Err(ForecastError::FileNotFound {
            model: model.to_string(),
            offset: hour_offset,
        })
    }

    fn build_path(
        &self,
        base: &Path,
        descriptor: &crate::model::ModelDescriptor,
        run: &RunInit,
        fhr: i32,
    ) -> PathBuf {
        base.join(run.yyyymmdd()).join(run.hh()).join(format!(
            "{prefix}.t{hh}z.{category}.{resolution}.f{fhr:03}{suffix}",
            prefix = descriptor.file_prefix,
            hh = run.hh(),
            category = descriptor.file_category,
            resolution = descriptor.resolution,
            fhr = fhr,
            suffix = descriptor.file_suffix,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn setup(dir: &Path, yyyymmdd: &str, hh: &str, fhr: i32) {
        let run_dir = dir.join(yyyymmdd).join(hh);
        fs::create_dir_all(&run_dir).unwrap();
        fs::write(
            run_dir.join(format!("gfs.t{hh}z.pgrb2.0p25.f{fhr:03}")),
            b"fake",
        )
        .unwrap();
    }

    #[test]
    fn resolves_newest_matching_run() {
        let tmp = tempfile::tempdir().unwrap();
        setup(tmp.path(), "20260727", "06", 3);
        setup(tmp.path(), "20260727", "00", 9);

        let resolver = FileResolver::new(tmp.path(), ModelRegistry::new());
        let now = chrono::NaiveDate::from_ymd_opt(2026, 7, 27)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let now = DateTime::<Utc>::from_naive_utc_and_offset(now, Utc);

        let (path, fhr) = resolver.resolve("gfs", 0, now).unwrap();
        assert_eq!(fhr, 3);
        assert!(path.to_string_lossy().ends_with("f003"));
    }

    #[test]
    fn unknown_model_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let resolver = FileResolver::new(tmp.path(), ModelRegistry::new());
        let now = Utc::now();
        match resolver.resolve("not-a-model", 0, now) {
            Err(ForecastError::UnknownModel(m)) => assert_eq!(m, "not-a-model"),
            other => panic!("expected UnknownModel, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let resolver = FileResolver::new(tmp.path(), ModelRegistry::new());
        let now = Utc::now();
        match resolver.resolve("gfs", 0, now) {
            Err(ForecastError::FileNotFound { model, .. }) => assert_eq!(model, "gfs"),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }
}
