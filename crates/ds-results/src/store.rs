//! Run storage.
//!
//! One directory per run id:
//!
//! ```text
//! <root>/<run_id>/manifest.json      RunManifest, pretty JSON
//! <root>/<run_id>/timeseries.jsonl   one TimeseriesRecord per line
//! ```

use crate::types::{RunManifest, TimeseriesRecord};
use crate::{ResultsError, ResultsResult};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "manifest.json";
const TIMESERIES_FILE: &str = "timeseries.jsonl";

#[derive(Clone, Debug)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        fs::create_dir_all(&root_dir)?;
        Ok(Self { root_dir })
    }

    /// Store next to a model file, under `.drivesim/runs`.
    pub fn for_model(model_path: &Path) -> ResultsResult<Self> {
        let model_dir = model_path.parent().unwrap_or_else(|| Path::new("."));
        Self::new(model_dir.join(".drivesim").join("runs"))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn run_file(&self, run_id: &str, file: &str) -> PathBuf {
        self.root_dir.join(run_id).join(file)
    }

    /// A run counts as stored once both its manifest and its series exist.
    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_file(run_id, MANIFEST_FILE).is_file()
            && self.run_file(run_id, TIMESERIES_FILE).is_file()
    }

    /// Write a run. The series goes first so a manifest never points at a
    /// missing trace.
    pub fn save_run(
        &self,
        manifest: &RunManifest,
        records: &[TimeseriesRecord],
    ) -> ResultsResult<()> {
        fs::create_dir_all(self.root_dir.join(&manifest.run_id))?;
        write_records(&self.run_file(&manifest.run_id, TIMESERIES_FILE), records)?;
        fs::write(
            self.run_file(&manifest.run_id, MANIFEST_FILE),
            serde_json::to_string_pretty(manifest)?,
        )?;
        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let path = self.existing(run_id, MANIFEST_FILE)?;
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    pub fn load_timeseries(&self, run_id: &str) -> ResultsResult<Vec<TimeseriesRecord>> {
        read_records(&self.existing(run_id, TIMESERIES_FILE)?)
    }

    fn existing(&self, run_id: &str, file: &str) -> ResultsResult<PathBuf> {
        let path = self.run_file(run_id, file);
        if path.is_file() {
            Ok(path)
        } else {
            Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            })
        }
    }

    /// Complete runs of a model, oldest first. Partial run directories are skipped.
    pub fn list_runs(&self, model_name: &str) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();
        for entry in fs::read_dir(&self.root_dir)? {
            let run_id = entry?.file_name().to_string_lossy().into_owned();
            if !self.has_run(&run_id) {
                continue;
            }
            match self.load_manifest(&run_id) {
                Ok(manifest) if manifest.model_name == model_name => runs.push(manifest),
                _ => {}
            }
        }
        runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.root_dir.join(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}

fn write_records(path: &Path, records: &[TimeseriesRecord]) -> ResultsResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn read_records(path: &Path) -> ResultsResult<Vec<TimeseriesRecord>> {
    let mut records = Vec::new();
    for line in BufReader::new(File::open(path)?).lines() {
        let line = line?;
        if !line.trim().is_empty() {
            records.push(serde_json::from_str(&line)?);
        }
    }
    Ok(records)
}
