//! Query helpers for extracting data from loaded runs.

use ds_results::{Channel, TimeseriesRecord};

use crate::error::{AppError, AppResult};

/// Summary of a run's time range and data.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub time_range: (f64, f64),
    pub record_count: usize,
    pub channels: Vec<Channel>,
}

pub fn get_run_summary(records: &[TimeseriesRecord]) -> AppResult<RunSummary> {
    if records.is_empty() {
        return Err(AppError::InvalidInput("No records in run".to_string()));
    }

    let t_min = records.first().map(|r| r.time_s).unwrap_or(0.0);
    let t_max = records.last().map(|r| r.time_s).unwrap_or(0.0);

    Ok(RunSummary {
        time_range: (t_min, t_max),
        record_count: records.len(),
        channels: Channel::available(records),
    })
}

/// Names of all channels present in a run.
pub fn list_channels(records: &[TimeseriesRecord]) -> Vec<String> {
    Channel::available(records)
        .into_iter()
        .map(|c| c.name().to_string())
        .collect()
}

/// `(time_s, value)` series of a channel by name, e.g. `vehicle.v_kmh`.
pub fn extract_channel(records: &[TimeseriesRecord], name: &str) -> AppResult<Vec<(f64, f64)>> {
    let series = ds_results::extract_named(records, name)?;
    if series.is_empty() && !records.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "Channel {} is not recorded in this run",
            name
        )));
    }
    Ok(series)
}
