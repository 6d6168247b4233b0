//! Run execution and caching service.

use std::path::{Path, PathBuf};
use std::time::Instant;

use ds_components::MotorOperatingPoint;
use ds_project::schema::{ModelFile, ScenarioKind};
use ds_results::{MotorSnapshot, RunManifest, RunStore, TimeseriesRecord, VehicleSnapshot};
use ds_sim::run_sim;
use tracing::info;

use crate::compile::{self, CompiledModel};
use crate::error::AppResult;
use crate::project_service;

/// Options for running simulations.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub solver_version: String,
    /// Run store location; defaults to `.drivesim/runs` next to the model file.
    pub store_dir: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            solver_version: "0.1.0".to_string(),
            store_dir: None,
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub model_path: &'a Path,
    pub options: RunOptions,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub loaded_from_cache: bool,
    pub wall_time_s: f64,
}

/// In-memory result of simulating a model file.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub records: Vec<TimeseriesRecord>,
    pub steps: usize,
    pub overspeed_violations: usize,
}

fn motor_snapshot(op: &MotorOperatingPoint, current_a: f64) -> MotorSnapshot {
    MotorSnapshot {
        speed_rad_s: op.speed_rad_s,
        torque_cmd_nm: op.torque_cmd_nm,
        torque_nm: op.torque_nm,
        mech_power_w: op.mech_power_w,
        loss_w: op.loss_w,
        elec_power_w: op.elec_power_w,
        current_a,
    }
}

/// Simulate a model file without touching the run store.
pub fn execute(model: &ModelFile) -> AppResult<RunOutcome> {
    let opts = compile::sim_options(&model.scenario);
    let steps = opts.step_count();

    let outcome = match compile::compile_model(model)? {
        CompiledModel::Motor(mut sim_model) => {
            let record = run_sim(&mut sim_model, &opts)?;
            let records = record
                .t
                .iter()
                .zip(&record.x)
                .map(|(&t, x)| {
                    let out = sim_model.outputs(t, x);
                    TimeseriesRecord {
                        time_s: t,
                        motor: Some(motor_snapshot(&out.op, out.current_a)),
                        vehicle: None,
                    }
                })
                .collect();
            RunOutcome {
                records,
                steps,
                overspeed_violations: sim_model.monitor().violations(),
            }
        }
        CompiledModel::Vehicle(mut sim_model) => {
            let record = run_sim(&mut sim_model, &opts)?;
            let records = record
                .t
                .iter()
                .zip(&record.x)
                .map(|(&t, x)| {
                    let out = sim_model.outputs(t, x);
                    TimeseriesRecord {
                        time_s: t,
                        motor: None,
                        vehicle: Some(VehicleSnapshot {
                            v_mps: x.v_mps,
                            v_kmh: out.v_kmh,
                            axle_spd_rad_s: out.axle_spd_rad_s,
                            axle_trq_nm: out.axle_trq_nm,
                            f_brake_n: out.f_brake_n,
                            accel_mps2: out.accel_mps2,
                        }),
                    }
                })
                .collect();
            RunOutcome {
                records,
                steps,
                overspeed_violations: 0,
            }
        }
        CompiledModel::Drivetrain(mut sim_model) => {
            let record = run_sim(&mut sim_model, &opts)?;
            let records = record
                .t
                .iter()
                .zip(&record.x)
                .map(|(&t, x)| {
                    let out = sim_model.outputs(t, x);
                    TimeseriesRecord {
                        time_s: t,
                        motor: Some(motor_snapshot(&out.motor, out.current_a)),
                        vehicle: Some(VehicleSnapshot {
                            v_mps: x.v_mps,
                            v_kmh: out.v_kmh,
                            axle_spd_rad_s: out.axle_spd_rad_s,
                            axle_trq_nm: out.axle_trq_nm,
                            f_brake_n: out.f_brake_n,
                            accel_mps2: out.accel_mps2,
                        }),
                    }
                })
                .collect();
            RunOutcome {
                records,
                steps,
                overspeed_violations: sim_model.monitor().violations(),
            }
        }
    };

    Ok(outcome)
}

fn scenario_name(kind: ScenarioKind) -> &'static str {
    match kind {
        ScenarioKind::Motor => "motor",
        ScenarioKind::Vehicle => "vehicle",
        ScenarioKind::Drivetrain => "drivetrain",
    }
}

fn open_store(model_path: &Path, options: &RunOptions) -> AppResult<RunStore> {
    let store = match &options.store_dir {
        Some(dir) => RunStore::new(dir.clone())?,
        None => RunStore::for_model(model_path)?,
    };
    Ok(store)
}

/// Execute or load a run based on request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    let started = Instant::now();

    let model = project_service::load_model(request.model_path)?;
    let run_id = ds_results::compute_run_id(&model, &request.options.solver_version);
    let store = open_store(request.model_path, &request.options)?;

    if request.options.use_cache && store.has_run(&run_id) {
        let manifest = store.load_manifest(&run_id)?;
        info!(run_id = %run_id, model = %model.name, "loaded cached run");
        return Ok(RunResponse {
            run_id,
            manifest,
            loaded_from_cache: true,
            wall_time_s: started.elapsed().as_secs_f64(),
        });
    }

    info!(run_id = %run_id, model = %model.name, "executing run");
    let outcome = execute(&model)?;

    let manifest = RunManifest::new(
        run_id.clone(),
        &model.name,
        scenario_name(model.scenario.kind),
        model.scenario.dt_s,
        model.scenario.t_end_s,
        outcome.steps,
        outcome.overspeed_violations,
        &request.options.solver_version,
    );
    store.save_run(&manifest, &outcome.records)?;

    let wall_time_s = started.elapsed().as_secs_f64();
    info!(
        run_id = %run_id,
        records = outcome.records.len(),
        overspeed_violations = outcome.overspeed_violations,
        wall_time_s,
        "run stored"
    );

    Ok(RunResponse {
        run_id,
        manifest,
        loaded_from_cache: false,
        wall_time_s,
    })
}

/// Stored runs of the model at `model_path`.
pub fn list_runs(model_path: &Path, options: &RunOptions) -> AppResult<Vec<RunManifest>> {
    let model = project_service::load_model(model_path)?;
    let store = open_store(model_path, options)?;
    Ok(store.list_runs(&model.name)?)
}

/// Manifest and time series of a stored run.
pub fn load_run(
    model_path: &Path,
    options: &RunOptions,
    run_id: &str,
) -> AppResult<(RunManifest, Vec<TimeseriesRecord>)> {
    let store = open_store(model_path, options)?;
    let manifest = store.load_manifest(run_id)?;
    let records = store.load_timeseries(run_id)?;
    Ok((manifest, records))
}
