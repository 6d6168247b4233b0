//! Content-based hashing for run IDs.

use ds_project::schema::ModelFile;
use sha2::{Digest, Sha256};

pub fn compute_run_id(model: &ModelFile, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    let model_json = serde_json::to_string(model).unwrap_or_default();
    hasher.update(model_json.as_bytes());

    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_project::schema::*;

    fn model() -> ModelFile {
        ModelFile {
            version: 1,
            name: "Test".to_string(),
            motor: None,
            vehicle: Some(VehicleDef {
                tire_radius_m: 0.3,
                mass_kg: 1_000.0,
            }),
            monitor: MonitorDef::default(),
            scenario: ScenarioDef {
                kind: ScenarioKind::Vehicle,
                gear_ratio: None,
                supply_voltage_v: 400.0,
                torque_command: SignalDef::default(),
                brake_force: SignalDef::default(),
                load_torque: SignalDef::default(),
                axle_torque: SignalDef::Constant { value: 100.0 },
                initial_speed_mps: 0.0,
                dt_s: 0.01,
                t_end_s: 1.0,
                record_every: 1,
                integrator: IntegratorDef::Rk4,
            },
        }
    }

    #[test]
    fn hash_stability() {
        let hash1 = compute_run_id(&model(), "v1");
        let hash2 = compute_run_id(&model(), "v1");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn hash_changes_with_inputs() {
        let base = compute_run_id(&model(), "v1");
        assert_ne!(base, compute_run_id(&model(), "v2"));

        let mut other = model();
        other.scenario.t_end_s = 2.0;
        assert_ne!(base, compute_run_id(&other, "v1"));
    }
}
