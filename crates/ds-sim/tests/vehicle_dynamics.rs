//! Integration test: vehicle driven by a prescribed axle torque.
//!
//! - Constant axle torque without brakes gives an exact linear speed ramp
//! - Braking to rest never reverses the vehicle
//! - Steps too coarse for the brake law near standstill are rejected

use ds_components::{SimpleVehicle, VehicleParameters};
use ds_core::units::{kg, m};
use ds_sim::{
    IntegratorType, Schedule, SimError, SimOptions, TransientModel, VehicleModel, run_sim,
};

fn car() -> SimpleVehicle {
    SimpleVehicle::new(
        "car",
        VehicleParameters {
            tire_radius: m(0.3),
            mass: kg(1_500.0),
        },
    )
    .unwrap()
}

#[test]
fn constant_torque_gives_linear_ramp() {
    let torque = 300.0;
    let v0 = 2.0;
    let slope = torque / (1_500.0 * 0.3);

    for integrator in [IntegratorType::RK4, IntegratorType::ForwardEuler] {
        let mut model = VehicleModel::new(
            car(),
            Schedule::constant(torque),
            Schedule::constant(0.0),
            v0,
        )
        .unwrap();
        let opts = SimOptions {
            dt: 0.01,
            t_end: 10.0,
            record_every: 50,
            integrator,
            ..SimOptions::default()
        };
        let rec = run_sim(&mut model, &opts).unwrap();

        for (t, x) in rec.t.iter().zip(&rec.x) {
            let expected = v0 + slope * t;
            assert!(
                (x.v_mps - expected).abs() < 1e-9,
                "{integrator:?}: t={t} v={} expected={expected}",
                x.v_mps
            );
        }
    }
}

#[test]
fn braking_to_rest_does_not_reverse() {
    let mut model = VehicleModel::new(
        car(),
        Schedule::constant(0.0),
        Schedule::constant(3_000.0),
        10.0,
    )
    .unwrap();
    let opts = SimOptions {
        dt: 1e-3,
        t_end: 8.0,
        record_every: 100,
        ..SimOptions::default()
    };
    let rec = run_sim(&mut model, &opts).unwrap();

    let min_v = rec.x.iter().map(|x| x.v_mps).fold(f64::INFINITY, f64::min);
    assert!(min_v > -1e-6, "vehicle reversed: {min_v}");

    let (_, last) = rec.last().unwrap();
    assert!(last.v_mps.abs() < 1e-2);

    // Roughly 2 m/s² while the brakes are saturated
    let halfway = rec
        .t
        .iter()
        .position(|t| (*t - 2.0).abs() < 1e-9)
        .unwrap();
    assert!((rec.x[halfway].v_mps - 6.0).abs() < 0.05);
}

#[test]
fn brake_step_bound_keeps_rest_state_non_negative() {
    for integrator in [IntegratorType::ForwardEuler, IntegratorType::RK4] {
        let mut model = VehicleModel::new(
            car(),
            Schedule::constant(0.0),
            Schedule::constant(3_000.0),
            10.0,
        )
        .unwrap();
        let stiffness = model.stiffness();
        assert!(stiffness > 600.0 && stiffness < 700.0);
        let max_dt = integrator.stable_step_limit() / stiffness;

        let coarse = SimOptions {
            dt: 2.0 * max_dt,
            t_end: 8.0,
            integrator,
            ..SimOptions::default()
        };
        assert!(matches!(
            coarse.check_step_size(stiffness),
            Err(SimError::StepTooLarge { .. })
        ));

        let opts = SimOptions {
            dt: 0.5 * max_dt,
            t_end: 8.0,
            record_every: 1,
            integrator,
            ..SimOptions::default()
        };
        opts.check_step_size(stiffness).unwrap();
        let rec = run_sim(&mut model, &opts).unwrap();

        let min_v = rec.x.iter().map(|x| x.v_mps).fold(f64::INFINITY, f64::min);
        assert!(min_v > -1e-12, "{integrator:?} reversed: {min_v}");
        let (_, last) = rec.last().unwrap();
        assert!(last.v_mps < 1e-6, "{integrator:?} stuck at {}", last.v_mps);
    }
}

#[test]
fn outputs_report_km_per_hour_and_reaction() {
    let model = VehicleModel::new(
        car(),
        Schedule::step(1.0, 0.0, 450.0),
        Schedule::constant(0.0),
        0.0,
    )
    .unwrap();
    let x = ds_components::VehicleState { v_mps: 25.0 };
    let before = model.outputs(0.5, &x);
    let after = model.outputs(1.5, &x);
    assert!((before.v_kmh - 90.0).abs() < 1e-9);
    assert_eq!(before.axle_trq_nm, 0.0);
    assert_eq!(after.reaction_trq_nm, -450.0);
    assert!((after.accel_mps2 - 1.0).abs() < 1e-12);
}
