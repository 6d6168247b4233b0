//! Smoke tests through the public API of the component library.

use ds_components::{
    ComponentError, ElectricalPort, IronLossLaw, MotorDriveUnit, MotorParameters,
    OverspeedMonitor, Severity, SimpleVehicle, VehicleParameters, VehicleState,
};
use ds_core::units::{kg, kg_m2, m, nm, percent, rad_s, s, unitless, w};

fn params() -> MotorParameters {
    MotorParameters {
        trq_max: nm(250.0),
        spd_max: rad_s(1_000.0),
        power_max: w(60_000.0),
        response_time_const: s(0.05),
        efficiency: percent(94.5),
        spd_eff: rad_s(300.0),
        trq_eff: nm(150.0),
        iron_to_nominal_ratio: unitless(0.4),
        elec_loss_const: w(150.0),
        j_rotor: kg_m2(0.03),
        k_damp: 0.0,
        initial_spd: rad_s(0.0),
        iron_loss_law: IronLossLaw::Constant,
    }
}

#[test]
fn motor_reproduces_rated_efficiency() {
    let motor = MotorDriveUnit::new("m", params()).unwrap();
    let op = motor.operating_point(150.0, 150.0, 300.0);
    let eta = op.mech_power_w / (op.mech_power_w + op.loss_w);
    assert!((eta - 0.945).abs() < 1e-12);
}

#[test]
fn configuration_errors_yield_no_model() {
    for pct in [100.0, 0.0, -1.0] {
        let mut p = params();
        p.efficiency = percent(pct);
        match MotorDriveUnit::new("m", p) {
            Err(ComponentError::Configuration(_)) => {}
            other => panic!("{pct}%: expected configuration error, got {other:?}"),
        }
    }
}

#[test]
fn supply_current_follows_power_balance() {
    let motor = MotorDriveUnit::new("m", params()).unwrap();
    let op = motor.operating_point(100.0, 100.0, 200.0);
    let supply = ElectricalPort::new(350.0, -50.0);
    let current = motor.supply_current(&op, supply);
    assert!((current * 400.0 - (20_000.0 + op.loss_w)).abs() < 1e-6);
}

#[test]
fn monitor_tracks_motor_limit() {
    let motor = MotorDriveUnit::new("m", params()).unwrap();
    let mut warn = OverspeedMonitor::for_motor(&motor, Severity::Warn);
    let mut halt = OverspeedMonitor::for_motor(&motor, Severity::Error);
    assert_eq!(warn.limit_rad_s(), 1_000.0);
    assert!(warn.check(0.0, 1_000.0).unwrap());
    assert!(halt.check(0.0, 1_000.0).is_err());
}

#[test]
fn vehicle_brake_and_kinematics() {
    let vehicle = SimpleVehicle::new(
        "v",
        VehicleParameters {
            tire_radius: m(0.32),
            mass: kg(1_200.0),
        },
    )
    .unwrap();

    let standing = vehicle.evaluate(&VehicleState { v_mps: 0.0 }, 0.0, 8_000.0);
    assert_eq!(standing.f_brake_n, 0.0);
    assert_eq!(standing.accel_mps2, 0.0);

    let moving = vehicle.evaluate(&VehicleState { v_mps: 20.0 }, 0.0, 8_000.0);
    assert!((moving.axle_spd_rad_s - 62.5).abs() < 1e-12);
    assert!((moving.accel_mps2 + 8_000.0 / 1_200.0).abs() < 1e-6);
    assert!((moving.v_kmh - 72.0).abs() < 1e-9);
}
