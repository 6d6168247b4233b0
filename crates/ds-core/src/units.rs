// ds-core/src/units.rs

use uom::si::f64::{
    AngularVelocity as UomAngularVelocity, ElectricCurrent as UomElectricCurrent,
    ElectricPotential as UomElectricPotential, Force as UomForce, Length as UomLength,
    Mass as UomMass, MomentOfInertia as UomMomentOfInertia, Power as UomPower, Ratio as UomRatio,
    Time as UomTime, Torque as UomTorque, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type AngularVelocity = UomAngularVelocity;
pub type Current = UomElectricCurrent;
pub type Voltage = UomElectricPotential;
pub type Force = UomForce;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Inertia = UomMomentOfInertia;
pub type Power = UomPower;
pub type Ratio = UomRatio;
pub type Time = UomTime;
pub type Torque = UomTorque;
pub type Velocity = UomVelocity;

#[inline]
pub fn nm(v: f64) -> Torque {
    use uom::si::torque::newton_meter;
    Torque::new::<newton_meter>(v)
}

#[inline]
pub fn rad_s(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::radian_per_second;
    AngularVelocity::new::<radian_per_second>(v)
}

#[inline]
pub fn rpm(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::revolution_per_minute;
    AngularVelocity::new::<revolution_per_minute>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn n(v: f64) -> Force {
    use uom::si::force::newton;
    Force::new::<newton>(v)
}

#[inline]
pub fn volt(v: f64) -> Voltage {
    use uom::si::electric_potential::volt;
    Voltage::new::<volt>(v)
}

#[inline]
pub fn amp(v: f64) -> Current {
    use uom::si::electric_current::ampere;
    Current::new::<ampere>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn kg_m2(v: f64) -> Inertia {
    use uom::si::moment_of_inertia::kilogram_square_meter;
    Inertia::new::<kilogram_square_meter>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn percent(v: f64) -> Ratio {
    use uom::si::ratio::percent;
    Ratio::new::<percent>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

/// Vehicle speed in km/h, the unit of the `V_out` port.
#[inline]
pub fn to_kmh(v: Velocity) -> f64 {
    use uom::si::velocity::kilometer_per_hour;
    v.get::<kilometer_per_hour>()
}

/// Ratio expressed in percent.
#[inline]
pub fn to_percent(r: Ratio) -> f64 {
    use uom::si::ratio::percent;
    r.get::<percent>()
}

pub mod constants {
    use super::*;

    /// Saturation width of the brake direction law.
    pub const BRAKE_SPEED_WIDTH_RPM: f64 = 0.1;

    #[inline]
    pub fn brake_speed_width() -> AngularVelocity {
        rpm(BRAKE_SPEED_WIDTH_RPM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _t = nm(10.0);
        let _w = rad_s(100.0);
        let _p = w(5_000.0);
        let _f = n(300.0);
        let _v = volt(400.0);
        let _i = amp(12.0);
        let _m = kg(1_200.0);
        let _j = kg_m2(0.02);
        let _r = m(0.3);
        let _dt = s(0.1);
        let _eta = percent(92.0);
        let _x = unitless(0.5);
    }

    #[test]
    fn rpm_is_stored_as_rad_per_second() {
        let width = constants::brake_speed_width();
        let expected = 0.1 * 2.0 * std::f64::consts::PI / 60.0;
        assert!((width.value - expected).abs() < 1e-12);
    }

    #[test]
    fn kmh_conversion() {
        assert!((to_kmh(mps(10.0)) - 36.0).abs() < 1e-9);
    }

    #[test]
    fn percent_is_stored_as_fraction() {
        let eta = percent(92.0);
        assert!((eta.value - 0.92).abs() < 1e-12);
        assert!((to_percent(eta) - 92.0).abs() < 1e-9);
    }
}
