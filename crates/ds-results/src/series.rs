//! Channel extraction from stored time series.

use crate::types::TimeseriesRecord;
use crate::{ResultsError, ResultsResult};
use std::fmt;
use std::str::FromStr;

/// A scalar trace that can be pulled out of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    MotorSpeed,
    MotorTorqueCmd,
    MotorTorque,
    MotorMechPower,
    MotorLoss,
    MotorElecPower,
    MotorCurrent,
    VehicleSpeed,
    VehicleSpeedKmh,
    AxleSpeed,
    AxleTorque,
    BrakeForce,
    Acceleration,
}

impl Channel {
    pub const ALL: [Channel; 13] = [
        Channel::MotorSpeed,
        Channel::MotorTorqueCmd,
        Channel::MotorTorque,
        Channel::MotorMechPower,
        Channel::MotorLoss,
        Channel::MotorElecPower,
        Channel::MotorCurrent,
        Channel::VehicleSpeed,
        Channel::VehicleSpeedKmh,
        Channel::AxleSpeed,
        Channel::AxleTorque,
        Channel::BrakeForce,
        Channel::Acceleration,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Channel::MotorSpeed => "motor.speed_rad_s",
            Channel::MotorTorqueCmd => "motor.torque_cmd_nm",
            Channel::MotorTorque => "motor.torque_nm",
            Channel::MotorMechPower => "motor.mech_power_w",
            Channel::MotorLoss => "motor.loss_w",
            Channel::MotorElecPower => "motor.elec_power_w",
            Channel::MotorCurrent => "motor.current_a",
            Channel::VehicleSpeed => "vehicle.v_mps",
            Channel::VehicleSpeedKmh => "vehicle.v_kmh",
            Channel::AxleSpeed => "vehicle.axle_spd_rad_s",
            Channel::AxleTorque => "vehicle.axle_trq_nm",
            Channel::BrakeForce => "vehicle.f_brake_n",
            Channel::Acceleration => "vehicle.accel_mps2",
        }
    }

    /// Value of this channel in one record, if the record carries it.
    pub fn sample(self, record: &TimeseriesRecord) -> Option<f64> {
        match self {
            Channel::MotorSpeed => record.motor.as_ref().map(|m| m.speed_rad_s),
            Channel::MotorTorqueCmd => record.motor.as_ref().map(|m| m.torque_cmd_nm),
            Channel::MotorTorque => record.motor.as_ref().map(|m| m.torque_nm),
            Channel::MotorMechPower => record.motor.as_ref().map(|m| m.mech_power_w),
            Channel::MotorLoss => record.motor.as_ref().map(|m| m.loss_w),
            Channel::MotorElecPower => record.motor.as_ref().map(|m| m.elec_power_w),
            Channel::MotorCurrent => record.motor.as_ref().map(|m| m.current_a),
            Channel::VehicleSpeed => record.vehicle.as_ref().map(|v| v.v_mps),
            Channel::VehicleSpeedKmh => record.vehicle.as_ref().map(|v| v.v_kmh),
            Channel::AxleSpeed => record.vehicle.as_ref().map(|v| v.axle_spd_rad_s),
            Channel::AxleTorque => record.vehicle.as_ref().map(|v| v.axle_trq_nm),
            Channel::BrakeForce => record.vehicle.as_ref().map(|v| v.f_brake_n),
            Channel::Acceleration => record.vehicle.as_ref().map(|v| v.accel_mps2),
        }
    }

    /// Channels present in the first record.
    pub fn available(records: &[TimeseriesRecord]) -> Vec<Channel> {
        match records.first() {
            Some(first) => Channel::ALL
                .into_iter()
                .filter(|c| c.sample(first).is_some())
                .collect(),
            None => Vec::new(),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = ResultsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ResultsError::UnknownChannel(s.to_string()))
    }
}

/// `(time_s, value)` pairs for one channel. Records lacking it are skipped.
pub fn extract_series(records: &[TimeseriesRecord], channel: Channel) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter_map(|r| channel.sample(r).map(|v| (r.time_s, v)))
        .collect()
}

/// Same as [`extract_series`], addressed by channel name.
pub fn extract_named(records: &[TimeseriesRecord], name: &str) -> ResultsResult<Vec<(f64, f64)>> {
    let channel: Channel = name.parse()?;
    Ok(extract_series(records, channel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VehicleSnapshot;

    fn vehicle_record(t: f64, v: f64) -> TimeseriesRecord {
        TimeseriesRecord {
            time_s: t,
            motor: None,
            vehicle: Some(VehicleSnapshot {
                v_mps: v,
                v_kmh: v * 3.6,
                axle_spd_rad_s: v / 0.3,
                axle_trq_nm: 0.0,
                f_brake_n: 0.0,
                accel_mps2: 0.0,
            }),
        }
    }

    #[test]
    fn names_round_trip() {
        for c in Channel::ALL {
            assert_eq!(c.name().parse::<Channel>().unwrap(), c);
        }
        assert!("motor.rpm".parse::<Channel>().is_err());
    }

    #[test]
    fn extracts_present_channel() {
        let records = vec![vehicle_record(0.0, 1.0), vehicle_record(0.1, 2.0)];
        let series = extract_series(&records, Channel::VehicleSpeedKmh);
        assert_eq!(series.len(), 2);
        assert!((series[1].1 - 7.2).abs() < 1e-12);
        assert!(extract_series(&records, Channel::MotorTorque).is_empty());
    }

    #[test]
    fn available_lists_vehicle_channels_only() {
        let records = vec![vehicle_record(0.0, 1.0)];
        let channels = Channel::available(&records);
        assert_eq!(channels.len(), 6);
        assert!(channels.iter().all(|c| c.name().starts_with("vehicle.")));
    }
}
