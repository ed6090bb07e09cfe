//! Guidance control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;
use util::maths::is_finite_non_negative;

// Internal
use super::{GuidanceError, SteerLaw};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The vehicle configuration used by guidance control.
///
/// Loaded once by the host and then read-only for the lifetime of the controller.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct VehicleConfig {
    pub lookahead: LookaheadParams,

    pub dead_zone: DeadZoneParams,

    pub steer: SteerParams,
}

/// Tuning of the speed adaptive lookahead distance.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LookaheadParams {
    /// Multiplier applied to the speed term of the lookahead.
    pub multiplier: f64,

    /// Lookahead used while holding the line (small cross track error) with auto steer on.
    ///
    /// Units: meters
    pub hold_m: f64,

    /// Factor applied to the hold distance to get the acquire distance, used when far from the
    /// line.
    pub acquire_factor: f64,

    /// The lookahead never drops below this distance.
    ///
    /// Units: meters
    pub min_distance_m: f64,
}

/// Tuning of the heading dead zone.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DeadZoneParams {
    /// Heading error threshold under which steering is suppressed.
    ///
    /// Units: hundredths of a radian
    pub heading: f64,

    /// Number of consecutive ticks the heading error must stay under the threshold before the
    /// dead zone is entered.
    pub delay: u32,
}

/// Steering law selection and its gains.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SteerParams {
    /// The steering law used to compute the steer angle.
    pub law: SteerLaw,

    /// Stanley heading error gain.
    pub stanley_heading_gain: f64,

    /// Stanley cross track error gain.
    pub stanley_distance_gain: f64,

    /// Distance between the front and rear axles, used by pure pursuit.
    ///
    /// Units: meters
    pub wheelbase_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            lookahead: LookaheadParams {
                multiplier: 1.4,
                hold_m: 4.0,
                acquire_factor: 1.5,
                min_distance_m: 2.0,
            },
            dead_zone: DeadZoneParams {
                heading: 10.0,
                delay: 10,
            },
            steer: SteerParams {
                law: SteerLaw::Stanley,
                stanley_heading_gain: 1.0,
                stanley_distance_gain: 0.8,
                wheelbase_m: 3.3,
            },
        }
    }
}

impl VehicleConfig {
    /// Check that every tuning value is usable.
    ///
    /// All distances, gains and factors must be finite and non-negative, the acquire factor must
    /// be at least 1 and the wheelbase must be strictly positive.
    pub fn validate(&self) -> Result<(), GuidanceError> {
        let non_negative = [
            ("lookahead.multiplier", self.lookahead.multiplier),
            ("lookahead.hold_m", self.lookahead.hold_m),
            ("lookahead.acquire_factor", self.lookahead.acquire_factor),
            ("lookahead.min_distance_m", self.lookahead.min_distance_m),
            ("dead_zone.heading", self.dead_zone.heading),
            ("steer.stanley_heading_gain", self.steer.stanley_heading_gain),
            ("steer.stanley_distance_gain", self.steer.stanley_distance_gain),
        ];

        for &(field, value) in non_negative.iter() {
            if !is_finite_non_negative(value) {
                return Err(GuidanceError::InvalidConfig { field, value });
            }
        }

        // Lookahead must not shrink when moving from the hold band to the acquire band
        if self.lookahead.acquire_factor < 1.0 {
            return Err(GuidanceError::InvalidConfig {
                field: "lookahead.acquire_factor",
                value: self.lookahead.acquire_factor,
            });
        }

        if !(self.steer.wheelbase_m.is_finite() && self.steer.wheelbase_m > 0.0) {
            return Err(GuidanceError::InvalidConfig {
                field: "steer.wheelbase_m",
                value: self.steer.wheelbase_m,
            });
        }

        Ok(())
    }
}

impl DeadZoneParams {
    /// The heading threshold.
    ///
    /// Units: radians
    pub fn threshold_rad(&self) -> f64 {
        self.heading * 0.01
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const GUIDANCE_TOML: &str = r#"
[lookahead]
multiplier = 1.2
hold_m = 3.0
acquire_factor = 2.0
min_distance_m = 1.5

[dead_zone]
heading = 5.0
delay = 4

[steer]
law = "PurePursuit"
stanley_heading_gain = 1.0
stanley_distance_gain = 0.8
wheelbase_m = 2.5
"#;

    #[test]
    fn test_load_config() {
        let config: VehicleConfig = util::params::from_str(GUIDANCE_TOML).unwrap();

        assert_eq!(config.lookahead.hold_m, 3.0);
        assert_eq!(config.dead_zone.delay, 4);
        assert_eq!(config.steer.law, SteerLaw::PurePursuit);
        assert!((config.dead_zone.threshold_rad() - 0.05).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(VehicleConfig::default().validate().is_ok());

        let mut config = VehicleConfig::default();
        config.lookahead.min_distance_m = -1.0;
        match config.validate() {
            Err(GuidanceError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "lookahead.min_distance_m")
            }
            other => panic!("Expected invalid config, got {:?}", other),
        }

        let mut config = VehicleConfig::default();
        config.lookahead.acquire_factor = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = VehicleConfig::default();
        config.steer.wheelbase_m = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_acquire_factor() {
        let mut config = VehicleConfig::default();

        config.lookahead.acquire_factor = 1.0;
        assert!(config.validate().is_ok());

        // An acquire distance shorter than the hold distance would shrink the lookahead as the
        // cross track error grows
        config.lookahead.acquire_factor = 0.5;
        match config.validate() {
            Err(GuidanceError::InvalidConfig { field, value }) => {
                assert_eq!(field, "lookahead.acquire_factor");
                assert_eq!(value, 0.5);
            }
            other => panic!("Expected invalid config, got {:?}", other),
        }
    }
}
