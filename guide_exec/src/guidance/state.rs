//! Guidance control state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};

// Internal
use super::{
    lookahead_m, DeadZone, GuidanceError, GuidanceSample, LineErrors, VehicleConfig,
    ON_LINE_XTE_M,
};
use crate::loc::PositionSample;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The guidance controller.
///
/// Holds the vehicle configuration, whether guidance is engaged and the dead zone state. The host
/// calls [`GuidanceCtrl::calculate_guidance`] once per position fix.
#[derive(Debug, Clone)]
pub struct GuidanceCtrl {
    config: VehicleConfig,

    /// True while guidance is engaged
    active: bool,

    dead_zone: DeadZone,

    /// Most recent output, `None` until the first tick after a start
    last_sample: Option<GuidanceSample>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl GuidanceCtrl {
    /// Create a new, inactive, controller from a configuration.
    pub fn new(config: VehicleConfig) -> Result<Self, GuidanceError> {
        config.validate()?;

        Ok(Self {
            config,
            active: false,
            dead_zone: DeadZone::new(),
            last_sample: None,
        })
    }

    /// Initialise the controller.
    ///
    /// Expected init data is a path to the parameter file, relative to the params directory of the
    /// software root.
    pub fn init(params_path: &str) -> Result<Self, GuidanceError> {
        // Load the parameters
        let config: VehicleConfig = match util::params::load(params_path) {
            Ok(p) => p,
            Err(e) => return Err(GuidanceError::ParamLoadError(e)),
        };

        Self::new(config)
    }

    /// Engage guidance, the dead zone is reset.
    pub fn start(&mut self) {
        debug!("Guidance started using {:?}", self.config.steer.law);

        self.dead_zone.reset();
        self.last_sample = None;
        self.active = true;
    }

    /// Disengage guidance.
    pub fn stop(&mut self) {
        if self.active {
            debug!("Guidance stopped");
        }

        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    pub fn dead_zone(&self) -> &DeadZone {
        &self.dead_zone
    }

    /// The output of the most recent tick.
    pub fn last_sample(&self) -> Option<GuidanceSample> {
        self.last_sample
    }

    /// Run one guidance tick.
    ///
    /// Returns `None` while guidance is not active, otherwise the new guidance sample which is also
    /// kept as the last sample.
    pub fn calculate_guidance(
        &mut self,
        position: &PositionSample,
        errors: &LineErrors,
    ) -> Option<GuidanceSample> {
        if !self.active {
            return None;
        }

        let lookahead_m = lookahead_m(
            position.speed_kmh,
            errors.xte_m,
            true,
            &self.config.lookahead,
        );

        let steer_rad = if self
            .dead_zone
            .update(errors.head_err_rad, &self.config.dead_zone)
        {
            0.0
        } else {
            self.config.steer.law.steer_rad(
                &self.config.steer,
                errors.xte_m,
                errors.head_err_rad,
                position.speed_ms(),
                &errors.goal_point_m,
            )
        };

        let sample = GuidanceSample {
            xte_m: errors.xte_m,
            lookahead_m,
            steer_rad,
            is_on_line: errors.xte_m.abs() < ON_LINE_XTE_M,
        };

        trace!(
            "Guidance: xte {:.3} m, lookahead {:.2} m, steer {:.4} rad, dead zone {}",
            sample.xte_m,
            sample.lookahead_m,
            sample.steer_rad,
            self.dead_zone.in_dead_zone()
        );

        self.last_sample = Some(sample);

        Some(sample)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::guidance::{stanley_steer_rad, SteerLaw};
    use approx::assert_relative_eq;
    use nalgebra::Vector2;

    fn config(law: SteerLaw, delay: u32) -> VehicleConfig {
        let mut c = VehicleConfig::default();
        c.steer.law = law;
        c.dead_zone.delay = delay;
        c
    }

    fn pos(speed_kmh: f64) -> PositionSample {
        PositionSample::new(0.0, 0.0, 0.0, speed_kmh)
    }

    #[test]
    fn test_inactive_emits_nothing() {
        let mut ctrl = GuidanceCtrl::new(VehicleConfig::default()).unwrap();
        let errors = LineErrors::new(0.5, 0.2, Vector2::new(5.0, 0.0));

        assert!(!ctrl.is_active());
        assert_eq!(ctrl.calculate_guidance(&pos(10.0), &errors), None);
        assert_eq!(ctrl.last_sample(), None);

        ctrl.start();
        assert!(ctrl.calculate_guidance(&pos(10.0), &errors).is_some());

        ctrl.stop();
        assert_eq!(ctrl.calculate_guidance(&pos(10.0), &errors), None);
        // The last sample is kept after a stop
        assert!(ctrl.last_sample().is_some());
    }

    #[test]
    fn test_stanley_tick() {
        let mut ctrl = GuidanceCtrl::new(config(SteerLaw::Stanley, 10)).unwrap();
        ctrl.start();

        let errors = LineErrors::new(0.05, 0.3, Vector2::new(5.0, 0.0));
        let sample = ctrl.calculate_guidance(&pos(12.0), &errors).unwrap();

        assert_relative_eq!(
            sample.steer_rad,
            stanley_steer_rad(&ctrl.config().steer, 0.05, 0.3, pos(12.0).speed_ms())
        );
        assert_relative_eq!(
            sample.lookahead_m,
            lookahead_m(12.0, 0.05, true, &ctrl.config().lookahead)
        );
        assert!(sample.is_on_line);
        assert_eq!(ctrl.last_sample(), Some(sample));

        let off_line = LineErrors::new(-0.1, 0.3, Vector2::new(5.0, 0.0));
        assert!(!ctrl.calculate_guidance(&pos(12.0), &off_line).unwrap().is_on_line);
    }

    #[test]
    fn test_dead_zone_suppresses_steering() {
        let mut ctrl = GuidanceCtrl::new(config(SteerLaw::Stanley, 2)).unwrap();
        ctrl.start();

        let small = LineErrors::new(0.3, 0.01, Vector2::new(5.0, 0.0));

        let first = ctrl.calculate_guidance(&pos(8.0), &small).unwrap();
        assert!(first.steer_rad != 0.0);

        let second = ctrl.calculate_guidance(&pos(8.0), &small).unwrap();
        assert_eq!(second.steer_rad, 0.0);
        assert!(ctrl.dead_zone().in_dead_zone());

        // A large heading error steers again immediately
        let large = LineErrors::new(0.3, 0.5, Vector2::new(5.0, 0.0));
        let third = ctrl.calculate_guidance(&pos(8.0), &large).unwrap();
        assert!(third.steer_rad != 0.0);
        assert_eq!(ctrl.dead_zone().counter(), 0);
    }

    #[test]
    fn test_restart_resets_dead_zone() {
        let mut ctrl = GuidanceCtrl::new(config(SteerLaw::Stanley, 1)).unwrap();
        ctrl.start();

        let small = LineErrors::new(0.0, 0.01, Vector2::new(5.0, 0.0));
        ctrl.calculate_guidance(&pos(8.0), &small);
        assert!(ctrl.dead_zone().in_dead_zone());

        ctrl.stop();
        ctrl.start();
        assert!(!ctrl.dead_zone().in_dead_zone());
        assert_eq!(ctrl.dead_zone().counter(), 0);
        assert_eq!(ctrl.last_sample(), None);
    }

    #[test]
    fn test_pure_pursuit_tick() {
        let mut ctrl = GuidanceCtrl::new(config(SteerLaw::PurePursuit, 10)).unwrap();
        ctrl.start();

        let errors = LineErrors::new(1.0, 0.4, Vector2::new(6.0, 2.0));
        let sample = ctrl.calculate_guidance(&pos(10.0), &errors).unwrap();
        assert!(sample.steer_rad > 0.0);

        let at_goal = LineErrors::new(1.0, 0.4, Vector2::new(0.01, 0.0));
        assert_eq!(
            ctrl.calculate_guidance(&pos(10.0), &at_goal)
                .unwrap()
                .steer_rad,
            0.0
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut c = VehicleConfig::default();
        c.lookahead.hold_m = f64::INFINITY;

        assert!(matches!(
            GuidanceCtrl::new(c),
            Err(GuidanceError::InvalidConfig { .. })
        ));
    }
}
