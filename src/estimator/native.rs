//! Binding to the embedded Kalman filter library (`libbeacon`)
//!
//! The library keeps its filter state in C statics, so only one
//! [`NativeEstimator`] may be alive per process. All values cross the
//! boundary as `f32`.

use crate::core::{BearingAngles, Covariance2x2};
use crate::estimator::{
    interface::validate_dt, Estimator, EstimatorError, EstimatorResult, EstimatorState,
};
use std::os::raw::{c_float, c_uchar};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

#[link(name = "beacon")]
extern "C" {
    fn setup(x: c_float, y: c_float);
    fn update_meas_cov(var_x: c_float, var_y: c_float, cov_xy: c_float);
    fn update_state(
        alpha: c_float,
        beta: c_float,
        gamma: c_float,
        delta_t: c_float,
        consider_meas: c_uchar,
    );
    fn get_x() -> c_float;
    fn get_y() -> c_float;
    fn get_var_x() -> c_float;
    fn get_var_y() -> c_float;
    fn get_cov_xy() -> c_float;
    fn set_max_acc(acc: c_float);
    fn set_proc_noise_prop(prop: c_float);
}

static IN_USE: AtomicBool = AtomicBool::new(false);

/// Exclusive handle on the native filter
#[derive(Debug)]
pub struct NativeEstimator {
    initialized: bool,
}

impl NativeEstimator {
    /// Claim the library; fails while another handle is alive
    pub fn acquire() -> EstimatorResult<Self> {
        IN_USE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| EstimatorError::AlreadyInUse)?;
        debug!("acquired native estimator");
        Ok(Self { initialized: false })
    }

    fn read_state() -> EstimatorState {
        // SAFETY: getters only read the library's current estimate
        let (x, y, var_x, var_y, cov_xy) =
            unsafe { (get_x(), get_y(), get_var_x(), get_var_y(), get_cov_xy()) };

        EstimatorState::from((
            f64::from(x),
            f64::from(y),
            f64::from(var_x),
            f64::from(var_y),
            f64::from(cov_xy),
        ))
    }
}

impl Drop for NativeEstimator {
    fn drop(&mut self) {
        IN_USE.store(false, Ordering::Release);
    }
}

impl Estimator for NativeEstimator {
    fn initialize(&mut self, x: f64, y: f64) -> EstimatorResult<()> {
        // SAFETY: exclusive access is guaranteed by the IN_USE flag
        unsafe { setup(x as c_float, y as c_float) };
        self.initialized = true;
        Ok(())
    }

    fn set_measurement_covariance(&mut self, covariance: Covariance2x2) -> EstimatorResult<()> {
        // SAFETY: exclusive access is guaranteed by the IN_USE flag
        unsafe {
            update_meas_cov(
                covariance.var_x as c_float,
                covariance.var_y as c_float,
                covariance.cov_xy as c_float,
            )
        };
        Ok(())
    }

    fn step(
        &mut self,
        angles: &BearingAngles,
        dt: f64,
        use_measurement: bool,
    ) -> EstimatorResult<EstimatorState> {
        if !self.initialized {
            return Err(EstimatorError::NotInitialized);
        }
        let dt = validate_dt(dt)?;

        // SAFETY: the filter was set up and access is exclusive
        unsafe {
            update_state(
                angles.alpha as c_float,
                angles.beta as c_float,
                angles.gamma as c_float,
                dt as c_float,
                c_uchar::from(use_measurement),
            )
        };

        Self::read_state().checked()
    }

    fn set_max_acceleration(&mut self, max_acceleration: f64) -> EstimatorResult<()> {
        // SAFETY: exclusive access is guaranteed by the IN_USE flag
        unsafe { set_max_acc(max_acceleration as c_float) };
        Ok(())
    }

    fn set_process_noise_proportion(&mut self, proportion: f64) -> EstimatorResult<()> {
        // SAFETY: exclusive access is guaranteed by the IN_USE flag
        unsafe { set_proc_noise_prop(proportion as c_float) };
        Ok(())
    }

    fn name(&self) -> &'static str {
        "native"
    }
}
