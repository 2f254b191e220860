//! NRLMSIS 2.0 native backend.
//!
//! Links against `libmsis2`, a thin `bind(C)` shim over the NRLMSIS 2.0
//! Fortran modules exposing:
//!
//! ```c
//! int msis_init(const char *parmpath, const float switches[25]);
//! int msis_calc(float day, float utsec, float z, float lat, float lon,
//!               float sfluxavg, float sflux, const float ap[7],
//!               float *tn, float dn[10]);
//! ```
//!
//! `msisinit` stores its switches in module-level Fortran state, so every
//! call into the library goes through one mutex guarding a [`SwitchCache`].

use std::ffi::{c_char, c_float, c_int, CString};
use std::path::Path;
use std::sync::Mutex;

use msis_protocol::{FlatInputRow, ModelOptions, NUM_OUTPUTS};
use ndarray::Array2;
use tracing::info;

use crate::error::ModelError;
use crate::model::AtmosphereModel;
use crate::output::widen;
use crate::switches::SwitchCache;

extern "C" {
    fn msis_init(parmpath: *const c_char, switches: *const c_float) -> c_int;

    fn msis_calc(
        day: c_float,
        utsec: c_float,
        z: c_float,
        lat: c_float,
        lon: c_float,
        sfluxavg: c_float,
        sflux: c_float,
        ap: *const c_float,
        tn: *mut c_float,
        dn: *mut c_float,
    ) -> c_int;
}

/// Number of densities written to `dn`.
const NUM_DENSITIES: usize = NUM_OUTPUTS - 1;

/// Process-wide handle to the native model.
pub struct NativeMsis {
    parm_path: CString,
    /// Switches currently loaded into the Fortran module.
    switches: Mutex<SwitchCache>,
}

impl NativeMsis {
    /// Load the model, initialising it once with all switches on.
    ///
    /// `parm_path` is the directory holding `msis20.parm`; the library's
    /// working-directory default is used when it is `None`.
    pub fn new(parm_path: Option<&Path>) -> Result<Self, ModelError> {
        let path = parm_path
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parm_path = CString::new(path)
            .map_err(|_| ModelError::Backend("parameter path contains a NUL byte".to_string()))?;

        let model = Self {
            parm_path,
            switches: Mutex::new(SwitchCache::new()),
        };
        model.lock()?.apply(&ModelOptions::default(), |o| model.init(o))?;

        info!(parm_path = %parm_path_display(&model.parm_path), "NRLMSIS 2.0 initialised");
        Ok(model)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, SwitchCache>, ModelError> {
        self.switches
            .lock()
            .map_err(|_| ModelError::Backend("native model lock poisoned".to_string()))
    }

    /// Load `options` into the library. Callers must hold the lock.
    fn init(&self, options: &ModelOptions) -> Result<(), ModelError> {
        let switches = options.to_f32();
        // SAFETY: both pointers are valid for the duration of the call and
        // the shim copies the switch array before returning.
        let status = unsafe { msis_init(self.parm_path.as_ptr(), switches.as_ptr()) };
        if status != 0 {
            return Err(ModelError::InitFailed(status));
        }
        Ok(())
    }
}

impl AtmosphereModel for NativeMsis {
    fn name(&self) -> &str {
        "nrlmsis-2.0"
    }

    fn calculate(
        &self,
        rows: &[FlatInputRow],
        options: &ModelOptions,
    ) -> Result<Array2<f64>, ModelError> {
        let mut switches = self.lock()?;
        switches.apply(options, |o| self.init(o))?;

        let mut output = Array2::zeros((rows.len(), NUM_OUTPUTS));
        for (i, row) in rows.iter().enumerate() {
            let ap = row.ap.map(|v| v as c_float);
            let mut tn: c_float = 0.0;
            let mut dn = [0.0 as c_float; NUM_DENSITIES];

            // SAFETY: `ap` holds 7 values and `dn` has room for 10, matching
            // the shim's signature; the lock serialises access to the
            // library's global state.
            let status = unsafe {
                msis_calc(
                    row.day_of_year as c_float,
                    row.seconds_of_day as c_float,
                    row.altitude as c_float,
                    row.latitude as c_float,
                    row.longitude as c_float,
                    row.f107a as c_float,
                    row.f107 as c_float,
                    ap.as_ptr(),
                    &mut tn,
                    dn.as_mut_ptr(),
                )
            };
            if status != 0 {
                return Err(ModelError::CalcFailed { row: i, status });
            }

            for (k, &density) in dn.iter().enumerate() {
                output[[i, k]] = widen(density);
            }
            output[[i, NUM_DENSITIES]] = widen(tn);
        }

        Ok(output)
    }
}

fn parm_path_display(path: &CString) -> String {
    let s = path.to_string_lossy();
    if s.is_empty() {
        "<working directory>".to_string()
    } else {
        s.into_owned()
    }
}
