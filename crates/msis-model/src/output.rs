//! Reshaping flat model output back onto the request grid.

use msis_protocol::{
    AltitudeResponse, GridIndex, GridRequest, GridShape, SpeciesSeries, SurfaceResponse,
    NUM_OUTPUTS,
};
use ndarray::{s, Array2, Array5, ArrayView1};

use crate::error::ModelError;

/// Value NRLMSIS writes for quantities it does not compute.
pub const FILL_VALUE: f32 = 9.999e-38;

/// Widen a single-precision model value, mapping the fill value to NaN.
pub fn widen(value: f32) -> f64 {
    if value == FILL_VALUE {
        f64::NAN
    } else {
        f64::from(value)
    }
}

/// Model output on the request's axes: `(dates, lons, lats, alts, 11)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridOutput {
    shape: GridShape,
    values: Array5<f64>,
}

impl GridOutput {
    /// Reshape a flat `(N, 11)` array produced in date → lon → lat → alt order.
    pub fn from_flat(shape: GridShape, flat: Array2<f64>) -> Result<Self, ModelError> {
        let expected = (shape.point_count(), NUM_OUTPUTS);
        if flat.dim() != expected {
            return Err(ModelError::ShapeMismatch {
                expected,
                actual: flat.dim(),
            });
        }

        let flat = if flat.is_standard_layout() {
            flat
        } else {
            flat.as_standard_layout().into_owned()
        };

        let [ndates, nlons, nlats, nalts] = shape.dims();
        let values = flat
            .into_shape((ndates, nlons, nlats, nalts, NUM_OUTPUTS))
            .map_err(|e| ModelError::Backend(format!("reshape failed: {}", e)))?;

        Ok(Self { shape, values })
    }

    /// Output for a grid with no points.
    pub fn empty(shape: GridShape) -> Self {
        let [ndates, nlons, nlats, nalts] = shape.dims();
        Self {
            shape,
            values: Array5::zeros((ndates, nlons, nlats, nalts, NUM_OUTPUTS)),
        }
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// All outputs at one grid point.
    pub fn point(&self, index: GridIndex) -> [f64; NUM_OUTPUTS] {
        let lane = self
            .values
            .slice(s![index.date, index.lon, index.lat, index.alt, ..]);
        to_row(lane)
    }

    /// Nested `[date][lon][lat][alt][column]` lists for the bulk response.
    pub fn to_nested(&self) -> Vec<Vec<Vec<Vec<Vec<f64>>>>> {
        self.values
            .outer_iter()
            .map(|by_lon| {
                by_lon
                    .outer_iter()
                    .map(|by_lat| {
                        by_lat
                            .outer_iter()
                            .map(|by_alt| by_alt.outer_iter().map(|lane| lane.to_vec()).collect())
                            .collect()
                    })
                    .collect()
            })
            .collect()
    }

    /// Surface view `[0, :, :, 0, :]`, flattened longitude-major.
    pub fn surface(&self, grid: &GridRequest) -> SurfaceResponse {
        if self.shape.is_empty() {
            return SurfaceResponse::default();
        }

        let cells = self.shape.nlons * self.shape.nlats;
        let mut response = SurfaceResponse {
            longitude: Vec::with_capacity(cells),
            latitude: Vec::with_capacity(cells),
            species: SpeciesSeries::with_capacity(cells),
        };

        let plane = self.values.slice(s![0, .., .., 0, ..]);
        for (i, &lon) in grid.lons.iter().enumerate() {
            for (j, &lat) in grid.lats.iter().enumerate() {
                response.longitude.push(lon);
                response.latitude.push(lat);
                response.species.push_row(to_row(plane.slice(s![i, j, ..])));
            }
        }

        response
    }

    /// Altitude view `[0, 0, 0, :, :]`.
    pub fn altitude_profile(&self, grid: &GridRequest) -> AltitudeResponse {
        if self.shape.is_empty() {
            return AltitudeResponse::default();
        }

        let profile = self.values.slice(s![0, 0, 0, .., ..]);
        let mut species = SpeciesSeries::with_capacity(self.shape.nalts);
        for lane in profile.outer_iter() {
            species.push_row(to_row(lane));
        }

        AltitudeResponse {
            altitude: grid.alts.clone(),
            species,
        }
    }
}

fn to_row(lane: ArrayView1<'_, f64>) -> [f64; NUM_OUTPUTS] {
    std::array::from_fn(|k| lane[k])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flat output whose cell `(row, k)` holds `row * 100 + k`.
    fn numbered(rows: usize) -> Array2<f64> {
        Array2::from_shape_fn((rows, NUM_OUTPUTS), |(r, k)| (r * 100 + k) as f64)
    }

    #[test]
    fn test_widen_maps_fill_value() {
        assert!(widen(FILL_VALUE).is_nan());
        assert_eq!(widen(1.5), 1.5);
        assert_eq!(widen(0.0), 0.0);
    }

    #[test]
    fn test_reshape_recovers_grid_index() {
        let shape = GridShape::new(2, 3, 4, 5);
        let output = GridOutput::from_flat(shape, numbered(shape.point_count())).unwrap();

        for flat in 0..shape.point_count() {
            let index = shape.grid_index(flat).unwrap();
            let row = output.point(index);
            assert_eq!(row[0], (flat * 100) as f64);
            assert_eq!(row[10], (flat * 100 + 10) as f64);
        }
    }

    #[test]
    fn test_nested_shape() {
        let shape = GridShape::new(2, 1, 3, 2);
        let output = GridOutput::from_flat(shape, numbered(shape.point_count())).unwrap();
        let nested = output.to_nested();

        assert_eq!(nested.len(), 2);
        assert_eq!(nested[0].len(), 1);
        assert_eq!(nested[0][0].len(), 3);
        assert_eq!(nested[0][0][0].len(), 2);
        assert_eq!(nested[0][0][0][0].len(), NUM_OUTPUTS);
        // last cell is flat row 11
        assert_eq!(nested[1][0][2][1][0], 1100.0);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let shape = GridShape::new(1, 2, 2, 2);
        let err = GridOutput::from_flat(shape, numbered(7)).unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch { .. }));

        let err = GridOutput::from_flat(shape, Array2::zeros((8, 10))).unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_non_standard_layout_is_accepted() {
        let shape = GridShape::new(1, 1, 1, 3);
        // Column-major array with the same logical contents
        let fortran = numbered(3)
            .reversed_axes()
            .as_standard_layout()
            .into_owned()
            .reversed_axes();
        assert_eq!(fortran, numbered(3));
        assert!(!fortran.is_standard_layout());

        let output = GridOutput::from_flat(shape, fortran).unwrap();
        assert_eq!(output.point(shape.grid_index(2).unwrap())[1], 201.0);
    }

    #[test]
    fn test_empty_output() {
        let shape = GridShape::new(1, 0, 2, 2);
        let output = GridOutput::empty(shape);
        assert_eq!(output.to_nested(), vec![Vec::<Vec<Vec<Vec<f64>>>>::new()]);
    }
}
