//! Batched grid evaluation.

use std::time::Instant;

use msis_protocol::GridRequest;
use tracing::debug;

use crate::error::ModelError;
use crate::model::AtmosphereModel;
use crate::output::GridOutput;

/// Evaluate a grid with a single model call and reshape the result.
///
/// Empty grids never reach the model.
pub fn evaluate(model: &dyn AtmosphereModel, grid: &GridRequest) -> Result<GridOutput, ModelError> {
    let shape = grid.shape();
    if shape.is_empty() {
        return Ok(GridOutput::empty(shape));
    }

    let rows = grid.flatten();
    let start = Instant::now();
    let flat = model.calculate(&rows, &grid.options)?;

    debug!(
        model = model.name(),
        kind = grid.kind.as_str(),
        points = rows.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Model evaluated"
    );

    GridOutput::from_flat(shape, flat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use msis_protocol::time::parse_date;
    use msis_protocol::{ApIndex, FlatInputRow, ModelOptions, SpaceWeather, NUM_OUTPUTS};
    use ndarray::Array2;

    /// Writes each row's coordinates into the first output columns.
    struct EchoModel {
        calls: AtomicUsize,
    }

    impl AtmosphereModel for EchoModel {
        fn name(&self) -> &str {
            "echo"
        }

        fn calculate(
            &self,
            rows: &[FlatInputRow],
            options: &ModelOptions,
        ) -> Result<Array2<f64>, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut out = Array2::zeros((rows.len(), NUM_OUTPUTS));
            for (i, row) in rows.iter().enumerate() {
                out[[i, 0]] = row.day_of_year;
                out[[i, 1]] = row.longitude;
                out[[i, 2]] = row.latitude;
                out[[i, 3]] = row.altitude;
                out[[i, 4]] = row.f107;
                out[[i, 5]] = options.switches()[0];
            }
            Ok(out)
        }
    }

    /// Returns one row too few.
    struct ShortModel;

    impl AtmosphereModel for ShortModel {
        fn name(&self) -> &str {
            "short"
        }

        fn calculate(
            &self,
            rows: &[FlatInputRow],
            _options: &ModelOptions,
        ) -> Result<Array2<f64>, ModelError> {
            Ok(Array2::zeros((rows.len().saturating_sub(1), NUM_OUTPUTS)))
        }
    }

    fn grid() -> GridRequest {
        let mut switches = [1.0; 25];
        switches[0] = 0.0;
        GridRequest::bulk(
            vec![
                parse_date("2024-02-01T00:00").unwrap(),
                parse_date("2024-02-02T00:00").unwrap(),
            ],
            vec![-90.0, 90.0],
            vec![-30.0, 0.0, 30.0],
            vec![150.0, 300.0],
            vec![
                SpaceWeather::new(100.0, 100.0, ApIndex::Daily(4.0)),
                SpaceWeather::new(200.0, 200.0, ApIndex::Daily(4.0)),
            ],
            ModelOptions::new(switches),
        )
        .unwrap()
    }

    #[test]
    fn test_evaluate_reshapes_onto_axes() {
        let model = EchoModel {
            calls: AtomicUsize::new(0),
        };
        let grid = grid();
        let output = evaluate(&model, &grid).unwrap();
        let nested = output.to_nested();

        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
        for (d, by_lon) in nested.iter().enumerate() {
            for (i, by_lat) in by_lon.iter().enumerate() {
                for (j, by_alt) in by_lat.iter().enumerate() {
                    for (k, values) in by_alt.iter().enumerate() {
                        assert_eq!(values[0], 32.0 + d as f64);
                        assert_eq!(values[1], grid.lons[i]);
                        assert_eq!(values[2], grid.lats[j]);
                        assert_eq!(values[3], grid.alts[k]);
                        assert_eq!(values[4], grid.space_weather[d].f107);
                        assert_eq!(values[5], 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_grid_skips_model() {
        let model = EchoModel {
            calls: AtomicUsize::new(0),
        };
        let mut grid = grid();
        grid.alts.clear();

        let output = evaluate(&model, &grid).unwrap();
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
        assert!(output.shape().is_empty());
    }

    #[test]
    fn test_short_output_is_an_error() {
        let err = evaluate(&ShortModel, &grid()).unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_surface_and_profile_views() {
        let model = EchoModel {
            calls: AtomicUsize::new(0),
        };
        let date = parse_date("2024-02-01T00:00").unwrap();
        let weather = SpaceWeather::new(150.0, 150.0, ApIndex::Daily(4.0));

        let surface_grid = GridRequest::surface(date, 400.0, weather, ModelOptions::default());
        let surface = evaluate(&model, &surface_grid).unwrap().surface(&surface_grid);
        assert_eq!(surface.len(), 2592);
        // longitude-major: the first 36 cells share a longitude
        assert_eq!(surface.longitude[35], -177.5);
        assert_eq!(surface.longitude[36], -172.5);
        assert_eq!(surface.latitude[36], -87.5);
        assert_eq!(surface.species.n2[36], -172.5);
        assert_eq!(surface.species.o2[37], -82.5);

        let profile_grid =
            GridRequest::altitude_profile(date, 10.0, 20.0, weather, ModelOptions::default());
        let profile = evaluate(&model, &profile_grid)
            .unwrap()
            .altitude_profile(&profile_grid);
        assert_eq!(profile.altitude.len(), 181);
        assert_eq!(profile.species.o[180], 1000.0);
        assert_eq!(profile.species.o2[0], 20.0);
    }
}
