//! Grid construction and flattening.
//!
//! Every endpoint reduces to a [`GridRequest`]: a Cartesian product of dates,
//! longitudes, latitudes and altitudes plus the space-weather indices that
//! belong to each date. The bulk endpoint sweeps all four axes; the surface and
//! altitude-profile endpoints fix some of them.
//!
//! Flattening walks the axes in nested order date → lon → lat → alt. The same
//! order is used by [`GridShape`] to map flat indices back to grid indices, so
//! the model's flat output can be reshaped without further bookkeeping.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{MsisError, MsisResult};
use crate::options::ModelOptions;
use crate::time::{day_of_year, seconds_of_day};

/// Half-width of a surface tile in degrees.
pub const SURFACE_TILE_HALF_WIDTH: f64 = 2.5;

/// Surface tile size in degrees.
pub const SURFACE_RESOLUTION: i32 = 5;

/// First altitude (km) of the altitude profile.
pub const PROFILE_START_KM: i32 = 100;

/// Last altitude (km) of the altitude profile, inclusive.
pub const PROFILE_END_KM: i32 = 1000;

/// Altitude profile step (km).
pub const PROFILE_STEP_KM: i32 = 5;

/// Geomagnetic activity for one date.
///
/// Either the daily Ap value or the full seven-value ap history used in
/// storm-time mode: daily Ap, 3-hour ap for the current time and 3, 6 and 9
/// hours before, then the 12-33 and 36-57 hour averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApIndex {
    Daily(f64),
    History([f64; 7]),
}

impl ApIndex {
    /// The seven-slot array the model expects. A daily value fills every slot.
    pub fn to_array(&self) -> [f64; 7] {
        match *self {
            ApIndex::Daily(ap) => [ap; 7],
            ApIndex::History(history) => history,
        }
    }
}

/// Solar and geomagnetic drivers for one date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceWeather {
    /// Daily F10.7 for the previous day.
    pub f107: f64,
    /// 81-day average F10.7 centred on the day.
    pub f107a: f64,
    pub ap: ApIndex,
}

impl SpaceWeather {
    pub fn new(f107: f64, f107a: f64, ap: ApIndex) -> Self {
        Self { f107, f107a, ap }
    }
}

/// One model input: a single grid point with its space weather.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatInputRow {
    pub day_of_year: f64,
    pub seconds_of_day: f64,
    /// Altitude in km.
    pub altitude: f64,
    /// Geodetic latitude in degrees.
    pub latitude: f64,
    /// Geodetic longitude in degrees.
    pub longitude: f64,
    pub f107: f64,
    pub f107a: f64,
    pub ap: [f64; 7],
}

/// Position of a grid point along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridIndex {
    pub date: usize,
    pub lon: usize,
    pub lat: usize,
    pub alt: usize,
}

/// Axis lengths of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub ndates: usize,
    pub nlons: usize,
    pub nlats: usize,
    pub nalts: usize,
}

impl GridShape {
    pub fn new(ndates: usize, nlons: usize, nlats: usize, nalts: usize) -> Self {
        Self {
            ndates,
            nlons,
            nlats,
            nalts,
        }
    }

    /// Total number of grid points (saturating, so oversize requests can't wrap).
    pub fn point_count(&self) -> usize {
        self.ndates
            .saturating_mul(self.nlons)
            .saturating_mul(self.nlats)
            .saturating_mul(self.nalts)
    }

    /// Axis lengths as `[dates, lons, lats, alts]`.
    pub fn dims(&self) -> [usize; 4] {
        [self.ndates, self.nlons, self.nlats, self.nalts]
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }

    /// Flat row index of a grid point.
    pub fn flat_index(&self, index: GridIndex) -> usize {
        ((index.date * self.nlons + index.lon) * self.nlats + index.lat) * self.nalts + index.alt
    }

    /// Grid point of a flat row index, or `None` past the last point.
    pub fn grid_index(&self, flat: usize) -> Option<GridIndex> {
        if flat >= self.point_count() {
            return None;
        }
        let alt = flat % self.nalts;
        let rest = flat / self.nalts;
        let lat = rest % self.nlats;
        let rest = rest / self.nlats;
        let lon = rest % self.nlons;
        let date = rest / self.nlons;
        Some(GridIndex {
            date,
            lon,
            lat,
            alt,
        })
    }
}

/// Which axes of the grid a request sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKind {
    /// Every axis supplied by the caller.
    Bulk,
    /// One date and altitude over the fixed 5° lon/lat tiles.
    Surface,
    /// One date and location over the fixed altitude profile.
    AltitudeProfile,
}

impl GridKind {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            GridKind::Bulk => "bulk",
            GridKind::Surface => "surface",
            GridKind::AltitudeProfile => "altitude",
        }
    }
}

/// A fully validated grid ready to be flattened and handed to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRequest {
    pub kind: GridKind,
    pub dates: Vec<NaiveDateTime>,
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
    pub alts: Vec<f64>,
    /// Space weather aligned with `dates`.
    pub space_weather: Vec<SpaceWeather>,
    pub options: ModelOptions,
}

impl GridRequest {
    /// Grid with every axis supplied by the caller.
    pub fn bulk(
        dates: Vec<NaiveDateTime>,
        lons: Vec<f64>,
        lats: Vec<f64>,
        alts: Vec<f64>,
        space_weather: Vec<SpaceWeather>,
        options: ModelOptions,
    ) -> MsisResult<Self> {
        if space_weather.len() != dates.len() {
            return Err(MsisError::LengthMismatch);
        }

        Ok(Self {
            kind: GridKind::Bulk,
            dates,
            lons,
            lats,
            alts,
            space_weather,
            options,
        })
    }

    /// Global 5° x 5° grid of tile centres at a single altitude.
    pub fn surface(
        date: NaiveDateTime,
        altitude: f64,
        space_weather: SpaceWeather,
        options: ModelOptions,
    ) -> Self {
        Self {
            kind: GridKind::Surface,
            dates: vec![date],
            lons: surface_longitudes(),
            lats: surface_latitudes(),
            alts: vec![altitude],
            space_weather: vec![space_weather],
            options,
        }
    }

    /// Altitude profile from 100 to 1000 km above a single location.
    pub fn altitude_profile(
        date: NaiveDateTime,
        longitude: f64,
        latitude: f64,
        space_weather: SpaceWeather,
        options: ModelOptions,
    ) -> Self {
        Self {
            kind: GridKind::AltitudeProfile,
            dates: vec![date],
            lons: vec![longitude],
            lats: vec![latitude],
            alts: profile_altitudes(),
            space_weather: vec![space_weather],
            options,
        }
    }

    pub fn shape(&self) -> GridShape {
        GridShape::new(
            self.dates.len(),
            self.lons.len(),
            self.lats.len(),
            self.alts.len(),
        )
    }

    pub fn point_count(&self) -> usize {
        self.shape().point_count()
    }

    /// Iterate model inputs in date → lon → lat → alt order.
    pub fn rows(&self) -> impl Iterator<Item = FlatInputRow> + '_ {
        self.dates
            .iter()
            .zip(&self.space_weather)
            .flat_map(move |(date, weather)| {
                let day = day_of_year(date);
                let seconds = seconds_of_day(date);
                let ap = weather.ap.to_array();
                self.lons.iter().flat_map(move |&longitude| {
                    self.lats.iter().flat_map(move |&latitude| {
                        self.alts.iter().map(move |&altitude| FlatInputRow {
                            day_of_year: day,
                            seconds_of_day: seconds,
                            altitude,
                            latitude,
                            longitude,
                            f107: weather.f107,
                            f107a: weather.f107a,
                            ap,
                        })
                    })
                })
            })
    }

    /// Collect all model inputs.
    pub fn flatten(&self) -> Vec<FlatInputRow> {
        let mut rows = Vec::with_capacity(self.point_count());
        rows.extend(self.rows());
        rows
    }

    /// Storm-time ap mode is on but some date only has a daily Ap, which is
    /// broadcast across the whole history.
    pub fn broadcasts_daily_ap_in_storm_mode(&self) -> bool {
        self.options.storm_time_ap()
            && self
                .space_weather
                .iter()
                .any(|w| matches!(w.ap, ApIndex::Daily(_)))
    }
}

/// Latitudes of the surface tile centres, -87.5 to 87.5.
pub fn surface_latitudes() -> Vec<f64> {
    (-90..90)
        .step_by(SURFACE_RESOLUTION as usize)
        .map(|x| x as f64 + SURFACE_TILE_HALF_WIDTH)
        .collect()
}

/// Longitudes of the surface tile centres, -177.5 to 177.5.
pub fn surface_longitudes() -> Vec<f64> {
    (-180..180)
        .step_by(SURFACE_RESOLUTION as usize)
        .map(|x| x as f64 + SURFACE_TILE_HALF_WIDTH)
        .collect()
}

/// Altitudes of the altitude profile, 100 to 1000 km inclusive.
pub fn profile_altitudes() -> Vec<f64> {
    (PROFILE_START_KM..=PROFILE_END_KM)
        .step_by(PROFILE_STEP_KM as usize)
        .map(f64::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_date;

    fn weather(f107: f64) -> SpaceWeather {
        SpaceWeather::new(f107, f107 + 1.0, ApIndex::Daily(f107 / 10.0))
    }

    fn sample_grid() -> GridRequest {
        GridRequest::bulk(
            vec![
                parse_date("2024-01-01T00:00").unwrap(),
                parse_date("2024-01-02T06:00").unwrap(),
            ],
            vec![-10.0, 0.0, 10.0],
            vec![20.0, 30.0],
            vec![100.0, 200.0, 300.0, 400.0],
            vec![weather(100.0), weather(200.0)],
            ModelOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_surface_grid_has_2592_cells() {
        let date = parse_date("2024-01-01T00:00").unwrap();
        let grid = GridRequest::surface(date, 400.0, weather(150.0), ModelOptions::default());

        assert_eq!(grid.lats.len(), 36);
        assert_eq!(grid.lons.len(), 72);
        assert_eq!(grid.point_count(), 2592);
        assert_eq!(grid.lats[0], -87.5);
        assert_eq!(grid.lats[35], 87.5);
        assert_eq!(grid.lons[0], -177.5);
        assert_eq!(grid.lons[71], 177.5);
    }

    #[test]
    fn test_altitude_profile_has_181_samples() {
        let date = parse_date("2024-01-01T00:00").unwrap();
        let grid =
            GridRequest::altitude_profile(date, -105.0, 40.0, weather(150.0), ModelOptions::default());

        assert_eq!(grid.point_count(), 181);
        assert_eq!(grid.alts[0], 100.0);
        assert_eq!(grid.alts[180], 1000.0);
        assert_eq!(grid.lons, vec![-105.0]);
        assert_eq!(grid.lats, vec![40.0]);
    }

    #[test]
    fn test_bulk_rejects_misaligned_weather() {
        let result = GridRequest::bulk(
            vec![
                parse_date("2024-01-01T00:00").unwrap(),
                parse_date("2024-01-02T00:00").unwrap(),
            ],
            vec![0.0],
            vec![0.0],
            vec![100.0],
            vec![weather(100.0)],
            ModelOptions::default(),
        );
        assert_eq!(result.unwrap_err(), MsisError::LengthMismatch);
    }

    #[test]
    fn test_point_count() {
        let date = parse_date("2024-01-01T00:00").unwrap();
        let grid = GridRequest::bulk(
            vec![date; 3],
            vec![0.0; 10],
            vec![0.0; 10],
            vec![100.0; 34],
            vec![weather(100.0); 3],
            ModelOptions::default(),
        )
        .unwrap();

        assert_eq!(grid.point_count(), 10200);
        assert_eq!(grid.shape().dims(), [3, 10, 10, 34]);
    }

    #[test]
    fn test_flatten_order_is_date_lon_lat_alt() {
        let grid = sample_grid();
        let rows = grid.flatten();
        let shape = grid.shape();

        assert_eq!(rows.len(), 2 * 3 * 2 * 4);

        // Altitude varies fastest, dates slowest
        assert_eq!(rows[0].altitude, 100.0);
        assert_eq!(rows[1].altitude, 200.0);
        assert_eq!(rows[4].latitude, 30.0);
        assert_eq!(rows[8].longitude, 0.0);
        assert_eq!(rows[24].day_of_year, 2.0);
        assert_eq!(rows[24].seconds_of_day, 6.0 * 3600.0);

        for (flat, row) in rows.iter().enumerate() {
            let index = shape.grid_index(flat).unwrap();
            assert_eq!(row.longitude, grid.lons[index.lon]);
            assert_eq!(row.latitude, grid.lats[index.lat]);
            assert_eq!(row.altitude, grid.alts[index.alt]);
            assert_eq!(row.f107, grid.space_weather[index.date].f107);
            assert_eq!(shape.flat_index(index), flat);
        }
    }

    #[test]
    fn test_grid_index_out_of_range() {
        let shape = GridShape::new(1, 2, 2, 2);
        assert_eq!(shape.grid_index(8), None);
        assert!(shape.grid_index(7).is_some());

        // An empty axis has no points, and no division by zero
        assert_eq!(GridShape::new(1, 0, 2, 2).grid_index(0), None);
        assert_eq!(GridShape::new(1, 2, 2, 0).grid_index(0), None);
    }

    #[test]
    fn test_storm_mode_with_daily_ap() {
        let date = parse_date("2024-03-20T12:00").unwrap();
        let mut switches = [1.0; 25];
        switches[8] = -1.0;
        let storm = ModelOptions::new(switches);

        let daily = SpaceWeather::new(150.0, 150.0, ApIndex::Daily(4.0));
        let grid = GridRequest::altitude_profile(date, 0.0, 0.0, daily, storm);
        assert!(grid.broadcasts_daily_ap_in_storm_mode());

        let history = SpaceWeather::new(150.0, 150.0, ApIndex::History([4.0; 7]));
        let grid = GridRequest::altitude_profile(date, 0.0, 0.0, history, storm);
        assert!(!grid.broadcasts_daily_ap_in_storm_mode());

        let grid = GridRequest::altitude_profile(date, 0.0, 0.0, daily, ModelOptions::default());
        assert!(!grid.broadcasts_daily_ap_in_storm_mode());
    }

    #[test]
    fn test_rows_carry_date_weather() {
        let grid = sample_grid();
        let rows = grid.flatten();

        assert!(rows[..24].iter().all(|r| r.f107 == 100.0 && r.f107a == 101.0));
        assert!(rows[24..].iter().all(|r| r.f107 == 200.0 && r.ap == [20.0; 7]));
    }

    #[test]
    fn test_ap_history_passes_through() {
        let history = [4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let ap = ApIndex::History(history);
        assert_eq!(ap.to_array(), history);
        assert_eq!(ApIndex::Daily(3.0).to_array(), [3.0; 7]);
    }

    #[test]
    fn test_ap_index_deserializes_scalar_or_history() {
        let daily: ApIndex = serde_json::from_str("12.5").unwrap();
        assert_eq!(daily, ApIndex::Daily(12.5));

        let history: ApIndex = serde_json::from_str("[1,2,3,4,5,6,7]").unwrap();
        assert_eq!(history, ApIndex::History([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]));

        assert!(serde_json::from_str::<ApIndex>("[1,2,3]").is_err());
    }

    #[test]
    fn test_empty_axis_gives_empty_grid() {
        let grid = GridRequest::bulk(
            vec![parse_date("2024-01-01T00:00").unwrap()],
            vec![],
            vec![0.0],
            vec![100.0],
            vec![weather(100.0)],
            ModelOptions::default(),
        )
        .unwrap();

        assert!(grid.shape().is_empty());
        assert!(grid.flatten().is_empty());
    }
}
