//! Model output columns.

/// Number of values the model returns per grid point.
pub const NUM_OUTPUTS: usize = 11;

/// One output column of the atmosphere model, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Total mass density (kg/m3)
    Mass,
    N2,
    O2,
    O,
    He,
    H,
    Ar,
    N,
    /// Anomalous oxygen
    AnomalousO,
    NO,
    /// Neutral temperature (K)
    Temperature,
}

impl Species {
    /// All columns in the order the model writes them.
    pub const ALL: [Species; NUM_OUTPUTS] = [
        Species::Mass,
        Species::N2,
        Species::O2,
        Species::O,
        Species::He,
        Species::H,
        Species::Ar,
        Species::N,
        Species::AnomalousO,
        Species::NO,
        Species::Temperature,
    ];

    /// Column index in an output row.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Field name used in JSON responses.
    pub fn name(self) -> &'static str {
        match self {
            Species::Mass => "Mass",
            Species::N2 => "N2",
            Species::O2 => "O2",
            Species::O => "O",
            Species::He => "He",
            Species::H => "H",
            Species::Ar => "Ar",
            Species::N => "N",
            Species::AnomalousO => "AnomO",
            Species::NO => "NO",
            Species::Temperature => "Temperature",
        }
    }
}
