use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field {width}x{height} cannot hold a ship {ship_width} cells wide")]
    FieldTooNarrow {
        width: i32,
        height: i32,
        ship_width: i32,
    },
    #[error("spawn density {0} exceeds 1000 per mille")]
    DensityOutOfRange(u32),
    #[error("minimum gap of {min_gap} rows does not fit a field {height} rows tall")]
    GapTooTall { min_gap: i32, height: i32 },
}
