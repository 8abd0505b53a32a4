pub mod export;
pub mod formatter;

pub use export::write_table;
pub use formatter::{format_predictions, ChartPoint, PredictionOutput, PredictionRow, TableRow};
