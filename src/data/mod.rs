pub mod preprocessing;
pub mod region;

pub use preprocessing::{encode_features, feature_table, DateRange, FeatureRow, FEATURE_COUNT};
pub use region::Region;
