pub mod distance_metric;
pub mod profile;
pub mod series;
