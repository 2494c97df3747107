//! Motif discovery in RNA chemical-probing (fSHAPE/SHAPE) reactivity
//! profiles.
//!
//! The crate has three layers:
//!
//! - **Similarity engine**: z-normalized Euclidean distance profiles
//!   ([`algorithms::mass`]) over sliding windows, with an FFT-accelerated
//!   dot product for long series and a pluggable
//!   [`core::distance_metric::DistanceMetric`].
//! - **Consensus search**: the cross-series seed-motif search
//!   ([`algorithms::ostinato`]) minimizing the radius over all series.
//! - **Pipelines**: end-to-end runs behind the `find-conserved-motifs`,
//!   `find-query`, and `silence` binaries ([`pipeline`]), with CSV/text
//!   exports and SVG figures.
//!
//! Missing reactivity values (NaN) are first-class throughout: windows
//! spanning them never become seeds, matches, or exported rows.

pub mod algorithms;
pub mod core;
pub mod error;
pub mod io;
pub mod metrics;
pub mod pipeline;
pub mod render;

pub use crate::algorithms::mass::{distance_profile, window_distance};
pub use crate::algorithms::motifs::{discover_motifs, Motif, MotifConfig};
pub use crate::algorithms::ostinato::{align_to_seed, find_consensus, ConsensusSeed};
pub use crate::core::series::{Nucleotide, Series};
pub use crate::error::{Error, Result};
pub use crate::metrics::absolute::AbsoluteEuclidean;
pub use crate::metrics::euclidean::ZNormalizedEuclidean;
