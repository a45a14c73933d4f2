//! Citation placeholder pipeline: extraction, per-topic source discovery,
//! and integration of resolved references into the final case study.

pub mod integrator;
pub mod resolver;
