//! The pipeline testers.
//!
//! Every tester has the uniform signature
//! `fn(ctx, node, queue, task) -> Result<(), DecompError>` and is
//! selected by the driver's ordered dispatch. A tester may mutate its
//! node, attach children, re-enqueue tasks and record irregularity.

pub mod graphic;
pub mod nested;
pub mod one_sum;
pub mod r10;
pub mod series_parallel;
pub mod three_sep;
