// Result sinks — where the timed variant reports elapsed time and score.
//
// The ResultSink trait is the only thing the web layer knows about. GcsSink
// uploads to Cloud Storage; NoopSink is the default when no bucket is set;
// MemorySink keeps everything in-process for tests.

pub mod gcs;
pub mod memory;
pub mod traits;

pub use gcs::GcsSink;
pub use memory::MemorySink;
pub use traits::{report_timed_score, NoopSink, ResultSink};
