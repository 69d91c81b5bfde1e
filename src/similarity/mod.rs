// Text similarity — preprocessing, word-frequency vectors, and cosine scoring.
//
// Everything in here is pure and synchronous. The web layer and the CLI both
// call into `SimilarityScorer` (or the `compute_similarity` shortcut) and never
// touch the tokenizer directly.

pub mod format;
pub mod frequency;
pub mod preprocess;
pub mod scorer;

pub use format::format_score;
pub use frequency::FrequencyVector;
pub use preprocess::{preprocess_text, tokenize};
pub use scorer::{compute_similarity, EmptyPolicy, SimilarityError, SimilarityScorer, TimedScore};
