mod retrieval_result;
mod synthesis;

pub use retrieval_result::{RetrievalOutcome, RetrievalResult};
pub use synthesis::{SynthesisRequest, SynthesisResponse};
