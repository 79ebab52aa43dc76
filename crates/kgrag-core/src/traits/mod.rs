mod embedding;
mod synthesis;

pub use embedding::IEmbeddingProvider;
pub use synthesis::ISynthesisProvider;
