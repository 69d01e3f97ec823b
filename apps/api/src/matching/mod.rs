// Match API: TF-IDF ranking of jobs vs a candidate profile and candidates vs a job description.
// Each request is vectorized jointly (reference + collection), scored by cosine similarity,
// and cached by a fingerprint of its payload for the life of the process.

pub mod cache;
pub mod fingerprint;
pub mod handlers;
pub mod models;
pub mod ranking;
pub mod similarity;
pub mod vectorizer;

pub use cache::MatchCache;
pub use vectorizer::{TextVectorizer, TfidfVectorizer};
