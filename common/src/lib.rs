//! Types and helpers shared by the W-2 extractor server and its tests.
//!
//! Nothing in here touches the network, the filesystem or the web framework:
//! the prompt sent to the model, the parser that turns the model's reply into
//! fields, and the JSON payloads exchanged over HTTP.

pub mod model;
pub mod parser;
pub mod prompt;
pub mod requests;
pub mod responses;

pub use model::extraction::ExtractedFields;
pub use parser::{parse_response, strip_code_fence, ParseFailure};
pub use prompt::w2_prompt;
