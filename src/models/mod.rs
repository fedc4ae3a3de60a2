mod api_docs;
mod tools;

pub use api_docs::*;
pub use tools::*;
