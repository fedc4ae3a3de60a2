mod translator;

pub use translator::{translate, TranslationRequest};
