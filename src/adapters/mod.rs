//! External integrations
//!
//! Everything that talks to the outside world lives here, behind traits:
//! span sources (remote NER endpoint, span files) and LLM paraphrase
//! clients. The pipeline core never performs I/O itself.

pub mod llm;
pub mod source;
