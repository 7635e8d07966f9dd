pub mod response_synthesizer;

pub use response_synthesizer::ResponseSynthesizer;
