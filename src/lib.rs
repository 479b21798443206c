pub mod analyzers;
pub mod fetch;
pub mod filters;
pub mod insights;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod survey;
