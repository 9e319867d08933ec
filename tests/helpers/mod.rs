pub mod analysis_helpers;
pub mod diagnostic_helpers;
pub mod source_fixtures;
