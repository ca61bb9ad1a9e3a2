pub mod isomorphism;
pub mod same_language;
