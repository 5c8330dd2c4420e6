pub mod company;
pub(crate) mod domain;
pub mod patterns;
pub mod profile;
pub mod scoring;
pub mod table;
