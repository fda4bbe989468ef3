pub mod answer;
pub mod clear;
pub mod common;
pub mod goto;
pub mod start;
pub mod status;
pub mod submit;
pub mod take;
