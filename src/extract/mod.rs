pub mod planner;

pub use planner::{plan_extraction, UNTITLED};
