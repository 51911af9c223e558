//! fivewh: explain any topic through the 5W1H framework (What, Why, Who,
//! Where, When, How), tailored to a profession.
//!
//! A request flows validate → cache lookup → Gemini (with Google Search
//! grounding) → tolerant reply parsing → cache write → response.

pub mod analysis;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod providers;

pub use error::{FivewhError, Result};
