//! # Macrodash Transforms
//!
//! Stateless derivations over observation series: year-over-year percentage
//! change, monthly-mean resampling, and rolling-mean smoothing.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems and depends only on `core-types`.
//! - **Omission over invention:** a period whose result is undefined (missing
//!   input, zero denominator) simply produces no output point. Transforms
//!   never zero-fill, null-fill, or emit infinities.
//!
//! Transforms preserve the input's series id and label; display naming is
//! the presentation layer's concern.

// Declare the modules that constitute this crate.
pub mod error;
pub mod resample;
pub mod smooth;
pub mod yoy;

// Re-export the key components to create a clean, public-facing API.
pub use error::TransformError;
pub use resample::monthly_mean;
pub use smooth::rolling_mean;
pub use yoy::year_over_year;
