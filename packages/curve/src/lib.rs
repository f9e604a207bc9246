mod curve;
mod error;

pub use curve::DiscountCurve;
pub use error::CurveError;
