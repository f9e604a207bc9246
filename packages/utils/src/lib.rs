mod time;

pub use time::{Duration, Expiration};
