pub mod clock;
pub mod derive;
pub mod engine;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{RenderData, generate};
