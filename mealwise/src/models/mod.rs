mod calendar;
mod preferences;
mod recipe;
mod shopping;

pub use calendar::*;
pub use preferences::*;
pub use recipe::*;
pub use shopping::*;
