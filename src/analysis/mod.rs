pub mod storm;
pub mod trend;
