mod reader;

pub use reader::{TrajectoryReader, read_trajectory};
