mod generator;

pub use generator::{SerialGenerateCallback, SerialGenerator};
