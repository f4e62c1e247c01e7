pub mod classifier;
pub mod storage;
