pub mod chapter;
pub mod times;
pub mod plan;
pub mod concat;
pub mod stamp;
pub mod merge;
