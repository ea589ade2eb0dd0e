pub mod category;
pub mod opportunity;
pub mod region;
