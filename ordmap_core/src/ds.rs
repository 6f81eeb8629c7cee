mod combine;
pub mod map;
mod rbt;
pub mod set;
