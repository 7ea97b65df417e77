pub mod argspec;
pub mod fileman;
pub mod generator;
pub mod table;
