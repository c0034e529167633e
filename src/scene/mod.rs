pub mod arena;
pub mod object;
