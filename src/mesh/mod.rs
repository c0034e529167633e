pub mod grid;
pub mod job;
pub mod pixels;
pub mod sampler;
pub mod synth;
pub mod transfer;
