pub mod camera;
pub mod machine;
pub mod state;
