pub mod chip8;
pub mod config;
pub mod definitions;
pub mod devices;
pub mod framebuffer;
pub mod instruction;
pub mod opcode;
pub mod resources;
pub mod timer;
mod error;

// reexporting for convinience
mod runner;
pub use config::Config;
pub use error::*;
pub use runner::*;
