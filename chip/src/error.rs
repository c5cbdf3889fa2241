use thiserror::Error;

use crate::opcode::Opcode;

/// All the fatal conditions the chipset can run into while stepping.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProcessError {
    #[error("An unknown opcode was used {0:#06X?}.")]
    Decode(Opcode),
    #[error("The legacy machine code routine {0:#06X?} is not supported.")]
    UnsupportedOperation(Opcode),
    #[error("Stack is empty!")]
    StackUnderflow,
    #[error("Memory access at {address:#06X?} is out of bounds, memory len is {len}.")]
    OutOfBounds { address: usize, len: usize },
    #[error("Memory at {address:#06X?} is reserved for the fontset.")]
    ProtectedMemory { address: usize },
}

/// Errors produced while preparing a rom.
#[derive(Error, Debug)]
pub enum RomError {
    #[error("Unable to read rom '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Rom '{name}' is {len} bytes long, but only {max} bytes fit into memory.")]
    RomTooLarge { name: String, len: usize, max: usize },
}
