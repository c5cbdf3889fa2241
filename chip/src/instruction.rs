//! The decoder, it turns raw opcodes into the closed set of instructions the chipset knows.
use std::fmt;

use crate::opcode::{Opcode, OpcodeTrait};

/// A decoded instruction together with the operands it needs.
///
/// - `x`, `y` are register indices
/// - `kk` is a byte constant
/// - `n` is a nibble constant (sprite height)
/// - `nnn` is an address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `0NNN` jump to a machine code routine, only used by the original interpreters
    Sys { nnn: u16 },
    /// `00E0` clears the display
    Clear,
    /// `00EE` returns from a subroutine
    Return,
    /// `1NNN` jumps to address NNN
    Jump { nnn: u16 },
    /// `2NNN` calls the subroutine at NNN
    Call { nnn: u16 },
    /// `3XKK` skips the next instruction if VX equals KK
    SkipEqualByte { x: usize, kk: u8 },
    /// `4XKK` skips the next instruction if VX doesn't equal KK
    SkipNotEqualByte { x: usize, kk: u8 },
    /// `5XY0` skips the next instruction if VX equals VY
    SkipEqualRegister { x: usize, y: usize },
    /// `6XKK` sets VX to KK
    LoadByte { x: usize, kk: u8 },
    /// `7XKK` adds KK to VX, the carry flag is not changed
    AddByte { x: usize, kk: u8 },
    /// `8XY0` sets VX to the value of VY
    LoadRegister { x: usize, y: usize },
    /// `8XY1` sets VX to VX or VY
    Or { x: usize, y: usize },
    /// `8XY2` sets VX to VX and VY
    And { x: usize, y: usize },
    /// `8XY3` sets VX to VX xor VY
    Xor { x: usize, y: usize },
    /// `8XY4` adds VY to VX, VF is set to the carry
    AddRegister { x: usize, y: usize },
    /// `8XY5` subtracts VY from VX, VF is set to not borrow
    Sub { x: usize, y: usize },
    /// `8XY6` shifts VX right by one, VF is set to the bit shifted out
    ShiftRight { x: usize, y: usize },
    /// `8XY7` sets VX to VY minus VX, VF is set to not borrow
    SubN { x: usize, y: usize },
    /// `8XYE` shifts VX left by one, VF is set to the bit shifted out
    ShiftLeft { x: usize, y: usize },
    /// `9XY0` skips the next instruction if VX doesn't equal VY
    SkipNotEqualRegister { x: usize, y: usize },
    /// `ANNN` sets I to NNN
    LoadIndex { nnn: u16 },
    /// `BNNN` jumps to NNN plus V0
    JumpOffset { nnn: u16 },
    /// `CXKK` sets VX to a random byte and KK
    Random { x: usize, kk: u8 },
    /// `DXYN` draws the sprite at I with a height of N at (VX, VY)
    Draw { x: usize, y: usize, n: u8 },
    /// `EX9E` skips the next instruction if the key in VX is pressed
    SkipKeyPressed { x: usize },
    /// `EXA1` skips the next instruction if the key in VX isn't pressed
    SkipKeyNotPressed { x: usize },
    /// `FX07` sets VX to the delay timer
    GetDelayTimer { x: usize },
    /// `FX0A` awaits a key press and stores it in VX
    AwaitKeyPress { x: usize },
    /// `FX15` sets the delay timer to VX
    SetDelayTimer { x: usize },
    /// `FX18` sets the sound timer to VX
    SetSoundTimer { x: usize },
    /// `FX1E` adds VX to I
    AddIndex { x: usize },
    /// `FX29` sets I to the glyph of the digit in VX
    LoadGlyph { x: usize },
    /// `FX33` stores the binary coded decimal of VX at I, I+1 and I+2
    StoreBcd { x: usize },
    /// `FX55` stores V0 to VX in memory starting at I
    StoreRegisters { x: usize },
    /// `FX65` fills V0 to VX from memory starting at I
    LoadRegisters { x: usize },
    /// Any bit pattern without a defined meaning
    Unknown(Opcode),
}

/// Decodes the given opcode, every opcode maps to exactly one instruction.
///
/// # Example
/// ```rust
/// # use chip::instruction::{decode, Instruction};
/// assert_eq!(decode(0x00E0), Instruction::Clear);
/// assert_eq!(decode(0x1234), Instruction::Jump { nnn: 0x234 });
/// assert_eq!(decode(0xFFFF), Instruction::Unknown(0xFFFF));
/// ```
pub fn decode(opcode: Opcode) -> Instruction {
    let x = opcode.x();
    let y = opcode.y();
    let n = opcode.n();
    let kk = opcode.kk();
    let nnn = opcode.nnn();

    match opcode.t() {
        0x0 => match opcode {
            0x00E0 => Instruction::Clear,
            0x00EE => Instruction::Return,
            _ => Instruction::Sys { nnn },
        },
        0x1 => Instruction::Jump { nnn },
        0x2 => Instruction::Call { nnn },
        0x3 => Instruction::SkipEqualByte { x, kk },
        0x4 => Instruction::SkipNotEqualByte { x, kk },
        0x5 => Instruction::SkipEqualRegister { x, y },
        0x6 => Instruction::LoadByte { x, kk },
        0x7 => Instruction::AddByte { x, kk },
        0x8 => match n {
            0x0 => Instruction::LoadRegister { x, y },
            0x1 => Instruction::Or { x, y },
            0x2 => Instruction::And { x, y },
            0x3 => Instruction::Xor { x, y },
            0x4 => Instruction::AddRegister { x, y },
            0x5 => Instruction::Sub { x, y },
            0x6 => Instruction::ShiftRight { x, y },
            0x7 => Instruction::SubN { x, y },
            0xE => Instruction::ShiftLeft { x, y },
            _ => Instruction::Unknown(opcode),
        },
        0x9 => Instruction::SkipNotEqualRegister { x, y },
        0xA => Instruction::LoadIndex { nnn },
        0xB => Instruction::JumpOffset { nnn },
        0xC => Instruction::Random { x, kk },
        0xD => Instruction::Draw { x, y, n },
        0xE => match kk {
            0x9E => Instruction::SkipKeyPressed { x },
            0xA1 => Instruction::SkipKeyNotPressed { x },
            _ => Instruction::Unknown(opcode),
        },
        0xF => match kk {
            0x07 => Instruction::GetDelayTimer { x },
            0x0A => Instruction::AwaitKeyPress { x },
            0x15 => Instruction::SetDelayTimer { x },
            0x18 => Instruction::SetSoundTimer { x },
            0x1E => Instruction::AddIndex { x },
            0x29 => Instruction::LoadGlyph { x },
            0x33 => Instruction::StoreBcd { x },
            0x55 => Instruction::StoreRegisters { x },
            0x65 => Instruction::LoadRegisters { x },
            _ => Instruction::Unknown(opcode),
        },
        _ => Instruction::Unknown(opcode),
    }
}

impl From<Opcode> for Instruction {
    fn from(opcode: Opcode) -> Self {
        decode(opcode)
    }
}

/// Disassembles the instruction into the common assembler mnemonics.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            Sys { nnn } => write!(f, "SYS {:#05X}", nnn),
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump { nnn } => write!(f, "JP {:#05X}", nnn),
            Call { nnn } => write!(f, "CALL {:#05X}", nnn),
            SkipEqualByte { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            SkipNotEqualByte { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            SkipEqualRegister { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadByte { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            AddByte { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            LoadRegister { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddRegister { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            SubN { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            SkipNotEqualRegister { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex { nnn } => write!(f, "LD I, {:#05X}", nnn),
            JumpOffset { nnn } => write!(f, "JP V0, {:#05X}", nnn),
            Random { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {:#X}", x, y, n),
            SkipKeyPressed { x } => write!(f, "SKP V{:X}", x),
            SkipKeyNotPressed { x } => write!(f, "SKNP V{:X}", x),
            GetDelayTimer { x } => write!(f, "LD V{:X}, DT", x),
            AwaitKeyPress { x } => write!(f, "LD V{:X}, K", x),
            SetDelayTimer { x } => write!(f, "LD DT, V{:X}", x),
            SetSoundTimer { x } => write!(f, "LD ST, V{:X}", x),
            AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            LoadGlyph { x } => write!(f, "LD F, V{:X}", x),
            StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
            Unknown(opcode) => write!(f, "UNKNOWN {:#06X}", opcode),
        }
    }
}
