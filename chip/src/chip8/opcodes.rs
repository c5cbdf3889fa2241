use crate::{
    definitions::{cpu, display::fontset},
    instruction::Instruction,
    opcode::{Operation, ProgramCounterStep},
    timer::Timed,
    ProcessError,
};

use super::ChipSet;

/// the flag register `VF`
const FLAG: usize = cpu::register::LAST;

impl ChipSet {
    /// Applies the instruction to the chipset. The returned step tells how the
    /// program counter has to move afterwards, the chipset is left unchanged on error.
    pub(super) fn execute(
        &mut self,
        instruction: Instruction,
        key: Option<u8>,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        let mut op = Operation::None;

        let pcs = match instruction {
            Instruction::Sys { .. } => {
                // 0NNN
                // Jump to a machine code routine at NNN, only the original hardware could do this.
                return Err(ProcessError::UnsupportedOperation(self.opcode));
            }
            Instruction::Clear => {
                // 00E0
                // clear display
                self.display.clear();
                op = Operation::Draw;
                ProgramCounterStep::Next
            }
            Instruction::Return => {
                // 00EE
                // Return from sub routine => pop from stack, the stack holds the address of the
                // call itself so continue right after it
                let pc = self.pop_stack()?;
                log::debug!("return to {:#06X}", pc);
                ProgramCounterStep::Jump(ProgramCounterStep::Next.apply(pc))
            }
            Instruction::Jump { nnn } => {
                // 1NNN
                // Jumps to address NNN.
                ProgramCounterStep::Jump(nnn)
            }
            Instruction::Call { nnn } => {
                // 2NNN
                // Calls subroutine at NNN
                log::debug!("call {:#06X} from {:#06X}", nnn, self.program_counter);
                self.push_stack(self.program_counter);
                ProgramCounterStep::Jump(nnn)
            }
            Instruction::SkipEqualByte { x, kk } => {
                // 3XKK
                ProgramCounterStep::cond(self.registers[x] == kk)
            }
            Instruction::SkipNotEqualByte { x, kk } => {
                // 4XKK
                ProgramCounterStep::cond(self.registers[x] != kk)
            }
            Instruction::SkipEqualRegister { x, y } => {
                // 5XY0
                ProgramCounterStep::cond(self.registers[x] == self.registers[y])
            }
            Instruction::LoadByte { x, kk } => {
                // 6XKK
                self.registers[x] = kk;
                ProgramCounterStep::Next
            }
            Instruction::AddByte { x, kk } => {
                // 7XKK
                // let VX overflow, but ignore carry
                self.registers[x] = self.registers[x].wrapping_add(kk);
                ProgramCounterStep::Next
            }
            Instruction::LoadRegister { x, y } => {
                // 8XY0
                self.registers[x] = self.registers[y];
                ProgramCounterStep::Next
            }
            Instruction::Or { x, y } => {
                // 8XY1
                self.registers[x] |= self.registers[y];
                ProgramCounterStep::Next
            }
            Instruction::And { x, y } => {
                // 8XY2
                self.registers[x] &= self.registers[y];
                ProgramCounterStep::Next
            }
            Instruction::Xor { x, y } => {
                // 8XY3
                self.registers[x] ^= self.registers[y];
                ProgramCounterStep::Next
            }
            Instruction::AddRegister { x, y } => {
                // 8XY4
                // VF is written last, so it holds the carry even if X is F
                let (res, carry) = self.registers[x].overflowing_add(self.registers[y]);
                self.registers[x] = res;
                self.registers[FLAG] = carry as u8;
                ProgramCounterStep::Next
            }
            Instruction::Sub { x, y } => {
                // 8XY5
                // VF is set to 1 when there is no borrow
                let (left, right) = (self.registers[x], self.registers[y]);
                self.registers[x] = left.wrapping_sub(right);
                self.registers[FLAG] = (left > right) as u8;
                ProgramCounterStep::Next
            }
            Instruction::ShiftRight { x, .. } => {
                // 8XY6
                let value = self.registers[x];
                self.registers[x] = value >> 1;
                self.registers[FLAG] = value & 0x1;
                ProgramCounterStep::Next
            }
            Instruction::SubN { x, y } => {
                // 8XY7
                let (left, right) = (self.registers[y], self.registers[x]);
                self.registers[x] = left.wrapping_sub(right);
                self.registers[FLAG] = (left > right) as u8;
                ProgramCounterStep::Next
            }
            Instruction::ShiftLeft { x, .. } => {
                // 8XYE
                const SHIFT_SIGNIFICANT: u8 = 7;
                let value = self.registers[x];
                self.registers[x] = value << 1;
                self.registers[FLAG] = value >> SHIFT_SIGNIFICANT;
                ProgramCounterStep::Next
            }
            Instruction::SkipNotEqualRegister { x, y } => {
                // 9XY0
                ProgramCounterStep::cond(self.registers[x] != self.registers[y])
            }
            Instruction::LoadIndex { nnn } => {
                // ANNN
                self.index_register = nnn;
                ProgramCounterStep::Next
            }
            Instruction::JumpOffset { nnn } => {
                // BNNN
                ProgramCounterStep::Jump(self.registers[0] as u16 + nnn)
            }
            Instruction::Random { x, kk } => {
                // CXKK
                // using a fill bytes call here, as the trait RngCore does not
                // support random u8.
                let mut rand: [u8; 1] = [0];
                self.rng.fill_bytes(&mut rand);
                self.registers[x] = kk & rand[0];
                ProgramCounterStep::Next
            }
            Instruction::Draw { x, y, n } => {
                // DXYN
                // Draws the sprite found at I with a width of 8 pixels and a height of N pixels
                // at (VX, VY), VF is set if any pixel was erased.
                let range = self.memory_range(self.index_register as usize, n as usize)?;
                let coorx = self.registers[x] as usize;
                let coory = self.registers[y] as usize;

                let collision = self.display.draw(coorx, coory, &self.memory[range]);
                self.registers[FLAG] = collision as u8;

                op = Operation::Draw;
                ProgramCounterStep::Next
            }
            Instruction::SkipKeyPressed { x } => {
                // EX9E
                ProgramCounterStep::cond(key == Some(self.registers[x]))
            }
            Instruction::SkipKeyNotPressed { x } => {
                // EXA1
                ProgramCounterStep::cond(key != Some(self.registers[x]))
            }
            Instruction::GetDelayTimer { x } => {
                // FX07
                self.registers[x] = self.get_delay_timer();
                ProgramCounterStep::Next
            }
            Instruction::AwaitKeyPress { x } => {
                // FX0A
                // A key press is awaited, and then stored in VX. Without a key the
                // instruction is simply repeated on the next step.
                match key {
                    Some(key) => {
                        self.registers[x] = key;
                        ProgramCounterStep::Next
                    }
                    None => {
                        op = Operation::Wait;
                        ProgramCounterStep::None
                    }
                }
            }
            Instruction::SetDelayTimer { x } => {
                // FX15
                self.delay_timer.set_value(self.registers[x]);
                ProgramCounterStep::Next
            }
            Instruction::SetSoundTimer { x } => {
                // FX18
                self.sound_timer.set_value(self.registers[x]);
                ProgramCounterStep::Next
            }
            Instruction::AddIndex { x } => {
                // FX1E
                // VF is not affected
                self.index_register = self.index_register.wrapping_add(self.registers[x] as u16);
                ProgramCounterStep::Next
            }
            Instruction::LoadGlyph { x } => {
                // FX29
                let digit = self.registers[x] as usize;
                self.index_register = (fontset::LOCATION + fontset::GLYPH_SIZE * digit) as u16;
                ProgramCounterStep::Next
            }
            Instruction::StoreBcd { x } => {
                // FX33
                let r = self.registers[x];
                let bcd = [
                    r / 100,     // 246u8 / 100 => 2
                    r / 10 % 10, // 246u8 / 10 => 24 % 10 => 4
                    r % 10,      // 246u8 % 10 => 6
                ];
                self.write_memory(self.index_register as usize, &bcd)?;
                ProgramCounterStep::Next
            }
            Instruction::StoreRegisters { x } => {
                // FX55
                // I itself is left unmodified.
                let registers = self.registers;
                self.write_memory(self.index_register as usize, &registers[..=x])?;
                ProgramCounterStep::Next
            }
            Instruction::LoadRegisters { x } => {
                // FX65
                // I itself is left unmodified.
                let range = self.memory_range(self.index_register as usize, x + 1)?;
                self.registers[..=x].copy_from_slice(&self.memory[range]);
                ProgramCounterStep::Next
            }
            Instruction::Unknown(opcode) => {
                return Err(ProcessError::Decode(opcode));
            }
        };

        Ok((pcs, op))
    }
}
