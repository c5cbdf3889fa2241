use std::ops::Range;

use {
    crate::{
        definitions::{
            cpu,
            display::{self, fontset},
            memory,
        },
        devices::KeyboardCommands,
        framebuffer::Framebuffer,
        instruction,
        opcode::{self, Opcode, Operation, ProgramCounter, ProgramCounterStep},
        resources::Rom,
        timer::{Timed, Timer},
        Config, ProcessError,
    },
    rand::RngCore,
};

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
pub struct ChipSet {
    /// the rom that is currently loaded, kept for resets
    pub(super) rom: Rom,
    /// all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// - `0x000-0x1FF` - Chip 8 interpreter (contains font set in emu)
    /// - `0x050-0x0A0` - Used for the built in `4x5` pixel font set (`0-F`)
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Box<[u8]>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions; thus, it should be avoided. In an addition operation, `VF` is the carry flag,
    /// while in subtraction, it is the "no borrow" flag. In the draw instruction `VF` is set upon
    /// pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index for the register, this is a special register entry
    /// called index `I`
    pub(super) index_register: u16,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: u16,
    /// The stack is only used to store return addresses when subroutines are called. The original
    /// [RCA 1802](https://de.wikipedia.org/wiki/RCA1802) version allocated `48` bytes for up to
    /// `12` levels of nesting; here the stack grows as needed.
    pub(super) stack: Vec<u16>,
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    pub(super) delay_timer: Timer,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    pub(super) sound_timer: Timer,
    pub(super) display: Framebuffer,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
}

impl ChipSet {
    /// will create a new chipset object
    pub fn new(rom: Rom) -> Self {
        Self::with_config(rom, &Config::default())
    }

    /// will create a new chipset object, that draws according to the given configuration
    pub fn with_config(rom: Rom, config: &Config) -> Self {
        let mut chip = Self {
            rom,
            opcode: 0,
            memory: vec![0; memory::SIZE].into_boxed_slice(),
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: cpu::PROGRAM_COUNTER as u16,
            stack: Vec::with_capacity(cpu::stack::SIZE),
            delay_timer: Timer::new(0),
            sound_timer: Timer::new(0),
            display: Framebuffer::with_edge(display::WIDTH, display::HEIGHT, config.sprite_edge),
            rng: Box::new(rand::rngs::OsRng),
        };
        chip.reset();
        chip
    }

    /// Will replace the loaded rom and restart the chipset.
    pub fn load(&mut self, rom: Rom) {
        self.rom = rom;
        self.reset();
    }

    /// Will move the chipset back into the power on state, with the current rom loaded.
    pub fn reset(&mut self) {
        // initialize all the memory with 0
        self.memory.iter_mut().for_each(|byte| *byte = 0);

        // load fonts
        self.memory[fontset::LOCATION..fontset::END].copy_from_slice(&fontset::FONTSET);

        // write the rom data into memory, the rom size was checked during its creation
        let data = self.rom.get_data();
        self.memory[cpu::PROGRAM_COUNTER..(cpu::PROGRAM_COUNTER + data.len())]
            .copy_from_slice(data);

        self.opcode = 0;
        self.registers = [0; cpu::register::SIZE];
        self.index_register = 0;
        self.program_counter = cpu::PROGRAM_COUNTER as u16;
        self.stack.clear();
        self.delay_timer.set_value(0);
        self.sound_timer.set_value(0);
        self.display.clear();

        log::info!(
            "loaded rom '{}' with {} bytes",
            self.rom.get_name(),
            data.len()
        );
    }

    /// Replaces the random number generator used by `CXKK`.
    pub fn set_rng(&mut self, rng: Box<dyn RngCore + Send>) {
        self.rng = rng;
    }

    /// will read the opcode the program counter points to
    pub fn fetch(&self) -> Result<Opcode, ProcessError> {
        opcode::build_opcode(&self.memory, self.program_counter as usize)
    }

    /// will advance the program by a single step, the keyboard is polled once
    pub fn step<K: KeyboardCommands + ?Sized>(
        &mut self,
        keyboard: &K,
    ) -> Result<Operation, ProcessError> {
        let opcode = self.fetch()?;
        self.calc(opcode, keyboard.pressed_key())
    }

    /// will run the given opcode as if it was fetched from the current program counter
    pub fn calc(&mut self, opcode: Opcode, key: Option<u8>) -> Result<Operation, ProcessError> {
        self.opcode = opcode;
        let instruction = instruction::decode(opcode);
        log::trace!(
            "{:#06X}: {:#06X} {}",
            self.program_counter,
            opcode,
            instruction
        );

        let (step, operation) = self.execute(instruction, key)?;
        self.advance(step);
        Ok(operation)
    }

    /// Counts both timers down by one, returns true if a beep is due.
    pub fn tick_timers(&mut self) -> bool {
        self.delay_timer.tick();
        self.sound_timer.tick()
    }

    /// will return the name of the loaded rom
    pub fn get_name(&self) -> &str {
        self.rom.get_name()
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.sound_timer.get_value()
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.delay_timer.get_value()
    }

    /// Will return the current state of the display
    pub fn get_display(&self) -> &Framebuffer {
        &self.display
    }

    /// Will return the registers `V0` to `VF`
    pub fn get_registers(&self) -> &[u8] {
        &self.registers
    }

    /// Will return the index register `I`
    pub fn get_index_register(&self) -> u16 {
        self.index_register
    }

    /// Will return the address of the next instruction
    pub fn get_program_counter(&self) -> u16 {
        self.program_counter
    }

    /// Will return the return addresses, the last entry is the top
    pub fn get_stack(&self) -> &[u16] {
        &self.stack
    }

    /// Will return the full memory, fontset and rom included
    pub fn get_memory(&self) -> &[u8] {
        &self.memory
    }

    /// Will push the given pointer to the stack
    pub(super) fn push_stack(&mut self, pointer: u16) {
        self.stack.push(pointer);
    }

    /// Will pop the last pointer from the stack
    pub(super) fn pop_stack(&mut self) -> Result<u16, ProcessError> {
        self.stack.pop().ok_or(ProcessError::StackUnderflow)
    }

    /// Will check that `len` bytes starting at `from` are inside of memory.
    pub(super) fn memory_range(&self, from: usize, len: usize) -> Result<Range<usize>, ProcessError> {
        let to = from + len;
        if to > self.memory.len() {
            Err(ProcessError::OutOfBounds {
                address: from.max(self.memory.len()),
                len: self.memory.len(),
            })
        } else {
            Ok(from..to)
        }
    }

    /// Will write the data into memory starting at `from`, the fontset can not be overwritten.
    /// Nothing is written if the check fails.
    pub(super) fn write_memory(&mut self, from: usize, data: &[u8]) -> Result<(), ProcessError> {
        let range = self.memory_range(from, data.len())?;
        if !data.is_empty() && range.start < fontset::END && fontset::LOCATION < range.end {
            return Err(ProcessError::ProtectedMemory {
                address: range.start.max(fontset::LOCATION),
            });
        }
        self.memory[range].copy_from_slice(data);
        Ok(())
    }
}

impl ProgramCounter for ChipSet {
    fn advance(&mut self, step: ProgramCounterStep) {
        self.program_counter = step.apply(self.program_counter);
    }
}
