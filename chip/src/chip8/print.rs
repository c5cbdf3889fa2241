//! The state dump of the [`chipset`](super::ChipSet), used for debugging roms.
use std::fmt::{self, Write};

use num_traits::Unsigned;
use once_cell::sync::Lazy;

use super::ChipSet;
use crate::{definitions::memory, instruction, opcode};

/// The amount of values printed per row
const ROW_LEN: usize = 8;
const INDENT: &str = "\t\t";
const ELLIPSIS: &str = "...";

/// Stands in for rows that only contain zeros, it is as wide as a full row.
static ZERO_ROW: Lazy<String> = Lazy::new(|| {
    let zero = format!("{:#06X}", 0u16);
    let width = ROW_LEN * (zero.len() + 1) - 1;
    let gap = " ".repeat((width - 2 * zero.len() - ELLIPSIS.len()) / 2);
    format!("{}{}{}{}{}", zero, gap, ELLIPSIS, gap, zero)
});

/// Starts a row with the range of indices it holds.
fn write_range(out: &mut String, from: usize, to: usize) -> fmt::Result {
    write!(out, "{}{:#06X} - {:#06X} :", INDENT, from, to)
}

/// Writes a titled section holding a single value.
fn write_single<T>(out: &mut String, title: &str, value: T) -> fmt::Result
where
    T: fmt::UpperHex + Unsigned,
{
    writeln!(out, "\t{} :\n{}{:#06X}", title, INDENT, value)
}

/// Writes the values in rows of [`ROW_LEN`].
fn write_values<T>(out: &mut String, values: &[T]) -> fmt::Result
where
    T: fmt::UpperHex + Unsigned + Copy,
{
    for (row, chunk) in values.chunks(ROW_LEN).enumerate() {
        let from = row * ROW_LEN;
        write_range(out, from, from + chunk.len() - 1)?;
        for value in chunk {
            write!(out, " {:#06X}", *value)?;
        }
        out.push('\n');
    }
    Ok(())
}

/// Writes the memory as opcodes, consecutive rows of zeros are merged into one.
fn write_memory(out: &mut String, data: &[u8]) -> fmt::Result {
    const ROW_BYTES: usize = ROW_LEN * memory::opcodes::SIZE;

    // (from, to, only zeros)
    let mut rows: Vec<(usize, usize, bool)> = Vec::with_capacity(data.len() / ROW_BYTES);
    for (row, bytes) in data.chunks(ROW_BYTES).enumerate() {
        let from = row * ROW_BYTES;
        let to = from + bytes.len() - 1;
        let zero = bytes.iter().all(|byte| *byte == 0);
        match rows.last_mut() {
            Some((_, last_to, true)) if zero => *last_to = to,
            _ => rows.push((from, to, zero)),
        }
    }

    for (from, to, zero) in rows {
        write_range(out, from, to)?;
        if zero {
            write!(out, " {}", *ZERO_ROW)?;
        } else {
            for index in (from..=to).step_by(memory::opcodes::SIZE) {
                let opcode = opcode::build_opcode(data, index).map_err(|_| fmt::Error)?;
                write!(out, " {:#06X}", opcode)?;
            }
        }
        out.push('\n');
    }
    Ok(())
}

impl fmt::Display for ChipSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(4096);
        out.push_str("Chipset {\n");
        writeln!(out, "\tProgram Name :\n{}{}", INDENT, self.get_name())?;

        // the opcode the program counter currently points to
        write!(out, "\tOpcode :\n{}", INDENT)?;
        match self.fetch() {
            Ok(opcode) => writeln!(out, "{:#06X} {}", opcode, instruction::decode(opcode))?,
            Err(_) => out.push_str("invalid\n"),
        }

        write_single(&mut out, "Program Counter", self.program_counter)?;
        write_single(&mut out, "Index Register", self.index_register)?;
        write_single(&mut out, "Delay Timer", self.get_delay_timer())?;
        write_single(&mut out, "Sound Timer", self.get_sound_timer())?;

        out.push_str("\tMemory :\n");
        write_memory(&mut out, &self.memory)?;

        out.push_str("\tStack :\n");
        if self.stack.is_empty() {
            writeln!(out, "{}empty", INDENT)?;
        } else {
            write_values(&mut out, &self.stack)?;
        }

        out.push_str("\tRegister :\n");
        write_values(&mut out, &self.registers)?;
        out.push('}');

        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests;

    const OUTPUT_PRINT: &str = "\
        Chipset {\n\
            \tProgram Name :\n\
                \t\tPRINT\n\
            \tOpcode :\n\
                \t\t0x00E0 CLS\n\
            \tProgram Counter :\n\
                \t\t0x0200\n\
            \tIndex Register :\n\
                \t\t0x0000\n\
            \tDelay Timer :\n\
                \t\t0x0000\n\
            \tSound Timer :\n\
                \t\t0x0000\n\
            \tMemory :\n\
                \t\t0x0000 - 0x004F : 0x0000                    ...                    0x0000\n\
                \t\t0x0050 - 0x005F : 0xF090 0x9090 0xF020 0x6020 0x2070 0xF010 0xF080 0xF0F0\n\
                \t\t0x0060 - 0x006F : 0x10F0 0x10F0 0x9090 0xF010 0x10F0 0x80F0 0x10F0 0xF080\n\
                \t\t0x0070 - 0x007F : 0xF090 0xF0F0 0x1020 0x4040 0xF090 0xF090 0xF0F0 0x90F0\n\
                \t\t0x0080 - 0x008F : 0x10F0 0xF090 0xF090 0x90E0 0x90E0 0x90E0 0xF080 0x8080\n\
                \t\t0x0090 - 0x009F : 0xF0E0 0x9090 0x90E0 0xF080 0xF080 0xF0F0 0x80F0 0x8080\n\
                \t\t0x00A0 - 0x01FF : 0x0000                    ...                    0x0000\n\
                \t\t0x0200 - 0x020F : 0x00E0 0x6C00 0x4C00 0x6E0F 0xA203 0x6020 0xF055 0x1200\n\
                \t\t0x0210 - 0x0FFF : 0x0000                    ...                    0x0000\n\
            \tStack :\n\
                \t\tempty\n\
            \tRegister :\n\
                \t\t0x0000 - 0x0007 : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
                \t\t0x0008 - 0x000F : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
        }";

    #[test]
    /// tests if the pretty print output is as expected
    fn test_full_print() {
        let chip = tests::chip_with_program("PRINT", &tests::PROGRAM);

        let actual_full = format!("{}", chip);
        let actual_split = actual_full.split('\n');
        let expected = OUTPUT_PRINT.split('\n');

        assert_eq!(actual_full.lines().count(), OUTPUT_PRINT.lines().count());
        for (exp, act) in expected.zip(actual_split) {
            assert_eq!(exp, act);
        }
    }

    #[test]
    fn test_stack_print() {
        let mut chip = tests::chip_with_program("PRINT", &tests::PROGRAM);
        chip.stack.extend_from_slice(&[0x0200, 0x0ABC]);

        let actual = format!("{}", chip);
        assert!(actual.contains("\tStack :\n\t\t0x0000 - 0x0001 : 0x0200 0x0ABC\n"));
    }
}
