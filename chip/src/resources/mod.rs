use std::{fs, path::Path};

use crate::{
    definitions::{cpu, memory},
    RomError,
};

/// The largest rom that fits between the program start and the end of memory.
pub const MAX_ROM_SIZE: usize = memory::SIZE - cpu::PROGRAM_COUNTER;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents a single rom with it's information
pub struct Rom {
    /// The rom name
    name: String,
    /// The raw program bytes, loaded verbatim at the program start
    /// stored as a u8 slice on the heap
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data
    ///
    /// # Example
    /// ```rust
    /// # use chip::resources::Rom;
    /// let rom = Rom::new("jump", vec![0x12, 0x00]).expect("fits into memory");
    /// assert_eq!(rom.get_data(), &[0x12, 0x00]);
    /// assert!(Rom::new("huge", vec![0; 0x1000]).is_err());
    /// ```
    pub fn new<D: Into<Box<[u8]>>>(name: &str, data: D) -> Result<Self, RomError> {
        let data = data.into();
        if data.len() > MAX_ROM_SIZE {
            return Err(RomError::RomTooLarge {
                name: name.to_string(),
                len: data.len(),
                max: MAX_ROM_SIZE,
            });
        }
        Ok(Rom {
            name: name.to_string(),
            data,
        })
    }

    /// Will read the rom from the file system, the file name is used as the rom name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RomError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let data = fs::read(path).map_err(|source| RomError::Io {
            name: name.clone(),
            source,
        })?;

        log::info!("read rom '{}' with {} bytes", name, data.len());
        Self::new(&name, data)
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}
