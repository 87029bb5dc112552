//! KS0108 controller commands
//!
//! Every command is a single byte written with register-select low. The
//! operand shares the byte with a fixed opcode.

/// Opcode bytes
pub mod opcode {
    pub const DISPLAY_OFF: u8 = 0x3E;
    pub const DISPLAY_ON: u8 = 0x3F;
    pub const SET_COLUMN: u8 = 0x40;
    pub const SET_PAGE: u8 = 0xB8;
    pub const START_LINE: u8 = 0xC0;
}

/// Operand mask for page commands (0-7)
const PAGE_MASK: u8 = 0x07;

/// Operand mask for column and start-line commands (0-63)
const ADDRESS_MASK: u8 = 0x3F;

/// Controller command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Enable the panel output
    DisplayOn,
    /// Blank the panel output (RAM is kept)
    DisplayOff,
    /// RAM line shown at the top of the panel (0-63)
    StartLine(u8),
    /// Page address register (0-7)
    SetPage(u8),
    /// Column address register, chip-local (0-63)
    SetColumn(u8),
}

impl Command {
    /// Encode the command as the byte placed on the bus
    ///
    /// Operands wider than their field are masked, so an out-of-range operand
    /// can never turn into a different opcode.
    pub const fn to_byte(self) -> u8 {
        match self {
            Command::DisplayOn => opcode::DISPLAY_ON,
            Command::DisplayOff => opcode::DISPLAY_OFF,
            Command::StartLine(line) => opcode::START_LINE | (line & ADDRESS_MASK),
            Command::SetPage(page) => opcode::SET_PAGE | (page & PAGE_MASK),
            Command::SetColumn(column) => opcode::SET_COLUMN | (column & ADDRESS_MASK),
        }
    }

    /// Decode a command byte
    ///
    /// Returns `None` for bytes that are not write commands.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            opcode::DISPLAY_ON => Some(Command::DisplayOn),
            opcode::DISPLAY_OFF => Some(Command::DisplayOff),
            0x40..=0x7F => Some(Command::SetColumn(byte & ADDRESS_MASK)),
            0xB8..=0xBF => Some(Command::SetPage(byte & PAGE_MASK)),
            0xC0..=0xFF => Some(Command::StartLine(byte & ADDRESS_MASK)),
            _ => None,
        }
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> u8 {
        command.to_byte()
    }
}
