//! KS0108 parallel bus protocol
//!
//! Every transfer goes through the same sequence:
//!
//! ```text
//!   Idle -> BusyPoll -> CommandWrite | DataWrite -> Idle
//!   Idle -> Selecting -> BusyPoll -> Idle
//!   Idle -> BusyPoll -> Idle                  (wait_ready)
//! ```
//!
//! The busy poll switches the data bank to input, raises RW, and strobes
//! enable until DB7 reads low. The bank is switched back to output and RW
//! lowered before anything is driven onto the bus again.

use embedded_hal::delay::DelayNs;
use glcd_core::command::Command;
use glcd_core::config::{
    BusTiming, BusyPolicy, ChipSelectPolarity, ControlPins, GlcdConfig, BUSY_FLAG_PIN,
};
use glcd_core::geometry::Chip;
use glcd_core::traits::DisplayError;
use glcd_hal::gpio::{Direction, Level, PinBank, ALL_INPUT, ALL_OUTPUT};

/// Where the bus is within a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusPhase {
    #[default]
    Idle,
    Selecting,
    BusyPoll,
    CommandWrite,
    DataWrite,
}

/// Exclusive handle on the panel bus
///
/// Owns the control bank (RS, RW, E, CS1, CS2, RST), the data bank (DB0-DB7)
/// and a delay source. Holding the handle is what makes a transfer
/// exclusive: nothing else can touch the lines while it exists.
pub struct Ks0108Bus<C, D, DL> {
    control: C,
    data: D,
    delay: DL,
    pins: ControlPins,
    chip_select: ChipSelectPolarity,
    timing: BusTiming,
    busy: BusyPolicy,
    selected: Option<Chip>,
    phase: BusPhase,
    /// Every phase entered, in order
    #[cfg(test)]
    trail: std::vec::Vec<BusPhase>,
}

impl<C, D, DL> Ks0108Bus<C, D, DL>
where
    C: PinBank,
    D: PinBank,
    DL: DelayNs,
{
    /// Create a bus handle
    ///
    /// No pin is touched until [`configure_pins`](Self::configure_pins).
    /// The control pins must be distinct and on the bank (0-7); a pin off
    /// the bank is never driven, so enable would never strobe.
    pub fn new(control: C, data: D, delay: DL, config: &GlcdConfig) -> Self {
        let pins_valid = config.pins.is_valid();
        #[cfg(feature = "defmt")]
        if !pins_valid {
            defmt::warn!("glcd: invalid control pin assignment {}", config.pins);
        }
        debug_assert!(pins_valid, "control pins must be distinct and below 8");

        Self {
            control,
            data,
            delay,
            pins: config.pins,
            chip_select: config.chip_select,
            timing: config.timing,
            busy: config.busy,
            selected: None,
            phase: BusPhase::Idle,
            #[cfg(test)]
            trail: std::vec::Vec::new(),
        }
    }

    /// Make every control line and the data bank outputs, idle levels
    ///
    /// Leaves enable low, write mode, reset released and both chips
    /// deselected.
    pub fn configure_pins(&mut self) {
        for pin in self.pins.all() {
            self.control.set_pin_direction(pin, Direction::Output);
        }
        self.data.set_port_direction(ALL_OUTPUT);

        self.control.set_pin_low(self.pins.enable);
        self.control.set_pin_low(self.pins.rw);
        self.control.set_pin_low(self.pins.rs);
        self.control.set_pin_high(self.pins.reset);
        self.drive_select(None);
    }

    /// Pulse the reset line and wait for the controllers to settle
    pub fn reset(&mut self) {
        self.control.set_pin_low(self.pins.reset);
        self.delay.delay_ms(self.timing.reset_pulse_ms);
        self.control.set_pin_high(self.pins.reset);
        self.delay.delay_ms(self.timing.reset_settle_ms);
    }

    /// Route subsequent transfers to `chip` (or to neither)
    ///
    /// Both select lines are released before the new one is asserted, so
    /// the two controllers are never selected together. Waits for the
    /// newly selected controller to report ready.
    pub fn select_chip(&mut self, chip: Option<Chip>) -> Result<(), DisplayError> {
        self.enter(BusPhase::Selecting);
        self.drive_select(chip);
        let result = self.poll_busy();
        self.enter(BusPhase::Idle);
        result
    }

    /// Select by wired id; anything other than 1 or 2 selects no chip
    pub fn select_chip_id(&mut self, id: u8) -> Result<(), DisplayError> {
        self.select_chip(Chip::from_id(id))
    }

    /// Spin until the selected controller clears its busy flag
    ///
    /// Under [`BusyPolicy::Forever`] this never returns for a dead
    /// controller. Under a bounded policy it gives up with
    /// [`DisplayError::BusyTimeout`]; the bus is back in output and write
    /// mode either way.
    pub fn wait_ready(&mut self) -> Result<(), DisplayError> {
        let result = self.poll_busy();
        self.enter(BusPhase::Idle);
        result
    }

    /// Send a command to the selected controller
    pub fn write_command(&mut self, command: Command) -> Result<(), DisplayError> {
        self.write_command_byte(command.to_byte())
    }

    /// Send a raw command byte to the selected controller
    pub fn write_command_byte(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.transfer(BusPhase::CommandWrite, Level::Low, byte)
    }

    /// Write one display RAM byte at the selected controller's cursor
    ///
    /// The controller advances its column register after each byte,
    /// wrapping within its own 64 columns.
    pub fn write_data(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.transfer(BusPhase::DataWrite, Level::High, byte)
    }

    /// Block for `ms` milliseconds on the bus delay source
    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Current protocol phase (always `Idle` between calls)
    pub fn phase(&self) -> BusPhase {
        self.phase
    }

    /// Chip currently selected, if any
    pub fn selected(&self) -> Option<Chip> {
        self.selected
    }

    /// Give the banks and the delay back
    pub fn release(self) -> (C, D, DL) {
        (self.control, self.data, self.delay)
    }

    fn transfer(&mut self, phase: BusPhase, rs: Level, byte: u8) -> Result<(), DisplayError> {
        if let Err(e) = self.poll_busy() {
            self.enter(BusPhase::Idle);
            return Err(e);
        }

        self.enter(phase);
        self.control.write_pin(self.pins.rs, rs);
        self.control.set_pin_low(self.pins.rw);
        self.data.write_port(byte);
        self.strobe();
        self.enter(BusPhase::Idle);
        Ok(())
    }

    /// Status-read loop shared by `select_chip`, `wait_ready` and transfers
    ///
    /// Leaves the phase at `BusyPoll`; the caller moves on from there.
    fn poll_busy(&mut self) -> Result<(), DisplayError> {
        self.enter(BusPhase::BusyPoll);

        self.data.set_port_direction(ALL_INPUT);
        self.control.set_pin_low(self.pins.rs);
        self.control.set_pin_high(self.pins.rw);

        let mut polls: u32 = 0;
        let result = loop {
            self.control.set_pin_high(self.pins.enable);
            self.delay.delay_ns(self.timing.enable_pulse_ns);
            let busy = self.data.is_pin_high(BUSY_FLAG_PIN);
            self.control.set_pin_low(self.pins.enable);
            self.delay.delay_ns(self.timing.enable_pulse_ns);

            if !busy {
                break Ok(());
            }
            polls = polls.saturating_add(1);
            if self.busy.exhausted(polls) {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "glcd: chip {} still busy after {} polls",
                    self.selected,
                    polls
                );
                break Err(DisplayError::BusyTimeout {
                    chip: self.selected,
                    polls,
                });
            }
        };

        self.data.set_port_direction(ALL_OUTPUT);
        self.control.set_pin_low(self.pins.rw);
        result
    }

    fn enter(&mut self, phase: BusPhase) {
        self.phase = phase;
        #[cfg(test)]
        self.trail.push(phase);
    }

    /// Latch the bus: enable high for the pulse width, then low
    fn strobe(&mut self) {
        self.control.set_pin_high(self.pins.enable);
        self.delay.delay_ns(self.timing.enable_pulse_ns);
        self.control.set_pin_low(self.pins.enable);
        self.delay.delay_ns(self.timing.enable_pulse_ns);
    }

    fn drive_select(&mut self, chip: Option<Chip>) {
        let idle = Level::from(self.chip_select.level(false));
        self.control.write_pin(self.pins.cs1, idle);
        self.control.write_pin(self.pins.cs2, idle);

        if let Some(chip) = chip {
            let active = Level::from(self.chip_select.level(true));
            let pin = match chip {
                Chip::Left => self.pins.cs1,
                Chip::Right => self.pins.cs2,
            };
            self.control.write_pin(pin, active);
        }
        self.selected = chip;
    }
}
