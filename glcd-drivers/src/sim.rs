//! Simulated dual-KS0108 panel for tests
//!
//! The simulator watches the pin traffic produced by the driver and decodes
//! it the way the controllers would: writes latch on the falling edge of
//! enable, status reads drive DB7 while enable is high. It keeps each
//! controller's RAM and address registers, a log of decoded transfers, and
//! a list of protocol violations (reads while the bus is driven, writes
//! while it is released).

extern crate std;

use core::cell::RefCell;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use glcd_core::command::Command;
use glcd_core::config::{ChipSelectPolarity, ControlPins, BUSY_FLAG_PIN};
use glcd_core::geometry::{Chip, CHIP_WIDTH, PAGES};
use glcd_hal::gpio::{Direction, Level, PinBank, ALL_OUTPUT};

/// One decoded write transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    Command { chip: Chip, byte: u8 },
    Data { chip: Chip, byte: u8 },
}

/// Controller state for one half
#[derive(Clone)]
pub struct ChipState {
    pub ram: [[u8; CHIP_WIDTH as usize]; PAGES as usize],
    pub page: u8,
    pub column: u8,
    pub start_line: u8,
    pub display_on: bool,
}

impl ChipState {
    fn new() -> Self {
        Self {
            // Power-on RAM is undefined; use a pattern the tests can spot
            ram: [[0xAA; CHIP_WIDTH as usize]; PAGES as usize],
            page: 0,
            column: 0,
            start_line: 0,
            display_on: false,
        }
    }
}

pub struct PanelSim {
    pins: ControlPins,
    polarity: ChipSelectPolarity,
    control: u8,
    control_ddr: u8,
    data_out: u8,
    data_ddr: u8,
    chips: [ChipState; 2],
    /// Status reads answered busy after each latched write
    busy_polls_per_write: u32,
    busy_remaining: u32,
    stuck: bool,
    status_busy: bool,
    now_ns: u64,
    enable_rose_at: u64,
    reset_low_at: Option<u64>,
    reset_released_at: Option<u64>,
    pub log: Vec<BusEvent>,
    pub violations: Vec<&'static str>,
    pub status_reads: usize,
    pub min_enable_width_ns: Option<u64>,
    pub reset_pulses_ns: Vec<u64>,
    pub settle_before_first_command_ns: Option<u64>,
}

impl PanelSim {
    pub fn new() -> Self {
        Self::with_wiring(ControlPins::default(), ChipSelectPolarity::ActiveHigh)
    }

    pub fn with_wiring(pins: ControlPins, polarity: ChipSelectPolarity) -> Self {
        Self {
            pins,
            polarity,
            control: 0,
            control_ddr: 0,
            data_out: 0,
            data_ddr: 0,
            chips: [ChipState::new(), ChipState::new()],
            busy_polls_per_write: 0,
            busy_remaining: 0,
            stuck: false,
            status_busy: false,
            now_ns: 0,
            enable_rose_at: 0,
            reset_low_at: None,
            reset_released_at: None,
            log: Vec::new(),
            violations: Vec::new(),
            status_reads: 0,
            min_enable_width_ns: None,
            reset_pulses_ns: Vec::new(),
            settle_before_first_command_ns: None,
        }
    }

    /// Keep the controllers busy for `polls` status reads after every write
    pub fn set_busy_polls(&mut self, polls: u32) {
        self.busy_polls_per_write = polls;
    }

    /// Make the controllers report busy forever
    pub fn set_stuck(&mut self, stuck: bool) {
        self.stuck = stuck;
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
        self.status_reads = 0;
    }

    pub fn chip(&self, chip: Chip) -> &ChipState {
        &self.chips[chip.index()]
    }

    /// Byte stored at a logical page and column
    pub fn pixel_column(&self, page: u8, column: u8) -> u8 {
        let chip = if column < CHIP_WIDTH {
            Chip::Left
        } else {
            Chip::Right
        };
        self.chips[chip.index()].ram[page as usize][(column % CHIP_WIDTH) as usize]
    }

    /// Logical page contents across both halves
    pub fn page_bytes(&self, page: u8) -> Vec<u8> {
        (0..128u8).map(|column| self.pixel_column(page, column)).collect()
    }

    pub fn data_bytes(&self) -> Vec<u8> {
        self.log
            .iter()
            .filter_map(|event| match event {
                BusEvent::Data { byte, .. } => Some(*byte),
                BusEvent::Command { .. } => None,
            })
            .collect()
    }

    pub fn commands(&self) -> Vec<(Chip, u8)> {
        self.log
            .iter()
            .filter_map(|event| match event {
                BusEvent::Command { chip, byte } => Some((*chip, *byte)),
                BusEvent::Data { .. } => None,
            })
            .collect()
    }

    pub fn data_direction(&self) -> u8 {
        self.data_ddr
    }

    pub fn control_level(&self, pin: u8) -> bool {
        self.control & (1 << pin) != 0
    }

    /// Chips whose select line is at the selecting level
    pub fn selected(&self) -> Vec<Chip> {
        let active = self.polarity.level(true);
        let mut chips = Vec::new();
        if self.control_level(self.pins.cs1) == active {
            chips.push(Chip::Left);
        }
        if self.control_level(self.pins.cs2) == active {
            chips.push(Chip::Right);
        }
        chips
    }

    fn advance(&mut self, ns: u64) {
        self.now_ns += ns;
    }

    fn set_control_pin(&mut self, pin: u8, high: bool) {
        let was_high = self.control_level(pin);
        if high {
            self.control |= 1 << pin;
        } else {
            self.control &= !(1 << pin);
        }

        if pin == self.pins.enable {
            match (was_high, high) {
                (false, true) => self.enable_rising(),
                (true, false) => self.enable_falling(),
                _ => {}
            }
        } else if pin == self.pins.reset {
            match (was_high, high) {
                (_, false) => {
                    if self.reset_low_at.is_none() {
                        self.reset_low_at = Some(self.now_ns);
                    }
                }
                (false, true) => {
                    if let Some(start) = self.reset_low_at.take() {
                        self.reset_pulses_ns.push(self.now_ns - start);
                        self.reset_released_at = Some(self.now_ns);
                        for chip in &mut self.chips {
                            chip.display_on = false;
                            chip.start_line = 0;
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn enable_rising(&mut self) {
        self.enable_rose_at = self.now_ns;
        let reading = self.control_level(self.pins.rw);
        let command = !self.control_level(self.pins.rs);
        if reading && command {
            self.status_reads += 1;
            self.status_busy = if self.stuck {
                true
            } else if self.busy_remaining > 0 {
                self.busy_remaining -= 1;
                true
            } else {
                false
            };
        }
    }

    fn enable_falling(&mut self) {
        let width = self.now_ns - self.enable_rose_at;
        self.min_enable_width_ns = Some(match self.min_enable_width_ns {
            Some(min) => min.min(width),
            None => width,
        });
        self.status_busy = false;

        if self.control_level(self.pins.rw) {
            return;
        }
        if self.data_ddr != ALL_OUTPUT {
            self.violations.push("write latched while data bus is released");
        }

        let byte = self.data_out;
        let is_data = self.control_level(self.pins.rs);
        if !is_data && self.settle_before_first_command_ns.is_none() {
            if let Some(released) = self.reset_released_at {
                self.settle_before_first_command_ns = Some(self.now_ns - released);
            }
        }

        for chip in self.selected() {
            let state = &mut self.chips[chip.index()];
            if is_data {
                state.ram[state.page as usize][state.column as usize] = byte;
                state.column = (state.column + 1) % CHIP_WIDTH;
                self.log.push(BusEvent::Data { chip, byte });
            } else {
                match Command::from_byte(byte) {
                    Some(Command::DisplayOn) => state.display_on = true,
                    Some(Command::DisplayOff) => state.display_on = false,
                    Some(Command::StartLine(line)) => state.start_line = line,
                    Some(Command::SetPage(page)) => state.page = page,
                    Some(Command::SetColumn(column)) => state.column = column,
                    None => self.violations.push("unknown command byte"),
                }
                self.log.push(BusEvent::Command { chip, byte });
            }
        }
        self.busy_remaining = self.busy_polls_per_write;
    }
}

/// Control bank view of the simulator
pub struct SimControl<'a>(pub &'a RefCell<PanelSim>);

/// Data bank view of the simulator
pub struct SimData<'a>(pub &'a RefCell<PanelSim>);

/// Delay that advances the simulator clock
pub struct SimDelay<'a>(pub &'a RefCell<PanelSim>);

impl PinBank for SimControl<'_> {
    fn set_port_direction(&mut self, mask: u8) {
        self.0.borrow_mut().control_ddr = mask;
    }

    fn set_pin_direction(&mut self, pin: u8, direction: Direction) {
        let mut sim = self.0.borrow_mut();
        match direction {
            Direction::Output => sim.control_ddr |= 1 << pin,
            Direction::Input => sim.control_ddr &= !(1 << pin),
        }
    }

    fn write_port(&mut self, value: u8) {
        let mut sim = self.0.borrow_mut();
        for pin in 0..8 {
            sim.set_control_pin(pin, value & (1 << pin) != 0);
        }
    }

    fn write_pin(&mut self, pin: u8, level: Level) {
        self.0.borrow_mut().set_control_pin(pin, level.is_high());
    }

    fn read_pin(&mut self, pin: u8) -> Level {
        Level::from(self.0.borrow().control_level(pin))
    }
}

impl PinBank for SimData<'_> {
    fn set_port_direction(&mut self, mask: u8) {
        self.0.borrow_mut().data_ddr = mask;
    }

    fn set_pin_direction(&mut self, pin: u8, direction: Direction) {
        let mut sim = self.0.borrow_mut();
        match direction {
            Direction::Output => sim.data_ddr |= 1 << pin,
            Direction::Input => sim.data_ddr &= !(1 << pin),
        }
    }

    fn write_port(&mut self, value: u8) {
        let mut sim = self.0.borrow_mut();
        if sim.data_ddr != ALL_OUTPUT {
            sim.violations.push("data driven while bus is released");
        }
        sim.data_out = value;
    }

    fn write_pin(&mut self, pin: u8, level: Level) {
        let mut sim = self.0.borrow_mut();
        if level.is_high() {
            sim.data_out |= 1 << pin;
        } else {
            sim.data_out &= !(1 << pin);
        }
    }

    fn read_pin(&mut self, pin: u8) -> Level {
        let mut sim = self.0.borrow_mut();
        if sim.data_ddr & (1 << pin) != 0 {
            sim.violations.push("data read while bus is driven");
        }
        let enable_high = sim.control_level(sim.pins.enable);
        let busy = pin == BUSY_FLAG_PIN && enable_high && sim.status_busy;
        Level::from(busy)
    }
}

impl DelayNs for SimDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().advance(ns as u64);
    }
}

/// Bank and delay views over one simulator
pub fn attach(sim: &RefCell<PanelSim>) -> (SimControl<'_>, SimData<'_>, SimDelay<'_>) {
    (SimControl(sim), SimData(sim), SimDelay(sim))
}
