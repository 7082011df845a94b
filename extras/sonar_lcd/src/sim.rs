//! Simulated sensor, timer and display controller for host tests.
//!
//! Time only moves when the echo line is sampled: every `is_high` call is
//! one tick. That keeps pulse widths exact and tests deterministic.

use core::{cell::RefCell, convert::Infallible};
use std::{rc::Rc, string::String, vec::Vec};

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, InputPin, OutputPin},
};

use crate::{
    distance::REFERENCE_TICK_SECONDS,
    lcd::{DataBus, Lcd},
    sensor::{Config, Hcsr04},
    timer::{PulseTimer, TickCount},
};

/// How the simulated sensor answers a trigger.
#[derive(Debug, Clone, Copy)]
pub enum EchoProfile {
    /// Never raises the echo line.
    Silent,
    /// Raises the echo line `delay` ticks after the trigger falls and holds
    /// it for `width` ticks.
    Pulse { delay: u64, width: u64 },
    /// Echo line high from power-on.
    StuckHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorEvent {
    TriggerHigh,
    TriggerLow,
    DelayNs(u32),
    TimerConfigured,
}

pub struct Scene {
    pub now: u64,
    pub profile: EchoProfile,
    pub timer_frozen: bool,
    pub events: Vec<SensorEvent>,
    triggered_at: Option<u64>,
    trigger_high: bool,
    timer_running: bool,
    timer_base: u64,
    timer_held: u64,
}

impl Scene {
    pub fn trigger_high(&self) -> bool {
        self.trigger_high
    }

    fn echo_level(&self) -> bool {
        match self.profile {
            EchoProfile::Silent => false,
            EchoProfile::StuckHigh => true,
            EchoProfile::Pulse { delay, width } => match self.triggered_at {
                Some(t) => self.now >= t + delay && self.now - (t + delay) < width,
                None => false,
            },
        }
    }

    fn elapsed(&self) -> u64 {
        if self.timer_frozen {
            return 0;
        }
        let running = if self.timer_running {
            self.now - self.timer_base
        } else {
            0
        };
        self.timer_held + running
    }
}

pub type SharedScene = Rc<RefCell<Scene>>;

pub fn scene(profile: EchoProfile) -> SharedScene {
    Rc::new(RefCell::new(Scene {
        now: 0,
        profile,
        timer_frozen: false,
        events: Vec::new(),
        triggered_at: None,
        trigger_high: false,
        timer_running: false,
        timer_base: 0,
        timer_held: 0,
    }))
}

pub struct SimTrigger(pub SharedScene);

impl ErrorType for SimTrigger {
    type Error = Infallible;
}

impl OutputPin for SimTrigger {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut s = self.0.borrow_mut();
        s.trigger_high = true;
        s.events.push(SensorEvent::TriggerHigh);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut s = self.0.borrow_mut();
        if s.trigger_high {
            s.triggered_at = Some(s.now);
        }
        s.trigger_high = false;
        s.events.push(SensorEvent::TriggerLow);
        Ok(())
    }
}

pub struct SimEcho(pub SharedScene);

impl ErrorType for SimEcho {
    type Error = Infallible;
}

impl InputPin for SimEcho {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let mut s = self.0.borrow_mut();
        let level = s.echo_level();
        s.now += 1;
        Ok(level)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

pub struct SimTimer(pub SharedScene);

impl PulseTimer for SimTimer {
    const TICK_SECONDS: f64 = REFERENCE_TICK_SECONDS;

    fn configure(&mut self) {
        let mut s = self.0.borrow_mut();
        s.timer_running = false;
        s.timer_held = 0;
        s.events.push(SensorEvent::TimerConfigured);
    }

    fn start(&mut self) {
        let mut s = self.0.borrow_mut();
        if !s.timer_running {
            s.timer_running = true;
            s.timer_base = s.now;
        }
    }

    fn stop(&mut self) {
        let mut s = self.0.borrow_mut();
        if s.timer_running {
            s.timer_held += s.now - s.timer_base;
            s.timer_running = false;
        }
    }

    fn reset(&mut self) {
        let mut s = self.0.borrow_mut();
        s.timer_held = 0;
        s.timer_base = s.now;
    }

    fn read(&self) -> TickCount {
        let elapsed = self.0.borrow().elapsed();
        TickCount::try_from(elapsed).unwrap_or(TickCount::MAX)
    }

    fn overflowed(&self) -> bool {
        self.0.borrow().elapsed() > u64::from(TickCount::MAX)
    }
}

pub struct SimDelay(pub SharedScene);

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().events.push(SensorEvent::DelayNs(ns));
    }
}

pub type SimSensor = Hcsr04<SimTrigger, SimEcho, SimTimer, SimDelay>;

pub fn sensor(scene: &SharedScene, config: Config) -> SimSensor {
    Hcsr04::new(
        SimTrigger(scene.clone()),
        SimEcho(scene.clone()),
        SimTimer(scene.clone()),
        SimDelay(scene.clone()),
        config,
    )
}

/// A transaction the simulated controller latched, or a delay between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    Command(u8),
    Data(u8),
    DelayNs(u32),
}

/// HD44780 model: latches the bus on the falling edge of E.
pub struct Panel {
    pub log: Vec<BusEvent>,
    rs: bool,
    rw: bool,
    en: bool,
    data: u8,
    address: u8,
    ddram: [u8; 128],
}

impl Panel {
    fn latch(&mut self) {
        if self.rw {
            return;
        }
        if self.rs {
            self.ddram[usize::from(self.address)] = self.data;
            self.address = (self.address + 1) & 0x7F;
            self.log.push(BusEvent::Data(self.data));
        } else {
            self.execute(self.data);
            self.log.push(BusEvent::Command(self.data));
        }
    }

    fn execute(&mut self, code: u8) {
        if code & 0x80 != 0 {
            self.address = code & 0x7F;
        } else if code == 0x01 {
            self.ddram = [b' '; 128];
            self.address = 0;
        }
    }

    /// The 16 visible cells of a 1-based row.
    pub fn row(&self, row: u8) -> String {
        let base = if row == 1 { 0x00 } else { 0x40 };
        self.ddram[base..base + 16]
            .iter()
            .map(|&b| char::from(b))
            .collect()
    }

    pub fn commands(&self) -> Vec<u8> {
        self.log
            .iter()
            .filter_map(|e| match e {
                BusEvent::Command(code) => Some(*code),
                _ => None,
            })
            .collect()
    }
}

pub type SharedPanel = Rc<RefCell<Panel>>;

pub fn panel() -> SharedPanel {
    Rc::new(RefCell::new(Panel {
        log: Vec::new(),
        rs: false,
        rw: false,
        en: false,
        data: 0,
        address: 0,
        // power-on contents are undefined; fill with junk so clears are visible
        ddram: [b'#'; 128],
    }))
}

#[derive(Clone, Copy)]
enum Line {
    Rs,
    Rw,
    En,
}

pub struct SimLine {
    line: Line,
    panel: SharedPanel,
}

impl SimLine {
    fn drive(&mut self, level: bool) {
        let mut p = self.panel.borrow_mut();
        match self.line {
            Line::Rs => p.rs = level,
            Line::Rw => p.rw = level,
            Line::En => {
                let falling = p.en && !level;
                p.en = level;
                if falling {
                    p.latch();
                }
            }
        }
    }
}

impl ErrorType for SimLine {
    type Error = Infallible;
}

impl OutputPin for SimLine {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }
}

pub struct SimBus(pub SharedPanel);

impl DataBus for SimBus {
    type Error = Infallible;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.0.borrow_mut().data = byte;
        Ok(())
    }
}

pub struct PanelDelay(pub SharedPanel);

impl DelayNs for PanelDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().log.push(BusEvent::DelayNs(ns));
    }
}

pub type SimLcd = Lcd<SimLine, SimBus, PanelDelay>;

pub fn lcd(panel: &SharedPanel) -> SimLcd {
    let line = |line| SimLine {
        line,
        panel: panel.clone(),
    };
    Lcd::new(
        line(Line::Rs),
        line(Line::Rw),
        line(Line::En),
        SimBus(panel.clone()),
        PanelDelay(panel.clone()),
    )
}
