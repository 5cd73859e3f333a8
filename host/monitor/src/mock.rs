use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use common::{AdcBase, AdcError, ClockBase, DelayBase, SensorChannel, SerialError, SerialTxBase};
use math::Resolution;

/// Simulated monotonic clock shared between the mocks of a test.
/// Every `now()` advances it by `tick`, which lets busy loops make progress.
#[derive(Clone)]
pub struct SimClock {
    now: Rc<Cell<Duration>>,
    tick: Duration,
}

impl SimClock {
    pub fn new() -> Self {
        Self::with_tick(Duration::ZERO)
    }

    pub fn with_tick(tick: Duration) -> Self {
        Self {
            now: Rc::new(Cell::new(Duration::ZERO)),
            tick,
        }
    }

    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }
}

impl ClockBase for SimClock {
    fn now(&self) -> Duration {
        let now = self.now.get();
        self.advance(self.tick);
        now
    }
}

pub struct SimDelay {
    clock: SimClock,
    pub delays: Rc<RefCell<Vec<Duration>>>,
}

impl SimDelay {
    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            delays: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl DelayBase for SimDelay {
    fn delay(&mut self, duration: Duration) {
        self.delays.borrow_mut().push(duration);
        self.clock.advance(duration);
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AdcEvent {
    Select(SensorChannel),
    Start,
    Stop,
}

pub struct AdcState {
    pub moisture: u16,
    pub thermistor: u16,
    pub selected: Option<SensorChannel>,
    pub running: bool,
    pub busy_polls: u32,
    pub polls: u32,
    pub hang: Option<SensorChannel>,
    pub fault: Option<AdcError>,
    pub fail_select: bool,
    pub events: Vec<AdcEvent>,
}

pub struct MockAdc {
    state: Rc<RefCell<AdcState>>,
    pending: u32,
}

impl MockAdc {
    pub fn new(moisture: u16, thermistor: u16) -> (Self, Rc<RefCell<AdcState>>) {
        let state = Rc::new(RefCell::new(AdcState {
            moisture,
            thermistor,
            selected: None,
            running: false,
            busy_polls: 0,
            polls: 0,
            hang: None,
            fault: None,
            fail_select: false,
            events: Vec::new(),
        }));
        (
            Self {
                state: state.clone(),
                pending: 0,
            },
            state,
        )
    }
}

impl AdcBase for MockAdc {
    fn resolution(&self) -> Resolution {
        Resolution::BITS12
    }

    fn select(&mut self, channel: SensorChannel) -> Result<(), AdcError> {
        let mut state = self.state.borrow_mut();
        if state.fail_select {
            return Err(AdcError::ChannelConfig);
        }
        // switching channel while a conversion runs is a caller bug
        assert!(!state.running);
        state.selected = Some(channel);
        state.events.push(AdcEvent::Select(channel));
        Ok(())
    }

    fn start(&mut self) {
        let mut state = self.state.borrow_mut();
        state.running = true;
        state.events.push(AdcEvent::Start);
        self.pending = state.busy_polls;
    }

    fn poll(&mut self) -> nb::Result<u16, AdcError> {
        let mut state = self.state.borrow_mut();
        assert!(state.running);
        state.polls += 1;
        if let Some(error) = state.fault {
            return Err(nb::Error::Other(error));
        }
        if state.hang.is_some() && state.hang == state.selected {
            return Err(nb::Error::WouldBlock);
        }
        if self.pending > 0 {
            self.pending -= 1;
            return Err(nb::Error::WouldBlock);
        }
        match state.selected {
            Some(SensorChannel::Moisture) => Ok(state.moisture),
            Some(SensorChannel::Thermistor) => Ok(state.thermistor),
            None => Err(nb::Error::Other(AdcError::ChannelConfig)),
        }
    }

    fn stop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.running = false;
        state.events.push(AdcEvent::Stop);
    }
}

/// Records every transmitted line with the simulated time it was sent at.
pub struct MockSerial {
    clock: SimClock,
    pub lines: Rc<RefCell<Vec<(Duration, String)>>>,
    pub fail: bool,
}

impl MockSerial {
    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            lines: Rc::new(RefCell::new(Vec::new())),
            fail: false,
        }
    }
}

impl SerialTxBase for MockSerial {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        if self.fail {
            return Err(SerialError::Write);
        }
        let line = String::from_utf8(bytes.to_vec()).map_err(|_| SerialError::Write)?;
        self.lines.borrow_mut().push((self.clock.now(), line));
        Ok(())
    }
}
