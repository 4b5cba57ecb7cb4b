#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use ring_indicator_effects::color::{OFF, Rgb};
use ring_indicator_effects::{
    Duration, EffectScheduler, OutputDriver, PixelBuffer, RingTopology, SchedulerConfig,
    TickTimer,
};

pub const LED_COUNT: usize = 25;

/// Something the hardware side observed
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Arm(Duration),
    Disarm,
    Show(Vec<Rgb>),
}

pub type Journal = Rc<RefCell<Vec<Event>>>;

/// Output driver recording every flushed frame
#[derive(Default)]
pub struct RecordingOutput {
    journal: Journal,
}

impl RecordingOutput {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }

    pub fn flushes(&self) -> usize {
        self.journal
            .borrow()
            .iter()
            .filter(|event| matches!(event, Event::Show(_)))
            .count()
    }
}

impl OutputDriver for RecordingOutput {
    fn write(&mut self, colors: &[Rgb]) {
        self.journal.borrow_mut().push(Event::Show(colors.to_vec()));
    }
}

/// Timer recording arm/disarm calls
#[derive(Default)]
pub struct MockTimer {
    journal: Journal,
    period: Option<Duration>,
}

impl MockTimer {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            period: None,
        }
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }
}

impl TickTimer for MockTimer {
    fn arm(&mut self, period: Duration) {
        self.period = Some(period);
        self.journal.borrow_mut().push(Event::Arm(period));
    }

    fn disarm(&mut self) {
        self.period = None;
        self.journal.borrow_mut().push(Event::Disarm);
    }
}

pub type Strip = PixelBuffer<RecordingOutput, LED_COUNT>;
pub type Scheduler = EffectScheduler<Strip, MockTimer>;

pub fn strip(journal: &Journal) -> Strip {
    PixelBuffer::new(RecordingOutput::new(journal.clone()))
}

pub fn scheduler() -> (Scheduler, Journal) {
    let journal = Journal::default();
    let scheduler = EffectScheduler::new(
        strip(&journal),
        MockTimer::new(journal.clone()),
        RingTopology::reference(),
        SchedulerConfig::default(),
    )
    .unwrap();
    (scheduler, journal)
}

pub fn is_all_off(frame: &[Rgb]) -> bool {
    frame.iter().all(|&pixel| pixel == OFF)
}

pub fn lit(frame: &[Rgb]) -> Vec<usize> {
    frame
        .iter()
        .enumerate()
        .filter(|(_, pixel)| **pixel != OFF)
        .map(|(index, _)| index)
        .collect()
}
