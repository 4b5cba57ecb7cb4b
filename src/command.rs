//! Effect control over a message queue
//!
//! Network handlers and other code running outside the tick context post
//! [`EffectCommand`]s instead of touching the scheduler. The tick context
//! drains the queue with a [`CommandProcessor`] right before the effect
//! tick, so transitions and ticks never overlap.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::effect::{EffectId, EffectParams, EffectSlot};
use crate::scheduler::{EffectScheduler, SchedulerError};
use crate::strip::LedStrip;
use crate::timer::TickTimer;

/// Request to change the running effect
#[derive(Debug, Clone)]
pub enum EffectCommand {
    /// Start a ready-made effect
    Start(EffectSlot),
    /// Start an effect by id with the given color parameters
    StartById(EffectId, EffectParams),
    /// Start an effect by raw id, as received from the network
    StartRaw(u8, EffectParams),
    /// Stop the running effect
    Stop,
}

/// Error returned when the queue is full; hands the command back.
#[derive(Debug, Clone)]
pub struct TrySendError(pub EffectCommand);

/// Bounded command queue guarded by a critical section
pub struct CommandChannel<const SIZE: usize> {
    queue: Mutex<RefCell<Deque<EffectCommand, SIZE>>>,
}

impl<const SIZE: usize> CommandChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle. Any number of senders may coexist.
    pub const fn sender(&self) -> CommandSender<'_, SIZE> {
        CommandSender { channel: self }
    }

    /// Get a receiver handle for the tick context
    pub const fn receiver(&self) -> CommandReceiver<'_, SIZE> {
        CommandReceiver { channel: self }
    }

    fn push(&self, command: EffectCommand) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .push_back(command)
                .map_err(TrySendError)
        })
    }

    fn pop(&self) -> Option<EffectCommand> {
        critical_section::with(|cs| self.queue.borrow(cs).borrow_mut().pop_front())
    }
}

impl<const SIZE: usize> Default for CommandChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Posting side of a [`CommandChannel`]
#[derive(Clone, Copy)]
pub struct CommandSender<'a, const SIZE: usize> {
    channel: &'a CommandChannel<SIZE>,
}

impl<const SIZE: usize> CommandSender<'_, SIZE> {
    /// Queue a command without blocking
    pub fn try_send(&self, command: EffectCommand) -> Result<(), TrySendError> {
        self.channel.push(command)
    }

    pub fn start(&self, effect: impl Into<EffectSlot>) -> Result<(), TrySendError> {
        self.try_send(EffectCommand::Start(effect.into()))
    }

    pub fn stop(&self) -> Result<(), TrySendError> {
        self.try_send(EffectCommand::Stop)
    }
}

/// Draining side of a [`CommandChannel`]
#[derive(Clone, Copy)]
pub struct CommandReceiver<'a, const SIZE: usize> {
    channel: &'a CommandChannel<SIZE>,
}

impl<const SIZE: usize> CommandReceiver<'_, SIZE> {
    /// Take the oldest queued command, if any
    pub fn try_receive(&self) -> Option<EffectCommand> {
        self.channel.pop()
    }
}

/// Applies queued commands to a scheduler
pub struct CommandProcessor<'a, const SIZE: usize> {
    commands: CommandReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> CommandProcessor<'a, SIZE> {
    pub const fn new(commands: CommandReceiver<'a, SIZE>) -> Self {
        Self { commands }
    }

    /// Apply every queued command in order (non-blocking)
    ///
    /// A rejected command is logged by the scheduler and skipped; the rest
    /// of the queue is still applied. Returns the number of applied commands.
    pub fn process_pending<S: LedStrip, T: TickTimer>(
        &mut self,
        scheduler: &mut EffectScheduler<S, T>,
    ) -> usize {
        let mut applied = 0;
        while let Some(command) = self.commands.try_receive() {
            if apply(scheduler, command).is_ok() {
                applied += 1;
            }
        }
        applied
    }
}

fn apply<S: LedStrip, T: TickTimer>(
    scheduler: &mut EffectScheduler<S, T>,
    command: EffectCommand,
) -> Result<(), SchedulerError> {
    match command {
        EffectCommand::Start(effect) => scheduler.start(effect),
        EffectCommand::StartById(id, params) => scheduler.start(id.to_slot(params)),
        EffectCommand::StartRaw(id, params) => scheduler.start_raw(id, params)?,
        EffectCommand::Stop => {
            scheduler.stop();
        }
    }
    Ok(())
}
