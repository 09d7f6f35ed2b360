use crate::command::PickCommand;
use crate::utils::alpha::AlphaCodec;

/// Fast-select mode of the input line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FastSelectState {
    /// Input is empty
    #[default]
    Idle,
    /// Typing a filter
    Filtering,
    /// Fast-select token typed; row codes are being entered
    Armed,
}

/// Outcome of one resolution step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    /// New armed state, only when it flipped in this step
    pub arm_changed: Option<bool>,
    /// 1-based row addressed by a complete code
    pub row: Option<usize>,
}

/// Tracks fast-select mode across refreshes and resolves row codes
#[derive(Debug, Default)]
pub struct FastSelectResolver {
    state: FastSelectState,
}

impl FastSelectResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FastSelectState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == FastSelectState::Armed
    }

    /// Advance the state machine for `command` and resolve its code.
    ///
    /// A code resolves only when it has exactly the codec's width and
    /// addresses an existing row; shorter or longer codes are still being
    /// typed and are ignored.
    pub fn resolve<C: PickCommand>(
        &mut self,
        command: &C,
        codec: &AlphaCodec,
        row_count: usize,
    ) -> Resolution {
        let was_armed = self.is_armed();

        self.state = if command.is_blank() {
            FastSelectState::Idle
        } else if command.is_fast_select() {
            FastSelectState::Armed
        } else {
            FastSelectState::Filtering
        };

        let arm_changed = (was_armed != self.is_armed()).then_some(self.is_armed());

        let row = command
            .fast_select_code()
            .and_then(|code| codec.decode(code))
            .filter(|row| *row <= row_count);

        if let Some(row) = row {
            log::trace!("fast select resolved row {}", row);
        }

        Resolution { arm_changed, row }
    }
}
