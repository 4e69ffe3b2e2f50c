//! Messages exchanged between the countdown widget and the bubbletea runtime.

use bubbletea_rs::Msg;

/// Redraw tick while a countdown is running.
///
/// Carries the widget id and the tag of the countdown that scheduled it, so
/// ticks left over from a cancelled or finished countdown are dropped.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Id of the widget that scheduled the tick.
    pub id: i64,
    pub(super) tag: i64,
}

/// Sent once when a countdown reaches zero.
///
/// Hosts typically react by playing a completion cue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionMsg {
    /// Id of the widget whose countdown finished.
    pub id: i64,
}

impl From<TickMsg> for Msg {
    fn from(msg: TickMsg) -> Self {
        Box::new(msg) as Msg
    }
}

impl From<CompletionMsg> for Msg {
    fn from(msg: CompletionMsg) -> Self {
        Box::new(msg) as Msg
    }
}
