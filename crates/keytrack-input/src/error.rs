use thiserror::Error;

use crate::event::KeyCode;

/// Events refused by a keyboard running in strict mode.
///
/// In the default permissive mode none of these are raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Unrecognized event type for {code}")]
    UnrecognizedEvent { code: KeyCode },

    #[error("Out-of-order event for {code}: {time_us}us precedes last accepted {last_us}us")]
    OutOfOrder {
        code: KeyCode,
        time_us: i64,
        last_us: i64,
    },
}
