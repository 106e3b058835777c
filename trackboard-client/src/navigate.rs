//! Navigation capability implementations

use trackboard_core::Navigator;

/// Navigator that does nothing
///
/// Default for embedders that inspect response statuses themselves and have
/// no login destination to jump to.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn to_login(&self) {}
}
