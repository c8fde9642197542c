use std::sync::Arc;

use egui::Color32;
use futures::channel::oneshot;
use futures::future::{self, BoxFuture};
use futures::FutureExt;
use parking_lot::Mutex;

use crate::error::PickError;

pub type PickResult = Result<Color32, PickError>;

/// Future resolved when the user picks a color or gives up
pub type PickFuture = BoxFuture<'static, PickResult>;

/// Asynchronous color-sampling capability.
pub trait Eyedropper {
    /// Feature detection. The picker control is only enabled when this is true.
    fn is_available(&self) -> bool {
        true
    }

    /// Start a pick. The returned future resolves once the user selects a
    /// pixel (`Ok`) or cancels (`Err`).
    fn open(&mut self) -> PickFuture;
}

/// Stand-in for platforms without any eyedropper.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEyedropper;

impl Eyedropper for NoEyedropper {
    fn is_available(&self) -> bool {
        false
    }

    fn open(&mut self) -> PickFuture {
        future::ready(Err(PickError::Unavailable)).boxed()
    }
}

/// Eyedropper that samples the canvas under the next primary click.
///
/// Clones share the same armed pick: the session holds one clone to open
/// picks, the canvas view holds another to answer them.
#[derive(Debug, Default, Clone)]
pub struct CanvasEyedropper {
    armed: Arc<Mutex<Option<oneshot::Sender<PickResult>>>>,
}

impl CanvasEyedropper {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a pick is waiting for a click.
    pub fn is_armed(&self) -> bool {
        self.armed
            .lock()
            .as_ref()
            .is_some_and(|sender| !sender.is_canceled())
    }

    /// Answer the armed pick with a sampled color.
    /// Returns false if nothing was waiting.
    pub fn sample(&self, color: Color32) -> bool {
        self.resolve(Ok(color))
    }

    /// Abandon the armed pick (Escape).
    pub fn cancel(&self) -> bool {
        self.resolve(Err(PickError::Cancelled))
    }

    fn resolve(&self, result: PickResult) -> bool {
        match self.armed.lock().take() {
            Some(sender) => sender.send(result).is_ok(),
            None => false,
        }
    }
}

impl Eyedropper for CanvasEyedropper {
    fn open(&mut self) -> PickFuture {
        let (sender, receiver) = oneshot::channel();
        // Replacing an older sender drops it, which cancels that pick.
        *self.armed.lock() = Some(sender);
        receiver
            .map(|result| result.unwrap_or(Err(PickError::Cancelled)))
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_sample_resolves_open_pick() {
        let mut eyedropper = CanvasEyedropper::new();
        let handle = eyedropper.clone();
        let pick = eyedropper.open();

        assert!(handle.is_armed());
        assert!(handle.sample(Color32::GREEN));
        assert!(!handle.is_armed());
        assert_eq!(block_on(pick), Ok(Color32::GREEN));
    }

    #[test]
    fn test_cancel_rejects_open_pick() {
        let mut eyedropper = CanvasEyedropper::new();
        let pick = eyedropper.open();
        assert!(eyedropper.cancel());
        assert_eq!(block_on(pick), Err(PickError::Cancelled));
    }

    #[test]
    fn test_reopening_cancels_previous_pick() {
        let mut eyedropper = CanvasEyedropper::new();
        let first = eyedropper.open();
        let second = eyedropper.open();

        assert_eq!(block_on(first), Err(PickError::Cancelled));
        assert!(eyedropper.sample(Color32::RED));
        assert_eq!(block_on(second), Ok(Color32::RED));
    }

    #[test]
    fn test_sample_without_pick_is_ignored() {
        let eyedropper = CanvasEyedropper::new();
        assert!(!eyedropper.is_armed());
        assert!(!eyedropper.sample(Color32::RED));
    }

    #[test]
    fn test_no_eyedropper_is_unavailable() {
        let mut eyedropper = NoEyedropper;
        assert!(!eyedropper.is_available());
        assert_eq!(block_on(eyedropper.open()), Err(PickError::Unavailable));
    }
}
