//! # Cooperative Shutdown
//!
//! A one-shot broadcast flag built on [`tokio::sync::watch`].
//!
//! - **Single writer**: only the [`ShutdownSignal`] can flip the flag, and the table owns it.
//! - **Many readers**: every philosopher gets its own [`ShutdownListener`] clone.
//! - **One-shot**: the flag goes `false → true` once and is never reset.
//!
//! Listeners only *look* at the flag at their loop checkpoint. Nothing is ever
//! interrupted, so a philosopher cannot be torn down while holding a fork.

use tokio::sync::watch;
use tracing::debug;

/// Creates a connected signal/listener pair.
pub fn channel() -> (ShutdownSignal, ShutdownListener) {
    let (sender, receiver) = watch::channel(false);
    (ShutdownSignal { sender }, ShutdownListener { receiver })
}

/// The writer half. Not `Clone`: there is exactly one writer.
#[derive(Debug)]
pub struct ShutdownSignal {
    sender: watch::Sender<bool>,
}

impl ShutdownSignal {
    /// Raises the flag. Returns `true` only for the call that actually flipped it.
    pub fn trigger(&self) -> bool {
        let flipped = self.sender.send_if_modified(|stop| {
            if *stop {
                false
            } else {
                *stop = true;
                true
            }
        });
        debug!(flipped, "Shutdown triggered");
        flipped
    }

    pub fn is_triggered(&self) -> bool {
        *self.sender.borrow()
    }

    /// Hands out another reader.
    pub fn listener(&self) -> ShutdownListener {
        ShutdownListener {
            receiver: self.sender.subscribe(),
        }
    }
}

/// The reader half, checked at the top of each philosopher loop.
#[derive(Debug, Clone)]
pub struct ShutdownListener {
    receiver: watch::Receiver<bool>,
}

impl ShutdownListener {
    pub fn is_triggered(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once the flag is raised (or the signal is gone).
    pub async fn triggered(&mut self) {
        // An error means the writer was dropped; nobody can raise the flag any more.
        let _ = self.receiver.wait_for(|stop| *stop).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_is_one_shot() {
        let (signal, listener) = channel();
        assert!(!listener.is_triggered());

        assert!(signal.trigger());
        assert!(!signal.trigger());

        assert!(signal.is_triggered());
        assert!(listener.is_triggered());
    }

    #[test]
    fn test_every_listener_observes_the_flag() {
        let (signal, first) = channel();
        let second = first.clone();
        let third = signal.listener();

        signal.trigger();

        assert!(first.is_triggered());
        assert!(second.is_triggered());
        assert!(third.is_triggered());
    }

    #[tokio::test]
    async fn test_triggered_wakes_waiting_listener() {
        let (signal, mut listener) = channel();
        let waiter = tokio::spawn(async move {
            listener.triggered().await;
            listener.is_triggered()
        });

        tokio::task::yield_now().await;
        signal.trigger();

        assert!(waiter.await.unwrap());
    }
}
