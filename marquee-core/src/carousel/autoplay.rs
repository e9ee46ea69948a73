use std::time::Duration;

use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::messages::CarouselMessage;

/// Background ticker that feeds `Tick` messages to a carousel.
///
/// The first tick arrives one full period after start. A tick is dropped
/// when the previous one has not been received yet, so a consumer that
/// falls behind sees at most one pending tick. Dropping the timer cancels it.
///
/// `period` must be non-zero.
#[derive(Debug)]
pub struct AutoplayTimer {
    epoch: u64,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl AutoplayTimer {
    pub fn spawn(
        period: Duration,
        epoch: u64,
        tx: mpsc::Sender<CarouselMessage>,
    ) -> Self {
        let token = CancellationToken::new();
        let child = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = child.cancelled() => break,
                    _ = ticker.tick() => {
                        trace!(epoch, "autoplay tick");
                        match tx.try_send(CarouselMessage::Tick { epoch }) {
                            Ok(()) => {}
                            Err(TrySendError::Full(_)) => {
                                trace!(epoch, "previous tick pending, skipped");
                            }
                            Err(TrySendError::Closed(_)) => break,
                        }
                    }
                }
            }
        });

        Self {
            epoch,
            token,
            handle,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for AutoplayTimer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period_with_epoch() {
        let (tx, mut rx) = mpsc::channel(1);
        let started = Instant::now();
        let _timer = AutoplayTimer::spawn(Duration::from_secs(5), 7, tx);

        assert_eq!(rx.recv().await, Some(CarouselMessage::Tick { epoch: 7 }));
        assert!(started.elapsed() >= Duration::from_secs(5));

        assert_eq!(rx.recv().await, Some(CarouselMessage::Tick { epoch: 7 }));
        assert!(started.elapsed() >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_timer_stops_ticks() {
        let (tx, mut rx) = mpsc::channel(1);
        let timer = AutoplayTimer::spawn(Duration::from_secs(5), 0, tx);
        drop(timer);

        // Sender lives in the task; once it exits the channel closes.
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_receiver_sees_one_pending_tick() {
        let (tx, mut rx) = mpsc::channel(1);
        let _timer = AutoplayTimer::spawn(Duration::from_secs(5), 3, tx);

        tokio::time::sleep(Duration::from_millis(22_500)).await;

        assert_eq!(rx.try_recv(), Ok(CarouselMessage::Tick { epoch: 3 }));
        assert!(rx.try_recv().is_err());
    }
}
