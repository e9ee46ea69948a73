use std::time::Duration;

use marquee_model::MovieSummary;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{
    autoplay::AutoplayTimer, messages::CarouselMessage, state::CarouselState,
};

/// Hero carousel: one authoritative index driven by autoplay, buttons, dots
/// and arrow keys alike.
///
/// Autoplay runs only while mounted with a non-empty list and a non-zero
/// period. A change in list
/// length restarts the timer under a new epoch so ticks computed against the
/// old length are dropped.
#[derive(Debug)]
pub struct HeroCarousel {
    state: CarouselState<MovieSummary>,
    period: Duration,
    mounted: bool,
    epoch: u64,
    autoplay: Option<AutoplayTimer>,
    tick_tx: mpsc::Sender<CarouselMessage>,
    tick_rx: mpsc::Receiver<CarouselMessage>,
}

impl HeroCarousel {
    pub fn new(period: Duration) -> Self {
        if period.is_zero() {
            warn!("autoplay interval is zero, hero autoplay disabled");
        }
        let (tick_tx, tick_rx) = mpsc::channel(1);
        Self {
            state: CarouselState::default(),
            period,
            mounted: false,
            epoch: 0,
            autoplay: None,
            tick_tx,
            tick_rx,
        }
    }

    pub fn state(&self) -> &CarouselState<MovieSummary> {
        &self.state
    }

    pub fn current(&self) -> Option<&MovieSummary> {
        self.state.current()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_some()
    }

    /// Start autoplay (if there is anything to show).
    pub fn mount(&mut self) {
        self.mounted = true;
        self.sync_autoplay();
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.stop_autoplay();
    }

    pub fn set_items(&mut self, items: Vec<MovieSummary>) {
        let previous_len = self.state.len();
        self.state.set_items(items);
        if self.state.len() != previous_len {
            debug!(
                from = previous_len,
                to = self.state.len(),
                "hero list size changed, restarting autoplay"
            );
            self.stop_autoplay();
        }
        self.sync_autoplay();
    }

    /// Apply a navigation message. Ticks from a stale epoch are ignored.
    pub fn update(&mut self, message: CarouselMessage) -> bool {
        if let CarouselMessage::Tick { epoch } = message {
            if !self.mounted || epoch != self.epoch || self.autoplay.is_none() {
                debug!(
                    epoch,
                    current = self.epoch,
                    "dropping stale autoplay tick"
                );
                return false;
            }
        }
        self.state.apply(message)
    }

    /// Wait for the next autoplay tick. Pending forever while autoplay is off.
    pub async fn next_tick(&mut self) -> Option<CarouselMessage> {
        self.tick_rx.recv().await
    }

    fn sync_autoplay(&mut self) {
        let wanted =
            self.mounted && !self.state.is_empty() && !self.period.is_zero();
        match (wanted, self.autoplay.is_some()) {
            (true, false) => {
                self.epoch += 1;
                self.autoplay = Some(AutoplayTimer::spawn(
                    self.period,
                    self.epoch,
                    self.tick_tx.clone(),
                ));
            }
            (false, true) => self.stop_autoplay(),
            _ => {}
        }
    }

    fn stop_autoplay(&mut self) {
        if let Some(timer) = self.autoplay.take() {
            timer.cancel();
        }
        while self.tick_rx.try_recv().is_ok() {}
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;
    use crate::carousel::messages::ArrowKey;

    const PERIOD: Duration = Duration::from_secs(5);

    fn movies(count: u64) -> Vec<MovieSummary> {
        (0..count)
            .map(|id| MovieSummary::new(id, format!("Movie {id}")))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_advances_after_each_period() {
        let mut hero = HeroCarousel::new(PERIOD);
        hero.set_items(movies(3));
        assert!(!hero.is_autoplaying());
        hero.mount();
        assert!(hero.is_autoplaying());

        let started = Instant::now();
        for expected in [1, 2, 0] {
            let tick = hero.next_tick().await.expect("tick");
            assert!(hero.update(tick));
            assert_eq!(hero.state().current_index(), Some(expected));
        }
        assert!(started.elapsed() >= PERIOD * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_list_never_autoplays() {
        let mut hero = HeroCarousel::new(PERIOD);
        hero.mount();
        assert!(!hero.is_autoplaying());

        let waited =
            tokio::time::timeout(PERIOD * 4, hero.next_tick()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn size_change_restarts_timer_and_drops_old_ticks() {
        let mut hero = HeroCarousel::new(PERIOD);
        hero.mount();
        hero.set_items(movies(5));
        let first_epoch = hero.epoch;

        hero.set_items(movies(2));
        assert_ne!(hero.epoch, first_epoch);
        assert!(!hero.update(CarouselMessage::Tick { epoch: first_epoch }));

        let tick = hero.next_tick().await.expect("tick");
        assert_eq!(tick, CarouselMessage::Tick { epoch: hero.epoch });
        assert!(hero.update(tick));
        assert_eq!(hero.state().current_index(), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn same_size_refresh_keeps_timer() {
        let mut hero = HeroCarousel::new(PERIOD);
        hero.mount();
        hero.set_items(movies(4));
        let epoch = hero.epoch;
        hero.set_items(movies(4));
        assert_eq!(hero.epoch, epoch);
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_cancels_autoplay() {
        let mut hero = HeroCarousel::new(PERIOD);
        hero.set_items(movies(3));
        hero.mount();
        let epoch = hero.epoch;
        hero.unmount();

        assert!(!hero.is_autoplaying());
        let waited =
            tokio::time::timeout(PERIOD * 3, hero.next_tick()).await;
        assert!(waited.is_err());
        assert!(!hero.update(CarouselMessage::Tick { epoch }));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_disables_autoplay() {
        let mut hero = HeroCarousel::new(Duration::ZERO);
        hero.set_items(movies(3));
        hero.mount();

        assert!(!hero.is_autoplaying());
        let waited =
            tokio::time::timeout(PERIOD * 2, hero.next_tick()).await;
        assert!(waited.is_err());
        assert!(hero.update(CarouselMessage::Next));
        assert_eq!(hero.state().current_index(), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn undrained_ticks_do_not_pile_up() {
        let mut hero = HeroCarousel::new(PERIOD);
        hero.set_items(movies(3));
        hero.mount();

        tokio::time::sleep(PERIOD * 4 + PERIOD / 2).await;

        let tick = hero.next_tick().await.expect("tick");
        assert!(hero.update(tick));
        assert!(hero.tick_rx.try_recv().is_err());
        assert_eq!(hero.state().current_index(), Some(1));
    }

    #[tokio::test]
    async fn manual_inputs_share_the_index() {
        let mut hero = HeroCarousel::new(PERIOD);
        hero.set_items(movies(4));

        hero.update(CarouselMessage::Next);
        hero.update(CarouselMessage::Key(ArrowKey::Right));
        assert_eq!(hero.state().current_index(), Some(2));
        hero.update(CarouselMessage::GoTo(0));
        hero.update(CarouselMessage::Previous);
        assert_eq!(hero.state().current_index(), Some(3));
        assert!(!hero.update(CarouselMessage::GoTo(9)));
        assert_eq!(hero.state().current_index(), Some(3));
    }
}
