//! Choice channel: available-action store and the single dispatch path.
//!
//! One channel per process-wide render tree. The host is the sole producer of
//! action snapshots (`set_ready`/`set_idle`); scenes are pure consumers that
//! read, subscribe, and emit. Everything runs on the UI thread; handles are
//! cheap clones over shared single-threaded state.

use std::cell::{Cell, RefCell};
use std::mem;
use std::rc::{Rc, Weak};

use thiserror::Error;

use crate::config::EnvConfig;
use crate::core::action::ActionSlug;

/// Dispatch phase for the currently mounted scene.
///
/// `Idle` -> host `set_ready` -> `Ready` -> accepted emit -> `Dispatched` ->
/// host `set_ready`/`set_idle` again. The cycle repeats for the scene's
/// lifetime; there is no terminal state while mounted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ChoicePhase {
    #[default]
    Idle,
    Ready,
    Dispatched,
}

#[derive(Debug, Error)]
pub enum ChoiceError {
    #[error("emit of '{slug}' with no ready action set")]
    NotReady { slug: ActionSlug },

    #[error("emit of '{slug}' while '{pending}' is awaiting the host")]
    AlreadyDispatched {
        slug: ActionSlug,
        pending: ActionSlug,
    },

    #[error("emit of '{slug}' outside the current action set")]
    Unavailable { slug: ActionSlug },
}

type SubscriberFn = Box<dyn FnMut(&[ActionSlug])>;
type SinkFn = Box<dyn FnMut(&ActionSlug)>;

struct Subscriber {
    active: Rc<Cell<bool>>,
    callback: SubscriberFn,
}

#[derive(Default)]
struct ChannelState {
    phase: ChoicePhase,
    available: Vec<ActionSlug>,
    dispatched: Option<ActionSlug>,
    subscribers: Vec<Subscriber>,
    sink: Option<SinkFn>,
    delivering: bool,
    redeliver: bool,
    trace_dispatch: bool,
}

/// Process-wide store of currently-available actions plus the emit path.
#[derive(Clone)]
pub struct ChoiceChannel {
    state: Rc<RefCell<ChannelState>>,
}

impl ChoiceChannel {
    pub fn new() -> Self {
        let state = ChannelState {
            trace_dispatch: EnvConfig::from_env().trace_dispatch,
            ..ChannelState::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn phase(&self) -> ChoicePhase {
        self.state.borrow().phase
    }

    /// Snapshot of the currently available actions. Stable between host
    /// transitions, so repeated reads within one render pass agree.
    pub fn available(&self) -> Vec<ActionSlug> {
        self.state.borrow().available.clone()
    }

    pub fn is_available(&self, slug: &ActionSlug) -> bool {
        self.state.borrow().available.iter().any(|s| s == slug)
    }

    /// The accepted-but-unacknowledged choice, if any. Cleared by the next
    /// host transition.
    pub fn dispatched(&self) -> Option<ActionSlug> {
        self.state.borrow().dispatched.clone()
    }

    /// Install the host-side sink invoked synchronously on each accepted emit.
    /// Polling hosts can skip this and read [`ChoiceChannel::dispatched`].
    pub fn connect_sink(&self, sink: SinkFn) {
        self.state.borrow_mut().sink = Some(sink);
    }

    /// Register `callback` against "available set changed". The returned
    /// [`Subscription`] is the disposer; once released (explicitly or on
    /// drop), the callback can never fire again.
    pub fn subscribe(&self, callback: SubscriberFn) -> Subscription {
        let active = Rc::new(Cell::new(true));
        self.state.borrow_mut().subscribers.push(Subscriber {
            active: Rc::clone(&active),
            callback,
        });
        Subscription {
            active,
            state: Rc::downgrade(&self.state),
        }
    }

    /// Host edge: publish a new action set and notify subscribers. Duplicate
    /// slugs are dropped with a warning; parity demands one control per slug.
    pub fn set_ready(&self, actions: Vec<ActionSlug>) {
        let mut deduped: Vec<ActionSlug> = Vec::with_capacity(actions.len());
        for slug in actions {
            if deduped.contains(&slug) {
                log::warn!("duplicate action slug '{slug}' dropped from ready set");
            } else {
                deduped.push(slug);
            }
        }
        self.transition(ChoicePhase::Ready, deduped);
    }

    /// Host edge: no actions pending.
    pub fn set_idle(&self) {
        self.transition(ChoicePhase::Idle, Vec::new());
    }

    fn transition(&self, phase: ChoicePhase, available: Vec<ActionSlug>) {
        {
            let mut state = self.state.borrow_mut();
            state.phase = phase;
            state.available = available;
            state.dispatched = None;
            if state.delivering {
                // A host transition from inside a notification queues a fresh
                // delivery round; rounds never interleave.
                state.redeliver = true;
                return;
            }
            state.delivering = true;
        }
        self.deliver();
    }

    fn deliver(&self) {
        loop {
            let snapshot = self.state.borrow().available.clone();
            let mut subscribers = mem::take(&mut self.state.borrow_mut().subscribers);
            for subscriber in subscribers.iter_mut() {
                if subscriber.active.get() {
                    (subscriber.callback)(&snapshot);
                }
            }

            let again = {
                let mut state = self.state.borrow_mut();
                let added = mem::take(&mut state.subscribers);
                subscribers.extend(added);
                subscribers.retain(|subscriber| subscriber.active.get());
                state.subscribers = subscribers;
                if state.redeliver {
                    state.redeliver = false;
                    true
                } else {
                    state.delivering = false;
                    false
                }
            };
            if !again {
                break;
            }
        }
    }

    /// Signal the chosen action to the host. Fire-and-forget on success; the
    /// error reports a contract violation locally and nothing reaches the
    /// host:
    /// - emitting outside a ready snapshot is rejected,
    /// - a second emit before the host advances is rejected (the first stays
    ///   pending).
    pub fn emit(&self, slug: &ActionSlug) -> Result<(), ChoiceError> {
        let mut sink = {
            let mut state = self.state.borrow_mut();
            match state.phase {
                ChoicePhase::Idle => {
                    return Err(ChoiceError::NotReady { slug: slug.clone() });
                }
                ChoicePhase::Dispatched => {
                    let pending = state
                        .dispatched
                        .clone()
                        .expect("dispatched phase always carries a slug");
                    return Err(ChoiceError::AlreadyDispatched {
                        slug: slug.clone(),
                        pending,
                    });
                }
                ChoicePhase::Ready => {}
            }
            if !state.available.iter().any(|s| s == slug) {
                return Err(ChoiceError::Unavailable { slug: slug.clone() });
            }

            state.phase = ChoicePhase::Dispatched;
            state.dispatched = Some(slug.clone());
            if state.trace_dispatch {
                log::info!("choice dispatched: {slug}");
            } else {
                log::debug!("choice dispatched: {slug}");
            }
            // The sink may transition the channel synchronously; call it with
            // the state borrow released.
            state.sink.take()
        };

        if let Some(sink_fn) = sink.as_mut() {
            sink_fn(slug);
        }
        if let Some(sink_fn) = sink {
            let mut state = self.state.borrow_mut();
            if state.sink.is_none() {
                state.sink = Some(sink_fn);
            }
        }
        Ok(())
    }
}

impl Default for ChoiceChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Live registration against "available set changed".
///
/// Releasing (via [`Subscription::unsubscribe`] or drop) takes effect
/// synchronously: the callback cannot fire afterwards, even mid-delivery.
pub struct Subscription {
    active: Rc<Cell<bool>>,
    state: Weak<RefCell<ChannelState>>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Explicit disposer. Equivalent to dropping the subscription.
    pub fn unsubscribe(self) {}

    fn release(&self) {
        if !self.active.replace(false) {
            return;
        }
        let Some(state) = self.state.upgrade() else {
            return;
        };
        // Mid-delivery the entry lives outside the state; the cleared flag
        // already blocks further callbacks and the end of the round prunes it.
        if let Ok(mut state) = state.try_borrow_mut() {
            state
                .subscribers
                .retain(|subscriber| !Rc::ptr_eq(&subscriber.active, &self.active));
        };
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::{ChoiceChannel, ChoiceError, ChoicePhase};
    use crate::core::action::ActionSlug;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn slugs(names: &[&str]) -> Vec<ActionSlug> {
        names.iter().map(|name| ActionSlug::new(*name)).collect()
    }

    #[test]
    fn starts_idle_and_empty() {
        let channel = ChoiceChannel::new();
        assert_eq!(channel.phase(), ChoicePhase::Idle);
        assert!(channel.available().is_empty());
        assert!(channel.dispatched().is_none());
    }

    #[test]
    fn ready_snapshot_is_visible_and_stable() {
        let channel = ChoiceChannel::new();
        channel.set_ready(slugs(&["play", "quit"]));

        assert_eq!(channel.phase(), ChoicePhase::Ready);
        assert_eq!(channel.available(), slugs(&["play", "quit"]));
        assert_eq!(channel.available(), channel.available());
    }

    #[test]
    fn emit_moves_to_dispatched_and_blocks_repeats() {
        let channel = ChoiceChannel::new();
        channel.set_ready(slugs(&["play", "quit"]));

        channel.emit(&ActionSlug::new("play")).expect("first emit");
        assert_eq!(channel.phase(), ChoicePhase::Dispatched);
        assert_eq!(channel.dispatched(), Some(ActionSlug::new("play")));

        let err = channel.emit(&ActionSlug::new("quit")).unwrap_err();
        assert!(matches!(err, ChoiceError::AlreadyDispatched { .. }));
        assert_eq!(channel.dispatched(), Some(ActionSlug::new("play")));
    }

    #[test]
    fn emit_of_unavailable_slug_is_rejected() {
        let channel = ChoiceChannel::new();
        channel.set_ready(slugs(&["play"]));

        let err = channel.emit(&ActionSlug::new("quit")).unwrap_err();
        assert!(matches!(err, ChoiceError::Unavailable { .. }));
        assert_eq!(channel.phase(), ChoicePhase::Ready);
        assert!(channel.dispatched().is_none());
    }

    #[test]
    fn emit_while_idle_is_rejected() {
        let channel = ChoiceChannel::new();
        let err = channel.emit(&ActionSlug::new("play")).unwrap_err();
        assert!(matches!(err, ChoiceError::NotReady { .. }));
    }

    #[test]
    fn host_transition_reopens_the_channel() {
        let channel = ChoiceChannel::new();
        channel.set_ready(slugs(&["play"]));
        channel.emit(&ActionSlug::new("play")).expect("emit");

        channel.set_ready(slugs(&["resume", "quit"]));
        assert_eq!(channel.phase(), ChoicePhase::Ready);
        assert!(channel.dispatched().is_none());
        channel.emit(&ActionSlug::new("quit")).expect("emit again");
    }

    #[test]
    fn duplicate_slugs_are_dropped_from_ready_set() {
        let channel = ChoiceChannel::new();
        channel.set_ready(slugs(&["play", "play", "quit"]));
        assert_eq!(channel.available(), slugs(&["play", "quit"]));
    }

    #[test]
    fn subscribers_see_every_transition() {
        let channel = ChoiceChannel::new();
        let seen: Rc<RefCell<Vec<Vec<ActionSlug>>>> = Rc::new(RefCell::new(Vec::new()));
        let seen_ref = Rc::clone(&seen);
        let _subscription = channel.subscribe(Box::new(move |snapshot| {
            seen_ref.borrow_mut().push(snapshot.to_vec());
        }));

        channel.set_ready(slugs(&["play"]));
        channel.set_idle();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], slugs(&["play"]));
        assert!(seen[1].is_empty());
    }

    #[test]
    fn unsubscribed_callbacks_never_fire() {
        let channel = ChoiceChannel::new();
        let count = Rc::new(RefCell::new(0));
        let count_ref = Rc::clone(&count);
        let subscription = channel.subscribe(Box::new(move |_| {
            *count_ref.borrow_mut() += 1;
        }));

        channel.set_ready(slugs(&["play"]));
        assert_eq!(*count.borrow(), 1);

        subscription.unsubscribe();
        channel.set_ready(slugs(&["quit"]));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn dropping_the_subscription_unsubscribes() {
        let channel = ChoiceChannel::new();
        let count = Rc::new(RefCell::new(0));
        let count_ref = Rc::clone(&count);
        {
            let _subscription = channel.subscribe(Box::new(move |_| {
                *count_ref.borrow_mut() += 1;
            }));
        }
        channel.set_ready(slugs(&["play"]));
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn subscribers_are_independent() {
        let channel = ChoiceChannel::new();
        let first = Rc::new(RefCell::new(0));
        let second = Rc::new(RefCell::new(0));
        let first_ref = Rc::clone(&first);
        let second_ref = Rc::clone(&second);

        let first_sub = channel.subscribe(Box::new(move |_| {
            *first_ref.borrow_mut() += 1;
        }));
        let _second_sub = channel.subscribe(Box::new(move |_| {
            *second_ref.borrow_mut() += 1;
        }));

        channel.set_ready(slugs(&["play"]));
        first_sub.unsubscribe();
        channel.set_ready(slugs(&["quit"]));

        assert_eq!(*first.borrow(), 1);
        assert_eq!(*second.borrow(), 2);
    }

    #[test]
    fn sink_receives_accepted_emits_only() {
        let channel = ChoiceChannel::new();
        let received: Rc<RefCell<Vec<ActionSlug>>> = Rc::new(RefCell::new(Vec::new()));
        let received_ref = Rc::clone(&received);
        channel.connect_sink(Box::new(move |slug| {
            received_ref.borrow_mut().push(slug.clone());
        }));

        channel.set_ready(slugs(&["play"]));
        let _ = channel.emit(&ActionSlug::new("quit"));
        channel.emit(&ActionSlug::new("play")).expect("emit");
        let _ = channel.emit(&ActionSlug::new("play"));

        assert_eq!(received.borrow().as_slice(), &[ActionSlug::new("play")]);
    }

    #[test]
    fn sink_may_advance_the_channel_synchronously() {
        let channel = ChoiceChannel::new();
        let host_view = channel.clone();
        channel.connect_sink(Box::new(move |_slug| {
            host_view.set_ready(vec![ActionSlug::new("next")]);
        }));

        channel.set_ready(slugs(&["play"]));
        channel.emit(&ActionSlug::new("play")).expect("emit");

        assert_eq!(channel.phase(), ChoicePhase::Ready);
        assert_eq!(channel.available(), slugs(&["next"]));
    }

    #[test]
    fn reentrant_transition_queues_a_fresh_round() {
        let channel = ChoiceChannel::new();
        let rounds: Rc<RefCell<Vec<Vec<ActionSlug>>>> = Rc::new(RefCell::new(Vec::new()));
        let rounds_ref = Rc::clone(&rounds);
        let reentry = channel.clone();
        let fired = Rc::new(RefCell::new(false));
        let fired_ref = Rc::clone(&fired);

        let _subscription = channel.subscribe(Box::new(move |snapshot| {
            rounds_ref.borrow_mut().push(snapshot.to_vec());
            if !*fired_ref.borrow() {
                *fired_ref.borrow_mut() = true;
                reentry.set_ready(vec![ActionSlug::new("second")]);
            }
        }));

        channel.set_ready(slugs(&["first"]));

        let rounds = rounds.borrow();
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0], slugs(&["first"]));
        assert_eq!(rounds[1], slugs(&["second"]));
    }

    #[test]
    fn unsubscribing_from_inside_a_callback_is_safe() {
        let channel = ChoiceChannel::new();
        let count = Rc::new(RefCell::new(0));
        let count_ref = Rc::clone(&count);
        let slot: Rc<RefCell<Option<super::Subscription>>> = Rc::new(RefCell::new(None));
        let slot_ref = Rc::clone(&slot);

        let subscription = channel.subscribe(Box::new(move |_| {
            *count_ref.borrow_mut() += 1;
            slot_ref.borrow_mut().take();
        }));
        *slot.borrow_mut() = Some(subscription);

        channel.set_ready(slugs(&["play"]));
        channel.set_ready(slugs(&["quit"]));
        assert_eq!(*count.borrow(), 1);
    }
}
