//=========================================================================
// Input Dispatcher
//=========================================================================
//
// Turns sampled key state into handler invocations.
//
// Architecture:
//   KeyPoll ──tick()──> KeyState (per bound key) ──> Handler(ctx)
//
// Each bound key owns two handler slots, one per trigger kind. A slot holds
// at most one handler; binding again replaces it. Keys are visited in
// `KeyCode` order and, per key, the while-held handler runs before the
// on-press handler, so identical input sequences always produce identical
// handler side effects.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::event::KeyCode;

//=== KeyPoll =============================================================

/// Raw key state source sampled once per dispatcher tick.
pub trait KeyPoll {
    /// Returns `true` if the key is physically held right now.
    fn is_down(&self, key: KeyCode) -> bool;
}

//=== Trigger =============================================================

/// When a handler fires relative to its key's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Every tick the key is down, including the first.
    WhileHeld,

    /// Once, on the tick the key goes from up to down.
    OnPress,
}

//=== KeyState ============================================================

/// Current and previous-tick sample of a single key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    down: bool,
    was_down: bool,
}

impl KeyState {
    /// Shifts the current sample into history and records a new one.
    pub fn sample(&mut self, down: bool) {
        self.was_down = self.down;
        self.down = down;
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    /// Down now, up on the previous tick.
    pub fn rising_edge(&self) -> bool {
        self.down && !self.was_down
    }
}

//=== Binding =============================================================

/// Handler invoked with the dispatcher's context.
pub type Handler<C> = Box<dyn FnMut(&mut C)>;

struct Binding<C> {
    state: KeyState,
    while_held: Option<Handler<C>>,
    on_press: Option<Handler<C>>,
}

impl<C> Binding<C> {
    fn new() -> Self {
        Self {
            state: KeyState::default(),
            while_held: None,
            on_press: None,
        }
    }
}

//=== InputDispatcher =====================================================

/// Edge-aware key → handler dispatcher.
///
/// The dispatcher itself never touches game state. Handlers receive the
/// context passed to [`tick`](Self::tick) and do their work there.
///
/// ```
/// use lane_racer::core::input::{InputDispatcher, KeyCode, KeyPoll};
///
/// struct Held(bool);
/// impl KeyPoll for Held {
///     fn is_down(&self, _key: KeyCode) -> bool { self.0 }
/// }
///
/// let mut dispatcher = InputDispatcher::<u32>::new();
/// dispatcher.register_on_press(KeyCode::Enter, |presses| *presses += 1);
///
/// let mut presses = 0;
/// dispatcher.tick(&Held(true), &mut presses);
/// dispatcher.tick(&Held(true), &mut presses);
/// assert_eq!(presses, 1);
/// ```
pub struct InputDispatcher<C> {
    bindings: BTreeMap<KeyCode, Binding<C>>,
}

impl<C> InputDispatcher<C> {
    /// Creates a dispatcher with no bindings.
    pub fn new() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a handler that fires every tick `key` is held.
    pub fn register_while_held<F>(&mut self, key: KeyCode, handler: F)
    where
        F: FnMut(&mut C) + 'static,
    {
        self.register(key, Trigger::WhileHeld, Box::new(handler));
    }

    /// Binds a handler that fires once per press of `key`.
    pub fn register_on_press<F>(&mut self, key: KeyCode, handler: F)
    where
        F: FnMut(&mut C) + 'static,
    {
        self.register(key, Trigger::OnPress, Box::new(handler));
    }

    /// Binds `handler` to the given slot, replacing any previous handler.
    pub fn register(&mut self, key: KeyCode, trigger: Trigger, handler: Handler<C>) {
        let binding = self.bindings.entry(key).or_insert_with(Binding::new);
        let slot = match trigger {
            Trigger::WhileHeld => &mut binding.while_held,
            Trigger::OnPress => &mut binding.on_press,
        };

        if slot.replace(handler).is_some() {
            debug!("Replaced {:?} handler for {:?}", trigger, key);
        }
    }

    /// Returns `true` if a handler occupies the given slot.
    pub fn is_bound(&self, key: KeyCode, trigger: Trigger) -> bool {
        self.bindings.get(&key).is_some_and(|binding| match trigger {
            Trigger::WhileHeld => binding.while_held.is_some(),
            Trigger::OnPress => binding.on_press.is_some(),
        })
    }

    //--- Dispatch ---------------------------------------------------------

    /// Samples every bound key and fires the handlers its state calls for.
    pub fn tick<P: KeyPoll + ?Sized>(&mut self, source: &P, context: &mut C) {
        for (key, binding) in self.bindings.iter_mut() {
            binding.state.sample(source.is_down(*key));

            if !binding.state.is_down() {
                continue;
            }

            if let Some(handler) = binding.while_held.as_mut() {
                handler(context);
            }

            if binding.state.rising_edge() {
                trace!("Press edge: {:?}", key);
                if let Some(handler) = binding.on_press.as_mut() {
                    handler(context);
                }
            }
        }
    }

    /// Returns the last sampled state of `key`, if it is bound.
    pub fn key_state(&self, key: KeyCode) -> Option<KeyState> {
        self.bindings.get(&key).map(|binding| binding.state)
    }
}

impl<C> Default for InputDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for InputDispatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound: Vec<_> = self
            .bindings
            .iter()
            .map(|(key, b)| (key, b.while_held.is_some(), b.on_press.is_some()))
            .collect();

        f.debug_struct("InputDispatcher").field("bound", &bound).finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
