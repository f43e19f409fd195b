use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use compound_core::{BoolCallback, Callback, Props, Signal, invalidator, noop, remember, signal};

pub const ON: &str = "on";
pub const TOGGLE: &str = "toggle";
pub const ON_TOGGLE: &str = "on_toggle";

/// What a toggle root hands to its slots on every render.
#[derive(Clone)]
pub struct ToggleValue {
    pub on: bool,
    pub toggle: Callback,
}

impl Default for ToggleValue {
    fn default() -> Self {
        Self {
            on: false,
            toggle: noop(),
        }
    }
}

impl fmt::Debug for ToggleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleValue")
            .field("on", &self.on)
            .field("toggle", &"<callback>")
            .finish()
    }
}

impl ToggleValue {
    /// `{on, toggle}` as injectable properties.
    pub fn to_props(&self) -> Props {
        Props::new()
            .with(ON, self.on)
            .with(TOGGLE, self.toggle.clone())
    }
}

/// Properties accepted by a toggle root.
#[derive(Clone, Default)]
pub struct ToggleProps {
    pub on_toggle: Option<BoolCallback>,
}

impl ToggleProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the new state after every transition.
    pub fn on_toggle(mut self, f: impl Fn(bool) + 'static) -> Self {
        self.on_toggle = Some(Rc::new(f));
        self
    }
}

impl From<ToggleProps> for Props {
    fn from(p: ToggleProps) -> Self {
        match p.on_toggle {
            Some(cb) => Props::new().with(ON_TOGGLE, cb),
            None => Props::new(),
        }
    }
}

/// Remembered part of a toggle root. The mutator lives here so its
/// identity stays the same from pass to pass.
struct ToggleState {
    on: Signal<bool>,
    listener: Rc<RefCell<Option<BoolCallback>>>,
    toggle: Callback,
}

/// Owns the state of one toggle root: remembered across passes, starts off.
///
/// The returned `toggle` flips whatever the state is when it runs, so two
/// calls between passes land back where they started. It reports to the
/// `on_toggle` given on the most recent pass.
pub fn use_toggle(on_toggle: Option<BoolCallback>) -> ToggleValue {
    let state = remember(|| {
        let on = signal(false);
        let inv = invalidator();
        on.subscribe(move |_| inv.invalidate());

        let listener: Rc<RefCell<Option<BoolCallback>>> = Rc::default();
        let toggle: Callback = {
            let on = on.clone();
            let listener = listener.clone();
            Rc::new(move || {
                on.update(|v| *v = !*v);
                let now = on.get();
                log::debug!("toggle: now {}", if now { "on" } else { "off" });
                let cb = listener.borrow().clone();
                if let Some(cb) = cb {
                    cb(now);
                }
            })
        };

        ToggleState {
            on,
            listener,
            toggle,
        }
    });

    *state.listener.borrow_mut() = on_toggle;

    ToggleValue {
        on: state.on.get(),
        toggle: state.toggle.clone(),
    }
}
