//! # Compound toggle
//!
//! A `Toggle` root owns one boolean and lets the `On`, `Off` and `Button`
//! slots placed under it read that state and flip it, without the caller
//! wiring `on` / `toggle` through by hand.
//!
//! Two delivery strategies are provided, as separate modules with the same
//! component names:
//!
//! - [`injected`] — the root copies each *direct* child with `on` and
//!   `toggle` merged into its properties.
//! - [`context`] — the root provides `{on, toggle}` on a channel and the slots
//!   consume it at any depth. Prefer this one.
//!
//! Each root's state is remembered by the scheduler; a click on a `switch`
//! flips it and the next render pass shows the result everywhere.

pub mod context;
pub mod injected;
pub mod switch;
pub mod tests;
pub mod toggle;

pub use switch::{SWITCH_TAG, Switch};
pub use toggle::{ON, ON_TOGGLE, TOGGLE, ToggleProps, ToggleValue, use_toggle};
