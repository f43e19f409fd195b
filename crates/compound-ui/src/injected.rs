//! Toggle that injects `on` / `toggle` into its immediate children.
//!
//! ```rust
//! use compound_core::*;
//! use compound_ui::injected as toggle;
//!
//! let mut scheduler = Scheduler::new();
//! let app = || {
//!     toggle::Toggle(
//!         compound_ui::ToggleProps::new(),
//!         vec![
//!             toggle::On(vec!["on".into()]),
//!             toggle::Off(vec!["off".into()]),
//!             toggle::Button(Props::new()),
//!         ],
//!     )
//! };
//! let frame = scheduler.render(app);
//! assert_eq!(frame.text_content(), "off");
//! frame.click(compound_ui::SWITCH_TAG);
//! assert_eq!(scheduler.render(app).text_content(), "on");
//! ```
//!
//! Injection is a shallow copy of each direct child, so a slot wrapped in
//! any other element never sees the state: it renders as off and its button
//! does nothing. [`crate::context`] lifts that restriction.

#![allow(non_snake_case)]

use compound_core::{Component, Element, Node, Props, clone_children_with, noop};

use crate::switch::Switch;
use crate::toggle::{ON, ON_TOGGLE, TOGGLE, use_toggle};

pub fn Toggle(props: impl Into<Props>, children: Vec<Node>) -> Node {
    Element::component(Component::new("Toggle", |props, children| {
        let value = use_toggle(props.bool_callback(ON_TOGGLE));
        Node::Fragment(clone_children_with(children, &value.to_props()))
    }))
    .with_props(props.into())
    .with_children(children)
    .into()
}

pub fn On(children: Vec<Node>) -> Node {
    Element::component(Component::new("Toggle.On", |props, children| {
        if props.bool(ON).unwrap_or(false) {
            Node::Fragment(children.to_vec())
        } else {
            Node::Empty
        }
    }))
    .with_children(children)
    .into()
}

pub fn Off(children: Vec<Node>) -> Node {
    Element::component(Component::new("Toggle.Off", |props, children| {
        if props.bool(ON).unwrap_or(false) {
            Node::Empty
        } else {
            Node::Fragment(children.to_vec())
        }
    }))
    .with_children(children)
    .into()
}

/// `extra` is forwarded to the switch.
pub fn Button(extra: Props) -> Node {
    Element::component(Component::new("Toggle.Button", |props, _| {
        let on = props.bool(ON).unwrap_or(false);
        let toggle = props.callback(TOGGLE).unwrap_or_else(noop);
        Switch(on, toggle, props.without(&[ON, TOGGLE]))
    }))
    .with_props(extra)
    .into()
}
