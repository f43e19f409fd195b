//! Toggle that broadcasts `{on, toggle}` through a channel.
//!
//! The root wraps all of its children in a single provider; every slot is a
//! consumer, so it finds the nearest root at any depth:
//!
//! ```rust
//! use compound_core::*;
//! use compound_ui::context as toggle;
//!
//! let mut scheduler = Scheduler::new();
//! let app = || {
//!     toggle::Toggle(
//!         compound_ui::ToggleProps::new(),
//!         vec![
//!             toggle::On(vec!["on".into()]),
//!             toggle::Off(vec!["off".into()]),
//!             Element::host("div").child(toggle::Button(Props::new())).into(),
//!         ],
//!     )
//! };
//! let frame = scheduler.render(app);
//! assert_eq!(frame.text_content(), "off");
//! frame.click(compound_ui::SWITCH_TAG);
//! assert_eq!(scheduler.render(app).text_content(), "on");
//! ```
//!
//! Outside any root the slots see the channel default: off, with a toggle
//! that does nothing.

#![allow(non_snake_case)]

use compound_core::{Channel, Component, Element, Node, Props, create_channel};

use crate::switch::Switch;
use crate::toggle::{ON_TOGGLE, ToggleValue, use_toggle};

thread_local! {
    static TOGGLE_CHANNEL: Channel<ToggleValue> = create_channel(ToggleValue::default());
}

pub fn toggle_channel() -> Channel<ToggleValue> {
    TOGGLE_CHANNEL.with(Channel::clone)
}

pub fn Toggle(props: impl Into<Props>, children: Vec<Node>) -> Node {
    Element::component(Component::new("Toggle", |props, children| {
        let value = use_toggle(props.bool_callback(ON_TOGGLE));
        toggle_channel().provider(value, children.to_vec())
    }))
    .with_props(props.into())
    .with_children(children)
    .into()
}

pub fn On(children: Vec<Node>) -> Node {
    Element::component(Component::new("Toggle.On", |_, children| {
        let children = children.to_vec();
        toggle_channel().consumer(move |value| {
            if value.on {
                Node::Fragment(children.clone())
            } else {
                Node::Empty
            }
        })
    }))
    .with_children(children)
    .into()
}

pub fn Off(children: Vec<Node>) -> Node {
    Element::component(Component::new("Toggle.Off", |_, children| {
        let children = children.to_vec();
        toggle_channel().consumer(move |value| {
            if value.on {
                Node::Empty
            } else {
                Node::Fragment(children.clone())
            }
        })
    }))
    .with_children(children)
    .into()
}

/// `extra` is forwarded to the switch alongside the resolved state.
pub fn Button(extra: Props) -> Node {
    Element::component(Component::new("Toggle.Button", |props, _| {
        let extra = props.clone();
        toggle_channel().consumer(move |value| {
            Switch(value.on, value.toggle.clone(), extra.clone())
        })
    }))
    .with_props(extra)
    .into()
}
