#![allow(non_snake_case)]
use compound_core::{Callback, Element, Node, Props};

pub const SWITCH_TAG: &str = "switch";

/// Leaf toggle control: `{on, on_click, ...extra}`.
///
/// `on` and `on_click` win over colliding keys in `extra`.
pub fn Switch(on: bool, on_click: Callback, extra: Props) -> Node {
    let props = extra.merged(&Props::new().with("on", on).with("on_click", on_click));
    Element::host(SWITCH_TAG).with_props(props).into()
}
