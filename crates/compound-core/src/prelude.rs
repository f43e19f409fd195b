pub use crate::channel::{Channel, create_channel};
pub use crate::children::{clone_children_with, map_children};
pub use crate::error::*;
pub use crate::props::{BoolCallback, Callback, PropValue, Props, noop};
pub use crate::runtime::{
    Frame, Invalidator, Scheduler, SchedulerConfig, invalidator, remember, remember_with_key,
};
pub use crate::signal::{Signal, signal};
pub use crate::view::{Component, Element, ElementKind, Node, View, ViewId, ViewKind};
