//! # Channels
//!
//! A channel is a tree-scoped value with a default. Providers establish a
//! value for their subtree; consumers resolve the nearest enclosing one at
//! render time:
//!
//! ```rust
//! use compound_core::*;
//!
//! let theme = create_channel("dark");
//! assert_eq!(*theme.current(), "dark");
//!
//! theme.with_value("light", || {
//!     assert_eq!(*theme.current(), "light");
//! });
//! assert_eq!(*theme.current(), "dark");
//! ```
//!
//! Resolution is a thread-local registry mapping each channel id to a stack
//! of active values. The renderer pushes on provider entry and pops on exit
//! while it walks the tree depth-first, so an inner provider shadows an outer
//! one only for its own subtree.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::view::{Element, ElementKind, Node, Provision};

pub type ChannelId = u64;

static NEXT_CHANNEL: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static CHANNEL_STACKS: RefCell<HashMap<ChannelId, Vec<Rc<dyn Any>>>> =
        RefCell::new(HashMap::new());
}

pub struct Channel<T: 'static> {
    id: ChannelId,
    default: Rc<T>,
}

impl<T: 'static> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            default: self.default.clone(),
        }
    }
}

pub fn create_channel<T: 'static>(default: T) -> Channel<T> {
    Channel {
        id: NEXT_CHANNEL.fetch_add(1, Ordering::Relaxed),
        default: Rc::new(default),
    }
}

impl<T: 'static> Channel<T> {
    pub fn id(&self) -> ChannelId {
        self.id
    }

    pub fn default_value(&self) -> Rc<T> {
        self.default.clone()
    }

    /// Value of the nearest enclosing provider, or the default.
    pub fn current(&self) -> Rc<T> {
        let top = CHANNEL_STACKS.with(|st| {
            st.borrow()
                .get(&self.id)
                .and_then(|stack| stack.last().cloned())
        });
        match top {
            Some(v) => match v.downcast::<T>() {
                Ok(v) => v,
                Err(_) => {
                    log::warn!(
                        "channel {}: provided value has the wrong type; using default",
                        self.id
                    );
                    self.default.clone()
                }
            },
            None => self.default.clone(),
        }
    }

    pub fn is_provided(&self) -> bool {
        CHANNEL_STACKS.with(|st| st.borrow().get(&self.id).is_some_and(|s| !s.is_empty()))
    }

    /// Runs `f` with `value` established for this channel.
    pub fn with_value<R>(&self, value: T, f: impl FnOnce() -> R) -> R {
        with_frame(self.id, Rc::new(value), f)
    }

    /// Provider element: renders `children` with `value` established.
    pub fn provider(&self, value: T, children: Vec<Node>) -> Node {
        Element::new(ElementKind::Provider(Provision {
            channel: self.id,
            value: Rc::new(value),
        }))
        .with_children(children)
        .into()
    }

    /// Consumer element: renders `render(value)` for the value resolved at
    /// its position in the tree.
    pub fn consumer(&self, render: impl Fn(&T) -> Node + 'static) -> Node {
        let channel = self.clone();
        Element::new(ElementKind::Consumer(Rc::new(move || {
            let value = channel.current();
            render(&value)
        })))
        .into()
    }
}

pub(crate) fn with_frame<R>(id: ChannelId, value: Rc<dyn Any>, f: impl FnOnce() -> R) -> R {
    // Pops on unwind too
    struct Guard(ChannelId);
    impl Drop for Guard {
        fn drop(&mut self) {
            CHANNEL_STACKS.with(|st| {
                let mut st = st.borrow_mut();
                if let Some(stack) = st.get_mut(&self.0) {
                    stack.pop();
                    if stack.is_empty() {
                        st.remove(&self.0);
                    }
                }
            });
        }
    }
    CHANNEL_STACKS.with(|st| st.borrow_mut().entry(id).or_default().push(value));
    let _guard = Guard(id);
    f()
}

/// Number of values currently pushed for `id`.
pub fn provided_depth(id: ChannelId) -> usize {
    CHANNEL_STACKS.with(|st| st.borrow().get(&id).map_or(0, Vec::len))
}
