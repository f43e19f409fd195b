//! # Descriptions, channels, and render passes
//!
//! Compound's core is a very small composition runtime. There are four main
//! pieces:
//!
//! - `Node` / `Element` — tree descriptions built by components.
//! - `Props` — the property bag each element carries.
//! - `Channel<T>` — tree-scoped values with a default (provider/consumer).
//! - `Scheduler` — evaluates a description depth-first into host `View`s.
//!
//! ## Components
//!
//! A component is a named function of properties and children:
//!
//! ```rust
//! use compound_core::*;
//!
//! let greeting = Component::new("Greeting", |props, _children| {
//!     let name = props.text("name").unwrap_or("world");
//!     Node::text(format!("hello {name}"))
//! });
//!
//! let mut scheduler = Scheduler::new();
//! let frame = scheduler.render(|| {
//!     Element::component(greeting.clone()).prop("name", "compound").into()
//! });
//! assert_eq!(frame.text_content(), "hello compound");
//! ```
//!
//! ## Remembered state
//!
//! State survives between passes through `remember` slots. A mutator that
//! changes remembered state calls the current `invalidator()` so the owner
//! of the `Scheduler` knows another pass is due:
//!
//! ```rust
//! use compound_core::*;
//!
//! let mut scheduler = Scheduler::new();
//! let app = || {
//!     let count = remember(|| {
//!         let sig = signal(0);
//!         let inv = invalidator();
//!         sig.subscribe(move |_| inv.invalidate());
//!         sig
//!     });
//!     let bump: Callback = {
//!         let count = count.clone();
//!         std::rc::Rc::new(move || count.update(|c| *c += 1))
//!     };
//!     Element::host("button")
//!         .prop("on_click", bump)
//!         .child(format!("{}", count.get()))
//!         .into()
//! };
//!
//! let frame = scheduler.render(app);
//! assert!(frame.click("button"));
//! assert!(scheduler.is_dirty());
//! assert_eq!(scheduler.render(app).text_content(), "1");
//! ```
//!
//! Slots a pass does not reach are released at the end of that pass, which
//! is how state owned by a component that stopped being composed goes away.

pub mod channel;
pub mod children;
pub mod error;
pub mod prelude;
pub mod props;
pub mod runtime;
pub mod signal;
pub mod view;

pub use channel::*;
pub use children::*;
pub use error::*;
pub use props::*;
pub use runtime::*;
pub use signal::*;
pub use view::*;
