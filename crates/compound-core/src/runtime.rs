use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::channel;
use crate::error::RenderError;
use crate::view::{ElementKind, Node, View, ViewKind};

thread_local! {
    static COMPOSER: RefCell<Option<Composer>> = const { RefCell::new(None) };
}

/// Dirty flag shared between a scheduler and the mutators created while it
/// renders.
#[derive(Clone, Default)]
pub struct Invalidator(Rc<Cell<bool>>);

impl Invalidator {
    pub fn invalidate(&self) {
        self.0.set(true);
    }
    pub fn is_dirty(&self) -> bool {
        self.0.get()
    }
    fn clear(&self) {
        self.0.set(false);
    }
}

/// Order-based slots of one component instance.
#[derive(Default)]
struct SlotScope {
    slots: Vec<Box<dyn Any>>,
    cursor: usize,
}

/// Remembered state of one composition.
///
/// Order-based slots are scoped per component instance, keyed by the
/// instance's position in the tree (child indices and component names), so
/// a sibling appearing or disappearing never shifts another instance's
/// state. Calls made by the root build closure use the empty key.
#[derive(Default)]
pub struct Composer {
    scopes: HashMap<String, SlotScope>,
    current: String,
    visited_scopes: HashSet<String>,
    keyed_slots: HashMap<String, Box<dyn Any>>,
    visited_keys: HashSet<String>,
    invalidator: Invalidator,
}

impl Composer {
    /// Makes `key` the current slot scope and rewinds its cursor. Returns the
    /// scope that was current before.
    fn enter(&mut self, key: String) -> String {
        self.visited_scopes.insert(key.clone());
        self.scopes.entry(key.clone()).or_default().cursor = 0;
        std::mem::replace(&mut self.current, key)
    }

    /// Drops state that the last pass did not reach.
    fn release_unvisited(&mut self) {
        let visited = &self.visited_scopes;
        self.scopes.retain(|key, scope| {
            if !visited.contains(key) {
                log::debug!("releasing state of '{key}'");
                return false;
            }
            if scope.slots.len() > scope.cursor {
                log::debug!(
                    "releasing {} remembered slot(s) of '{key}'",
                    scope.slots.len() - scope.cursor
                );
                scope.slots.truncate(scope.cursor);
            }
            true
        });
        let visited = &self.visited_keys;
        self.keyed_slots.retain(|k, _| {
            let keep = visited.contains(k);
            if !keep {
                log::debug!("releasing remembered key '{k}'");
            }
            keep
        });
    }

    fn clear(&mut self) {
        self.scopes.clear();
        self.keyed_slots.clear();
    }
}

/// Installs a composer as the current one for the duration of a pass.
pub struct ComposeGuard<'a> {
    home: &'a mut Composer,
    prev: Option<Composer>,
}

impl<'a> ComposeGuard<'a> {
    pub fn begin(home: &'a mut Composer) -> Self {
        let mut composer = std::mem::take(home);
        composer.visited_scopes.clear();
        composer.visited_keys.clear();
        composer.enter(String::new());
        let prev = COMPOSER.with(|c| c.borrow_mut().replace(composer));
        ComposeGuard { home, prev }
    }
}

impl Drop for ComposeGuard<'_> {
    fn drop(&mut self) {
        let prev = self.prev.take();
        let composer = COMPOSER.with(|c| std::mem::replace(&mut *c.borrow_mut(), prev));
        if let Some(composer) = composer {
            *self.home = composer;
        }
    }
}

/// Runs `f` with `key` as the current slot scope.
fn with_slot_scope<R>(key: String, f: impl FnOnce() -> R) -> R {
    struct Restore(Option<String>);
    impl Drop for Restore {
        fn drop(&mut self) {
            if let Some(prev) = self.0.take() {
                COMPOSER.with(|c| {
                    if let Some(c) = c.borrow_mut().as_mut() {
                        c.current = prev;
                    }
                });
            }
        }
    }
    let prev = COMPOSER.with(|c| c.borrow_mut().as_mut().map(|c| c.enter(key)));
    let _restore = Restore(prev);
    f()
}

/// Invalidator of the composition in progress. Outside a render pass this
/// is a detached flag nobody observes.
pub fn invalidator() -> Invalidator {
    COMPOSER
        .with(|c| c.borrow().as_ref().map(|c| c.invalidator.clone()))
        .unwrap_or_default()
}

/// Where a missing value goes once `init` has produced it.
enum Lookup<T, A> {
    Found(Rc<T>),
    Vacant(A),
    Detached,
}

/// Slot-based remember (sequential within the calling component)
///
/// `init` runs without the composer borrowed, so it may itself call
/// [`invalidator`] or `remember`.
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let lookup = COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let Some(c) = c.as_mut() else {
            return Lookup::Detached;
        };
        let key = c.current.clone();
        let scope = c.scopes.entry(key.clone()).or_default();
        let cursor = scope.cursor;
        scope.cursor += 1;

        let found = match scope.slots.get(cursor) {
            None => Lookup::Vacant((key, cursor)),
            Some(slot) => match slot.downcast_ref::<Rc<T>>() {
                Some(rc) => Lookup::Found(rc.clone()),
                None => {
                    log::warn!(
                        "remember: slot {} of '{}' type changed; replacing. \
                         If this is due to conditional composition, prefer remember_with_key.",
                        cursor,
                        key
                    );
                    Lookup::Vacant((key, cursor))
                }
            },
        };
        found
    });

    match lookup {
        Lookup::Found(rc) => rc,
        Lookup::Detached => {
            log::warn!("remember called outside a render pass; value will not persist");
            Rc::new(init())
        }
        Lookup::Vacant((key, cursor)) => {
            let rc = Rc::new(init());
            COMPOSER.with(|c| {
                if let Some(c) = c.borrow_mut().as_mut() {
                    let scope = c.scopes.entry(key).or_default();
                    while scope.slots.len() < cursor {
                        scope.slots.push(Box::new(()));
                    }
                    let boxed: Box<dyn Any> = Box::new(rc.clone());
                    if cursor < scope.slots.len() {
                        scope.slots[cursor] = boxed;
                    } else {
                        scope.slots.push(boxed);
                    }
                }
            });
            rc
        }
    }
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();
    let lookup = COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let Some(c) = c.as_mut() else {
            return Lookup::Detached;
        };
        c.visited_keys.insert(key.clone());
        let found = c
            .keyed_slots
            .get(&key)
            .and_then(|existing| existing.downcast_ref::<Rc<T>>().cloned());
        match found {
            Some(rc) => Lookup::Found(rc),
            None => {
                if c.keyed_slots.contains_key(&key) {
                    log::warn!(
                        "remember_with_key: key '{}' reused with a different type; replacing.",
                        key
                    );
                }
                Lookup::Vacant(())
            }
        }
    });

    match lookup {
        Lookup::Found(rc) => rc,
        Lookup::Detached => {
            log::warn!("remember_with_key('{key}') called outside a render pass");
            Rc::new(init())
        }
        Lookup::Vacant(()) => {
            let rc = Rc::new(init());
            COMPOSER.with(|c| {
                if let Some(c) = c.borrow_mut().as_mut() {
                    c.keyed_slots.insert(key, Box::new(rc.clone()));
                }
            });
            rc
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Upper bound on passes [`Scheduler::settle`] runs before giving up.
    pub max_settle_passes: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_settle_passes: 16,
        }
    }
}

impl SchedulerConfig {
    pub fn max_settle_passes(mut self, passes: usize) -> Self {
        self.max_settle_passes = passes.max(1);
        self
    }
}

/// Output of one render pass.
#[derive(Clone, Debug)]
pub struct Frame {
    pub pass: u64,
    pub views: Vec<View>,
}

impl Frame {
    pub fn text_content(&self) -> String {
        self.views.iter().map(View::text_content).collect()
    }

    pub fn find(&self, tag: &str) -> Option<&View> {
        self.views.iter().find_map(|v| v.find(tag))
    }

    pub fn find_all(&self, tag: &str) -> Vec<&View> {
        let mut out = Vec::new();
        for v in &self.views {
            v.find_all(tag, &mut out);
        }
        out
    }

    /// Clicks the first host view tagged `tag`. Returns whether a handler
    /// ran.
    pub fn click(&self, tag: &str) -> bool {
        self.find(tag).is_some_and(View::click)
    }
}

pub struct Scheduler {
    composer: Composer,
    config: SchedulerConfig,
    passes: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            composer: Composer::default(),
            config,
            passes: 0,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Whether a mutator asked for a re-render since the last pass started.
    pub fn is_dirty(&self) -> bool {
        self.composer.invalidator.is_dirty()
    }

    pub fn render(&mut self, build: impl FnOnce() -> Node) -> Frame {
        self.composer.invalidator.clear();
        let views = {
            let _guard = ComposeGuard::begin(&mut self.composer);
            let root = build();
            let mut out = Vec::new();
            Renderer::new().render_node(&root, &mut out);
            out
        };
        self.composer.release_unvisited();
        self.passes += 1;
        log::debug!("render pass {}: {} root view(s)", self.passes, views.len());
        Frame {
            pass: self.passes,
            views,
        }
    }

    /// Renders until no mutator has requested another pass.
    pub fn settle(&mut self, mut build: impl FnMut() -> Node) -> Result<Frame, RenderError> {
        let mut frame = self.render(&mut build);
        let mut passes = 1;
        while self.is_dirty() {
            if passes >= self.config.max_settle_passes {
                return Err(RenderError::Unsettled { passes });
            }
            frame = self.render(&mut build);
            passes += 1;
        }
        Ok(frame)
    }

    /// Tears down all remembered state.
    pub fn unmount(&mut self) {
        log::debug!(
            "unmount: dropping {} component scope(s), {} keyed slot(s)",
            self.composer.scopes.len(),
            self.composer.keyed_slots.len()
        );
        self.composer.clear();
        self.composer.invalidator.clear();
    }
}

/// Depth-first evaluation of a description into host views.
///
/// `path` is the position of the node being rendered: the index of each
/// node among its siblings, plus the name of each component passed through.
struct Renderer {
    next_id: u64,
    path: Vec<String>,
}

impl Renderer {
    fn new() -> Self {
        Self {
            next_id: 1,
            path: Vec::new(),
        }
    }

    fn id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn render_children(&mut self, nodes: &[Node], out: &mut Vec<View>) {
        for (i, n) in nodes.iter().enumerate() {
            self.path.push(i.to_string());
            self.render_node(n, out);
            self.path.pop();
        }
    }

    fn render_node(&mut self, node: &Node, out: &mut Vec<View>) {
        match node {
            Node::Empty => {}
            Node::Text(text) => {
                let id = self.id();
                out.push(View::new(id, ViewKind::Text(text.clone())));
            }
            Node::Fragment(nodes) => self.render_children(nodes, out),
            Node::Element(el) => match &el.kind {
                ElementKind::Host(tag) => {
                    let id = self.id();
                    let mut view = View::new(id, ViewKind::Host(tag));
                    view.props = el.props.clone();
                    self.render_children(&el.children, &mut view.children);
                    out.push(view);
                }
                ElementKind::Component(component) => {
                    self.path.push(component.name().to_string());
                    let key = self.path.join("/");
                    log::trace!("render <{}> at {key}", component.name());
                    let produced =
                        with_slot_scope(key, || component.call(&el.props, &el.children));
                    self.render_node(&produced, out);
                    self.path.pop();
                }
                ElementKind::Provider(provision) => {
                    channel::with_frame(provision.channel, provision.value.clone(), || {
                        self.render_children(&el.children, out);
                    });
                }
                ElementKind::Consumer(resolve) => {
                    let produced = resolve();
                    self.render_node(&produced, out);
                }
            },
        }
    }
}
