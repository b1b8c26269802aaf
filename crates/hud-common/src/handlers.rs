//! Handler registration keyed by event kind.
//!
//! Handlers are invoked synchronously, in registration order, on the
//! thread that emits. There is no global listener list; each router or
//! bus owns its own table.

use std::collections::HashMap;
use std::hash::Hash;

type Handler<E> = Box<dyn FnMut(&E)>;

pub struct HandlerTable<K, E> {
    handlers: HashMap<K, Vec<Handler<E>>>,
}

impl<K: Eq + Hash, E> HandlerTable<K, E> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `handler` for events of `kind`.
    pub fn on(&mut self, kind: K, handler: impl FnMut(&E) + 'static) {
        self.handlers
            .entry(kind)
            .or_default()
            .push(Box::new(handler));
    }

    /// Invoke every handler registered for `kind`. Returns how many ran.
    pub fn emit(&mut self, kind: &K, event: &E) -> usize {
        match self.handlers.get_mut(kind) {
            Some(list) => {
                for handler in list.iter_mut() {
                    handler(event);
                }
                list.len()
            }
            None => 0,
        }
    }
}

impl<K: Eq + Hash, E> Default for HandlerTable<K, E> {
    fn default() -> Self {
        Self::new()
    }
}
