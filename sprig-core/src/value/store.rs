//! Arena of syntax tree nodes

use super::{Datum, Value};
use crate::arena::{Arena, Handle, SlotId};
use crate::error::{ArenaError, Result};
use crate::limits::Limits;
use tracing::trace;

/// The node store for one parse.
///
/// Owns every [`Value`] of a tree. Dropping the store (or calling
/// [`clear`](Self::clear)) frees all nodes at once.
#[derive(Debug)]
pub struct ValueArena {
    nodes: Arena<Value>,
    limits: Limits,
}

impl Default for ValueArena {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

impl ValueArena {
    pub fn new(limits: Limits) -> Self {
        Self {
            nodes: Arena::with_capacity(limits.max_nodes),
            limits,
        }
    }

    pub fn with_capacity(max_nodes: usize) -> Self {
        Self::new(Limits::default().with_max_nodes(max_nodes))
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn nodes(&self) -> &Arena<Value> {
        &self.nodes
    }

    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn allocate(&mut self, value: Value) -> Result<Handle<Value>> {
        self.nodes.allocate(value)
    }

    pub fn reserve(&mut self) -> Result<Handle<Value>> {
        self.nodes.reserve()
    }

    pub fn populate(&mut self, handle: &mut Handle<Value>, value: Value) -> Result<()> {
        self.nodes.populate(handle, value)
    }

    pub fn borrow(&self, handle: &Handle<Value>) -> Result<&Value> {
        self.nodes.borrow(handle)
    }

    pub fn borrow_mut(&mut self, handle: &Handle<Value>) -> Result<&mut Value> {
        self.nodes.borrow_mut(handle)
    }

    pub fn get(&self, id: SlotId) -> Result<&Value> {
        self.nodes.get(id)
    }

    /// Moves a single node out. Its children stay allocated and are now
    /// owned by the returned value.
    pub fn take(&mut self, handle: Handle<Value>) -> Result<Value> {
        self.nodes.take(handle)
    }

    pub fn remove(&mut self, handle: Handle<Value>) -> Result<()> {
        self.nodes.remove(handle)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Frees a node and all of its descendants, returning how many slots
    /// were released. Reservations in the subtree are released too.
    pub fn release_tree(&mut self, handle: Handle<Value>) -> Result<usize> {
        let mut pending = vec![handle];
        let mut released = 0;
        while let Some(next) = pending.pop() {
            if !next.is_populated() {
                self.nodes.remove(next)?;
            } else {
                let mut value = self.nodes.take(next)?;
                pending.extend(value.take_children());
            }
            released += 1;
        }
        trace!(released, "released subtree");
        Ok(released)
    }

    /// Releases each handle's subtree.
    pub fn release_all(&mut self, handles: Vec<Handle<Value>>) -> Result<usize> {
        let mut released = 0;
        for handle in handles {
            released += self.release_tree(handle)?;
        }
        Ok(released)
    }

    /// Copies the tree rooted at `handle` out of the arena.
    pub fn snapshot(&self, handle: &Handle<Value>) -> Result<Datum> {
        self.snapshot_slot(handle.slot_id())
    }

    fn snapshot_slot(&self, id: SlotId) -> Result<Datum> {
        let datum = match self.nodes.get(id)? {
            Value::Unassigned => return Err(ArenaError::Unpopulated { slot: id.index() }),
            Value::Atom(text) => Datum::Atom(text.clone()),
            Value::String(text) => Datum::String(text.clone()),
            Value::Integer(n) => Datum::Integer(*n),
            Value::Boolean(b) => Datum::Boolean(*b),
            Value::List(items) => Datum::List(self.snapshot_children(items)?),
            Value::DottedList(items) => Datum::DottedList(self.snapshot_children(items)?),
        };
        Ok(datum)
    }

    fn snapshot_children(&self, items: &[Handle<Value>]) -> Result<Vec<Datum>> {
        items
            .iter()
            .map(|child| self.snapshot_slot(child.slot_id()))
            .collect()
    }

    /// Prints the tree rooted at `handle` in re-readable form.
    pub fn render(&self, handle: &Handle<Value>) -> Result<String> {
        Ok(self.snapshot(handle)?.to_string())
    }

    /// Number of nodes in the tree rooted at `handle`.
    pub fn count_nodes(&self, handle: &Handle<Value>) -> Result<usize> {
        let mut pending = vec![handle.slot_id()];
        let mut count = 0;
        while let Some(id) = pending.pop() {
            let value = self.nodes.get(id)?;
            pending.extend(value.children().iter().map(Handle::slot_id));
            count += 1;
        }
        Ok(count)
    }

    /// Allocates a copy of `datum`. Each parent's slot is reserved before its
    /// children are built. On exhaustion the partially built subtree is
    /// released before the error returns.
    pub fn insert(&mut self, datum: &Datum) -> Result<Handle<Value>> {
        let mut handle = self.nodes.reserve()?;
        let value = match datum {
            Datum::Atom(text) => Value::Atom(text.clone()),
            Datum::String(text) => Value::String(text.clone()),
            Datum::Integer(n) => Value::Integer(*n),
            Datum::Boolean(b) => Value::Boolean(*b),
            Datum::List(items) | Datum::DottedList(items) => {
                let children = match self.insert_children(items) {
                    Ok(children) => children,
                    Err(err) => {
                        self.nodes.remove(handle)?;
                        return Err(err);
                    }
                };
                if matches!(datum, Datum::List(_)) {
                    Value::List(children)
                } else {
                    Value::DottedList(children)
                }
            }
        };
        self.nodes.populate(&mut handle, value)?;
        Ok(handle)
    }

    fn insert_children(&mut self, items: &[Datum]) -> Result<Vec<Handle<Value>>> {
        let mut children = Vec::with_capacity(items.len());
        for item in items {
            match self.insert(item) {
                Ok(child) => children.push(child),
                Err(err) => {
                    self.release_all(children)?;
                    return Err(err);
                }
            }
        }
        Ok(children)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
