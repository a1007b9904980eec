//! Reclaiming unreachable scopes

use std::collections::HashSet;
use std::rc::Rc;

use super::{EnvId, Environment};
use crate::value::Value;

impl Environment {
    /// Free every scope not reachable from `roots`; returns how many were freed.
    ///
    /// A scope is reachable through its parent link and through the
    /// captured scope of any function found in a reachable binding,
    /// including functions nested in collections, atom slots and function
    /// bodies. Handles to freed scopes become stale.
    ///
    /// Must only run while no evaluation is in progress: scopes held by
    /// native stack frames are not roots.
    pub fn collect(&mut self, roots: impl IntoIterator<Item = EnvId>) -> usize {
        let mut marked = vec![false; self.slots.len()];
        let mut pending_scopes: Vec<EnvId> = roots.into_iter().collect();
        let mut pending_values: Vec<Value> = Vec::new();
        let mut seen: HashSet<usize> = HashSet::new();

        // Mark
        while !pending_scopes.is_empty() || !pending_values.is_empty() {
            while let Some(id) = pending_scopes.pop() {
                let Ok(scope) = self.scope(id) else {
                    continue;
                };
                if std::mem::replace(&mut marked[id.index()], true) {
                    continue;
                }
                pending_scopes.extend(scope.outer);
                pending_values.extend(scope.bindings.values().cloned());
            }

            while let Some(value) = pending_values.pop() {
                match value {
                    Value::Function(f) => {
                        if seen.insert(Rc::as_ptr(&f) as *const () as usize) {
                            pending_scopes.push(f.env);
                            pending_values.push(f.body.clone());
                        }
                    }
                    Value::List(items) | Value::Vector(items) => {
                        if seen.insert(Rc::as_ptr(&items) as *const () as usize) {
                            pending_values.extend(items.iter().cloned());
                        }
                    }
                    Value::Map(map) => {
                        if seen.insert(Rc::as_ptr(&map) as *const () as usize) {
                            pending_values.extend(map.values().cloned());
                        }
                    }
                    Value::Atom(cell) => {
                        if seen.insert(Rc::as_ptr(&cell) as *const () as usize) {
                            pending_values.push(cell.borrow().clone());
                        }
                    }
                    _ => {}
                }
            }
        }

        // Sweep
        let mut freed = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.scope.is_some() && !marked[index] {
                slot.scope = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
                freed += 1;
            }
        }
        self.live -= freed;

        tracing::debug!(freed, live = self.live, "reclaimed scopes");
        freed
    }
}
