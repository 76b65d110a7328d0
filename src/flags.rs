//! Flag interning
//!
//! Code generators refer to scheduling flags by integer. [`FlagCache`]
//! hands out dense ids in first-seen order, so the same set of routines
//! always produces the same numbering.

use crate::ast::Routine;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct FlagCache {
    ids: FxHashMap<String, u32>,
    names: Vec<String>,
}

impl FlagCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `name`, assigning the next free one if it is new.
    pub fn insert(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len() as u32;
        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    pub fn id(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    /// Intern every open and close flag of `routine`, block by block.
    pub fn extend_from_routine<B>(&mut self, routine: &Routine<B>) {
        for block in &routine.blocks {
            for flag in block.open_flags.iter().chain(&block.close_flags) {
                self.insert(flag);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `(id, name)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(id, name)| (id as u32, name.as_str()))
    }
}
