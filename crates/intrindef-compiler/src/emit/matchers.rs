//! Matcher slot assignment.
//!
//! Two arrays of slots are built. Type slots: one reserved slot per template
//! type, then every type, then every type matcher. Number slots: one reserved
//! slot per template number, then every enum matcher (including the ones the
//! resolver synthesized).

use std::collections::HashMap;

use intrindef_table::{MatcherIndex, MatcherSlot};

use crate::sem::{EnumMatcherId, Named, Sem, TypeId, TypeMatcherId};

#[derive(Debug, Clone, Default)]
pub struct Matchers {
    type_slots: Vec<MatcherSlot>,
    number_slots: Vec<MatcherSlot>,
    types: HashMap<TypeId, MatcherIndex>,
    type_matchers: HashMap<TypeMatcherId, MatcherIndex>,
    enum_matchers: HashMap<EnumMatcherId, MatcherIndex>,
}

impl Matchers {
    pub fn new(sem: &Sem) -> Self {
        let mut this = Self::default();

        for i in 0..sem.max_template_types {
            this.type_slots.push(MatcherSlot::Template(i as u32));
        }
        for (i, ty) in sem.types.iter().enumerate() {
            let index = this.type_slots.len() as MatcherIndex;
            this.types.insert(TypeId::from_raw(i as u32), index);
            this.type_slots.push(MatcherSlot::Type(ty.name.clone()));
        }
        for (i, matcher) in sem.type_matchers.iter().enumerate() {
            let index = this.type_slots.len() as MatcherIndex;
            this.type_matchers.insert(TypeMatcherId::from_raw(i as u32), index);
            this.type_slots.push(MatcherSlot::TypeMatcher(matcher.name.clone()));
        }

        for i in 0..sem.max_template_numbers {
            this.number_slots.push(MatcherSlot::Template(i as u32));
        }
        for (i, matcher) in sem.enum_matchers.iter().enumerate() {
            let index = this.number_slots.len() as MatcherIndex;
            this.enum_matchers.insert(EnumMatcherId::from_raw(i as u32), index);
            this.number_slots.push(MatcherSlot::EnumMatcher(matcher.name.clone()));
        }

        this
    }

    /// Slot of a declared entity. Template parameters are positional and
    /// handled by the caller.
    pub fn index_of(&self, named: Named) -> Option<MatcherIndex> {
        match named {
            Named::Type(id) => self.types.get(&id).copied(),
            Named::TypeMatcher(id) => self.type_matchers.get(&id).copied(),
            Named::EnumMatcher(id) => self.enum_matchers.get(&id).copied(),
            Named::Enum(_) | Named::EnumEntry(_) | Named::TemplateParam(_) => None,
        }
    }

    pub fn type_slots(&self) -> &[MatcherSlot] {
        &self.type_slots
    }

    pub fn number_slots(&self) -> &[MatcherSlot] {
        &self.number_slots
    }

    pub fn into_slots(self) -> (Vec<MatcherSlot>, Vec<MatcherSlot>) {
        (self.type_slots, self.number_slots)
    }
}
