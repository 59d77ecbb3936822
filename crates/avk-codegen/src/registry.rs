//! Run-wide generation context
//!
//! Descriptors are registered as rounds are processed and drained when the
//! run composes its output files. All maps are keyed by qualified name and
//! use insert-if-absent semantics, so a declaration seen in two rounds keeps
//! its first model.

use crate::class::ClassDescriptor;
use crate::enums::EnumDescriptor;
use crate::kotlin::{FileSpec, TypeSpec};
use avk_core::{AvkError, AvkResult, DeclarationState};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Registered descriptors and the lifecycle state of every declaration
#[derive(Debug, Default)]
pub struct GenerationContext {
    classes: DashMap<String, Arc<ClassDescriptor>>,
    enums: DashMap<String, Arc<EnumDescriptor>>,
    states: DashMap<String, DeclarationState>,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declaration as discovered.
    ///
    /// Returns `false` when it was already known.
    pub fn discover(&self, name: &str) -> bool {
        match self.states.entry(name.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(DeclarationState::Discovered);
                trace!(declaration = name, "discovered");
                true
            }
        }
    }

    pub fn state(&self, name: &str) -> Option<DeclarationState> {
        self.states.get(name).map(|s| *s)
    }

    /// Move a declaration to its next lifecycle state
    pub fn transition(&self, name: &str, target: DeclarationState) -> AvkResult<()> {
        let Some(mut state) = self.states.get_mut(name) else {
            return Err(AvkError::InvalidTransition {
                name: name.to_string(),
                from: "Unknown".to_string(),
                to: target.to_string(),
            });
        };
        let from = *state;
        if !from.can_transition_to(target) {
            return Err(AvkError::InvalidTransition {
                name: name.to_string(),
                from: from.to_string(),
                to: target.to_string(),
            });
        }
        *state = target;
        trace!(declaration = name, %from, to = %target, "transition");
        Ok(())
    }

    /// Number of declarations seen so far
    pub fn discovered_count(&self) -> usize {
        self.states.len()
    }

    /// Declarations currently in `state`, sorted
    pub fn in_state(&self, state: DeclarationState) -> Vec<String> {
        let mut names: Vec<String> = self
            .states
            .iter()
            .filter(|s| *s.value() == state)
            .map(|s| s.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Declarations not yet emitted or skipped, sorted
    pub fn unfinished(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .states
            .iter()
            .filter(|s| !s.value().is_terminal())
            .map(|s| s.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Register a class model. Returns `false` if one was already registered
    /// under the same name.
    pub fn register_class(&self, descriptor: ClassDescriptor) -> bool {
        let name = descriptor.qualified_name();
        match self.classes.entry(name) {
            Entry::Occupied(entry) => {
                debug!(class = %entry.key(), "class already registered");
                false
            }
            Entry::Vacant(entry) => {
                debug!(class = %entry.key(), "registered class");
                entry.insert(Arc::new(descriptor));
                true
            }
        }
    }

    /// Register an enum model and hand back the canonical entry for its name
    pub fn register_enum(&self, descriptor: EnumDescriptor) -> Arc<EnumDescriptor> {
        let name = descriptor.qualified_name();
        self.enums
            .entry(name)
            .or_insert_with(|| Arc::new(descriptor))
            .clone()
    }

    pub fn class(&self, name: &str) -> Option<Arc<ClassDescriptor>> {
        self.classes.get(name).map(|c| c.clone())
    }

    pub fn enum_descriptor(&self, name: &str) -> Option<Arc<EnumDescriptor>> {
        self.enums.get(name).map(|e| e.clone())
    }

    /// Qualified names of registered top-level classes, sorted
    pub fn roots(&self) -> Vec<String> {
        let mut roots: Vec<String> = self
            .classes
            .iter()
            .filter(|c| c.is_top_level)
            .map(|c| c.key().clone())
            .collect();
        roots.sort();
        roots
    }

    /// Remove a root and its nested declarations from the registry and
    /// build its file.
    pub fn compose(&self, root: &str) -> AvkResult<FileSpec> {
        let descriptor = self.take_class(root, None)?;
        let spec = self.compose_type(&descriptor)?;
        Ok(FileSpec::new(descriptor.package(), spec))
    }

    fn compose_type(&self, descriptor: &ClassDescriptor) -> AvkResult<TypeSpec> {
        let name = descriptor.qualified_name();
        let mut spec = descriptor.to_type_spec()?;
        for child in &descriptor.children {
            if let Some((_, enum_child)) = self.enums.remove(child) {
                spec.types.push(enum_child.to_type_spec());
                continue;
            }
            if self.state(child) == Some(DeclarationState::Skipped) {
                debug!(child = %child, parent = %name, "child was skipped");
                continue;
            }
            let child_descriptor = self.take_class(child, Some(&name))?;
            spec.types.push(self.compose_type(&child_descriptor)?);
        }
        self.transition(&name, DeclarationState::Composed)?;
        Ok(spec)
    }

    fn take_class(&self, name: &str, parent: Option<&str>) -> AvkResult<Arc<ClassDescriptor>> {
        match self.classes.remove(name) {
            Some((_, descriptor)) => Ok(descriptor),
            None => Err(AvkError::MissingChild {
                child: name.to_string(),
                parent: parent.unwrap_or("<root>").to_string(),
            }),
        }
    }

    /// Account for classes no composition claimed.
    ///
    /// A class whose parent was skipped is skipped with it. Any other
    /// leftover means a parent lost track of a child.
    pub fn drain_leftovers(&self) -> AvkResult<()> {
        let mut leftovers: Vec<(String, Option<String>)> = self
            .classes
            .iter()
            .map(|c| (c.key().clone(), c.parent.clone()))
            .collect();
        leftovers.sort();

        for (name, parent) in leftovers {
            let parent_state = parent.as_deref().and_then(|p| self.state(p));
            if parent_state != Some(DeclarationState::Skipped) {
                return Err(AvkError::OrphanedChild(name));
            }
            warn!(declaration = %name, "skipping nested class of a skipped parent");
            self.classes.remove(&name);
            self.transition(&name, DeclarationState::Skipped)?;
        }
        self.enums.clear();
        Ok(())
    }
}
