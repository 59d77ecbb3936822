//! Round-driven generation
//!
//! [`Processor`] plays the part of the annotation processor: each round's
//! declarations are validated, modeled and registered as they arrive, and
//! output is produced once input is complete.
//!
//! # Example
//!
//! ```no_run
//! use avk_codegen::Processor;
//! use avk_core::{Options, Round, TracingMessager};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let processor = Processor::new(Options::new("src/main/kotlin"), Arc::new(TracingMessager));
//! let round = Round::from_json(&std::fs::read("round.json")?)?;
//! processor.process_round(&round)?;
//! for file in processor.finish()? {
//!     println!("{}", file.path.display());
//! }
//! # Ok(())
//! # }
//! ```

use crate::class::ClassDescriptor;
use crate::emitter::{emit, source_path, write_atomically};
use crate::enums::EnumDescriptor;
use crate::registry::GenerationContext;
use avk_core::{AvkError, AvkResult, DeclarationState, Messager, Options, Round, TypeElement};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, trace};

pub const NESTED_UNDER_NON_VALUE: &str =
    "Cannot convert nested classes to Kotlin safely. Please move this to top-level first.";

pub const NESTED_NON_VALUE: &str =
    "Cannot convert non-autovalue nested classes to Kotlin safely. Please move this to top-level first.";

pub const NO_CLASSES: &str = "No AutoValue classes found";

pub const ENCLOSING_NOT_TARGETED: &str =
    "Nested class is targeted but its enclosing class is not. Add the enclosing class to avkTargets to convert it.";

/// One generated source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub path: PathBuf,
    /// Qualified name of the root declaration
    pub qualified_name: String,
    pub contents: String,
}

/// Drives declarations from rounds to source files
pub struct Processor {
    options: Options,
    messager: Arc<dyn Messager>,
    context: GenerationContext,
    /// Value declarations seen, targeted or not
    candidates: AtomicUsize,
}

impl Processor {
    pub fn new(options: Options, messager: Arc<dyn Messager>) -> Self {
        Self {
            options,
            messager,
            context: GenerationContext::new(),
            candidates: AtomicUsize::new(0),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn context(&self) -> &GenerationContext {
        &self.context
    }

    /// Number of value declarations seen across all rounds
    pub fn candidate_count(&self) -> usize {
        self.candidates.load(Ordering::Relaxed)
    }

    /// Validate, model and register every value declaration in a round,
    /// including nested ones
    pub fn process_round(&self, round: &Round) -> AvkResult<()> {
        debug!(elements = round.elements.len(), "processing round");
        for element in &round.elements {
            self.visit(element)?;
        }
        Ok(())
    }

    fn visit(&self, element: &TypeElement) -> AvkResult<()> {
        if element.is_value_class() {
            self.process_candidate(element)?;
        }
        for nested in &element.nested_types {
            if nested.enclosing.is_some() {
                self.visit(nested)?;
            } else {
                let mut nested = nested.clone();
                nested.enclosing = Some(element.as_enclosing());
                self.visit(&nested)?;
            }
        }
        Ok(())
    }

    fn process_candidate(&self, element: &TypeElement) -> AvkResult<()> {
        let name = element.qualified_name.as_str();
        self.candidates.fetch_add(1, Ordering::Relaxed);

        if !self
            .options
            .is_targeted(element.simple_name(), element.outermost_simple_name())
        {
            trace!(declaration = name, "not targeted");
            return Ok(());
        }
        if !self.context.discover(name) {
            debug!(declaration = name, "already processed in an earlier round");
            return Ok(());
        }
        if let Some(enclosing) = &element.enclosing
            && enclosing.is_value_class()
            && !self
                .options
                .is_targeted(enclosing.simple_name(), element.outermost_simple_name())
        {
            self.messager.warning(ENCLOSING_NOT_TARGETED, Some(name));
            return self.context.transition(name, DeclarationState::Skipped);
        }

        let Some(is_top_level) = self.validate(element) else {
            return self.context.transition(name, DeclarationState::Skipped);
        };
        self.context.transition(name, DeclarationState::Validated)?;

        let messager = self.messager.as_ref();
        let enum_children = element
            .nested_types
            .iter()
            .filter(|t| t.is_enum())
            .filter_map(|t| EnumDescriptor::convert(t, messager))
            .map(|converted| self.context.register_enum(converted).qualified_name())
            .collect();

        match ClassDescriptor::from_element(element, enum_children, messager)? {
            Some(mut descriptor) => {
                descriptor.is_top_level = is_top_level;
                self.context.register_class(descriptor);
                self.context.transition(name, DeclarationState::Modeled)
            }
            None => self.context.transition(name, DeclarationState::Skipped),
        }
    }

    /// Nesting checks. Returns whether the declaration is generated as its
    /// own file, or `None` when it has to be skipped.
    fn validate(&self, element: &TypeElement) -> Option<bool> {
        let name = element.qualified_name.as_str();
        let mut is_top_level = element.is_top_level();

        if let Some(enclosing) = &element.enclosing
            && !enclosing.is_value_class()
        {
            if !self.options.ignore_nested {
                self.messager.error(NESTED_UNDER_NON_VALUE, Some(name));
                return None;
            }
            self.messager.warning(NESTED_UNDER_NON_VALUE, Some(name));
            is_top_level = true;
        }

        let unsupported: Vec<&TypeElement> = element
            .nested_types
            .iter()
            .filter(|t| !t.is_builder_type() && !t.is_enum() && !t.is_value_class())
            .collect();
        for nested in &unsupported {
            self.messager
                .error(NESTED_NON_VALUE, Some(&nested.qualified_name));
        }
        unsupported.is_empty().then_some(is_top_level)
    }

    /// Compose and render every root without writing anything
    pub fn generate(&self) -> AvkResult<Vec<GeneratedFile>> {
        if self.candidate_count() == 0 {
            self.messager.error(NO_CLASSES, None);
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for root in self.context.roots() {
            let file = self.context.compose(&root)?;
            files.push(GeneratedFile {
                path: source_path(&self.options.src_dir, &file.package, &file.root.name),
                qualified_name: root,
                contents: emit(&file),
            });
        }
        self.context.drain_leftovers()?;
        info!(files = files.len(), "generation complete");
        Ok(files)
    }

    /// Generate and write every file under the source root
    pub fn finish(&self) -> AvkResult<Vec<GeneratedFile>> {
        let files = self.generate()?;
        for file in &files {
            write_atomically(&file.path, &file.contents)?;
        }
        for name in self.context.in_state(DeclarationState::Composed) {
            self.context.transition(&name, DeclarationState::Emitted)?;
        }
        let unfinished = self.context.unfinished();
        if !unfinished.is_empty() {
            return Err(AvkError::Internal(format!(
                "declarations left unfinished: {}",
                unfinished.join(", ")
            )));
        }
        Ok(files)
    }
}
