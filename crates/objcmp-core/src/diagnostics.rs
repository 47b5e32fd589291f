//! Advisory mismatch diagnostics
//!
//! The engine reports one [`Diagnostic`] per sub-mismatch to an injected
//! [`DiagnosticSink`]. Diagnostics never change the boolean outcome of a
//! comparison.

use std::fmt;

use objcmp_core_types::schema;

use crate::errors::FaultKind;

/// One mismatch found during a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    kind: FaultKind,
    lhs_type: String,
    rhs_type: String,
    field: Option<String>,
    index: Option<usize>,
    message: String,
}

impl Diagnostic {
    pub fn new(kind: FaultKind, lhs_type: impl Into<String>, rhs_type: impl Into<String>) -> Self {
        Self {
            kind,
            lhs_type: lhs_type.into(),
            rhs_type: rhs_type.into(),
            field: None,
            index: None,
            message: String::new(),
        }
    }

    /// Add the name of the field being compared
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add the index of the sequence item being compared
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Add a detail message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn lhs_type(&self) -> &str {
        &self.lhs_type
    }

    pub fn rhs_type(&self) -> &str {
        &self.rhs_type
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lhs, rhs) = (&self.lhs_type, &self.rhs_type);
        write!(f, "[{}] ", self.code())?;
        match self.kind {
            FaultKind::StructuralMismatch => {
                write!(f, "Mismatch found between {lhs} and {rhs}")?
            }
            FaultKind::UnreadableField => write!(f, "Cannot compare {lhs} with {rhs}")?,
            FaultKind::TypeIncompatible => {
                write!(f, "Type mismatch between {lhs} and {rhs}")?
            }
            FaultKind::CatastrophicFault => {
                write!(f, "Cannot compare values {lhs} and {rhs}")?
            }
        }
        if let Some(field) = &self.field {
            write!(f, " in field `{field}`")?;
        }
        if let Some(index) = self.index {
            write!(f, " at item {index}")?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

/// Receiver of mismatch diagnostics
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Default sink: one structured `tracing` event per diagnostic
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::info!(
            component = module_path!(),
            op = schema::OP_COMPARE,
            event = schema::EVENT_MISMATCH,
            err.kind = ?diagnostic.kind(),
            err.code = diagnostic.code(),
            lhs_type = diagnostic.lhs_type(),
            rhs_type = diagnostic.rhs_type(),
            field = diagnostic.field(),
            index = diagnostic.index(),
            "{}",
            diagnostic
        );
    }
}

/// Collects diagnostics in memory
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}
