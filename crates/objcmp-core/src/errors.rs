use thiserror::Error;

/// Result type alias using AccessError
pub type Result<T> = std::result::Result<T, AccessError>;

// ========== Fault Taxonomy ==========

/// Canonical fault kind taxonomy
///
/// Every diagnostic the engine reports is classified into one of these kinds.
/// None of them ever escapes to the caller: they only travel through the
/// diagnostic sink, and the caller observes a plain `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// Counts, types or values differ
    StructuralMismatch,
    /// A field accessor or a sequence iterator failed at read time
    UnreadableField,
    /// The two operands failed the type-compatibility check
    TypeIncompatible,
    /// Any other failure inside a sub-comparison (a panic in `Inspect` code)
    CatastrophicFault,
}

impl FaultKind {
    /// Get the stable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            FaultKind::StructuralMismatch => "ERR_STRUCTURAL_MISMATCH",
            FaultKind::UnreadableField => "ERR_UNREADABLE_FIELD",
            FaultKind::TypeIncompatible => "ERR_TYPE_INCOMPATIBLE",
            FaultKind::CatastrophicFault => "ERR_CATASTROPHIC_FAULT",
        }
    }
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ========== End Fault Taxonomy ==========

/// Failure raised while reading a member of an inspected value
///
/// Returned by [`Record::field`](crate::inspect::Record::field) and by the
/// item iterators of [`Sequence`](crate::inspect::Sequence). The engine turns
/// every one of these into a mismatch for the member concerned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The member exists but has no implementation behind it
    #[error("Member is not implemented: {member}")]
    NotImplemented { member: String },

    /// The member could not be read at invocation time
    #[error("Member {member} could not be read: {reason}")]
    Unreadable { member: String, reason: String },

    /// A record was asked for a field index outside its field table
    #[error("No field at index {index} (record has {len} fields)")]
    FieldIndexOutOfRange { index: usize, len: usize },

    /// A record has no field with the requested name
    #[error("No field named {name} on {type_name}")]
    NoSuchField { name: String, type_name: String },
}

impl AccessError {
    /// Convenience constructor for [`AccessError::Unreadable`]
    pub fn unreadable(member: impl Into<String>, reason: impl Into<String>) -> Self {
        AccessError::Unreadable {
            member: member.into(),
            reason: reason.into(),
        }
    }

    /// Convenience constructor for [`AccessError::NotImplemented`]
    pub fn not_implemented(member: impl Into<String>) -> Self {
        AccessError::NotImplemented {
            member: member.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_codes_are_stable() {
        assert_eq!(
            FaultKind::StructuralMismatch.code(),
            "ERR_STRUCTURAL_MISMATCH"
        );
        assert_eq!(FaultKind::UnreadableField.code(), "ERR_UNREADABLE_FIELD");
        assert_eq!(FaultKind::TypeIncompatible.code(), "ERR_TYPE_INCOMPATIBLE");
        assert_eq!(
            FaultKind::CatastrophicFault.code(),
            "ERR_CATASTROPHIC_FAULT"
        );
    }

    #[test]
    fn test_fault_kind_display_is_code() {
        assert_eq!(
            FaultKind::UnreadableField.to_string(),
            FaultKind::UnreadableField.code()
        );
    }

    #[test]
    fn test_access_error_messages() {
        let err = AccessError::not_implemented("legacy_total");
        assert_eq!(err.to_string(), "Member is not implemented: legacy_total");

        let err = AccessError::unreadable("balance", "ledger closed");
        assert_eq!(
            err.to_string(),
            "Member balance could not be read: ledger closed"
        );

        let err = AccessError::FieldIndexOutOfRange { index: 4, len: 2 };
        assert!(err.to_string().contains("index 4"));
    }
}
