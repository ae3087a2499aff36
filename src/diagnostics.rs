// ABOUTME: Diagnostics accumulator for non-fatal warnings during a restart run.
// ABOUTME: Collects warnings that shouldn't fail a restart but should be shown to users.

/// Collects non-fatal warnings during restart operations.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// A lifecycle-managed deployment had no pods to delete.
    pub fn no_pods(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::NoPodsFound,
            message: message.into(),
        }
    }

    /// A deployment matched both ownership selectors.
    pub fn overlapping_ownership(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::OverlappingOwnership,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Pod listing for a lifecycle-managed deployment came back empty.
    NoPodsFound,
    /// Deployment carries both ownership labels.
    OverlappingOwnership,
}
