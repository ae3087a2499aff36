// ABOUTME: The operator kinds a restart can target.
// ABOUTME: Parsed from the positional CLI argument (host, member-1, member-2).

use clap::ValueEnum;
use std::fmt;

/// Operator whose deployments are being restarted.
///
/// Only used to describe the action in the confirmation prompt; the cluster
/// and namespace come from the resolved cluster config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OperatorType {
    #[value(name = "host")]
    Host,
    #[value(name = "member-1")]
    Member1,
    #[value(name = "member-2")]
    Member2,
}

impl OperatorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatorType::Host => "host",
            OperatorType::Member1 => "member-1",
            OperatorType::Member2 => "member-2",
        }
    }

    /// Accepted names, in the form shown to users.
    pub fn names() -> String {
        Self::value_variants()
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl fmt::Display for OperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_lists_every_operator() {
        assert_eq!(OperatorType::names(), "host | member-1 | member-2");
    }

    #[test]
    fn parses_cli_values() {
        assert_eq!(
            OperatorType::from_str("member-2", false).unwrap(),
            OperatorType::Member2
        );
        assert!(OperatorType::from_str("member-3", false).is_err());
    }
}
