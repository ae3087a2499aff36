// ABOUTME: Label selectors for listing deployments and pods.
// ABOUTME: Converts Kubernetes LabelSelector specs into the query string form.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector as K8sLabelSelector;
use std::collections::BTreeMap;
use std::fmt;

/// Errors converting a Kubernetes selector spec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("unknown selector operator '{operator}' for key {key}")]
    UnknownOperator { key: String, operator: String },

    #[error("operator {operator} on key {key} requires at least one value")]
    MissingValues { key: String, operator: String },

    #[error("operator {operator} on key {key} does not take values")]
    UnexpectedValues { key: String, operator: String },
}

/// A single label requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Equals { key: String, value: String },
    In { key: String, values: Vec<String> },
    NotIn { key: String, values: Vec<String> },
    Exists { key: String },
    DoesNotExist { key: String },
}

impl Requirement {
    fn key(&self) -> &str {
        match self {
            Requirement::Equals { key, .. }
            | Requirement::In { key, .. }
            | Requirement::NotIn { key, .. }
            | Requirement::Exists { key }
            | Requirement::DoesNotExist { key } => key,
        }
    }

    fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        match self {
            Requirement::Equals { key, value } => labels.get(key) == Some(value),
            Requirement::In { key, values } => labels.get(key).is_some_and(|v| values.contains(v)),
            Requirement::NotIn { key, values } => {
                labels.get(key).is_none_or(|v| !values.contains(v))
            }
            Requirement::Exists { key } => labels.contains_key(key),
            Requirement::DoesNotExist { key } => !labels.contains_key(key),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Equals { key, value } => write!(f, "{key}={value}"),
            Requirement::In { key, values } => write!(f, "{key} in ({})", values.join(",")),
            Requirement::NotIn { key, values } => write!(f, "{key} notin ({})", values.join(",")),
            Requirement::Exists { key } => write!(f, "{key}"),
            Requirement::DoesNotExist { key } => write!(f, "!{key}"),
        }
    }
}

/// A conjunction of label requirements.
///
/// An empty selector matches everything, so callers that act destructively on
/// the result must check [`LabelSelector::is_empty`] first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelector {
    requirements: Vec<Requirement>,
}

impl LabelSelector {
    /// Selector matching a single `key=value` label.
    pub fn matching(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            requirements: vec![Requirement::Equals {
                key: key.into(),
                value: value.into(),
            }],
        }
    }

    /// Convert a deployment's `spec.selector`.
    ///
    /// `matchLabels` become equality requirements and `matchExpressions` are
    /// validated the same way the API server validates them.
    pub fn from_k8s(selector: &K8sLabelSelector) -> Result<Self, SelectorError> {
        let mut requirements: Vec<Requirement> = selector
            .match_labels
            .iter()
            .flatten()
            .map(|(key, value)| Requirement::Equals {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();

        for expr in selector.match_expressions.iter().flatten() {
            let key = expr.key.clone();
            let values = expr.values.clone().unwrap_or_default();
            let requirement = match expr.operator.as_str() {
                "In" | "NotIn" if values.is_empty() => {
                    return Err(SelectorError::MissingValues {
                        key,
                        operator: expr.operator.clone(),
                    });
                }
                "Exists" | "DoesNotExist" if !values.is_empty() => {
                    return Err(SelectorError::UnexpectedValues {
                        key,
                        operator: expr.operator.clone(),
                    });
                }
                "In" => Requirement::In { key, values },
                "NotIn" => Requirement::NotIn { key, values },
                "Exists" => Requirement::Exists { key },
                "DoesNotExist" => Requirement::DoesNotExist { key },
                other => {
                    return Err(SelectorError::UnknownOperator {
                        key,
                        operator: other.to_string(),
                    });
                }
            };
            requirements.push(requirement);
        }

        requirements.sort_by(|a, b| a.key().cmp(b.key()));
        Ok(Self { requirements })
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Whether a label set satisfies every requirement.
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.requirements.iter().all(|r| r.matches(labels))
    }
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.requirements.iter().map(|r| r.to_string()).collect();
        f.write_str(&rendered.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelectorRequirement;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn renders_match_labels_sorted_by_key() {
        let spec = K8sLabelSelector {
            match_labels: Some(labels(&[("name", "host-operator"), ("control-plane", "cm")])),
            match_expressions: None,
        };
        let selector = LabelSelector::from_k8s(&spec).unwrap();
        assert_eq!(selector.to_string(), "control-plane=cm,name=host-operator");
    }

    #[test]
    fn renders_match_expressions() {
        let spec = K8sLabelSelector {
            match_labels: None,
            match_expressions: Some(vec![
                LabelSelectorRequirement {
                    key: "tier".to_string(),
                    operator: "In".to_string(),
                    values: Some(vec!["api".to_string(), "web".to_string()]),
                },
                LabelSelectorRequirement {
                    key: "canary".to_string(),
                    operator: "DoesNotExist".to_string(),
                    values: None,
                },
            ]),
        };
        let selector = LabelSelector::from_k8s(&spec).unwrap();
        assert_eq!(selector.to_string(), "!canary,tier in (api,web)");
    }

    #[test]
    fn rejects_unknown_operator() {
        let spec = K8sLabelSelector {
            match_labels: None,
            match_expressions: Some(vec![LabelSelectorRequirement {
                key: "tier".to_string(),
                operator: "Like".to_string(),
                values: Some(vec!["api".to_string()]),
            }]),
        };
        assert!(matches!(
            LabelSelector::from_k8s(&spec),
            Err(SelectorError::UnknownOperator { .. })
        ));
    }

    #[test]
    fn rejects_in_without_values() {
        let spec = K8sLabelSelector {
            match_labels: None,
            match_expressions: Some(vec![LabelSelectorRequirement {
                key: "tier".to_string(),
                operator: "In".to_string(),
                values: Some(vec![]),
            }]),
        };
        assert!(matches!(
            LabelSelector::from_k8s(&spec),
            Err(SelectorError::MissingValues { .. })
        ));
    }

    #[test]
    fn empty_spec_yields_empty_selector() {
        let selector = LabelSelector::from_k8s(&K8sLabelSelector::default()).unwrap();
        assert!(selector.is_empty());
        assert!(selector.matches(&labels(&[("anything", "goes")])));
    }

    #[test]
    fn matches_all_requirements() {
        let spec = K8sLabelSelector {
            match_labels: Some(labels(&[("provider", "codeready-toolchain")])),
            match_expressions: Some(vec![LabelSelectorRequirement {
                key: "tier".to_string(),
                operator: "NotIn".to_string(),
                values: Some(vec!["batch".to_string()]),
            }]),
        };
        let selector = LabelSelector::from_k8s(&spec).unwrap();

        assert!(selector.matches(&labels(&[("provider", "codeready-toolchain")])));
        assert!(selector.matches(&labels(&[
            ("provider", "codeready-toolchain"),
            ("tier", "api")
        ])));
        assert!(!selector.matches(&labels(&[
            ("provider", "codeready-toolchain"),
            ("tier", "batch")
        ])));
        assert!(!selector.matches(&labels(&[("provider", "other")])));
    }
}
