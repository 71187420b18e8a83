//! Conditional dependency rules and their evaluation
//!
//! Rules gate extra dependency declarations on the resolution target:
//! platform membership, editor flag, configuration membership, combined
//! by conjunction. Tags are authored as strings and validated during
//! evaluation; an unknown tag is an error rather than a silent false.

use std::fmt;
use thiserror::Error;

use super::descriptor::Visibility;
use crate::primitives::{BuildConfiguration, TargetContext, TargetPlatform};

/// Which tag vocabulary an unrecognized tag failed against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagDomain {
    Platform,
    Configuration,
}

impl fmt::Display for TagDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagDomain::Platform => write!(f, "platform"),
            TagDomain::Configuration => write!(f, "configuration"),
        }
    }
}

/// Errors raised while evaluating a condition against a target
#[derive(Debug, Error)]
pub enum ConditionError {
    #[error("Unrecognized {domain} tag '{tag}' in conditional rule")]
    UnrecognizedTag { tag: String, domain: TagDomain },
}

/// Target predicate of a conditional rule
///
/// Each component is optional: an empty platform or configuration set and
/// an unset editor flag all match every target. A rule with every
/// component unset is unconditionally active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition {
    /// Platform tags, any-of
    pub platforms: Vec<String>,
    /// Required editor flag state
    pub editor: Option<bool>,
    /// Configuration tags, any-of
    pub configurations: Vec<String>,
}

impl Condition {
    /// The condition that matches every target
    pub fn always() -> Self {
        Self::default()
    }

    pub fn with_platforms(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.platforms.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_editor(mut self, editor: bool) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn with_configurations(
        mut self,
        tags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.configurations.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Evaluate the condition for one target
    ///
    /// Every tag is validated before membership is tested, so a typo in
    /// the tag list surfaces even when another tag already matched.
    pub fn evaluate(&self, target: &TargetContext) -> Result<bool, ConditionError> {
        let platforms = self
            .platforms
            .iter()
            .map(|tag| {
                tag.parse::<TargetPlatform>()
                    .map_err(|_| ConditionError::UnrecognizedTag {
                        tag: tag.clone(),
                        domain: TagDomain::Platform,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let configurations = self
            .configurations
            .iter()
            .map(|tag| {
                tag.parse::<BuildConfiguration>()
                    .map_err(|_| ConditionError::UnrecognizedTag {
                        tag: tag.clone(),
                        domain: TagDomain::Configuration,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let platform_matches = platforms.is_empty() || platforms.contains(&target.platform);
        let editor_matches = self.editor.map_or(true, |wanted| wanted == target.editor);
        let configuration_matches =
            configurations.is_empty() || configurations.contains(&target.configuration);

        Ok(platform_matches && editor_matches && configuration_matches)
    }
}

/// A dependency declaration gated on a target condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalRule {
    condition: Condition,
    visibility: Visibility,
    dependencies: Vec<String>,
    third_party: Vec<String>,
}

impl ConditionalRule {
    /// Create a rule contributing `dependencies` at `visibility` when the
    /// condition holds
    pub fn new(condition: Condition, visibility: Visibility, dependencies: Vec<String>) -> Self {
        Self {
            condition,
            visibility,
            dependencies,
            third_party: Vec::new(),
        }
    }

    /// Append third-party references activated alongside the rule
    pub fn with_third_party(mut self, tags: Vec<String>) -> Self {
        self.third_party.extend(tags);
        self
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn third_party(&self) -> &[String] {
        &self.third_party
    }
}

#[cfg(test)]
mod tests {
    include!("condition.test.rs");
}
