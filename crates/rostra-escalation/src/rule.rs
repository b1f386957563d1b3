//! # Escalation Rules — Configuration Entities
//!
//! A rule pairs an elapsed-time threshold with an action. Rule sets are
//! supplied per tenant/location, validated once at construction, and never
//! mutated at runtime.
//!
//! The raw configuration shape (`RuleConfig` / `RuleSetConfig`) mirrors
//! what tenants write in YAML: a flat record with optional parameter
//! fields. Validation converts it into `EscalationRule`, whose `RuleAction`
//! sum type carries only the parameters relevant to each action kind, so a
//! missing `new_urgency` or `extend_minutes` is rejected at the boundary
//! and unrepresentable afterwards.

use serde::{Deserialize, Serialize};

use rostra_core::{RuleId, ValidationError};

use crate::record::Urgency;

// ─── Validated rule ─────────────────────────────────────────────────

/// The action a rule performs when its threshold is crossed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RuleAction {
    /// Widen the notified partner pool to the next tier.
    EscalateTier,
    /// Raise the urgency framing to the given level.
    IncreaseUrgency {
        /// The urgency to move to.
        new_urgency: Urgency,
    },
    /// Push the response deadline out by the given amount.
    ExtendDeadline {
        /// Extension in whole minutes (positive).
        extend_minutes: i64,
    },
    /// Alert a human supervisor; record state is untouched.
    NotifySupervisor,
}

impl RuleAction {
    /// The canonical action-kind name (e.g. `escalate_tier`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::EscalateTier => "escalate_tier",
            Self::IncreaseUrgency { .. } => "increase_urgency",
            Self::ExtendDeadline { .. } => "extend_deadline",
            Self::NotifySupervisor => "notify_supervisor",
        }
    }
}

/// One validated escalation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationRule {
    id: RuleId,
    trigger_after_minutes: i64,
    #[serde(flatten)]
    action: RuleAction,
}

impl EscalationRule {
    /// Build a rule, validating its threshold and parameters.
    ///
    /// # Errors
    ///
    /// - `NegativeTrigger` when `trigger_after_minutes < 0`.
    /// - `NonPositiveExtension` when a deadline extension is zero or
    ///   negative.
    pub fn new(
        id: RuleId,
        trigger_after_minutes: i64,
        action: RuleAction,
    ) -> Result<Self, ValidationError> {
        if trigger_after_minutes < 0 {
            return Err(ValidationError::NegativeTrigger {
                rule_id: id.as_str().to_string(),
                minutes: trigger_after_minutes,
            });
        }
        if let RuleAction::ExtendDeadline { extend_minutes } = action {
            if extend_minutes <= 0 {
                return Err(ValidationError::NonPositiveExtension {
                    rule_id: id.as_str().to_string(),
                    minutes: extend_minutes,
                });
            }
        }
        Ok(Self {
            id,
            trigger_after_minutes,
            action,
        })
    }

    /// Stable rule identifier, tagged into history on application.
    pub fn id(&self) -> &RuleId {
        &self.id
    }

    /// Elapsed whole minutes since broadcast start at which this rule
    /// triggers.
    pub fn trigger_after_minutes(&self) -> i64 {
        self.trigger_after_minutes
    }

    /// The configured action.
    pub fn action(&self) -> &RuleAction {
        &self.action
    }
}

// ─── Rule set ───────────────────────────────────────────────────────

/// A validated rule set, ordered ascending by trigger threshold.
///
/// The evaluator scans rules in the order the set supplies them; sorting
/// happens here, once, at the configuration boundary. Rules with equal
/// thresholds keep their configured relative order (stable sort).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<EscalationRule>,
}

impl RuleSet {
    /// Build a rule set from validated rules.
    ///
    /// # Errors
    ///
    /// Rejects duplicate rule ids — the applied-rule tags in history would
    /// be ambiguous otherwise.
    pub fn new(mut rules: Vec<EscalationRule>) -> Result<Self, ValidationError> {
        let mut seen = std::collections::HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id().clone()) {
                return Err(ValidationError::DuplicateRuleId {
                    rule_id: rule.id().as_str().to_string(),
                });
            }
        }
        rules.sort_by_key(|r| r.trigger_after_minutes());
        Ok(Self { rules })
    }

    /// Build a rule set from the raw configuration shape.
    pub fn from_config(config: RuleSetConfig) -> Result<Self, ValidationError> {
        let rules = config
            .rules
            .into_iter()
            .map(EscalationRule::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rules)
    }

    /// The rules, ascending by trigger threshold.
    pub fn rules(&self) -> &[EscalationRule] {
        &self.rules
    }

    /// Number of rules in the set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set contains no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The default escalation policy shipped with the product.
    ///
    /// Widens the pool at 30 and 120 minutes, raises urgency at 60 and 180,
    /// and alerts a supervisor at 240. Tenants override this per location.
    pub fn default_policy() -> Self {
        fn rule(id: &str, minutes: i64, action: RuleAction) -> EscalationRule {
            EscalationRule::new(RuleId::new(id).expect("static id"), minutes, action)
                .expect("static rule")
        }
        Self::new(vec![
            rule("tier-2-at-30m", 30, RuleAction::EscalateTier),
            rule("urgent-at-60m", 60, RuleAction::IncreaseUrgency {
                new_urgency: Urgency::Urgent,
            }),
            rule("tier-3-at-120m", 120, RuleAction::EscalateTier),
            rule("critical-at-180m", 180, RuleAction::IncreaseUrgency {
                new_urgency: Urgency::Critical,
            }),
            rule("supervisor-at-240m", 240, RuleAction::NotifySupervisor),
        ])
        .expect("default policy ids are unique")
    }
}

// ─── Raw configuration shape ────────────────────────────────────────

/// Action kind as written in tenant configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleActionKind {
    /// Maps to [`RuleAction::EscalateTier`].
    EscalateTier,
    /// Maps to [`RuleAction::IncreaseUrgency`]; requires `new_urgency`.
    IncreaseUrgency,
    /// Maps to [`RuleAction::ExtendDeadline`]; requires `extend_minutes`.
    ExtendDeadline,
    /// Maps to [`RuleAction::NotifySupervisor`].
    NotifySupervisor,
}

impl RuleActionKind {
    fn name(&self) -> &'static str {
        match self {
            Self::EscalateTier => "escalate_tier",
            Self::IncreaseUrgency => "increase_urgency",
            Self::ExtendDeadline => "extend_deadline",
            Self::NotifySupervisor => "notify_supervisor",
        }
    }
}

/// One rule as written in tenant configuration (YAML/JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Stable rule identifier, unique within the set.
    pub id: String,
    /// Elapsed whole minutes since broadcast start.
    pub trigger_after_minutes: i64,
    /// Action kind.
    pub action: RuleActionKind,
    /// Required when `action` is `increase_urgency`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_urgency: Option<Urgency>,
    /// Required when `action` is `extend_deadline`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extend_minutes: Option<i64>,
}

/// A tenant's rule-set configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSetConfig {
    /// Rules in configuration order; sorted by threshold at validation.
    pub rules: Vec<RuleConfig>,
}

impl TryFrom<RuleConfig> for EscalationRule {
    type Error = ValidationError;

    fn try_from(config: RuleConfig) -> Result<Self, Self::Error> {
        let id = RuleId::new(config.id.clone())?;
        let action = match config.action {
            RuleActionKind::EscalateTier => RuleAction::EscalateTier,
            RuleActionKind::IncreaseUrgency => {
                let new_urgency =
                    config.new_urgency.ok_or_else(|| ValidationError::MissingParameter {
                        rule_id: config.id.clone(),
                        action: config.action.name().to_string(),
                        parameter: "new_urgency".to_string(),
                    })?;
                RuleAction::IncreaseUrgency { new_urgency }
            }
            RuleActionKind::ExtendDeadline => {
                let extend_minutes =
                    config.extend_minutes.ok_or_else(|| ValidationError::MissingParameter {
                        rule_id: config.id.clone(),
                        action: config.action.name().to_string(),
                        parameter: "extend_minutes".to_string(),
                    })?;
                RuleAction::ExtendDeadline { extend_minutes }
            }
            RuleActionKind::NotifySupervisor => RuleAction::NotifySupervisor,
        };
        EscalationRule::new(id, config.trigger_after_minutes, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, minutes: i64, action: RuleAction) -> EscalationRule {
        EscalationRule::new(RuleId::new(id).unwrap(), minutes, action).unwrap()
    }

    #[test]
    fn test_rule_rejects_negative_trigger() {
        let err = EscalationRule::new(
            RuleId::new("bad").unwrap(),
            -5,
            RuleAction::EscalateTier,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::NegativeTrigger { rule_id: "bad".into(), minutes: -5 }
        );
    }

    #[test]
    fn test_rule_rejects_non_positive_extension() {
        let err = EscalationRule::new(
            RuleId::new("extend").unwrap(),
            90,
            RuleAction::ExtendDeadline { extend_minutes: 0 },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonPositiveExtension { rule_id: "extend".into(), minutes: 0 }
        );
    }

    #[test]
    fn test_rule_set_sorts_ascending() {
        let set = RuleSet::new(vec![
            rule("late", 240, RuleAction::NotifySupervisor),
            rule("early", 30, RuleAction::EscalateTier),
            rule("mid", 120, RuleAction::EscalateTier),
        ])
        .unwrap();
        let thresholds: Vec<i64> =
            set.rules().iter().map(|r| r.trigger_after_minutes()).collect();
        assert_eq!(thresholds, vec![30, 120, 240]);
    }

    #[test]
    fn test_rule_set_stable_for_equal_thresholds() {
        let set = RuleSet::new(vec![
            rule("first", 60, RuleAction::EscalateTier),
            rule("second", 60, RuleAction::NotifySupervisor),
        ])
        .unwrap();
        assert_eq!(set.rules()[0].id().as_str(), "first");
        assert_eq!(set.rules()[1].id().as_str(), "second");
    }

    #[test]
    fn test_rule_set_rejects_duplicate_ids() {
        let err = RuleSet::new(vec![
            rule("dup", 30, RuleAction::EscalateTier),
            rule("dup", 60, RuleAction::NotifySupervisor),
        ])
        .unwrap_err();
        assert_eq!(err, ValidationError::DuplicateRuleId { rule_id: "dup".into() });
    }

    #[test]
    fn test_default_policy_shape() {
        let set = RuleSet::default_policy();
        assert_eq!(set.len(), 5);
        let thresholds: Vec<i64> =
            set.rules().iter().map(|r| r.trigger_after_minutes()).collect();
        assert_eq!(thresholds, vec![30, 60, 120, 180, 240]);
        assert_eq!(set.rules()[4].action().name(), "notify_supervisor");
    }

    // ── Config boundary ──────────────────────────────────────────────

    fn config(action: RuleActionKind) -> RuleConfig {
        RuleConfig {
            id: "r1".into(),
            trigger_after_minutes: 45,
            action,
            new_urgency: None,
            extend_minutes: None,
        }
    }

    #[test]
    fn test_config_missing_new_urgency_rejected() {
        let err = EscalationRule::try_from(config(RuleActionKind::IncreaseUrgency)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingParameter {
                rule_id: "r1".into(),
                action: "increase_urgency".into(),
                parameter: "new_urgency".into(),
            }
        );
    }

    #[test]
    fn test_config_missing_extend_minutes_rejected() {
        let err = EscalationRule::try_from(config(RuleActionKind::ExtendDeadline)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingParameter {
                rule_id: "r1".into(),
                action: "extend_deadline".into(),
                parameter: "extend_minutes".into(),
            }
        );
    }

    #[test]
    fn test_config_ignores_irrelevant_parameters() {
        let mut cfg = config(RuleActionKind::EscalateTier);
        cfg.new_urgency = Some(Urgency::Critical);
        let rule = EscalationRule::try_from(cfg).unwrap();
        assert_eq!(rule.action(), &RuleAction::EscalateTier);
    }

    #[test]
    fn test_config_empty_id_rejected() {
        let mut cfg = config(RuleActionKind::EscalateTier);
        cfg.id = "  ".into();
        assert_eq!(
            EscalationRule::try_from(cfg).unwrap_err(),
            ValidationError::EmptyRuleId
        );
    }

    #[test]
    fn test_full_config_parses_from_json() {
        let raw = serde_json::json!({
            "rules": [
                { "id": "tier-2-at-30m", "trigger_after_minutes": 30, "action": "escalate_tier" },
                { "id": "urgent-at-60m", "trigger_after_minutes": 60,
                  "action": "increase_urgency", "new_urgency": "urgent" },
                { "id": "grace-at-90m", "trigger_after_minutes": 90,
                  "action": "extend_deadline", "extend_minutes": 30 }
            ]
        });
        let config: RuleSetConfig = serde_json::from_value(raw).unwrap();
        let set = RuleSet::from_config(config).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.rules()[1].action(),
            &RuleAction::IncreaseUrgency { new_urgency: Urgency::Urgent }
        );
    }
}
