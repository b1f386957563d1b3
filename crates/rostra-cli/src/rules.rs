//! # Rule-Set Validation Subcommand
//!
//! Loads a tenant rule-set file (YAML or JSON — YAML is a superset, so one
//! parser covers both), runs it through the configuration boundary, and
//! prints the validated policy in trigger order.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use rostra_escalation::{RuleSet, RuleSetConfig};

/// Arguments for the `rules` subcommand.
#[derive(Args, Debug)]
pub struct RulesArgs {
    #[command(subcommand)]
    command: RulesCommand,
}

#[derive(clap::Subcommand, Debug)]
enum RulesCommand {
    /// Validate a rule-set configuration file.
    Validate {
        /// Path to the rule-set file (YAML or JSON).
        file: PathBuf,
    },
    /// Print the built-in default policy.
    Default,
}

/// Load a rule set from a file, or the default policy when no file is
/// given. Shared with `simulate` and `serve`.
pub fn load_rule_set(path: Option<&Path>) -> anyhow::Result<RuleSet> {
    let Some(path) = path else {
        return Ok(RuleSet::default_policy());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading rule set {}", path.display()))?;
    let config: RuleSetConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("parsing rule set {}", path.display()))?;
    let set = RuleSet::from_config(config)
        .with_context(|| format!("validating rule set {}", path.display()))?;
    Ok(set)
}

/// Dispatch the `rules` subcommand.
pub fn run(args: RulesArgs) -> anyhow::Result<()> {
    match args.command {
        RulesCommand::Validate { file } => {
            let set = load_rule_set(Some(&file))?;
            println!("rule set OK: {} rules", set.len());
            print_rules(&set);
            Ok(())
        }
        RulesCommand::Default => {
            let set = RuleSet::default_policy();
            print_rules(&set);
            Ok(())
        }
    }
}

fn print_rules(set: &RuleSet) {
    for rule in set.rules() {
        println!(
            "  {:>5}m  {:<18} {}",
            rule.trigger_after_minutes(),
            rule.action().name(),
            rule.id(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rule_set_defaults_without_file() {
        let set = load_rule_set(None).unwrap();
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_load_rule_set_from_yaml() {
        let dir = std::env::temp_dir().join("rostra-cli-rules-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rules.yaml");
        std::fs::write(
            &path,
            concat!(
                "rules:\n",
                "  - id: tier-2-at-20m\n",
                "    trigger_after_minutes: 20\n",
                "    action: escalate_tier\n",
                "  - id: urgent-at-40m\n",
                "    trigger_after_minutes: 40\n",
                "    action: increase_urgency\n",
                "    new_urgency: urgent\n",
            ),
        )
        .unwrap();

        let set = load_rule_set(Some(&path)).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.rules()[0].trigger_after_minutes(), 20);
    }

    #[test]
    fn test_load_rule_set_rejects_missing_parameter() {
        let dir = std::env::temp_dir().join("rostra-cli-rules-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad-rules.yaml");
        std::fs::write(
            &path,
            concat!(
                "rules:\n",
                "  - id: urgent-at-40m\n",
                "    trigger_after_minutes: 40\n",
                "    action: increase_urgency\n",
            ),
        )
        .unwrap();

        let err = load_rule_set(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("validating"));
    }
}
