//! 規則集：載入時驗證並分為獨立 / 相依兩階段

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::rule::SurchargeRule;
use crate::{CostError, Result};

/// 評估階段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// 第一階段：不相依其他規則
    Independent,
    /// 第二階段：讀取第一階段旗標
    Dependent,
}

/// 已驗證的規則集
///
/// 相依規則只能引用獨立規則（深度恰好一層），因此兩個清單即足以表達完整的評估順序。
#[derive(Debug, Clone)]
pub struct RuleSet {
    independent: Vec<SurchargeRule>,
    dependent: Vec<SurchargeRule>,
}

impl RuleSet {
    /// 驗證規則並分割為兩階段；各階段保留宣告順序
    pub fn new(rules: Vec<SurchargeRule>) -> Result<Self> {
        validate_names(&rules)?;
        validate_dependencies(&rules)?;
        validate_groups(&rules)?;

        for rule in &rules {
            if let Some(period) = &rule.period {
                period.validate()?;
            }
            if rule.is_dependent() && rule.min_billable_weight.is_some() {
                return Err(CostError::DependentSideEffect(rule.name.clone()));
            }
        }

        let (dependent, independent): (Vec<_>, Vec<_>) =
            rules.into_iter().partition(SurchargeRule::is_dependent);

        Ok(Self {
            independent,
            dependent,
        })
    }

    /// 第一階段規則
    pub fn independent(&self) -> &[SurchargeRule] {
        &self.independent
    }

    /// 第二階段規則
    pub fn dependent(&self) -> &[SurchargeRule] {
        &self.dependent
    }

    /// 指定階段的規則
    pub fn phase(&self, phase: Phase) -> &[SurchargeRule] {
        match phase {
            Phase::Independent => &self.independent,
            Phase::Dependent => &self.dependent,
        }
    }

    /// 規則總數
    pub fn len(&self) -> usize {
        self.independent.len() + self.dependent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 依名稱查找規則
    pub fn get(&self, name: &str) -> Option<&SurchargeRule> {
        self.independent
            .iter()
            .chain(self.dependent.iter())
            .find(|rule| rule.name == name)
    }
}

fn validate_names(rules: &[SurchargeRule]) -> Result<()> {
    let mut seen = HashSet::new();
    for rule in rules {
        if rule.name.trim().is_empty() {
            return Err(CostError::InvalidConfig("規則名稱不可為空".to_string()));
        }
        if !seen.insert(rule.name.as_str()) {
            return Err(CostError::DuplicateRule(rule.name.clone()));
        }
    }
    Ok(())
}

fn validate_dependencies(rules: &[SurchargeRule]) -> Result<()> {
    let by_name: HashMap<&str, &SurchargeRule> =
        rules.iter().map(|rule| (rule.name.as_str(), rule)).collect();

    for rule in rules {
        let Some(dependency) = &rule.depends_on else {
            continue;
        };

        let target = by_name
            .get(dependency.as_str())
            .ok_or_else(|| CostError::UnknownDependency {
                rule: rule.name.clone(),
                dependency: dependency.clone(),
            })?;

        // 目標本身也是相依規則即為多層或循環（含自我相依）
        if target.is_dependent() {
            return Err(CostError::NestedDependency {
                rule: rule.name.clone(),
                dependency: dependency.clone(),
            });
        }
    }
    Ok(())
}

fn validate_groups(rules: &[SurchargeRule]) -> Result<()> {
    let mut group_phase: HashMap<&str, bool> = HashMap::new();
    let mut priorities: HashSet<(&str, u32)> = HashSet::new();

    for rule in rules {
        let Some(group) = rule.exclusivity_group.as_deref() else {
            if rule.priority.is_some() {
                return Err(CostError::PriorityWithoutGroup {
                    rule: rule.name.clone(),
                });
            }
            continue;
        };

        if rule.pricing.is_allocation() {
            return Err(CostError::AllocationInGroup(rule.name.clone()));
        }

        let priority = rule.priority.ok_or_else(|| CostError::MissingPriority {
            group: group.to_string(),
            rule: rule.name.clone(),
        })?;

        if !priorities.insert((group, priority)) {
            return Err(CostError::DuplicatePriority {
                group: group.to_string(),
                priority,
            });
        }

        match group_phase.get(group) {
            Some(&dependent) if dependent != rule.is_dependent() => {
                return Err(CostError::GroupSpansPhases(group.to_string()));
            }
            Some(_) => {}
            None => {
                group_phase.insert(group, rule.is_dependent());
            }
        }
    }
    Ok(())
}
