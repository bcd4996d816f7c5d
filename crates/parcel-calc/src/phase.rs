//! 附加費規則階段評估

use parcel_core::units::round_money;
use parcel_core::{EnrichedShipment, Phase, SurchargeLine, SurchargeRule};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// 單一階段的評估結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseOutcome {
    /// 每條規則一列，依宣告順序
    pub lines: Vec<SurchargeLine>,
    /// 已觸發規則要求的最低計費重量（取最大值）
    pub minimum_billable_weight: Option<Decimal>,
}

/// 階段評估器
pub struct PhaseEvaluator;

impl PhaseEvaluator {
    /// 評估一個階段的規則
    ///
    /// 相依規則讀取記錄上已存在的旗標，因此第二階段必須在第一階段的結果寫回記錄後才能評估。
    pub fn evaluate(record: &EnrichedShipment, rules: &[SurchargeRule], phase: Phase) -> PhaseOutcome {
        let candidates: Vec<bool> = rules
            .iter()
            .map(|rule| Self::is_candidate(record, rule))
            .collect();
        let winners = resolve_groups(rules, &candidates);

        let mut minimum_billable_weight: Option<Decimal> = None;
        let lines = rules
            .iter()
            .zip(&candidates)
            .map(|(rule, &candidate)| {
                let fired = candidate
                    && match &rule.exclusivity_group {
                        Some(group) => winners.get(group.as_str()) == Some(&rule.name.as_str()),
                        None => true,
                    };

                let cost = if fired {
                    round_money(rule.pricing.cost(record.weight.adjusted_billable))
                } else {
                    Decimal::ZERO
                };

                if fired {
                    if let Some(minimum) = rule.min_billable_weight {
                        minimum_billable_weight =
                            Some(minimum_billable_weight.map_or(minimum, |m| m.max(minimum)));
                    }
                }

                SurchargeLine {
                    name: rule.name.clone(),
                    phase,
                    fired,
                    cost,
                }
            })
            .collect();

        PhaseOutcome {
            lines,
            minimum_billable_weight,
        }
    }

    /// 以記錄目前的欄位值計算各互斥群組的勝出規則
    pub fn group_winners(record: &EnrichedShipment, rules: &[SurchargeRule]) -> BTreeMap<String, String> {
        let candidates: Vec<bool> = rules
            .iter()
            .map(|rule| Self::is_candidate(record, rule))
            .collect();
        resolve_groups(rules, &candidates)
            .into_iter()
            .map(|(group, name)| (group.to_string(), name.to_string()))
            .collect()
    }

    fn is_candidate(record: &EnrichedShipment, rule: &SurchargeRule) -> bool {
        if let Some(dependency) = &rule.depends_on {
            if !record.fired(dependency) {
                return false;
            }
        }
        rule.applies_to(record)
    }
}

/// 各群組中條件成立且優先序數字最小的規則
fn resolve_groups<'a>(rules: &'a [SurchargeRule], candidates: &[bool]) -> BTreeMap<&'a str, &'a str> {
    let mut best: BTreeMap<&str, (u32, &str)> = BTreeMap::new();

    for (rule, &candidate) in rules.iter().zip(candidates) {
        let (Some(group), true) = (rule.exclusivity_group.as_deref(), candidate) else {
            continue;
        };
        let priority = rule.priority.unwrap_or(u32::MAX);
        best.entry(group)
            .and_modify(|current| {
                if priority < current.0 {
                    *current = (priority, rule.name.as_str());
                }
            })
            .or_insert((priority, rule.name.as_str()));
    }

    best.into_iter()
        .map(|(group, (_, name))| (group, name))
        .collect()
}
