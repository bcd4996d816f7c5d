//! 計費重量調整
//!
//! 第一階段觸發的規則可要求最低計費重量，只調整一次，不重新評估第一階段。

use parcel_core::units::weight_bracket;
use parcel_core::{Anomaly, EnrichedShipment, Phase, PipelineStage, SurchargeRule};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::phase::PhaseEvaluator;

/// 計費重量調整器
pub struct WeightAdjuster;

impl WeightAdjuster {
    /// 計費重量 = max(計費重量, 最低要求)
    pub fn apply(record: &mut EnrichedShipment, minimum: Option<Decimal>) {
        record.weight.minimum_required = minimum;

        if let Some(minimum) = minimum {
            if minimum > record.weight.adjusted_billable {
                tracing::debug!(
                    "貨件 {} 計費重量 {} 調整為 {}",
                    record.shipment.tracking_number,
                    record.weight.adjusted_billable,
                    minimum
                );
                record.weight.adjusted_billable = minimum;
            }
        }

        record.weight.bracket = weight_bracket(record.weight.adjusted_billable);
        record.stage = PipelineStage::WeightAdjusted;
    }

    /// 以調整後重量重新求互斥群組的勝出規則，結果不同時記錄異常，不改變費用
    pub fn check_divergence(record: &EnrichedShipment, rules: &[SurchargeRule]) -> Vec<Anomaly> {
        if record.weight.adjusted_billable == record.weight.billable {
            return Vec::new();
        }

        let mut charged: BTreeMap<&str, &str> = BTreeMap::new();
        for rule in rules {
            if let Some(group) = rule.exclusivity_group.as_deref() {
                let fired = record
                    .surcharges
                    .iter()
                    .any(|line| line.phase == Phase::Independent && line.fired && line.name == rule.name);
                if fired {
                    charged.insert(group, rule.name.as_str());
                }
            }
        }

        let reevaluated = PhaseEvaluator::group_winners(record, rules);
        let mut groups: Vec<&str> = charged
            .keys()
            .copied()
            .chain(reevaluated.keys().map(String::as_str))
            .collect();
        groups.sort_unstable();
        groups.dedup();

        groups
            .into_iter()
            .filter(|group| charged.get(group).copied() != reevaluated.get(*group).map(String::as_str))
            .map(|group| Anomaly::WeightFeedbackDivergence {
                group: group.to_string(),
            })
            .collect()
    }
}
