//! # Parcel Core
//!
//! 運費估算核心資料模型與類型定義

pub mod config;
pub mod enriched;
pub mod period;
pub mod rate_table;
pub mod rule;
pub mod rule_set;
pub mod shipment;
pub mod units;
pub mod zone;

// Re-export 主要類型
pub use config::{Carrier, CarrierConfig, DimWeightRule, FuelSurcharge, ZoneRules};
pub use enriched::{
    Anomaly, EnrichedShipment, Geometry, PipelineStage, SurchargeLine, WeightAssessment,
    ZoneAssignment, ZoneSource,
};
pub use period::{MonthDay, Period};
pub use rate_table::{RateComponents, RateRow, RateTable, ServiceRates};
pub use rule::{Comparison, Field, Pricing, SurchargeRule, Trigger};
pub use rule_set::{Phase, RuleSet};
pub use shipment::Shipment;
pub use zone::{ZoneCode, ZoneEntry, ZoneTable};

/// 運費估算錯誤類型
///
/// 分三類：配置錯誤（致命，整批中止）、不可服務（單筆）、單筆輸入錯誤（跳過並回報）。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CostError {
    #[error("費率表缺少費率列: 服務 {service}, 重量級距 {bracket}, 區域 {zone}")]
    MissingRate {
        service: String,
        bracket: u32,
        zone: u8,
    },

    #[error("找不到服務費率表: {0}")]
    UnknownService(String),

    #[error("規則 {rule} 相依的規則 {dependency} 不存在")]
    UnknownDependency { rule: String, dependency: String },

    #[error("規則相依超過一層或形成循環: {rule} -> {dependency}")]
    NestedDependency { rule: String, dependency: String },

    #[error("互斥群組 {group} 的規則 {rule} 缺少優先序")]
    MissingPriority { group: String, rule: String },

    #[error("規則 {rule} 設定了優先序但不屬於任何互斥群組")]
    PriorityWithoutGroup { rule: String },

    #[error("互斥群組 {group} 中優先序 {priority} 重複")]
    DuplicatePriority { group: String, priority: u32 },

    #[error("規則名稱重複: {0}")]
    DuplicateRule(String),

    #[error("互斥群組 {0} 同時包含獨立與相依規則")]
    GroupSpansPhases(String),

    #[error("分攤型規則 {0} 不可加入互斥群組")]
    AllocationInGroup(String),

    #[error("相依規則 {0} 不可設定最低計費重量")]
    DependentSideEffect(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("無效的日期: {0}")]
    InvalidDate(String),

    #[error("配置解析失敗: {0}")]
    ConfigParse(String),

    #[error("貨件 {shipment_id} 缺少必要欄位: {field}")]
    MissingField {
        shipment_id: String,
        field: &'static str,
    },

    #[error("貨件 {shipment_id} 欄位 {field} 數值無效: {value}")]
    InvalidValue {
        shipment_id: String,
        field: &'static str,
        value: String,
    },

    #[error("貨件 {shipment_id} 目的地不在承運商服務範圍 (區域 {zone})")]
    NonServiceable { shipment_id: String, zone: String },
}

impl CostError {
    /// 是否為配置錯誤（整批必須中止）
    pub fn is_config_error(&self) -> bool {
        !matches!(
            self,
            CostError::MissingField { .. }
                | CostError::InvalidValue { .. }
                | CostError::NonServiceable { .. }
        )
    }

    /// 是否為不可服務的目的地
    pub fn is_non_serviceable(&self) -> bool {
        matches!(self, CostError::NonServiceable { .. })
    }
}

impl From<serde_json::Error> for CostError {
    fn from(err: serde_json::Error) -> Self {
        CostError::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let missing = CostError::MissingRate {
            service: "GROUND".to_string(),
            bracket: 12,
            zone: 5,
        };
        assert!(missing.is_config_error());
        assert!(!missing.is_non_serviceable());

        let field = CostError::MissingField {
            shipment_id: "1Z999".to_string(),
            field: "weight",
        };
        assert!(!field.is_config_error());

        let remote = CostError::NonServiceable {
            shipment_id: "1Z999".to_string(),
            zone: "17".to_string(),
        };
        assert!(!remote.is_config_error());
        assert!(remote.is_non_serviceable());
    }

    #[test]
    fn test_missing_rate_message_names_entry() {
        let err = CostError::MissingRate {
            service: "GROUND".to_string(),
            bracket: 12,
            zone: 5,
        };
        let message = err.to_string();
        assert!(message.contains("GROUND"));
        assert!(message.contains("12"));
        assert!(message.contains('5'));
    }
}
