//! # Parcel Calculation Engine
//!
//! 運費估算流程：尺寸 → 區域 → 計費重量 → 第一階段規則 → 重量調整 → 費率查找 → 第二階段規則 → 燃油/總計

pub mod adjustment;
pub mod calculator;
pub mod geometry;
pub mod phase;
pub mod rate_lookup;
pub mod totals;
pub mod weight;
pub mod zone;

// Re-export 主要類型
pub use adjustment::WeightAdjuster;
pub use calculator::CostCalculator;
pub use geometry::GeometryResolver;
pub use phase::{PhaseEvaluator, PhaseOutcome};
pub use rate_lookup::{RateLookup, RateQuote};
pub use totals::TotalAssembler;
pub use weight::BillableWeightResolver;
pub use zone::ZoneResolver;

use parcel_core::{Anomaly, Carrier, CostError, EnrichedShipment, ZoneSource};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// 批次計算結果
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// 執行識別碼
    pub run_id: uuid::Uuid,

    pub carrier: Carrier,

    /// 配置版本
    pub config_version: String,

    /// 計算完成的記錄（保留輸入順序）
    pub records: Vec<EnrichedShipment>,

    /// 輸入錯誤而跳過的記錄
    pub failures: Vec<RecordFailure>,

    /// 不可服務的記錄
    pub non_serviceable: Vec<RecordFailure>,

    pub summary: BatchSummary,

    /// 警告信息
    pub warnings: Vec<BatchWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl BatchReport {
    /// 創建空的批次結果
    pub fn empty(carrier: Carrier, config_version: String) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4(),
            carrier,
            config_version,
            records: Vec::new(),
            failures: Vec::new(),
            non_serviceable: Vec::new(),
            summary: BatchSummary::default(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: BatchWarning) {
        self.warnings.push(warning);
    }

    /// 依追蹤號碼查找記錄
    pub fn record(&self, tracking_number: &str) -> Option<&EnrichedShipment> {
        self.records
            .iter()
            .find(|record| record.shipment.tracking_number == tracking_number)
    }
}

/// 被跳過的記錄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    pub tracking_number: String,
    pub error: CostError,
}

impl RecordFailure {
    pub fn new(tracking_number: String, error: CostError) -> Self {
        Self {
            tracking_number,
            error,
        }
    }
}

/// 批次彙總
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// 輸入筆數
    pub total_shipments: usize,
    /// 計算完成筆數
    pub calculated: usize,
    /// 輸入錯誤筆數
    pub failed: usize,
    /// 不可服務筆數
    pub non_serviceable: usize,
    /// 區域改用區域眾數或預設值的筆數
    pub zone_fallbacks: usize,
    /// 各類異常次數
    pub anomaly_counts: BTreeMap<String, usize>,
    /// 各附加費觸發次數
    pub surcharge_counts: BTreeMap<String, usize>,
    pub total_base: Decimal,
    pub total_surcharges: Decimal,
    pub total_fuel: Decimal,
    pub total_cost: Decimal,
}

impl BatchSummary {
    /// 由計算完成的記錄彙總
    pub fn from_records(records: &[EnrichedShipment]) -> Self {
        let mut summary = Self {
            calculated: records.len(),
            ..Self::default()
        };

        for record in records {
            if matches!(record.zone.source, ZoneSource::RegionMode | ZoneSource::Default) {
                summary.zone_fallbacks += 1;
            }
            for anomaly in &record.anomalies {
                *summary
                    .anomaly_counts
                    .entry(anomaly_kind(anomaly).to_string())
                    .or_insert(0) += 1;
            }
            for name in record.fired_surcharges() {
                *summary.surcharge_counts.entry(name.to_string()).or_insert(0) += 1;
            }

            summary.total_base += record.subtotal - record.surcharge_total();
            summary.total_surcharges += record.surcharge_total();
            summary.total_fuel += record.fuel;
            summary.total_cost += record.total;
        }

        summary
    }
}

fn anomaly_kind(anomaly: &Anomaly) -> &'static str {
    match anomaly {
        Anomaly::ZoneFromRegion { .. } => "zone_from_region",
        Anomaly::ZoneDefaulted => "zone_defaulted",
        Anomaly::NullZoneDefaulted => "null_zone_defaulted",
        Anomaly::LetterZoneSubstituted { .. } => "letter_zone_substituted",
        Anomaly::WeightFeedbackDivergence { .. } => "weight_feedback_divergence",
    }
}

/// 批次警告
#[derive(Debug, Clone)]
pub struct BatchWarning {
    pub tracking_number: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl BatchWarning {
    pub fn new(tracking_number: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            tracking_number,
            message,
            severity,
        }
    }

    pub fn info(tracking_number: String, message: String) -> Self {
        Self::new(tracking_number, message, WarningSeverity::Info)
    }

    pub fn warning(tracking_number: String, message: String) -> Self {
        Self::new(tracking_number, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
}
