//! 已補充欄位的貨件記錄

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rate_table::RateComponents;
use crate::rule::Field;
use crate::rule_set::Phase;
use crate::shipment::Shipment;
use crate::zone::ZoneCode;

/// 流程階段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineStage {
    Raw,
    GeometryResolved,
    ZoneResolved,
    WeightResolved,
    Phase1Evaluated,
    WeightAdjusted,
    RateLookedUp,
    Phase2Evaluated,
    Totaled,
}

/// 衍生尺寸（皆已捨入）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub length: Decimal,
    pub width: Decimal,
    pub height: Decimal,
    pub longest: Decimal,
    pub second_longest: Decimal,
    pub shortest: Decimal,
    /// 長 + 2 ×（寬 + 高）
    pub length_plus_girth: Decimal,
    /// 材積（整數）
    pub cubic_volume: Decimal,
}

/// 區域來源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneSource {
    /// 完整郵遞區號
    Exact,
    /// 郵遞區號前綴
    Prefix,
    /// 區域內最常見的區域
    RegionMode,
    /// 承運商預設區域
    Default,
}

/// 區域指派結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneAssignment {
    /// 區域表中的區域（可能為空或字母）
    pub shipping_zone: Option<ZoneCode>,
    /// 查費率用的數字區域
    pub rate_zone: Option<u8>,
    pub source: ZoneSource,
}

/// 重量評估
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightAssessment {
    /// 實際重量
    pub actual: Decimal,
    /// 材積重
    pub dim_weight: Decimal,
    /// 材積是否超過門檻而納入比較
    pub dim_weight_considered: bool,
    /// 計費重量是否由材積重決定（僅供診斷）
    pub dim_weight_applied: bool,
    /// 初始計費重量
    pub billable: Decimal,
    /// 第一階段規則要求的最低計費重量
    pub minimum_required: Option<Decimal>,
    /// 調整後計費重量
    pub adjusted_billable: Decimal,
    /// 費率重量級距（調整並套用上限後）
    pub bracket: u32,
}

/// 附加費明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeLine {
    pub name: String,
    pub phase: Phase,
    pub fired: bool,
    pub cost: Decimal,
}

/// 資料品質異常（可恢復，彙總回報）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// 郵遞區號不在區域表，改用區域內最常見區域
    ZoneFromRegion { region: String },
    /// 郵遞區號不在區域表，改用預設區域
    ZoneDefaulted,
    /// 區域表中為空區域，改用承運商的空區域預設值
    NullZoneDefaulted,
    /// 字母區域以固定區域查費率
    LetterZoneSubstituted { zone: String },
    /// 調整後重量會讓互斥群組的結果不同（僅記錄，不重算）
    WeightFeedbackDivergence { group: String },
}

/// 已補充欄位的貨件記錄
///
/// 流程完成（`Totaled`）後除了配置版本外不再變動。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedShipment {
    pub shipment: Shipment,
    pub stage: PipelineStage,
    /// 實際使用的服務類型
    pub service: String,
    pub geometry: Geometry,
    pub zone: ZoneAssignment,
    pub weight: WeightAssessment,
    pub base_rate: RateComponents,
    /// 每條規則一列：先第一階段再第二階段，各自依宣告順序
    pub surcharges: Vec<SurchargeLine>,
    pub fuel: Decimal,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub anomalies: Vec<Anomaly>,
    pub config_version: Option<String>,
}

impl EnrichedShipment {
    /// 以已解析的尺寸、區域、重量創建記錄
    pub fn new(
        shipment: Shipment,
        service: String,
        geometry: Geometry,
        zone: ZoneAssignment,
        weight: WeightAssessment,
    ) -> Self {
        Self {
            shipment,
            stage: PipelineStage::WeightResolved,
            service,
            geometry,
            zone,
            weight,
            base_rate: RateComponents::zero(),
            surcharges: Vec::new(),
            fuel: Decimal::ZERO,
            subtotal: Decimal::ZERO,
            total: Decimal::ZERO,
            anomalies: Vec::new(),
            config_version: None,
        }
    }

    /// 讀取可比較欄位
    pub fn field(&self, field: Field) -> Option<Decimal> {
        match field {
            Field::LongestSide => Some(self.geometry.longest),
            Field::SecondLongestSide => Some(self.geometry.second_longest),
            Field::ShortestSide => Some(self.geometry.shortest),
            Field::LengthPlusGirth => Some(self.geometry.length_plus_girth),
            Field::CubicVolume => Some(self.geometry.cubic_volume),
            Field::ActualWeight => Some(self.weight.actual),
            Field::DimWeight => Some(self.weight.dim_weight),
            Field::BillableWeight => Some(self.weight.adjusted_billable),
            Field::RateZone => self.zone.rate_zone.map(Decimal::from),
        }
    }

    /// 規則是否觸發
    pub fn fired(&self, name: &str) -> bool {
        self.surcharges
            .iter()
            .any(|line| line.fired && line.name == name)
    }

    /// 規則費用（未觸發為零）
    pub fn surcharge_cost(&self, name: &str) -> Decimal {
        self.surcharges
            .iter()
            .filter(|line| line.fired && line.name == name)
            .map(|line| line.cost)
            .sum()
    }

    /// 已觸發的規則名稱
    pub fn fired_surcharges(&self) -> impl Iterator<Item = &str> {
        self.surcharges
            .iter()
            .filter(|line| line.fired)
            .map(|line| line.name.as_str())
    }

    /// 附加費合計
    pub fn surcharge_total(&self) -> Decimal {
        self.surcharges.iter().map(|line| line.cost).sum()
    }

    /// 記錄資料品質異常
    pub fn add_anomaly(&mut self, anomaly: Anomaly) {
        self.anomalies.push(anomaly);
    }

    /// 蓋上配置版本
    pub fn stamp_version(&mut self, version: &str) {
        self.config_version = Some(version.to_string());
    }

    /// 是否已完成全部流程
    pub fn is_totaled(&self) -> bool {
        self.stage == PipelineStage::Totaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample() -> EnrichedShipment {
        let shipment = Shipment::new(
            "T-1".to_string(),
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            "10001".to_string(),
        );
        let geometry = Geometry {
            length: dec!(12.0),
            width: dec!(10.0),
            height: dec!(8.0),
            longest: dec!(12.0),
            second_longest: dec!(10.0),
            shortest: dec!(8.0),
            length_plus_girth: dec!(48.0),
            cubic_volume: dec!(960),
        };
        let zone = ZoneAssignment {
            shipping_zone: Some(ZoneCode::Numeric(5)),
            rate_zone: Some(5),
            source: ZoneSource::Exact,
        };
        let weight = WeightAssessment {
            actual: dec!(4),
            dim_weight: dec!(3.84),
            dim_weight_considered: true,
            dim_weight_applied: false,
            billable: dec!(4),
            minimum_required: None,
            adjusted_billable: dec!(4),
            bracket: 4,
        };
        EnrichedShipment::new(shipment, "GROUND".to_string(), geometry, zone, weight)
    }

    #[test]
    fn test_field_values() {
        let record = sample();
        assert_eq!(record.field(Field::LengthPlusGirth), Some(dec!(48.0)));
        assert_eq!(record.field(Field::RateZone), Some(dec!(5)));
        assert_eq!(record.field(Field::BillableWeight), Some(dec!(4)));
        assert_eq!(record.field(Field::DimWeight), Some(dec!(3.84)));
        assert_eq!(record.stage, PipelineStage::WeightResolved);
    }

    #[test]
    fn test_surcharge_queries() {
        let mut record = sample();
        record.surcharges = vec![
            SurchargeLine {
                name: "AHS".to_string(),
                phase: Phase::Independent,
                fired: true,
                cost: dec!(9.90),
            },
            SurchargeLine {
                name: "LPS".to_string(),
                phase: Phase::Independent,
                fired: false,
                cost: Decimal::ZERO,
            },
        ];

        assert!(record.fired("AHS"));
        assert!(!record.fired("LPS"));
        assert!(!record.fired("UNKNOWN"));
        assert_eq!(record.surcharge_cost("AHS"), dec!(9.90));
        assert_eq!(record.surcharge_total(), dec!(9.90));
        assert_eq!(record.fired_surcharges().collect::<Vec<_>>(), vec!["AHS"]);
    }

    #[test]
    fn test_stage_ordering() {
        assert!(PipelineStage::Phase1Evaluated < PipelineStage::WeightAdjusted);
        assert!(PipelineStage::RateLookedUp < PipelineStage::Phase2Evaluated);
        assert!(PipelineStage::Phase2Evaluated < PipelineStage::Totaled);
    }
}
