//! 附加費規則定義
//!
//! 規則為宣告式資料：觸發條件、計價方式、互斥群組與優先序、相依規則、有效期間、最低計費重量。
//! 觸發條件是對已補充欄位的貨件記錄求值的純函數，門檻值與比較方式（`>` 或 `>=`）皆為資料。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enriched::EnrichedShipment;
use crate::period::Period;
use crate::units::weight_bracket;

/// 可比較的衍生欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    LongestSide,
    SecondLongestSide,
    ShortestSide,
    LengthPlusGirth,
    CubicVolume,
    ActualWeight,
    DimWeight,
    BillableWeight,
    RateZone,
}

/// 比較方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Gt,
    Ge,
    Lt,
    Le,
}

impl Comparison {
    pub fn holds(&self, left: Decimal, right: Decimal) -> bool {
        match self {
            Comparison::Gt => left > right,
            Comparison::Ge => left >= right,
            Comparison::Lt => left < right,
            Comparison::Le => left <= right,
        }
    }
}

/// 觸發條件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// 一律成立（分攤型規則）
    #[default]
    Always,

    /// 欄位與門檻比較
    Compare {
        field: Field,
        op: Comparison,
        value: Decimal,
    },

    /// 住宅地址
    Residential,

    /// 計費區域屬於清單
    ZoneIn { zones: Vec<u8> },

    /// 任一成立
    Any { of: Vec<Trigger> },

    /// 全部成立
    All { of: Vec<Trigger> },

    /// 不成立
    Not { inner: Box<Trigger> },
}

impl Trigger {
    pub fn gt(field: Field, value: Decimal) -> Self {
        Trigger::Compare {
            field,
            op: Comparison::Gt,
            value,
        }
    }

    pub fn ge(field: Field, value: Decimal) -> Self {
        Trigger::Compare {
            field,
            op: Comparison::Ge,
            value,
        }
    }

    pub fn any(of: Vec<Trigger>) -> Self {
        Trigger::Any { of }
    }

    pub fn all(of: Vec<Trigger>) -> Self {
        Trigger::All { of }
    }

    pub fn negate(inner: Trigger) -> Self {
        Trigger::Not {
            inner: Box::new(inner),
        }
    }

    /// 對貨件記錄求值；欄位尚無值時條件不成立
    pub fn evaluate(&self, record: &EnrichedShipment) -> bool {
        match self {
            Trigger::Always => true,
            Trigger::Compare { field, op, value } => record
                .field(*field)
                .map(|actual| op.holds(actual, *value))
                .unwrap_or(false),
            Trigger::Residential => record.shipment.residential,
            Trigger::ZoneIn { zones } => record
                .zone
                .rate_zone
                .map(|zone| zones.contains(&zone))
                .unwrap_or(false),
            Trigger::Any { of } => of.iter().any(|trigger| trigger.evaluate(record)),
            Trigger::All { of } => of.iter().all(|trigger| trigger.evaluate(record)),
            Trigger::Not { inner } => !inner.evaluate(record),
        }
    }
}

/// 計價方式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pricing {
    /// 固定金額：牌價 × (1 − 折扣)
    Flat { list_price: Decimal, discount: Decimal },

    /// 分攤：承運商只對部分貨件收取，估算時平均分攤到全部貨件
    Allocated {
        list_price: Decimal,
        discount: Decimal,
        allocation: Decimal,
    },

    /// 按重量單位計價：單價 × (1 − 折扣) × 計費重量級距
    ///
    /// 級距取自調整後計費重量，不受服務最大重量限制。
    PerWeightUnit { rate: Decimal, discount: Decimal },
}

impl Pricing {
    pub fn flat(list_price: Decimal, discount: Decimal) -> Self {
        Pricing::Flat {
            list_price,
            discount,
        }
    }

    pub fn allocated(list_price: Decimal, discount: Decimal, allocation: Decimal) -> Self {
        Pricing::Allocated {
            list_price,
            discount,
            allocation,
        }
    }

    pub fn per_weight_unit(rate: Decimal, discount: Decimal) -> Self {
        Pricing::PerWeightUnit { rate, discount }
    }

    /// 未捨入的費用
    pub fn cost(&self, billable_weight: Decimal) -> Decimal {
        match self {
            Pricing::Flat {
                list_price,
                discount,
            } => *list_price * (Decimal::ONE - *discount),
            Pricing::Allocated {
                list_price,
                discount,
                allocation,
            } => *list_price * (Decimal::ONE - *discount) * *allocation,
            Pricing::PerWeightUnit { rate, discount } => {
                *rate * (Decimal::ONE - *discount) * Decimal::from(weight_bracket(billable_weight))
            }
        }
    }

    pub fn is_allocation(&self) -> bool {
        matches!(self, Pricing::Allocated { .. })
    }

    /// 折扣比例
    pub fn discount(&self) -> Decimal {
        match self {
            Pricing::Flat { discount, .. }
            | Pricing::Allocated { discount, .. }
            | Pricing::PerWeightUnit { discount, .. } => *discount,
        }
    }
}

/// 附加費規則
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurchargeRule {
    /// 規則名稱（同時是旗標名稱）
    pub name: String,

    /// 計價方式
    pub pricing: Pricing,

    /// 觸發條件
    #[serde(default)]
    pub trigger: Trigger,

    /// 互斥群組
    #[serde(default)]
    pub exclusivity_group: Option<String>,

    /// 群組內優先序（數字越小越優先）
    #[serde(default)]
    pub priority: Option<u32>,

    /// 相依規則名稱（該規則觸發時本規則才可能觸發）
    #[serde(default)]
    pub depends_on: Option<String>,

    /// 有效期間
    #[serde(default)]
    pub period: Option<Period>,

    /// 觸發時要求的最低計費重量
    #[serde(default)]
    pub min_billable_weight: Option<Decimal>,
}

impl SurchargeRule {
    /// 創建一律觸發的規則
    pub fn new(name: String, pricing: Pricing) -> Self {
        Self {
            name,
            pricing,
            trigger: Trigger::Always,
            exclusivity_group: None,
            priority: None,
            depends_on: None,
            period: None,
            min_billable_weight: None,
        }
    }

    /// 建構器模式：設置觸發條件
    pub fn when(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// 建構器模式：加入互斥群組
    pub fn in_group(mut self, group: &str, priority: u32) -> Self {
        self.exclusivity_group = Some(group.to_string());
        self.priority = Some(priority);
        self
    }

    /// 建構器模式：設置相依規則
    pub fn depends_on(mut self, rule: &str) -> Self {
        self.depends_on = Some(rule.to_string());
        self
    }

    /// 建構器模式：設置有效期間
    pub fn during(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    /// 建構器模式：設置最低計費重量
    pub fn with_min_billable_weight(mut self, weight: Decimal) -> Self {
        self.min_billable_weight = Some(weight);
        self
    }

    /// 是否為相依規則
    pub fn is_dependent(&self) -> bool {
        self.depends_on.is_some()
    }

    /// 觸發條件與有效期間是否成立（不含相依旗標）
    pub fn applies_to(&self, record: &EnrichedShipment) -> bool {
        if let Some(period) = &self.period {
            if !period.contains(record.shipment.ship_date) {
                return false;
            }
        }
        self.trigger.evaluate(record)
    }
}
