//! 承運商配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rule::SurchargeRule;
use crate::rule_set::RuleSet;
use crate::zone::ZoneCode;
use crate::{CostError, Result};

/// 承運商
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Carrier {
    #[serde(rename = "ontrac")]
    OnTrac,
    Usps,
    #[serde(rename = "fedex")]
    FedEx,
    P2p,
    Maersk,
    DpdUk,
}

impl Carrier {
    /// 所有內建承運商
    pub const ALL: [Carrier; 6] = [
        Carrier::OnTrac,
        Carrier::Usps,
        Carrier::FedEx,
        Carrier::P2p,
        Carrier::Maersk,
        Carrier::DpdUk,
    ];

    /// 代碼
    pub fn code(&self) -> &'static str {
        match self {
            Carrier::OnTrac => "ontrac",
            Carrier::Usps => "usps",
            Carrier::FedEx => "fedex",
            Carrier::P2p => "p2p",
            Carrier::Maersk => "maersk",
            Carrier::DpdUk => "dpd_uk",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Carrier::OnTrac => "OnTrac",
            Carrier::Usps => "USPS",
            Carrier::FedEx => "FedEx",
            Carrier::P2p => "P2P",
            Carrier::Maersk => "Maersk",
            Carrier::DpdUk => "DPD UK",
        };
        f.write_str(name)
    }
}

/// 材積重規則
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimWeightRule {
    /// 材積除數
    pub divisor: Decimal,

    /// 材積門檻：材積需嚴格大於此值才比較材積重（空值表示一律比較）
    #[serde(default)]
    pub volume_floor: Option<Decimal>,
}

impl DimWeightRule {
    /// 一律比較材積重
    pub fn always(divisor: Decimal) -> Self {
        Self {
            divisor,
            volume_floor: None,
        }
    }

    /// 材積超過門檻才比較材積重
    pub fn above_volume(divisor: Decimal, volume_floor: Decimal) -> Self {
        Self {
            divisor,
            volume_floor: Some(volume_floor),
        }
    }
}

/// 區域查找與標準化規則
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRules {
    /// 完整郵遞區號找不到時依序嘗試的前綴長度
    #[serde(default)]
    pub prefix_lengths: Vec<usize>,

    /// 區域表與區域皆無結果時的預設區域
    pub default_zone: ZoneCode,

    /// 區域表中空區域的替代區域
    pub null_zone_default: u8,

    /// 字母區域查費率時使用的固定區域（空值表示字母區域不可服務）
    #[serde(default)]
    pub letter_zone_substitute: Option<u8>,
}

impl ZoneRules {
    /// 創建區域規則
    pub fn new(default_zone: u8) -> Self {
        Self {
            prefix_lengths: Vec::new(),
            default_zone: ZoneCode::Numeric(default_zone),
            null_zone_default: default_zone,
            letter_zone_substitute: None,
        }
    }

    /// 建構器模式：設置前綴長度
    pub fn with_prefix_lengths(mut self, lengths: Vec<usize>) -> Self {
        self.prefix_lengths = lengths;
        self
    }

    /// 建構器模式：設置空區域替代值
    pub fn with_null_zone_default(mut self, zone: u8) -> Self {
        self.null_zone_default = zone;
        self
    }

    /// 建構器模式：設置字母區域替代值
    pub fn with_letter_zone_substitute(mut self, zone: u8) -> Self {
        self.letter_zone_substitute = Some(zone);
        self
    }
}

/// 燃油附加費
///
/// 只以基本運費計算，不含附加費與折扣。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelSurcharge {
    /// 牌價費率
    pub list_rate: Decimal,
    /// 折扣比例
    #[serde(default)]
    pub discount: Decimal,
}

impl FuelSurcharge {
    pub fn new(list_rate: Decimal, discount: Decimal) -> Self {
        Self {
            list_rate,
            discount,
        }
    }

    /// 實際費率
    pub fn effective_rate(&self) -> Decimal {
        self.list_rate * (Decimal::ONE - self.discount)
    }
}

/// 承運商配置
///
/// 單價、折扣、門檻與有效期間都是資料，可由 JSON 載入或覆寫，不需重新編譯。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierConfig {
    /// 承運商
    pub carrier: Carrier,

    /// 配置版本（蓋在每筆輸出記錄上）
    pub version: String,

    /// 預設服務類型
    pub default_service: String,

    /// 幣別
    #[serde(default = "default_currency")]
    pub currency: String,

    /// 材積重規則
    pub dim_weight: DimWeightRule,

    /// 區域規則
    pub zone_rules: ZoneRules,

    /// 燃油附加費（空值表示不收）
    #[serde(default)]
    pub fuel: Option<FuelSurcharge>,

    /// 附加費規則（宣告順序即輸出順序）
    #[serde(default)]
    pub rules: Vec<SurchargeRule>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl CarrierConfig {
    /// 創建承運商配置
    pub fn new(
        carrier: Carrier,
        version: String,
        default_service: String,
        dim_weight: DimWeightRule,
        zone_rules: ZoneRules,
    ) -> Self {
        Self {
            carrier,
            version,
            default_service,
            currency: default_currency(),
            dim_weight,
            zone_rules,
            fuel: None,
            rules: Vec::new(),
        }
    }

    /// 建構器模式：設置幣別
    pub fn with_currency(mut self, currency: &str) -> Self {
        self.currency = currency.to_string();
        self
    }

    /// 建構器模式：設置燃油附加費
    pub fn with_fuel(mut self, fuel: FuelSurcharge) -> Self {
        self.fuel = Some(fuel);
        self
    }

    /// 建構器模式：加入規則
    pub fn with_rule(mut self, rule: SurchargeRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// 建構器模式：加入多條規則
    pub fn with_rules(mut self, rules: Vec<SurchargeRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// 從 JSON 載入並驗證
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CarrierConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 輸出 JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 驗證數值設定與規則
    pub fn validate(&self) -> Result<()> {
        self.rule_set().map(|_| ())
    }

    /// 建立已驗證的規則集
    pub fn rule_set(&self) -> Result<RuleSet> {
        self.validate_parameters()?;
        RuleSet::new(self.rules.clone())
    }

    fn validate_parameters(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(CostError::InvalidConfig("配置版本不可為空".to_string()));
        }
        if self.dim_weight.divisor <= Decimal::ZERO {
            return Err(CostError::InvalidConfig(format!(
                "{} 材積除數必須大於零",
                self.carrier
            )));
        }
        if let Some(fuel) = &self.fuel {
            if !is_fraction(fuel.discount) || fuel.list_rate < Decimal::ZERO {
                return Err(CostError::InvalidConfig(format!(
                    "{} 燃油費率或折扣超出範圍",
                    self.carrier
                )));
            }
        }
        for rule in &self.rules {
            if !is_fraction(rule.pricing.discount()) {
                return Err(CostError::InvalidConfig(format!(
                    "規則 {} 折扣必須介於 0 與 1",
                    rule.name
                )));
            }
            if let crate::rule::Pricing::Allocated { allocation, .. } = rule.pricing {
                if !is_fraction(allocation) {
                    return Err(CostError::InvalidConfig(format!(
                        "規則 {} 分攤比例必須介於 0 與 1",
                        rule.name
                    )));
                }
            }
        }
        Ok(())
    }
}

fn is_fraction(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}
