//! 價格覆寫
//!
//! 合約價、折扣、分攤比例、燃油與旺季期間皆可由 JSON 覆寫，不需重新編譯。
//!
//! ```json
//! {
//!   "version": "ontrac-2025.2",
//!   "fuel": { "list_rate": "0.2275" },
//!   "rules": {
//!     "AHS": { "list_price": "35.50", "discount": "0.65" },
//!     "RES": { "allocation": "0.75" }
//!   }
//! }
//! ```

use parcel_core::{CarrierConfig, CostError, Period, Pricing};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 單條規則的覆寫
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleOverride {
    /// 牌價（按重量計價規則為單價）
    #[serde(default)]
    pub list_price: Option<Decimal>,
    #[serde(default)]
    pub discount: Option<Decimal>,
    /// 只適用分攤型規則
    #[serde(default)]
    pub allocation: Option<Decimal>,
    #[serde(default)]
    pub min_billable_weight: Option<Decimal>,
    #[serde(default)]
    pub period: Option<Period>,
}

/// 燃油覆寫
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FuelOverride {
    #[serde(default)]
    pub list_rate: Option<Decimal>,
    #[serde(default)]
    pub discount: Option<Decimal>,
}

/// 承運商價格覆寫
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingOverrides {
    /// 新配置版本
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub dim_divisor: Option<Decimal>,
    #[serde(default)]
    pub fuel: Option<FuelOverride>,
    /// 依規則名稱覆寫
    #[serde(default)]
    pub rules: BTreeMap<String, RuleOverride>,
}

impl PricingOverrides {
    pub fn from_json(json: &str) -> parcel_core::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 套用到配置並重新驗證
    pub fn apply(&self, mut config: CarrierConfig) -> parcel_core::Result<CarrierConfig> {
        if let Some(version) = &self.version {
            config.version = version.clone();
        }
        if let Some(divisor) = self.dim_divisor {
            config.dim_weight.divisor = divisor;
        }

        if let Some(fuel_override) = &self.fuel {
            let fuel = config.fuel.as_mut().ok_or_else(|| {
                CostError::InvalidConfig(format!("{} 未設定燃油附加費，無法覆寫", config.carrier))
            })?;
            if let Some(list_rate) = fuel_override.list_rate {
                fuel.list_rate = list_rate;
            }
            if let Some(discount) = fuel_override.discount {
                fuel.discount = discount;
            }
        }

        for (name, rule_override) in &self.rules {
            let rule = config
                .rules
                .iter_mut()
                .find(|rule| &rule.name == name)
                .ok_or_else(|| CostError::InvalidConfig(format!("覆寫的規則不存在: {}", name)))?;

            apply_pricing(name, &mut rule.pricing, rule_override)?;
            if let Some(weight) = rule_override.min_billable_weight {
                rule.min_billable_weight = Some(weight);
            }
            if let Some(period) = rule_override.period {
                rule.period = Some(period);
            }
        }

        config.validate()?;
        tracing::info!(
            "{} 套用價格覆寫：規則 {} 條，版本 {}",
            config.carrier,
            self.rules.len(),
            config.version
        );
        Ok(config)
    }
}

fn apply_pricing(name: &str, pricing: &mut Pricing, rule_override: &RuleOverride) -> parcel_core::Result<()> {
    match pricing {
        Pricing::Flat {
            list_price,
            discount,
        } => {
            if rule_override.allocation.is_some() {
                return Err(CostError::InvalidConfig(format!("規則 {} 不是分攤型規則", name)));
            }
            if let Some(value) = rule_override.list_price {
                *list_price = value;
            }
            if let Some(value) = rule_override.discount {
                *discount = value;
            }
        }
        Pricing::Allocated {
            list_price,
            discount,
            allocation,
        } => {
            if let Some(value) = rule_override.list_price {
                *list_price = value;
            }
            if let Some(value) = rule_override.discount {
                *discount = value;
            }
            if let Some(value) = rule_override.allocation {
                *allocation = value;
            }
        }
        Pricing::PerWeightUnit { rate, discount } => {
            if rule_override.allocation.is_some() {
                return Err(CostError::InvalidConfig(format!("規則 {} 不是分攤型規則", name)));
            }
            if let Some(value) = rule_override.list_price {
                *rate = value;
            }
            if let Some(value) = rule_override.discount {
                *discount = value;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontrac;
    use rust_decimal_macros::dec;

    #[test]
    fn test_apply_overrides() {
        let overrides = PricingOverrides::from_json(
            r#"{
                "version": "ontrac-2025.2",
                "fuel": { "list_rate": "0.2275" },
                "rules": {
                    "AHS": { "list_price": "35.50", "discount": "0.65" },
                    "RES": { "allocation": "0.75" },
                    "DEM_AHS": { "period": { "start": {"month": 10, "day": 1}, "end": {"month": 1, "day": 10} } }
                }
            }"#,
        )
        .unwrap();

        let config = overrides.apply(ontrac::config()).unwrap();
        assert_eq!(config.version, "ontrac-2025.2");
        assert_eq!(config.fuel.as_ref().map(|f| f.list_rate), Some(dec!(0.2275)));

        let ahs = config.rules.iter().find(|r| r.name == "AHS").unwrap();
        assert_eq!(ahs.pricing, Pricing::flat(dec!(35.50), dec!(0.65)));

        let res = config.rules.iter().find(|r| r.name == "RES").unwrap();
        assert_eq!(res.pricing, Pricing::allocated(dec!(4.00), dec!(0.50), dec!(0.75)));

        let dem = config.rules.iter().find(|r| r.name == "DEM_AHS").unwrap();
        assert_eq!(dem.period.map(|p| p.start.month), Some(10));
    }

    #[test]
    fn test_unknown_rule_is_config_error() {
        let overrides = PricingOverrides::from_json(r#"{"rules": {"NOPE": {"discount": "0.1"}}}"#).unwrap();
        let err = overrides.apply(ontrac::config()).unwrap_err();
        assert!(matches!(err, CostError::InvalidConfig(_)));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_out_of_range_discount_rejected() {
        let overrides = PricingOverrides::from_json(r#"{"rules": {"AHS": {"discount": "1.5"}}}"#).unwrap();
        assert!(overrides.apply(ontrac::config()).is_err());
    }

    #[test]
    fn test_allocation_on_flat_rule_rejected() {
        let overrides = PricingOverrides::from_json(r#"{"rules": {"AHS": {"allocation": "0.5"}}}"#).unwrap();
        assert!(overrides.apply(ontrac::config()).is_err());
    }

    #[test]
    fn test_invalid_period_rejected() {
        let overrides = PricingOverrides::from_json(
            r#"{"rules": {"DEM_AHS": {"period": {"start": {"month": 2, "day": 30}, "end": {"month": 3, "day": 1}}}}}"#,
        )
        .unwrap();
        let err = overrides.apply(ontrac::config()).unwrap_err();
        assert!(matches!(err, CostError::InvalidDate(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = PricingOverrides::from_json(r#"{"rulez": {}}"#).unwrap_err();
        assert!(matches!(err, CostError::ConfigParse(_)));
    }
}
