//! FedEx Ground / Home Delivery
//!
//! 費率為四段式（牌價與三種折扣）；燃油 18% 折扣 10%；字母區域（偏遠屬地）以區域 9 計價。

use parcel_core::{
    Carrier, CarrierConfig, DimWeightRule, Field, FuelSurcharge, MonthDay, Period, Pricing,
    SurchargeRule, Trigger, ZoneRules,
};
use rust_decimal_macros::dec;

pub const VERSION: &str = "fedex-2025.1";
pub const GROUND: &str = "GROUND";
pub const HOME_DELIVERY: &str = "HOME_DELIVERY";

/// 旺季：9/29 ~ 1/18
pub fn demand_period() -> Period {
    Period::new(MonthDay { month: 9, day: 29 }, MonthDay { month: 1, day: 18 })
}

pub fn config() -> CarrierConfig {
    let demand = demand_period();

    CarrierConfig::new(
        Carrier::FedEx,
        VERSION.to_string(),
        GROUND.to_string(),
        DimWeightRule::always(dec!(139)),
        ZoneRules::new(5)
            .with_prefix_lengths(vec![5, 3])
            .with_letter_zone_substitute(9),
    )
    .with_fuel(FuelSurcharge::new(dec!(0.18), dec!(0.10)))
    .with_rules(vec![
        SurchargeRule::new("OVERSIZE".to_string(), Pricing::flat(dec!(240.00), dec!(0.50)))
            .when(Trigger::any(vec![
                Trigger::gt(Field::LongestSide, dec!(96)),
                Trigger::gt(Field::LengthPlusGirth, dec!(130)),
            ]))
            .in_group("handling", 1)
            .with_min_billable_weight(dec!(90)),
        SurchargeRule::new("AHS_DIMENSIONS".to_string(), Pricing::flat(dec!(28.00), dec!(0.50)))
            .when(Trigger::any(vec![
                Trigger::gt(Field::LongestSide, dec!(48)),
                Trigger::gt(Field::SecondLongestSide, dec!(30)),
                Trigger::gt(Field::LengthPlusGirth, dec!(105)),
            ]))
            .in_group("handling", 2)
            .with_min_billable_weight(dec!(40)),
        SurchargeRule::new("AHS_WEIGHT".to_string(), Pricing::flat(dec!(38.00), dec!(0.50)))
            .when(Trigger::gt(Field::ActualWeight, dec!(50)))
            .in_group("handling", 3),
        SurchargeRule::new("RESIDENTIAL".to_string(), Pricing::flat(dec!(5.95), dec!(0.40)))
            .when(Trigger::Residential),
        SurchargeRule::new("DEM_OVERSIZE".to_string(), Pricing::flat(dec!(54.00), dec!(0)))
            .depends_on("OVERSIZE")
            .during(demand),
        SurchargeRule::new("DEM_AHS".to_string(), Pricing::flat(dec!(5.45), dec!(0)))
            .depends_on("AHS_DIMENSIONS")
            .during(demand),
        SurchargeRule::new("DEM_AHS_WEIGHT".to_string(), Pricing::flat(dec!(5.45), dec!(0)))
            .depends_on("AHS_WEIGHT")
            .during(demand),
        SurchargeRule::new("DEM_RESIDENTIAL".to_string(), Pricing::flat(dec!(0.83), dec!(0)))
            .depends_on("RESIDENTIAL")
            .during(demand),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_is_valid() {
        let config = config();
        let rules = config.rule_set().unwrap();
        assert_eq!(rules.independent().len(), 4);
        assert_eq!(rules.dependent().len(), 4);
        assert_eq!(config.zone_rules.letter_zone_substitute, Some(9));
        assert_eq!(config.fuel.unwrap().effective_rate(), dec!(0.162));
    }
}
