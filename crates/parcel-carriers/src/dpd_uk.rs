//! DPD UK
//!
//! 公制（cm / kg），英鎊計價。離島以字母區域表示，查費率時以區域 4 計價。

use parcel_core::{
    Carrier, CarrierConfig, DimWeightRule, Field, FuelSurcharge, Pricing, SurchargeRule, Trigger,
    ZoneRules,
};
use rust_decimal_macros::dec;

pub const VERSION: &str = "dpd-uk-2025.1";
pub const NEXT_DAY: &str = "NEXT_DAY";

pub fn config() -> CarrierConfig {
    CarrierConfig::new(
        Carrier::DpdUk,
        VERSION.to_string(),
        NEXT_DAY.to_string(),
        DimWeightRule::always(dec!(5000)),
        ZoneRules::new(1)
            .with_prefix_lengths(vec![4, 3, 2])
            .with_letter_zone_substitute(4),
    )
    .with_currency("GBP")
    .with_fuel(FuelSurcharge::new(dec!(0.055), dec!(0)))
    .with_rules(vec![
        SurchargeRule::new("OVERSIZE".to_string(), Pricing::flat(dec!(45.00), dec!(0)))
            .when(Trigger::any(vec![
                Trigger::gt(Field::LongestSide, dec!(175)),
                Trigger::gt(Field::LengthPlusGirth, dec!(300)),
            ]))
            .in_group("handling", 1),
        SurchargeRule::new("LARGE_PARCEL".to_string(), Pricing::flat(dec!(12.00), dec!(0)))
            .when(Trigger::any(vec![
                Trigger::gt(Field::LongestSide, dec!(100)),
                Trigger::gt(Field::SecondLongestSide, dec!(60)),
            ]))
            .in_group("handling", 2),
    ])
}
