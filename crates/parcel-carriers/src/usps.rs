//! USPS Ground Advantage

use parcel_core::{
    Carrier, CarrierConfig, DimWeightRule, Field, MonthDay, Period, Pricing, SurchargeRule,
    Trigger, ZoneRules,
};
use rust_decimal_macros::dec;

pub const VERSION: &str = "usps-2025.1";
pub const GROUND_ADVANTAGE: &str = "GROUND_ADVANTAGE";

/// 旺季：10/6 ~ 1/18
pub fn peak_period() -> Period {
    Period::new(MonthDay { month: 10, day: 6 }, MonthDay { month: 1, day: 18 })
}

pub fn config() -> CarrierConfig {
    CarrierConfig::new(
        Carrier::Usps,
        VERSION.to_string(),
        GROUND_ADVANTAGE.to_string(),
        DimWeightRule::above_volume(dec!(166), dec!(1728)),
        ZoneRules::new(5).with_prefix_lengths(vec![5, 3]),
    )
    .with_rules(vec![
        SurchargeRule::new("NSL_30".to_string(), Pricing::flat(dec!(4.00), dec!(0)))
            .when(Trigger::gt(Field::LongestSide, dec!(30)))
            .in_group("length", 1),
        SurchargeRule::new("NSL_22".to_string(), Pricing::flat(dec!(3.00), dec!(0)))
            .when(Trigger::gt(Field::LongestSide, dec!(22)))
            .in_group("length", 2),
        SurchargeRule::new("NSV".to_string(), Pricing::flat(dec!(15.00), dec!(0)))
            .when(Trigger::gt(Field::CubicVolume, dec!(3456))),
        SurchargeRule::new("PEAK".to_string(), Pricing::flat(dec!(0.45), dec!(0)))
            .during(peak_period()),
    ])
}
