//! P2P

use parcel_core::{
    Carrier, CarrierConfig, DimWeightRule, Field, MonthDay, Period, Pricing, SurchargeRule,
    Trigger, ZoneRules,
};
use rust_decimal_macros::dec;

pub const VERSION: &str = "p2p-2025.1";
pub const PARCEL: &str = "PARCEL";

/// 旺季：10/1 ~ 1/15
pub fn demand_period() -> Period {
    Period::new(MonthDay { month: 10, day: 1 }, MonthDay { month: 1, day: 15 })
}

pub fn config() -> CarrierConfig {
    CarrierConfig::new(
        Carrier::P2p,
        VERSION.to_string(),
        PARCEL.to_string(),
        DimWeightRule::above_volume(dec!(166), dec!(1728)),
        ZoneRules::new(5).with_prefix_lengths(vec![5, 3]),
    )
    .with_rules(vec![
        SurchargeRule::new("OVERSIZE".to_string(), Pricing::flat(dec!(75.00), dec!(0)))
            .when(Trigger::gt(Field::LengthPlusGirth, dec!(108)))
            .in_group("handling", 1),
        SurchargeRule::new("AHS".to_string(), Pricing::flat(dec!(12.00), dec!(0)))
            .when(Trigger::any(vec![
                Trigger::gt(Field::LongestSide, dec!(30)),
                Trigger::gt(Field::CubicVolume, dec!(3456)),
            ]))
            .in_group("handling", 2),
        SurchargeRule::new("DEM_AHS".to_string(), Pricing::flat(dec!(2.50), dec!(0)))
            .depends_on("AHS")
            .during(demand_period()),
    ])
}
