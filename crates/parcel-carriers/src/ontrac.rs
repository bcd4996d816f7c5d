//! OnTrac
//!
//! 材積除數 250，無材積門檻；燃油 25% 折扣 20%。
//! LPS / AHS / AHS_WEIGHT 互斥；住宅費按比例分攤；旺季附加費依附對應規則。

use parcel_core::{
    Carrier, CarrierConfig, DimWeightRule, Field, FuelSurcharge, MonthDay, Period, Pricing,
    SurchargeRule, Trigger, ZoneRules,
};
use rust_decimal_macros::dec;

pub const VERSION: &str = "ontrac-2025.1";
pub const GROUND: &str = "GROUND";

/// 旺季：9/27 ~ 1/16
pub fn demand_period() -> Period {
    Period::new(MonthDay { month: 9, day: 27 }, MonthDay { month: 1, day: 16 })
}

pub fn config() -> CarrierConfig {
    let demand = demand_period();

    CarrierConfig::new(
        Carrier::OnTrac,
        VERSION.to_string(),
        GROUND.to_string(),
        DimWeightRule::always(dec!(250)),
        ZoneRules::new(5).with_prefix_lengths(vec![5, 3]),
    )
    .with_fuel(FuelSurcharge::new(dec!(0.25), dec!(0.20)))
    .with_rules(vec![
        SurchargeRule::new("LPS".to_string(), Pricing::flat(dec!(240.00), dec!(0.60)))
            .when(Trigger::any(vec![
                Trigger::gt(Field::LongestSide, dec!(72)),
                Trigger::gt(Field::CubicVolume, dec!(17280)),
            ]))
            .in_group("handling", 1)
            .with_min_billable_weight(dec!(90)),
        SurchargeRule::new("AHS".to_string(), Pricing::flat(dec!(33.00), dec!(0.70)))
            .when(Trigger::any(vec![
                Trigger::gt(Field::LongestSide, dec!(48)),
                Trigger::gt(Field::SecondLongestSide, dec!(30)),
                Trigger::gt(Field::CubicVolume, dec!(8640)),
            ]))
            .in_group("handling", 2),
        SurchargeRule::new("AHS_WEIGHT".to_string(), Pricing::flat(dec!(33.00), dec!(0.70)))
            .when(Trigger::gt(Field::ActualWeight, dec!(50)))
            .in_group("handling", 3),
        SurchargeRule::new(
            "RES".to_string(),
            Pricing::allocated(dec!(4.00), dec!(0.50), dec!(0.80)),
        ),
        SurchargeRule::new(
            "DEM_RES".to_string(),
            Pricing::allocated(dec!(0.50), dec!(0), dec!(0.80)),
        )
        .depends_on("RES")
        .during(demand),
        SurchargeRule::new("DEM_AHS".to_string(), Pricing::flat(dec!(4.66), dec!(0.50)))
            .depends_on("AHS")
            .during(demand),
        SurchargeRule::new("DEM_LPS".to_string(), Pricing::flat(dec!(50.00), dec!(0.50)))
            .depends_on("LPS")
            .during(demand),
    ])
}
