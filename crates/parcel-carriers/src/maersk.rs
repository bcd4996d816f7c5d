//! Maersk
//!
//! 材積超過 1728 in³ 才比較材積重；無燃油附加費；取件費按磅計。

use parcel_core::{
    Carrier, CarrierConfig, DimWeightRule, Field, Pricing, SurchargeRule, Trigger, ZoneRules,
};
use rust_decimal_macros::dec;

pub const VERSION: &str = "maersk-2025.1";
pub const GROUND: &str = "GROUND";

pub fn config() -> CarrierConfig {
    CarrierConfig::new(
        Carrier::Maersk,
        VERSION.to_string(),
        GROUND.to_string(),
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
        // 2 ft³
        SurchargeRule::new("NSV".to_string(), Pricing::flat(dec!(15.00), dec!(0)))
            .when(Trigger::gt(Field::CubicVolume, dec!(3456))),
        SurchargeRule::new("PICKUP".to_string(), Pricing::per_weight_unit(dec!(0.04), dec!(0))),
    ])
}
