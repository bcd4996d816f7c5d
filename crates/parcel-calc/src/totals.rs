//! 燃油附加費與總計

use parcel_core::units::round_money;
use parcel_core::{EnrichedShipment, FuelSurcharge, PipelineStage};
use rust_decimal::Decimal;

/// 總計組裝器
pub struct TotalAssembler;

impl TotalAssembler {
    /// 計算燃油費、小計與總計，並蓋上配置版本
    pub fn assemble(record: &mut EnrichedShipment, fuel: Option<&FuelSurcharge>, version: &str) {
        let base = round_money(record.base_rate.net());

        record.fuel = match fuel {
            Some(fuel) => round_money(fuel.effective_rate() * base),
            None => Decimal::ZERO,
        };
        record.subtotal = base + record.surcharge_total();
        record.total = record.subtotal + record.fuel;
        record.stamp_version(version);
        record.stage = PipelineStage::Totaled;
    }
}
