//! 運費主計算器

use parcel_core::{
    CarrierConfig, CostError, EnrichedShipment, Phase, PipelineStage, RateTable, RuleSet,
    Shipment, ZoneTable,
};
use rayon::prelude::*;

use crate::adjustment::WeightAdjuster;
use crate::geometry::GeometryResolver;
use crate::phase::PhaseEvaluator;
use crate::rate_lookup::RateLookup;
use crate::totals::TotalAssembler;
use crate::weight::BillableWeightResolver;
use crate::zone::ZoneResolver;
use crate::{BatchReport, BatchSummary, BatchWarning, RecordFailure};

/// 運費計算器
///
/// 一次執行載入一份配置與參考資料，之後只讀；每筆貨件獨立計算。
pub struct CostCalculator {
    /// 承運商配置
    config: CarrierConfig,

    /// 已驗證並分階段的規則
    rule_set: RuleSet,

    /// 區域表
    zones: ZoneTable,

    /// 費率表
    rates: RateTable,
}

impl CostCalculator {
    /// 創建計算器並驗證配置
    pub fn new(config: CarrierConfig, zones: ZoneTable, rates: RateTable) -> parcel_core::Result<Self> {
        let rule_set = config.rule_set()?;

        if rates.service(&config.default_service).is_none() {
            return Err(CostError::UnknownService(config.default_service.clone()));
        }

        tracing::debug!(
            "{} 配置 {}：第一階段規則 {} 條，第二階段規則 {} 條",
            config.carrier,
            config.version,
            rule_set.independent().len(),
            rule_set.dependent().len()
        );

        Ok(Self {
            config,
            rule_set,
            zones,
            rates,
        })
    }

    pub fn config(&self) -> &CarrierConfig {
        &self.config
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    /// 單筆貨件計算
    pub fn calculate(&self, shipment: &Shipment) -> parcel_core::Result<EnrichedShipment> {
        let id = shipment.tracking_number.as_str();

        // Step 1: 尺寸
        let geometry = GeometryResolver::resolve(shipment)?;
        let actual = GeometryResolver::actual_weight(shipment)?;

        // Step 2: 區域
        let (zone, anomalies) = ZoneResolver::resolve(shipment, &self.zones, &self.config.zone_rules)?;

        // Step 3: 計費重量
        let weight = BillableWeightResolver::resolve(&geometry, actual, &self.config.dim_weight);
        tracing::debug!(
            "貨件 {} 材積 {} 材積重 {} 計費重量 {}",
            id,
            geometry.cubic_volume,
            weight.dim_weight.round_dp(2),
            weight.billable
        );

        let service = shipment
            .service
            .clone()
            .unwrap_or_else(|| self.config.default_service.clone());
        let mut record = EnrichedShipment::new(shipment.clone(), service, geometry, zone, weight);
        for anomaly in anomalies {
            record.add_anomaly(anomaly);
        }

        // Step 4: 第一階段規則
        let phase1 = PhaseEvaluator::evaluate(
            &record,
            self.rule_set.phase(Phase::Independent),
            Phase::Independent,
        );
        let minimum = phase1.minimum_billable_weight;
        record.surcharges.extend(phase1.lines);
        record.stage = PipelineStage::Phase1Evaluated;

        // Step 5: 重量調整（單次）
        WeightAdjuster::apply(&mut record, minimum);
        for anomaly in WeightAdjuster::check_divergence(&record, self.rule_set.independent()) {
            tracing::debug!("貨件 {} 重量調整後群組結果不同: {:?}", id, anomaly);
            record.add_anomaly(anomaly);
        }

        // Step 6: 費率查找
        let Some(rate_zone) = record.zone.rate_zone else {
            return Err(CostError::NonServiceable {
                shipment_id: id.to_string(),
                zone: "-".to_string(),
            });
        };
        let quote = RateLookup::lookup(&self.rates, &record.service, record.weight.bracket, rate_zone, id)?;
        record.weight.bracket = quote.bracket;
        record.base_rate = quote.components;
        record.stage = PipelineStage::RateLookedUp;

        // Step 7: 第二階段規則
        let phase2 = PhaseEvaluator::evaluate(
            &record,
            self.rule_set.phase(Phase::Dependent),
            Phase::Dependent,
        );
        record.surcharges.extend(phase2.lines);
        record.stage = PipelineStage::Phase2Evaluated;

        // Step 8: 燃油與總計
        TotalAssembler::assemble(&mut record, self.config.fuel.as_ref(), &self.config.version);

        Ok(record)
    }

    /// 批次計算
    ///
    /// 單筆輸入錯誤與不可服務的記錄跳過並回報；配置錯誤中止整批。
    pub fn calculate_batch(&self, shipments: &[Shipment]) -> parcel_core::Result<BatchReport> {
        let mut report = BatchReport::empty(self.config.carrier, self.config.version.clone());

        tracing::info!(
            "開始 {} 運費計算：貨件 {} 筆，執行 {}",
            self.config.carrier,
            shipments.len(),
            report.run_id
        );

        let start_time = std::time::Instant::now();

        let results: Vec<parcel_core::Result<EnrichedShipment>> =
            shipments.par_iter().map(|shipment| self.calculate(shipment)).collect();

        for (shipment, result) in shipments.iter().zip(results) {
            match result {
                Ok(record) => report.records.push(record),
                Err(err) if err.is_config_error() => {
                    tracing::error!("配置錯誤，中止批次: {}", err);
                    return Err(err);
                }
                Err(err) if err.is_non_serviceable() => {
                    tracing::warn!("{}", err);
                    report.add_warning(BatchWarning::info(
                        shipment.tracking_number.clone(),
                        err.to_string(),
                    ));
                    report
                        .non_serviceable
                        .push(RecordFailure::new(shipment.tracking_number.clone(), err));
                }
                Err(err) => {
                    tracing::warn!("跳過貨件: {}", err);
                    report.add_warning(BatchWarning::warning(
                        shipment.tracking_number.clone(),
                        err.to_string(),
                    ));
                    report
                        .failures
                        .push(RecordFailure::new(shipment.tracking_number.clone(), err));
                }
            }
        }

        let mut summary = BatchSummary::from_records(&report.records);
        summary.total_shipments = shipments.len();
        summary.failed = report.failures.len();
        summary.non_serviceable = report.non_serviceable.len();
        report.summary = summary;
        report.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("運費計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "完成 {} 筆，跳過 {} 筆，不可服務 {} 筆，總計 {}",
            report.summary.calculated,
            report.summary.failed,
            report.summary.non_serviceable,
            report.summary.total_cost
        );

        Ok(report)
    }
}
