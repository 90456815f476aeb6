// ==========================================
// 工艺物料需求汇总系统 - 需求汇总引擎
// ==========================================
// 职责: 单订单物料需求汇总 + 批量订单合并驱动
// 红线: 订单缺工艺/缺计划数量按"无贡献"处理,不是错误
// 红线: 按产出反算校验失败时整单作废,不保留部分结果
// ==========================================

use crate::config::AggregationProfile;
use crate::domain::order::Order;
use crate::domain::routing::Technology;
use crate::domain::types::QuantityAlgorithm;
use crate::engine::propagation_core::PropagationCore;
use crate::engine::types::{BatchSummary, NodeQuantities, RequirementTotals, SkipReason};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

// ==========================================
// RequirementsEngine - 需求汇总引擎
// ==========================================
// 无状态引擎,所有参数随调用传入
pub struct RequirementsEngine;

impl RequirementsEngine {
    /// 创建新的需求汇总引擎
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 单订单物料需求汇总
    ///
    /// 算法由订单工艺的组件数量算法属性选择:
    /// - 按工艺总量: 全树展平,行用量 × 计划数量,永不失败
    /// - 按产出反算: 自根递归,逐级按产出比例缩放,校验失败整单作废
    ///
    /// # 返回
    /// - Ok(RequirementTotals): 该订单的物料需求
    /// - Err(SkipReason): 该订单无贡献 (批量口径下跳过,不视为整体失败)
    pub fn aggregate_order(
        &self,
        order: &Order,
        profile: &AggregationProfile,
    ) -> Result<RequirementTotals, SkipReason> {
        let technology = order
            .technology
            .as_ref()
            .ok_or_else(|| SkipReason::MissingTechnology {
                order: order.number.clone(),
            })?;

        let planned_quantity = match order.planned_quantity {
            Some(quantity) if quantity > Decimal::ZERO => quantity,
            _ => {
                return Err(SkipReason::InvalidPlannedQuantity {
                    order: order.number.clone(),
                })
            }
        };

        let records = Self::node_records(order, technology, planned_quantity, profile)?;
        let totals = Self::collapse(&records, profile.only_components);

        debug!(
            order = %order.number,
            algorithm = %technology.algorithm,
            nodes = records.len(),
            materials = totals.len(),
            "订单需求汇总完成"
        );

        Ok(totals)
    }

    /// 批量订单汇总
    ///
    /// 逐订单调用单订单汇总,成功结果按物料累加合并;
    /// 跳过的订单记录原因并继续,批量永不中断
    pub fn aggregate_orders(
        &self,
        orders: &[Order],
        profile: &AggregationProfile,
    ) -> RequirementTotals {
        self.aggregate_orders_detailed(orders, profile).0
    }

    /// 批量订单汇总,附带统计
    pub fn aggregate_orders_detailed(
        &self,
        orders: &[Order],
        profile: &AggregationProfile,
    ) -> (RequirementTotals, BatchSummary) {
        let mut totals = RequirementTotals::new();
        let mut aggregated = 0usize;
        let mut skipped = 0usize;

        for order in orders {
            match self.aggregate_order(order, profile) {
                Ok(order_totals) => {
                    totals.merge(order_totals);
                    aggregated += 1;
                }
                Err(reason) => {
                    // 跳过是正常口径,不中断批量
                    warn!(order = %order.number, %reason, "订单不计入需求汇总");
                    skipped += 1;
                }
            }
        }

        let summary = BatchSummary {
            total_orders: orders.len(),
            aggregated_orders: aggregated,
            skipped_orders: skipped,
            material_count: totals.len(),
        };

        info!(
            total = summary.total_orders,
            aggregated = summary.aggregated_orders,
            skipped = summary.skipped_orders,
            materials = summary.material_count,
            "批量需求汇总完成"
        );

        (totals, summary)
    }

    // ==========================================
    // 共享遍历 (工序汇总引擎复用)
    // ==========================================

    /// 按工艺算法生成逐节点数量记录
    pub(crate) fn node_records<'t>(
        order: &Order,
        technology: &'t Technology,
        planned_quantity: Decimal,
        profile: &AggregationProfile,
    ) -> Result<Vec<NodeQuantities<'t>>, SkipReason> {
        match technology.algorithm {
            QuantityAlgorithm::PerTechnology => Ok(PropagationCore::flat_quantities(
                &technology.routing,
                planned_quantity,
            )),
            QuantityAlgorithm::PerOutputProduct => {
                let root = technology.routing.root.as_ref().ok_or_else(|| {
                    SkipReason::EmptyRouting {
                        order: order.number.clone(),
                    }
                })?;
                PropagationCore::back_propagate(root, planned_quantity, 0, profile.max_recursion_depth)
                    .map_err(|defect| SkipReason::Structural {
                        order: order.number.clone(),
                        defect,
                    })
            }
        }
    }

    /// 逐节点记录坍缩为物料需求总量
    ///
    /// onlyComponents 只在记账处过滤,不影响遍历与递归
    pub(crate) fn collapse(
        records: &[NodeQuantities<'_>],
        only_components: bool,
    ) -> RequirementTotals {
        let mut totals = RequirementTotals::new();
        for record in records {
            for (material, quantity) in &record.lines {
                if only_components && !material.kind.is_component() {
                    continue;
                }
                totals.accumulate(&material.number, *quantity);
            }
        }
        totals
    }
}

impl Default for RequirementsEngine {
    fn default() -> Self {
        Self::new()
    }
}
