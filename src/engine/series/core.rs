// ==========================================
// 工艺物料需求汇总系统 - 工序汇总引擎
// ==========================================
// 职责: 复用数量传导遍历,保留逐节点明细并按维度分组
// 红线: 失败口径与需求汇总一致,失败订单的子树不产生任何条目
// ==========================================

use crate::config::AggregationProfile;
use crate::domain::order::Order;
use crate::domain::routing::OperationNode;
use crate::domain::types::GroupBy;
use crate::engine::requirements::RequirementsEngine;
use crate::engine::types::{NodeOrderKey, OperationSeries, SeriesGroupKey, SkipReason};
use rust_decimal::Decimal;
use tracing::{info, warn};

// ==========================================
// OperationSeriesEngine - 工序汇总引擎
// ==========================================
// 无状态引擎,分组维度随调用传入
pub struct OperationSeriesEngine;

impl OperationSeriesEngine {
    /// 创建新的工序汇总引擎
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 工序汇总
    ///
    /// 与需求汇总同一套双算法遍历,但不坍缩:
    /// 每个被访问的工序节点按 (节点, 订单) 保留物料明细,
    /// 外层按分组维度归组 (订单产品 / 工序机组 / 工序人员)
    ///
    /// 单订单失败 (结构校验/缺工艺/缺计划数量) 只跳过该订单
    pub fn aggregate(
        &self,
        orders: &[Order],
        group_by: GroupBy,
        profile: &AggregationProfile,
    ) -> OperationSeries {
        let mut series = OperationSeries::new();

        for order in orders {
            if let Err(reason) = Self::aggregate_order_into(&mut series, order, group_by, profile) {
                // 跳过是正常口径,不中断批量
                warn!(order = %order.number, %reason, "订单不计入工序汇总");
            }
        }

        info!(
            group_by = %group_by,
            groups = series.groups.len(),
            entries = series.entry_count(),
            "工序汇总完成"
        );

        series
    }

    /// 单订单落组
    ///
    /// 遍历整单通过后才写入条目 (事务性: 失败订单零条目)
    fn aggregate_order_into(
        series: &mut OperationSeries,
        order: &Order,
        group_by: GroupBy,
        profile: &AggregationProfile,
    ) -> Result<(), SkipReason> {
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

        let records = RequirementsEngine::node_records(order, technology, planned_quantity, profile)?;

        for record in &records {
            let group = Self::group_key(order, record.node, group_by);
            let node_order = NodeOrderKey {
                node_id: record.node.node_id.clone(),
                order_number: order.number.clone(),
            };
            let totals = series.entry(group, node_order);
            for (material, quantity) in &record.lines {
                if profile.only_components && !material.kind.is_component() {
                    continue;
                }
                totals.accumulate(&material.number, *quantity);
            }
        }

        Ok(())
    }

    /// 分组键解析
    ///
    /// 产品取订单产品,机组/人员取工序指派;缺失回落到 Unassigned
    fn group_key(order: &Order, node: &OperationNode, group_by: GroupBy) -> SeriesGroupKey {
        match group_by {
            GroupBy::Product => order
                .product
                .as_ref()
                .map(|product| SeriesGroupKey::Product(product.number.clone()))
                .unwrap_or(SeriesGroupKey::Unassigned),
            GroupBy::Machine => node
                .operation
                .machine
                .as_ref()
                .map(|machine| SeriesGroupKey::Machine(machine.code.clone()))
                .unwrap_or(SeriesGroupKey::Unassigned),
            GroupBy::Worker => node
                .operation
                .staff
                .as_ref()
                .map(|staff| SeriesGroupKey::Worker(staff.number.clone()))
                .unwrap_or(SeriesGroupKey::Unassigned),
        }
    }
}

impl Default for OperationSeriesEngine {
    fn default() -> Self {
        Self::new()
    }
}
