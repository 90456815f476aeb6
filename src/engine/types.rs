// ==========================================
// 工艺物料需求汇总系统 - 引擎层结果与原因类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 跳过原因可恢复,单订单失败不得中断批量
// ==========================================

use crate::domain::catalog::{EntityCatalog, Material};
use crate::domain::routing::OperationNode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// ==========================================
// StructuralDefect - 工艺结构缺陷
// ==========================================
// 按产出反算的前置校验结果,整单失败口径 (事务性)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralDefect {
    // ===== 产出行校验 =====
    #[error("工序 {operation}: 非废料产出行数为 {count},要求恰好 1 行")]
    OutputNotUnique { operation: String, count: usize },

    #[error("工序 {operation}: 产出数量非正,无法按产出反算")]
    OutputQuantityNotPositive { operation: String },

    // ===== 投入行校验 =====
    #[error("工序 {operation}: 缺少投入物料行")]
    NoInputLines { operation: String },

    // ===== 递归兜底 =====
    #[error("工序 {operation}: 递归深度超过上限 {max_depth}")]
    DepthLimitExceeded { operation: String, max_depth: usize },

    #[error("工序 {operation}: 物料 {material} 的比例计算溢出")]
    RatioOverflow { operation: String, material: String },
}

// ==========================================
// SkipReason - 订单跳过原因
// ==========================================
// "无贡献"口径: 批量汇总时记录原因并继续,不是致命错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("订单 {order}: 未指定工艺")]
    MissingTechnology { order: String },

    #[error("订单 {order}: 计划数量缺失或非正")]
    InvalidPlannedQuantity { order: String },

    #[error("订单 {order}: 工艺路线没有根工序")]
    EmptyRouting { order: String },

    #[error("订单 {order}: 工艺结构校验未通过: {defect}")]
    Structural {
        order: String,
        defect: StructuralDefect,
    },
}

// ==========================================
// RequirementTotals - 物料需求总量
// ==========================================
// 物料号 -> 累计需求数量 (键唯一,数量跨订单/跨节点可加)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementTotals {
    pub quantities: HashMap<String, Decimal>,
}

impl RequirementTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条需求 (同物料累加)
    pub fn accumulate(&mut self, material_number: &str, quantity: Decimal) {
        *self
            .quantities
            .entry(material_number.to_string())
            .or_insert(Decimal::ZERO) += quantity;
    }

    /// 合并另一份总量 (批量驱动的跨订单合并)
    pub fn merge(&mut self, other: RequirementTotals) {
        for (number, quantity) in other.quantities {
            *self.quantities.entry(number).or_insert(Decimal::ZERO) += quantity;
        }
    }

    /// 按物料号读取累计数量
    pub fn get(&self, material_number: &str) -> Option<Decimal> {
        self.quantities.get(material_number).copied()
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// 对照目录解析为报表行 (物料号排序保证报表稳定)
    ///
    /// 目录未命中时名称/单位留空,行不丢弃
    pub fn resolve(&self, catalog: &dyn EntityCatalog) -> Vec<RequirementLine> {
        let mut lines: Vec<RequirementLine> = self
            .quantities
            .iter()
            .map(|(number, quantity)| {
                let material = catalog.material(number);
                RequirementLine {
                    number: number.clone(),
                    name: material.map(|m| m.name.clone()),
                    unit: material.and_then(|m| m.unit.clone()),
                    quantity: *quantity,
                }
            })
            .collect();
        lines.sort_by(|a, b| a.number.cmp(&b.number));
        lines
    }
}

// ==========================================
// RequirementLine - 报表需求行
// ==========================================
// 用途: 交给渲染层的展示行 (物料号/名称/单位/数量)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementLine {
    pub number: String,        // 物料号
    pub name: Option<String>,  // 物料名称 (目录未命中时为空)
    pub unit: Option<String>,  // 计量单位
    pub quantity: Decimal,     // 累计需求数量
}

// ==========================================
// NodeQuantities - 逐节点数量记录
// ==========================================
// 共享遍历核心的输出: 两个引擎分别坍缩/分组
// 生命周期: 借用工艺树,仅在单次汇总调用内存在
#[derive(Debug, Clone)]
pub struct NodeQuantities<'t> {
    pub node: &'t OperationNode,
    pub lines: Vec<(&'t Material, Decimal)>, // 行物料与缩放后数量
}

// ==========================================
// SeriesGroupKey - 工序汇总分组键
// ==========================================
// 分组实体可缺失: 缺失用 Unassigned 哨兵,条目不丢弃
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesGroupKey {
    Product(String), // 订单产品物料号
    Machine(String), // 工序机组代码
    Worker(String),  // 工序人员工号
    Unassigned,      // 分组实体缺失
}

// ==========================================
// NodeOrderKey - (工序节点, 订单) 配对键
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeOrderKey {
    pub node_id: String,      // 工艺树节点标识
    pub order_number: String, // 订单号
}

// ==========================================
// OperationSeries - 工序汇总结果
// ==========================================
// 分组键 -> (节点,订单) -> 该节点的物料需求
#[derive(Debug, Clone, Default)]
pub struct OperationSeries {
    pub groups: HashMap<SeriesGroupKey, HashMap<NodeOrderKey, RequirementTotals>>,
}

impl OperationSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取或建 (分组, 节点/订单) 条目
    pub(crate) fn entry(
        &mut self,
        group: SeriesGroupKey,
        node_order: NodeOrderKey,
    ) -> &mut RequirementTotals {
        self.groups
            .entry(group)
            .or_default()
            .entry(node_order)
            .or_default()
    }

    /// 读取指定分组的全部条目
    pub fn group(
        &self,
        key: &SeriesGroupKey,
    ) -> Option<&HashMap<NodeOrderKey, RequirementTotals>> {
        self.groups.get(key)
    }

    /// 全部 (节点,订单) 条目数
    pub fn entry_count(&self) -> usize {
        self.groups.values().map(|entries| entries.len()).sum()
    }

    /// 跨分组重新坍缩为物料需求总量 (分组完整性校核/报表合计)
    pub fn collapsed_totals(&self) -> RequirementTotals {
        let mut totals = RequirementTotals::new();
        for entries in self.groups.values() {
            for node_totals in entries.values() {
                totals.merge(node_totals.clone());
            }
        }
        totals
    }
}

// ==========================================
// BatchSummary - 批量汇总统计
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_orders: usize,      // 总订单数
    pub aggregated_orders: usize, // 计入汇总的订单数
    pub skipped_orders: usize,    // 跳过的订单数
    pub material_count: usize,    // 结果物料数
}
