// ==========================================
// 工艺物料需求汇总系统 - 工序汇总引擎
// ==========================================
// 职责: 保留逐 (工序节点, 订单) 明细并按维度分组
// 输入: 订单列表 + 分组维度 (产品/机组/人员) + 汇总参数档案
// 输出: 分组键 -> (节点,订单) -> 物料需求明细
// ==========================================
// 用途: 作业计划报表 (如"按机组的作业计划")
// 红线: 分组实体缺失回落到 Unassigned,条目不丢弃
// ==========================================

mod core;


pub use self::core::OperationSeriesEngine;
