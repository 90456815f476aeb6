// ==========================================
// 工艺物料需求汇总系统 - 需求汇总引擎
// ==========================================
// 职责: 单订单物料需求汇总 + 批量订单合并驱动
// 输入: 订单 (工艺 + 计划数量) + 汇总参数档案
// 输出: 物料号 -> 累计需求数量
// ==========================================
// 红线: 单订单跳过不得中断批量,跳过必须输出 reason
// ==========================================

mod core;

#[cfg(test)]
mod tests;

pub use self::core::RequirementsEngine;
