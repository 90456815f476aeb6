// ==========================================
// 工艺物料需求汇总系统 - 引擎层
// ==========================================
// 职责: 实现需求汇总算法,无状态、无 I/O
// 红线: 引擎不持有实体,单次调用只读输入
// 红线: 所有跳过/失败必须输出 reason
// ==========================================

pub mod propagation_core;
pub mod requirements;
pub mod series;
pub mod types;

// 重导出核心引擎
pub use propagation_core::PropagationCore;
pub use requirements::RequirementsEngine;
pub use series::OperationSeriesEngine;
pub use types::{
    BatchSummary, NodeOrderKey, NodeQuantities, OperationSeries, RequirementLine,
    RequirementTotals, SeriesGroupKey, SkipReason, StructuralDefect,
};
