// ==========================================
// 工艺物料需求汇总系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、只读目录接口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod catalog;
pub mod order;
pub mod routing;
pub mod types;

// 重导出核心类型
pub use catalog::{EntityCatalog, InMemoryCatalog, Machine, Material, Worker};
pub use order::Order;
pub use routing::{MaterialLine, Operation, OperationNode, RoutingTree, Technology};
pub use types::{GroupBy, MaterialKind, QuantityAlgorithm};
