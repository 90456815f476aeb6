// ==========================================
// 工艺物料需求汇总系统 - 核心库
// ==========================================
// 技术栈: Rust + rust_decimal
// 系统定位: 生产报表核心引擎 (上层渲染/存储由外部系统承担)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 汇总算法
pub mod engine;

// 配置层 - 汇总参数
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{GroupBy, MaterialKind, QuantityAlgorithm};

// 领域实体
pub use domain::{
    EntityCatalog, InMemoryCatalog, Machine, Material, MaterialLine, Operation, OperationNode,
    Order, RoutingTree, Technology, Worker,
};

// 引擎
pub use engine::{
    BatchSummary, NodeOrderKey, OperationSeries, OperationSeriesEngine, PropagationCore,
    RequirementLine, RequirementTotals, RequirementsEngine, SeriesGroupKey, SkipReason,
    StructuralDefect,
};

// 配置
pub use config::AggregationProfile;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "工艺物料需求汇总系统";

// ==========================================
// 预编译检查
// ==========================================
