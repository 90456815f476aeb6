// ==========================================
// 工艺物料需求汇总系统 - 领域类型定义
// ==========================================
// 依据: 主数据字典 - 物料类别/算法字典码
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 物料类别 (Material Kind)
// ==========================================
// 字典码: 01component / 02intermediate / 03finalProduct / 04waste
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialKind {
    Component,    // 组件 (外购/原料)
    Intermediate, // 中间品
    FinalProduct, // 成品
    Waste,        // 废料
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialKind::Component => write!(f, "COMPONENT"),
            MaterialKind::Intermediate => write!(f, "INTERMEDIATE"),
            MaterialKind::FinalProduct => write!(f, "FINAL_PRODUCT"),
            MaterialKind::Waste => write!(f, "WASTE"),
        }
    }
}

impl MaterialKind {
    /// 从字典码解析物料类别
    ///
    /// 未知字典码按中间品处理 (既非组件也非废料)
    pub fn parse_code(code: &str) -> Self {
        match code {
            "01component" => MaterialKind::Component,
            "02intermediate" => MaterialKind::Intermediate,
            "03finalProduct" => MaterialKind::FinalProduct,
            "04waste" => MaterialKind::Waste,
            _ => MaterialKind::Intermediate,
        }
    }

    /// 转换为主数据存储的字典码
    pub fn as_code(&self) -> &'static str {
        match self {
            MaterialKind::Component => "01component",
            MaterialKind::Intermediate => "02intermediate",
            MaterialKind::FinalProduct => "03finalProduct",
            MaterialKind::Waste => "04waste",
        }
    }

    /// 是否组件类物料 (onlyComponents 过滤口径)
    pub fn is_component(&self) -> bool {
        matches!(self, MaterialKind::Component)
    }

    /// 是否废料 (产出行校验口径)
    pub fn is_waste(&self) -> bool {
        matches!(self, MaterialKind::Waste)
    }
}

// ==========================================
// 组件数量算法 (Quantity Algorithm)
// ==========================================
// 工艺属性,决定需求汇总口径
// 字典码: 01perProductOut / 02perTechnology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuantityAlgorithm {
    PerOutputProduct, // 按产出反算 (逐级递归)
    PerTechnology,    // 按工艺总量 (展平累加)
}

impl fmt::Display for QuantityAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityAlgorithm::PerOutputProduct => write!(f, "PER_OUTPUT_PRODUCT"),
            QuantityAlgorithm::PerTechnology => write!(f, "PER_TECHNOLOGY"),
        }
    }
}

impl QuantityAlgorithm {
    /// 从字典码解析算法
    ///
    /// 未知字典码按产出反算处理 (主数据默认口径)
    pub fn parse_code(code: &str) -> Self {
        match code {
            "02perTechnology" => QuantityAlgorithm::PerTechnology,
            _ => QuantityAlgorithm::PerOutputProduct,
        }
    }

    /// 转换为主数据存储的字典码
    pub fn as_code(&self) -> &'static str {
        match self {
            QuantityAlgorithm::PerOutputProduct => "01perProductOut",
            QuantityAlgorithm::PerTechnology => "02perTechnology",
        }
    }
}

// ==========================================
// 工序汇总分组维度 (Group By)
// ==========================================
// 作业计划报表分组口径: 按产品/按机组/按人员
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupBy {
    Product, // 按订单产品
    Machine, // 按工序机组
    Worker,  // 按工序人员
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupBy::Product => write!(f, "PRODUCT"),
            GroupBy::Machine => write!(f, "MACHINE"),
            GroupBy::Worker => write!(f, "WORKER"),
        }
    }
}
