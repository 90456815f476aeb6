// ==========================================
// 工艺物料需求汇总系统 - 订单领域模型
// ==========================================
// 职责: 生产订单实体 (报表输入的最小单元)
// 红线: 引擎层只读,订单在单次汇总调用内不被修改
// ==========================================

use crate::domain::catalog::Material;
use crate::domain::routing::Technology;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// Order - 生产订单
// ==========================================
// 工艺/计划数量/产品均可缺失,缺失按"无贡献"处理
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub number: String,                    // 订单号 (唯一标识)
    pub name: String,                      // 订单名称
    pub product: Option<Material>,         // 订单产品
    pub planned_quantity: Option<Decimal>, // 计划产出数量 (驱动全部缩放)
    pub date_to: Option<NaiveDate>,        // 交货期 (报表展示用)
    pub technology: Option<Technology>,    // 生产工艺
}

impl Order {
    pub fn new(number: &str, name: &str) -> Self {
        Self {
            number: number.to_string(),
            name: name.to_string(),
            product: None,
            planned_quantity: None,
            date_to: None,
            technology: None,
        }
    }

    pub fn with_product(mut self, product: Material) -> Self {
        self.product = Some(product);
        self
    }

    pub fn with_planned_quantity(mut self, quantity: Decimal) -> Self {
        self.planned_quantity = Some(quantity);
        self
    }

    pub fn with_date_to(mut self, date_to: NaiveDate) -> Self {
        self.date_to = Some(date_to);
        self
    }

    pub fn with_technology(mut self, technology: Technology) -> Self {
        self.technology = Some(technology);
        self
    }

    /// 计划数量是否存在且为正 (汇总前置条件)
    pub fn has_positive_planned_quantity(&self) -> bool {
        matches!(self.planned_quantity, Some(qty) if qty > Decimal::ZERO)
    }
}
