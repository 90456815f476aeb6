// ==========================================
// 工艺物料需求汇总系统 - 主数据与目录查询
// ==========================================
// 职责: 物料/机组/人员主数据实体 + 只读目录查询接口
// 红线: 目录只读,未命中返回 None,不抛错
// ==========================================

use crate::domain::order::Order;
use crate::domain::types::MaterialKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// Material - 物料主数据
// ==========================================
// 用途: 外部主数据系统写入,引擎层只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub number: String,       // 物料号 (唯一标识)
    pub name: String,         // 物料名称
    pub unit: Option<String>, // 计量单位
    pub kind: MaterialKind,   // 物料类别
}

impl Material {
    pub fn new(number: &str, name: &str, kind: MaterialKind) -> Self {
        Self {
            number: number.to_string(),
            name: name.to_string(),
            unit: None,
            kind,
        }
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }
}

// ==========================================
// Machine - 机组主数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub code: String, // 机组代码 (唯一标识)
    pub name: String, // 机组名称
}

// ==========================================
// Worker - 人员主数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub number: String,  // 工号 (唯一标识)
    pub name: String,    // 名
    pub surname: String, // 姓
}

impl Worker {
    /// 报表展示用全名
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

// ==========================================
// Trait: EntityCatalog
// ==========================================
// 用途: 引擎消费的只读实体目录接口
// 红线: 未命中返回 None,由调用方决定降级口径
pub trait EntityCatalog {
    /// 按物料号查询物料
    fn material(&self, number: &str) -> Option<&Material>;

    /// 按机组代码查询机组
    fn machine(&self, code: &str) -> Option<&Machine>;

    /// 按工号查询人员
    fn worker(&self, number: &str) -> Option<&Worker>;

    /// 按订单号查询订单
    fn order(&self, number: &str) -> Option<&Order>;
}

// ==========================================
// InMemoryCatalog - 内存目录实现
// ==========================================
// 用途: 报表解析与测试场景的参考实现
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    materials: HashMap<String, Material>,
    machines: HashMap<String, Machine>,
    workers: HashMap<String, Worker>,
    orders: HashMap<String, Order>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_material(&mut self, material: Material) {
        self.materials.insert(material.number.clone(), material);
    }

    pub fn insert_machine(&mut self, machine: Machine) {
        self.machines.insert(machine.code.clone(), machine);
    }

    pub fn insert_worker(&mut self, worker: Worker) {
        self.workers.insert(worker.number.clone(), worker);
    }

    pub fn insert_order(&mut self, order: Order) {
        self.orders.insert(order.number.clone(), order);
    }
}

impl EntityCatalog for InMemoryCatalog {
    fn material(&self, number: &str) -> Option<&Material> {
        self.materials.get(number)
    }

    fn machine(&self, code: &str) -> Option<&Machine> {
        self.machines.get(code)
    }

    fn worker(&self, number: &str) -> Option<&Worker> {
        self.workers.get(number)
    }

    fn order(&self, number: &str) -> Option<&Order> {
        self.orders.get(number)
    }
}
