// ==========================================
// 工艺物料需求汇总系统 - 工艺路线领域模型
// ==========================================
// 职责: 工艺树只读视图 (工序节点 + 投入/产出物料行)
// 红线: 树按构造保证无环 (子节点只能是严格后代)
// 红线: 引擎层只读,任何汇总调用不得修改工艺树
// ==========================================

use crate::domain::catalog::{Machine, Material, Worker};
use crate::domain::types::QuantityAlgorithm;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// MaterialLine - 物料行
// ==========================================
// 挂在工序节点上的 (物料, 单位用量) 对
// 约定: quantity 为精确十进制,恒非负
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub material: Material, // 行物料
    pub quantity: Decimal,  // 单位用量
}

impl MaterialLine {
    pub fn new(material: Material, quantity: Decimal) -> Self {
        Self { material, quantity }
    }
}

// ==========================================
// Operation - 工序主数据
// ==========================================
// 机组/人员为可缺失的排工信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub number: String,           // 工序号
    pub name: String,             // 工序名称
    pub machine: Option<Machine>, // 指派机组
    pub staff: Option<Worker>,    // 指派人员
}

impl Operation {
    pub fn new(number: &str, name: &str) -> Self {
        Self {
            number: number.to_string(),
            name: name.to_string(),
            machine: None,
            staff: None,
        }
    }

    pub fn with_machine(mut self, machine: Machine) -> Self {
        self.machine = Some(machine);
        self
    }

    pub fn with_staff(mut self, staff: Worker) -> Self {
        self.staff = Some(staff);
        self
    }
}

// ==========================================
// OperationNode - 工艺树节点
// ==========================================
// 子节点为本工序的前道工序 (产出供本工序消耗)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationNode {
    pub node_id: String,               // 树内节点标识 (同一工序可出现在多个位置)
    pub operation: Operation,          // 工序
    pub input_lines: Vec<MaterialLine>, // 投入物料行
    pub output_lines: Vec<MaterialLine>, // 产出物料行
    pub children: Vec<OperationNode>,  // 前道工序节点
}

impl OperationNode {
    pub fn new(node_id: &str, operation: Operation) -> Self {
        Self {
            node_id: node_id.to_string(),
            operation,
            input_lines: Vec::new(),
            output_lines: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_input(mut self, line: MaterialLine) -> Self {
        self.input_lines.push(line);
        self
    }

    pub fn with_output(mut self, line: MaterialLine) -> Self {
        self.output_lines.push(line);
        self
    }

    pub fn with_child(mut self, child: OperationNode) -> Self {
        self.children.push(child);
        self
    }

    /// 非废料产出行迭代
    pub fn non_waste_outputs(&self) -> impl Iterator<Item = &MaterialLine> {
        self.output_lines
            .iter()
            .filter(|line| !line.material.kind.is_waste())
    }
}

// ==========================================
// RoutingTree - 工艺路线树
// ==========================================
// 持有根节点与全部后代,按工艺不可变
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoutingTree {
    pub root: Option<OperationNode>, // 根节点 (工艺可为空树)
}

impl RoutingTree {
    pub fn new(root: OperationNode) -> Self {
        Self { root: Some(root) }
    }

    pub fn empty() -> Self {
        Self { root: None }
    }

    /// 展平视图: 根节点及全部后代 (遍历顺序对汇总无语义)
    pub fn all_nodes(&self) -> Vec<&OperationNode> {
        let mut nodes = Vec::new();
        let mut stack: Vec<&OperationNode> = self.root.iter().collect();
        while let Some(node) = stack.pop() {
            nodes.push(node);
            stack.extend(node.children.iter());
        }
        nodes
    }

    /// 树内节点总数
    pub fn node_count(&self) -> usize {
        self.all_nodes().len()
    }
}

// ==========================================
// Technology - 工艺
// ==========================================
// 汇总算法选择器挂在工艺上,不挂在树上
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technology {
    pub number: String,               // 工艺号
    pub name: String,                 // 工艺名称
    pub algorithm: QuantityAlgorithm, // 组件数量算法
    pub routing: RoutingTree,         // 工艺路线树
}

impl Technology {
    pub fn new(number: &str, name: &str, algorithm: QuantityAlgorithm, routing: RoutingTree) -> Self {
        Self {
            number: number.to_string(),
            name: name.to_string(),
            algorithm,
            routing,
        }
    }
}
