// ==========================================
// 工艺物料需求汇总系统 - 数量传导纯函数库
// ==========================================
// 职责: 工艺树遍历与数量缩放的纯逻辑
// 红线: 无状态、无副作用、无 I/O 操作
// 红线: 校验失败即整体失败,不保留部分结果
// ==========================================

use crate::domain::catalog::Material;
use crate::domain::routing::{MaterialLine, OperationNode, RoutingTree};
use crate::engine::types::{NodeQuantities, StructuralDefect};
use rust_decimal::Decimal;

// ==========================================
// PropagationCore - 纯函数工具类
// ==========================================
pub struct PropagationCore;

impl PropagationCore {
    /// 校验节点结构 (按产出反算的前置条件)
    ///
    /// # 规则
    /// 1. 非废料产出行恰好 1 行 (0 行或多行均无法反算)
    /// 2. 该产出行数量为正 (作为比例分母,零值按结构缺陷处理)
    /// 3. 至少 1 行投入物料
    ///
    /// # 返回
    /// - Ok(&MaterialLine): 唯一非废料产出行
    /// - Err(StructuralDefect): 校验未通过
    pub fn validate_node(node: &OperationNode) -> Result<&MaterialLine, StructuralDefect> {
        let outputs: Vec<&MaterialLine> = node.non_waste_outputs().collect();
        if outputs.len() != 1 {
            return Err(StructuralDefect::OutputNotUnique {
                operation: node.operation.number.clone(),
                count: outputs.len(),
            });
        }
        let output = outputs[0];
        if output.quantity <= Decimal::ZERO {
            return Err(StructuralDefect::OutputQuantityNotPositive {
                operation: node.operation.number.clone(),
            });
        }
        if node.input_lines.is_empty() {
            return Err(StructuralDefect::NoInputLines {
                operation: node.operation.number.clone(),
            });
        }
        Ok(output)
    }

    /// 在直接子节点中查找产出指定物料的前道工序
    ///
    /// 匹配口径: 子节点任一非废料产出行的物料号与投入物料号一致
    /// 复杂度: 每条投入行 O(子节点数),树扇出预期很小
    pub fn find_predecessor<'t>(
        node: &'t OperationNode,
        material: &Material,
    ) -> Option<&'t OperationNode> {
        node.children.iter().find(|child| {
            child
                .non_waste_outputs()
                .any(|output| output.material.number == material.number)
        })
    }

    /// 展平遍历 (按工艺总量算法)
    ///
    /// 每个节点的每条投入行按 行用量 × 计划数量 记录
    /// 不做结构校验,永不失败 (与按产出反算的口径不对称,保持主数据既有行为)
    pub fn flat_quantities<'t>(
        tree: &'t RoutingTree,
        planned_quantity: Decimal,
    ) -> Vec<NodeQuantities<'t>> {
        tree.all_nodes()
            .into_iter()
            .map(|node| NodeQuantities {
                node,
                lines: node
                    .input_lines
                    .iter()
                    .map(|line| (&line.material, line.quantity * planned_quantity))
                    .collect(),
            })
            .collect()
    }

    /// 回溯递归 (按产出反算算法)
    ///
    /// 自根节点以 incoming = 计划数量 进入,对每条投入行:
    ///   ratio = 行用量 × incoming / 产出行数量
    /// 子节点中存在产出该物料的前道工序时,以 ratio 递归进入该工序
    /// (该行物料为内部产出的中间品,自身不记录);否则该行为外购/原料
    /// 投入,按 ratio 记录在本节点名下
    ///
    /// # 参数
    /// - incoming: 下游对本工序产出的需求数量
    /// - depth/max_depth: 递归深度兜底 (畸形树防线)
    ///
    /// # 返回
    /// - Ok(Vec<NodeQuantities>): 本子树全部节点的数量记录
    /// - Err(StructuralDefect): 子树内任一节点校验失败,整体作废
    pub fn back_propagate<'t>(
        node: &'t OperationNode,
        incoming: Decimal,
        depth: usize,
        max_depth: usize,
    ) -> Result<Vec<NodeQuantities<'t>>, StructuralDefect> {
        if depth >= max_depth {
            return Err(StructuralDefect::DepthLimitExceeded {
                operation: node.operation.number.clone(),
                max_depth,
            });
        }

        let output = Self::validate_node(node)?;

        let mut records = Vec::new();
        let mut own = NodeQuantities {
            node,
            lines: Vec::new(),
        };

        for line in &node.input_lines {
            let ratio = line
                .quantity
                .checked_mul(incoming)
                .and_then(|scaled| scaled.checked_div(output.quantity))
                .ok_or_else(|| StructuralDefect::RatioOverflow {
                    operation: node.operation.number.clone(),
                    material: line.material.number.clone(),
                })?;

            match Self::find_predecessor(node, &line.material) {
                Some(predecessor) => {
                    // 中间品: 需求传导给前道工序
                    let mut upstream =
                        Self::back_propagate(predecessor, ratio, depth + 1, max_depth)?;
                    records.append(&mut upstream);
                }
                None => {
                    // 外购/原料投入: 无前道工序,按比例记录
                    own.lines.push((&line.material, ratio));
                }
            }
        }

        records.push(own);
        Ok(records)
    }
}
