use super::*;
use crate::config::AggregationProfile;
use crate::domain::catalog::Material;
use crate::domain::order::Order;
use crate::domain::routing::{MaterialLine, Operation, OperationNode, RoutingTree, Technology};
use crate::domain::types::{MaterialKind, QuantityAlgorithm};
use crate::engine::types::{SkipReason, StructuralDefect};
use rust_decimal::Decimal;

// ==========================================
// 测试辅助函数
// ==========================================

fn line(number: &str, kind: MaterialKind, quantity: i64) -> MaterialLine {
    MaterialLine::new(Material::new(number, number, kind), Decimal::from(quantity))
}

fn node(node_id: &str, operation_number: &str) -> OperationNode {
    OperationNode::new(node_id, Operation::new(operation_number, operation_number))
}

fn technology(algorithm: QuantityAlgorithm, root: OperationNode) -> Technology {
    Technology::new("T-1", "测试工艺", algorithm, RoutingTree::new(root))
}

fn order(number: &str, planned_quantity: i64, technology: Technology) -> Order {
    Order::new(number, number)
        .with_planned_quantity(Decimal::from(planned_quantity))
        .with_technology(technology)
}

/// 两级链: 根工序每 1 件产出消耗 2 件 M,前道工序批产 5 件 M 消耗 3 件 X
fn two_stage_technology() -> Technology {
    let predecessor = node("N2", "OP-2")
        .with_input(line("X", MaterialKind::Component, 3))
        .with_output(line("M", MaterialKind::Intermediate, 5));
    let root = node("N1", "OP-1")
        .with_input(line("M", MaterialKind::Intermediate, 2))
        .with_output(line("P", MaterialKind::FinalProduct, 1))
        .with_child(predecessor);
    technology(QuantityAlgorithm::PerOutputProduct, root)
}

// ==========================================
// 按工艺总量算法
// ==========================================

#[test]
fn test_flat_sums_every_node_line() {
    let child = node("N2", "OP-2").with_input(line("X", MaterialKind::Component, 3));
    let root = node("N1", "OP-1")
        .with_input(line("M", MaterialKind::Intermediate, 2))
        .with_input(line("X", MaterialKind::Component, 1))
        .with_child(child);
    let order = order("ZAM-1", 10, technology(QuantityAlgorithm::PerTechnology, root));

    let engine = RequirementsEngine::new();
    let totals = engine
        .aggregate_order(&order, &AggregationProfile::default())
        .unwrap();

    // 同物料跨节点/跨行累加
    assert_eq!(totals.get("X"), Some(Decimal::from(40)));
    assert_eq!(totals.get("M"), Some(Decimal::from(20)));
}

#[test]
fn test_flat_scale_linearity() {
    // 计划数量翻倍,每个物料需求精确翻倍
    let build = |qty: i64| {
        let root = node("N1", "OP-1")
            .with_input(line("X", MaterialKind::Component, 3))
            .with_input(line("Y", MaterialKind::Intermediate, 7));
        order("ZAM-1", qty, technology(QuantityAlgorithm::PerTechnology, root))
    };

    let engine = RequirementsEngine::new();
    let profile = AggregationProfile::default();
    let single = engine.aggregate_order(&build(10), &profile).unwrap();
    let double = engine.aggregate_order(&build(20), &profile).unwrap();

    for (number, quantity) in &single.quantities {
        assert_eq!(double.get(number), Some(quantity * Decimal::from(2)));
    }
}

#[test]
fn test_flat_never_validates_outputs() {
    // 两条非废料产出行在按工艺总量口径下不构成失败
    let root = node("N1", "OP-1")
        .with_input(line("X", MaterialKind::Component, 1))
        .with_output(line("P1", MaterialKind::FinalProduct, 1))
        .with_output(line("P2", MaterialKind::FinalProduct, 1));
    let order = order("ZAM-1", 5, technology(QuantityAlgorithm::PerTechnology, root));

    let totals = RequirementsEngine::new()
        .aggregate_order(&order, &AggregationProfile::default())
        .unwrap();
    assert_eq!(totals.get("X"), Some(Decimal::from(5)));
}

#[test]
fn test_flat_empty_routing_is_empty_success() {
    let technology = Technology::new(
        "T-0",
        "空工艺",
        QuantityAlgorithm::PerTechnology,
        RoutingTree::empty(),
    );
    let order = Order::new("ZAM-1", "ZAM-1")
        .with_planned_quantity(Decimal::from(10))
        .with_technology(technology);

    let totals = RequirementsEngine::new()
        .aggregate_order(&order, &AggregationProfile::default())
        .unwrap();
    assert!(totals.is_empty());
}

// ==========================================
// 按产出反算算法
// ==========================================

#[test]
fn test_backprop_ratio_propagation() {
    // 计划 10 件: 中间品 M 不出现,原料 X = 3 × (2×10/5) = 12
    let order = order("ZAM-1", 10, two_stage_technology());

    let totals = RequirementsEngine::new()
        .aggregate_order(&order, &AggregationProfile::default())
        .unwrap();

    assert_eq!(totals.get("X"), Some(Decimal::from(12)));
    assert_eq!(totals.get("M"), None);
    assert_eq!(totals.len(), 1);
}

#[test]
fn test_backprop_raw_input_without_predecessor() {
    // 叶子投入恰好 行用量 × (计划数量/产出数量)
    let root = node("N1", "OP-1")
        .with_input(line("X", MaterialKind::Component, 4))
        .with_output(line("P", MaterialKind::FinalProduct, 2));
    let order = order("ZAM-1", 6, technology(QuantityAlgorithm::PerOutputProduct, root));

    let totals = RequirementsEngine::new()
        .aggregate_order(&order, &AggregationProfile::default())
        .unwrap();
    assert_eq!(totals.get("X"), Some(Decimal::from(12)));
}

#[test]
fn test_backprop_two_outputs_fails_whole_order() {
    // 根节点两条非废料产出: 整单作废,后代再规整也不保留
    let good_child = node("N2", "OP-2")
        .with_input(line("X", MaterialKind::Component, 1))
        .with_output(line("M", MaterialKind::Intermediate, 1));
    let root = node("N1", "OP-1")
        .with_input(line("M", MaterialKind::Intermediate, 1))
        .with_output(line("P1", MaterialKind::FinalProduct, 1))
        .with_output(line("P2", MaterialKind::FinalProduct, 1))
        .with_child(good_child);
    let order = order("ZAM-1", 10, technology(QuantityAlgorithm::PerOutputProduct, root));

    let reason = RequirementsEngine::new()
        .aggregate_order(&order, &AggregationProfile::default())
        .unwrap_err();
    assert_eq!(
        reason,
        SkipReason::Structural {
            order: "ZAM-1".to_string(),
            defect: StructuralDefect::OutputNotUnique {
                operation: "OP-1".to_string(),
                count: 2,
            },
        }
    );
}

#[test]
fn test_backprop_empty_routing_skips_order() {
    let technology = Technology::new(
        "T-0",
        "空工艺",
        QuantityAlgorithm::PerOutputProduct,
        RoutingTree::empty(),
    );
    let order = Order::new("ZAM-1", "ZAM-1")
        .with_planned_quantity(Decimal::from(10))
        .with_technology(technology);

    let reason = RequirementsEngine::new()
        .aggregate_order(&order, &AggregationProfile::default())
        .unwrap_err();
    assert_eq!(
        reason,
        SkipReason::EmptyRouting {
            order: "ZAM-1".to_string(),
        }
    );
}

// ==========================================
// onlyComponents 过滤
// ==========================================

#[test]
fn test_only_components_filter_flat() {
    let root = node("N1", "OP-1")
        .with_input(line("X", MaterialKind::Component, 3))
        .with_input(line("M", MaterialKind::Intermediate, 2))
        .with_input(line("W", MaterialKind::Waste, 1));
    let order = order("ZAM-1", 10, technology(QuantityAlgorithm::PerTechnology, root));

    let totals = RequirementsEngine::new()
        .aggregate_order(&order, &AggregationProfile::components_only())
        .unwrap();

    assert_eq!(totals.get("X"), Some(Decimal::from(30)));
    assert_eq!(totals.get("M"), None);
    assert_eq!(totals.get("W"), None);
}

#[test]
fn test_only_components_filter_does_not_block_recursion() {
    // 中间品行被过滤不影响递归: 其前道工序的组件原料照常浮出
    let order = order("ZAM-1", 10, two_stage_technology());

    let totals = RequirementsEngine::new()
        .aggregate_order(&order, &AggregationProfile::components_only())
        .unwrap();

    assert_eq!(totals.get("X"), Some(Decimal::from(12)));
    assert_eq!(totals.len(), 1);
}

// ==========================================
// 订单前置条件
// ==========================================

#[test]
fn test_missing_technology_skips_order() {
    let order = Order::new("ZAM-1", "ZAM-1").with_planned_quantity(Decimal::from(10));
    let reason = RequirementsEngine::new()
        .aggregate_order(&order, &AggregationProfile::default())
        .unwrap_err();
    assert_eq!(
        reason,
        SkipReason::MissingTechnology {
            order: "ZAM-1".to_string(),
        }
    );
}

#[test]
fn test_non_positive_planned_quantity_skips_order() {
    let root = node("N1", "OP-1").with_input(line("X", MaterialKind::Component, 1));
    let engine = RequirementsEngine::new();
    let profile = AggregationProfile::default();

    // 缺失
    let missing = Order::new("ZAM-1", "ZAM-1")
        .with_technology(technology(QuantityAlgorithm::PerTechnology, root.clone()));
    assert!(matches!(
        engine.aggregate_order(&missing, &profile),
        Err(SkipReason::InvalidPlannedQuantity { .. })
    ));

    // 零值
    let zero = Order::new("ZAM-2", "ZAM-2")
        .with_planned_quantity(Decimal::ZERO)
        .with_technology(technology(QuantityAlgorithm::PerTechnology, root));
    assert!(matches!(
        engine.aggregate_order(&zero, &profile),
        Err(SkipReason::InvalidPlannedQuantity { .. })
    ));
}

// ==========================================
// 批量驱动
// ==========================================

#[test]
fn test_batch_additivity_for_disjoint_orders() {
    // 两个订单无共享物料: 批量结果等于两单结果的键级并集
    let order_a = order("ZAM-A", 10, two_stage_technology());
    let root_b = node("N1", "OP-1")
        .with_input(line("Y", MaterialKind::Component, 2))
        .with_input(line("Z", MaterialKind::Component, 5));
    let order_b = order("ZAM-B", 3, technology(QuantityAlgorithm::PerTechnology, root_b));

    let engine = RequirementsEngine::new();
    let profile = AggregationProfile::default();

    let merged = engine.aggregate_orders(&[order_a.clone(), order_b.clone()], &profile);
    let totals_a = engine.aggregate_order(&order_a, &profile).unwrap();
    let totals_b = engine.aggregate_order(&order_b, &profile).unwrap();

    assert_eq!(merged.len(), totals_a.len() + totals_b.len());
    for (number, quantity) in totals_a.quantities.iter().chain(totals_b.quantities.iter()) {
        assert_eq!(merged.get(number), Some(*quantity));
    }
}

#[test]
fn test_batch_merges_shared_materials_additively() {
    let build = |number: &str, qty: i64| {
        let root = node("N1", "OP-1").with_input(line("X", MaterialKind::Component, 2));
        order(number, qty, technology(QuantityAlgorithm::PerTechnology, root))
    };

    let merged = RequirementsEngine::new().aggregate_orders(
        &[build("ZAM-A", 10), build("ZAM-B", 5)],
        &AggregationProfile::default(),
    );
    assert_eq!(merged.get("X"), Some(Decimal::from(30)));
}

#[test]
fn test_batch_skips_failed_orders_and_continues() {
    // 结构缺陷订单被跳过,其余订单照常计入
    let bad_root = node("N1", "OP-1")
        .with_input(line("X", MaterialKind::Component, 1))
        .with_output(line("P1", MaterialKind::FinalProduct, 1))
        .with_output(line("P2", MaterialKind::FinalProduct, 1));
    let bad = order("ZAM-BAD", 10, technology(QuantityAlgorithm::PerOutputProduct, bad_root));
    let good = order("ZAM-GOOD", 10, two_stage_technology());
    let no_technology = Order::new("ZAM-EMPTY", "ZAM-EMPTY").with_planned_quantity(Decimal::from(1));

    let engine = RequirementsEngine::new();
    let (totals, summary) = engine.aggregate_orders_detailed(
        &[bad, good, no_technology],
        &AggregationProfile::default(),
    );

    assert_eq!(summary.total_orders, 3);
    assert_eq!(summary.aggregated_orders, 1);
    assert_eq!(summary.skipped_orders, 2);
    assert_eq!(totals.get("X"), Some(Decimal::from(12)));
    assert_eq!(totals.len(), 1);
    assert_eq!(summary.material_count, 1);
}
