use serde::{Deserialize, Serialize};

/// 汇总参数档案 (调用方级配置)
///
/// 随每次汇总调用传入,引擎自身不持有配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationProfile {
    /// 仅统计组件类物料 (过滤非 01component 类别)
    #[serde(default)]
    pub only_components: bool,

    /// 按产出反算的递归深度上限 (畸形树兜底,正常树深远小于此值)
    #[serde(default = "default_max_recursion_depth")]
    pub max_recursion_depth: usize,
}

fn default_max_recursion_depth() -> usize {
    64
}

impl Default for AggregationProfile {
    fn default() -> Self {
        Self {
            only_components: false,
            max_recursion_depth: default_max_recursion_depth(),
        }
    }
}

impl AggregationProfile {
    /// 仅组件口径的档案
    pub fn components_only() -> Self {
        Self {
            only_components: true,
            ..Self::default()
        }
    }
}
