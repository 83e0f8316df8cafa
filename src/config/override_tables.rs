// ==========================================
// 商品目录对账导出 - 类目覆写表
// ==========================================
// 章节映射: 价目表两位章节号 → 店面类目 ID
// SKU 覆写: 人工纠正的错放商品（最高优先级）
// ==========================================

use crate::domain::types::CategoryId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// OverrideTables - 覆写表（作为显式输入传入引擎）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverrideTables {
    /// 章节号（"01".."22"）→ 类目 ID
    pub chapter_to_category: BTreeMap<String, CategoryId>,

    /// SKU（原样或大写）→ 类目 ID
    pub sku_category_overrides: BTreeMap<String, CategoryId>,
}

impl Default for OverrideTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl OverrideTables {
    /// 空表（测试或完全由配置文件提供时使用）
    pub fn empty() -> Self {
        Self {
            chapter_to_category: BTreeMap::new(),
            sku_category_overrides: BTreeMap::new(),
        }
    }

    /// 店面内置表
    pub fn builtin() -> Self {
        Self {
            chapter_to_category: builtin_chapter_map(),
            sku_category_overrides: builtin_sku_overrides(),
        }
    }

    pub fn with_chapter(mut self, chapter: &str, category_id: CategoryId) -> Self {
        self.chapter_to_category
            .insert(chapter.to_string(), category_id);
        self
    }

    pub fn with_sku_override(mut self, sku: &str, category_id: CategoryId) -> Self {
        self.sku_category_overrides
            .insert(sku.to_string(), category_id);
        self
    }

    /// 按键原样查找 SKU 覆写（不做任何规范化）
    pub fn sku_override(&self, sku: &str) -> Option<CategoryId> {
        self.sku_category_overrides.get(sku).copied()
    }

    /// 章节映射
    pub fn chapter_category(&self, chapter: &str) -> Option<CategoryId> {
        self.chapter_to_category.get(chapter).copied()
    }
}

// 14 章（一次性用品）不在价目表中，对应类目 11 只能来自数据库
fn builtin_chapter_map() -> BTreeMap<String, CategoryId> {
    [
        ("01", 2),  // Flat and Curling Irons
        ("02", 1),  // Hair Dryers
        ("03", 3),  // Hair Clippers
        ("04", 4),  // Barber and Accessories
        ("05", 8),  // Scissors
        ("06", 6),  // Combs
        ("07", 5),  // Brushes
        ("08", 9),  // Colouring and Styling
        ("09", 18), // Hair Extensions and Coiffure
        ("10", 10), // Hair Accessories
        ("11", 19), // Training Heads
        ("12", 21), // Cases and Bags
        ("13", 20), // Apparel and Clothing
        ("15", 12), // Sterilization and Hygiene
        ("16", 22), // Furnishings
        ("17", 16), // Hair Removal
        ("18", 14), // Manicure and Nails
        ("19", 7),  // Steel Tools
        ("20", 15), // Pedicure
        ("21", 17), // Wellness and Treatment Tools
        ("22", 13), // Make-Up and Eyelashes
    ]
    .into_iter()
    .map(|(chapter, id)| (chapter.to_string(), id))
    .collect()
}

fn builtin_sku_overrides() -> BTreeMap<String, CategoryId> {
    [
        // 洗发/护发 → 09 Colouring and Styling
        ("3822", 9),
        ("54308", 9),
        ("CRL350", 9),
        ("SRL350", 9),
        ("SRM350", 9),
        ("SRR350", 9),
        ("45493", 9),
        // 卷发棒/直发夹 → 02
        ("54022", 2),
        // 源数据中带不间断空格，按原样匹配
        ("B132 \u{a0} \u{a0} \u{a0}B133", 2),
        ("B255TL-1", 2),
        ("UG09", 2),
        ("UG125", 2),
        ("UG156", 2),
        ("UG157", 2),
        ("UG170", 2),
        ("B507", 3),   // 推剪
        ("B805", 16),  // 脱毛器
        ("E374", 15),  // 磨盘
        ("B348 B349 B350 B351", 1), // 迷你吹风机
        // 热风梳 → 05 Brushes
        ("C820", 5),
        ("C821", 5),
        ("C822", 5),
        ("C830", 5),
        ("E390", 1),  // 扩散罩
        ("B904", 9),  // 分叉修剪器
        ("HC TRAVEL DRY SHAMPOO", 9),
        ("H306", 16), // 蜡溶解剂
        // 足疗磨盘 → 15 Pedicure
        ("E341", 15),
        ("E350", 15),
        ("E353", 15),
        ("E354", 15),
        ("E355/B", 15),
        ("E356", 15),
        ("E357", 15),
        ("E361", 15),
        ("E369", 15),
        ("E359", 2),  // 直发夹
        ("B053", 22), // 吸尘罩
        ("E346", 15),
        ("ST TRAVEL SILK PERFUME", 9),
        ("H140A", 9), // 铝箔卷
        ("H827", 17), // 洁面刷
        // 睫毛/彩妆 → 13
        ("32941", 13),
        ("IN007", 13),
        ("IN011", 13),
        ("IN012", 13),
        ("IN013", 13),
        ("F730", 20),  // 日光浴眼镜
        ("W042", 1),
        ("59208", 9),  // 湿巾
        ("59231", 1),
        ("E336", 14),  // 抛光块
        ("G003", 11),  // 一次性围裙
    ]
    .into_iter()
    .map(|(sku, id)| (sku.to_string(), id))
    .collect()
}
