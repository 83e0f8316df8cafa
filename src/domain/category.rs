// ==========================================
// 商品目录对账导出 - 类目领域模型
// ==========================================
// 对齐: categories 表 / categories.json
// ==========================================

use crate::domain::types::CategoryId;
use serde::{Deserialize, Serialize};

// ==========================================
// Category - 店面类目
// ==========================================
// 生命周期: 从数据库加载一次，仅计数步骤修改 product_count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,   // 类目 ID（1..22）
    pub number: String,   // 两位编号（sort_order 补零）
    pub name_en: String,  // 英文名
    pub name_lv: String,  // 拉脱维亚语名
    pub slug: String,     // URL 段
    #[serde(rename = "productCount")]
    pub product_count: usize, // 派生：引用该类目的商品数
}

impl Category {
    /// 由 sort_order 生成两位编号（7 → "07"）
    pub fn format_number(sort_order: i64) -> String {
        format!("{:02}", sort_order)
    }

    /// 排序键：按编号数值升序，编号相同按 ID
    pub fn sort_key(&self) -> (i64, CategoryId) {
        let number = self.number.trim().parse::<i64>().unwrap_or(i64::MAX);
        (number, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: CategoryId, number: &str) -> Category {
        Category {
            id,
            number: number.to_string(),
            name_en: String::new(),
            name_lv: String::new(),
            slug: format!("cat-{}", id),
            product_count: 0,
        }
    }

    #[test]
    fn test_format_number_pads_two_digits() {
        assert_eq!(Category::format_number(7), "07");
        assert_eq!(Category::format_number(22), "22");
    }

    #[test]
    fn test_sort_key_is_numeric() {
        let mut list = vec![category(3, "10"), category(1, "02"), category(2, "9")];
        list.sort_by_key(Category::sort_key);
        let ids: Vec<_> = list.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_serialize_uses_product_count_camel_case() {
        let json = serde_json::to_value(category(1, "01")).unwrap();
        assert!(json.get("productCount").is_some());
        assert!(json.get("product_count").is_none());
    }
}
