// ==========================================
// 商品目录对账导出 - 目录组装
// ==========================================
// 步骤: 类目计数（单次扫描）→ 商品按 (category_id, sku) 排序
//       → 重新分配 ID 1..N → 类目按编号排序
// 说明: ID 仅表示位置，同样输入每次运行结果一致
// ==========================================

use crate::domain::{CanonicalProduct, Catalog, Category, CategoryId};
use std::collections::HashMap;

pub fn assemble<I>(mut categories: Vec<Category>, products: I) -> Catalog
where
    I: IntoIterator<Item = CanonicalProduct>,
{
    let mut products: Vec<CanonicalProduct> = products.into_iter().collect();

    // === 计数 ===
    let mut counts: HashMap<CategoryId, usize> = HashMap::new();
    for product in &products {
        *counts.entry(product.category_id).or_insert(0) += 1;
    }
    for category in &mut categories {
        category.product_count = counts.get(&category.id).copied().unwrap_or(0);
    }

    // === 排序 + 重新编号 ===
    products.sort_by(|a, b| {
        a.category_id
            .cmp(&b.category_id)
            .then_with(|| a.sku.cmp(&b.sku))
    });
    for (idx, product) in products.iter_mut().enumerate() {
        product.id = idx + 1;
    }

    categories.sort_by_key(Category::sort_key);

    Catalog {
        categories,
        products,
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
            slug: format!("c{}", id),
            product_count: 7, // 旧值必须被覆盖
        }
    }

    fn product(sku: &str, category_id: CategoryId) -> CanonicalProduct {
        CanonicalProduct {
            id: 0,
            sku: sku.to_string(),
            name_lv: String::new(),
            name_en: String::new(),
            description_lv: String::new(),
            price: None,
            category_id,
            category_slug: format!("c{}", category_id),
            brand: String::new(),
            ean: String::new(),
            images: vec![],
        }
    }

    #[test]
    fn test_assemble_sorts_counts_and_numbers() {
        let catalog = assemble(
            vec![category(15, "20"), category(2, "01"), category(9, "08")],
            vec![
                product("E350", 15),
                product("B132", 2),
                product("E341", 15),
                product("54022", 2),
            ],
        );

        let order: Vec<_> = catalog
            .products
            .iter()
            .map(|p| (p.id, p.sku.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![(1, "54022"), (2, "B132"), (3, "E341"), (4, "E350")]
        );

        let cats: Vec<_> = catalog
            .categories
            .iter()
            .map(|c| (c.id, c.product_count))
            .collect();
        assert_eq!(cats, vec![(2, 2), (9, 0), (15, 2)]);
        assert_eq!(catalog.total_product_count(), catalog.products.len());
    }

    #[test]
    fn test_assemble_is_input_order_independent() {
        let cats = vec![category(1, "01"), category(2, "02")];
        let a = assemble(
            cats.clone(),
            vec![product("B", 2), product("A", 1), product("C", 1)],
        );
        let b = assemble(
            cats,
            vec![product("C", 1), product("B", 2), product("A", 1)],
        );
        assert_eq!(a, b);
    }
}
