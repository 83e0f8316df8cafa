// ==========================================
// 商品目录对账导出 - 字段合并策略
// ==========================================
// 规则: 每个字段一条来源优先链，取第一个“非空”值
// 非空: 非 None、TRIM 后非空、不是占位值；价格另需 > 0
// ==========================================
// | 字段           | 优先链                                   |
// |----------------|------------------------------------------|
// | name_lv        | 数据库 → 价目表 LV → 价目表 EN           |
// | name_en        | 价目表 EN                                |
// | description_lv | 数据库                                   |
// | price          | 价目表 → 数据库                          |
// | brand          | 品牌表                                   |
// | ean            | 价目表                                   |
// | images         | 本地图片 → 数据库远程 URL                |
// ==========================================

use crate::domain::{DbProductRecord, PricelistRecord};

/// 合并后的字段集合（尚未分配类目与 ID）
#[derive(Debug, Clone, PartialEq)]
pub struct MergedFields {
    pub name_lv: String,
    pub name_en: String,
    pub description_lv: String,
    pub price: Option<f64>,
    pub brand: String,
    pub ean: String,
    pub images: Vec<String>,
}

// ==========================================
// MergePolicy
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct MergePolicy {
    absent_markers: Vec<String>,
}

impl MergePolicy {
    pub fn new<I, S>(absent_markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            absent_markers: absent_markers
                .into_iter()
                .map(|m| Into::<String>::into(m).trim().to_string())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// 文本是否视为存在
    pub fn is_present(&self, value: &str) -> bool {
        let trimmed = value.trim();
        !trimmed.is_empty() && !self.absent_markers.iter().any(|m| m == trimmed)
    }

    /// 取第一个存在的文本，全部缺失 → ""
    pub fn first_text<'a, I>(&self, candidates: I) -> String
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        candidates
            .into_iter()
            .flatten()
            .find(|v| self.is_present(v))
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// 取第一个有效价格（有限且 > 0）
    pub fn first_price<I>(&self, candidates: I) -> Option<f64>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        candidates
            .into_iter()
            .flatten()
            .find(|p| p.is_finite() && *p > 0.0)
    }

    /// 取第一个非空图片列表（列表内剔除空 URL）
    pub fn first_images<I>(&self, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        candidates
            .into_iter()
            .map(|list| {
                list.into_iter()
                    .filter(|url| !url.trim().is_empty())
                    .collect::<Vec<_>>()
            })
            .find(|list| !list.is_empty())
            .unwrap_or_default()
    }

    pub fn name_lv(&self, pl: Option<&PricelistRecord>, db: Option<&DbProductRecord>) -> String {
        self.first_text([
            db.and_then(|d| d.name_lv.as_deref()),
            pl.and_then(|p| p.name_lv.as_deref()),
            pl.and_then(|p| p.name_en.as_deref()),
        ])
    }

    pub fn name_en(&self, pl: Option<&PricelistRecord>) -> String {
        self.first_text([pl.and_then(|p| p.name_en.as_deref())])
    }

    pub fn description_lv(&self, db: Option<&DbProductRecord>) -> String {
        self.first_text([db.and_then(|d| d.description_lv.as_deref())])
    }

    pub fn price(&self, pl: Option<&PricelistRecord>, db: Option<&DbProductRecord>) -> Option<f64> {
        self.first_price([pl.and_then(|p| p.price), db.and_then(|d| d.price)])
    }

    pub fn brand(&self, brand: Option<&str>) -> String {
        self.first_text([brand])
    }

    pub fn ean(&self, pl: Option<&PricelistRecord>) -> String {
        self.first_text([pl.and_then(|p| p.ean.as_deref())])
    }

    pub fn images(&self, local: Vec<String>, db: Option<&DbProductRecord>) -> Vec<String> {
        self.first_images([local, db.map(|d| d.images.clone()).unwrap_or_default()])
    }

    /// 合并单个 SKU 的全部字段
    pub fn merge(
        &self,
        pl: Option<&PricelistRecord>,
        db: Option<&DbProductRecord>,
        brand: Option<&str>,
        local_images: Vec<String>,
    ) -> MergedFields {
        MergedFields {
            name_lv: self.name_lv(pl, db),
            name_en: self.name_en(pl),
            description_lv: self.description_lv(db),
            price: self.price(pl, db),
            brand: self.brand(brand),
            ean: self.ean(pl),
            images: self.images(local_images, db),
        }
    }
}
